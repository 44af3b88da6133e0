//! Inbound signal-integrity screening.
//!
//! Pure functions: a sample plus the policy's quality thresholds yields an
//! ordered list of findings. Mapping findings to a decision is the engine's
//! job (it depends on the configured inbound enforcement mode), so nothing
//! here produces a [`crate::verdict::Decision`].

use crate::message::SignalSample;
use crate::policy::SignalThresholds;
use crate::verdict::Violation;

/// Screen one sample against the quality thresholds.
///
/// Every check runs independently; each failure contributes one finding, in
/// fixed order, so a degraded sample can report several violations at once.
pub fn validate_sample(sample: &SignalSample, thresholds: &SignalThresholds) -> Vec<Violation> {
    let mut findings = Vec::new();

    if !thresholds.impedance_kohm.contains(sample.impedance_kohm) {
        findings.push(Violation::ImpedanceOutOfRange);
    }
    if sample.snr_db < thresholds.snr_floor_db {
        findings.push(Violation::SnrBelowFloor);
    }
    if !thresholds.spike_rate_hz.contains(sample.spike_rate_hz) {
        findings.push(Violation::SpikeRateOutOfRange);
    }
    if sample.consistency < thresholds.consistency_floor {
        findings.push(Violation::ConsistencyBelowFloor);
    }
    if sample.coherence < thresholds.coherence_floor {
        findings.push(Violation::CoherenceCollapse);
    }
    if sample.anomaly_score > thresholds.anomaly_ceiling {
        findings.push(Violation::AnomalyScoreExceeded);
    }
    if !sample.source_verified {
        findings.push(Violation::UnverifiedSource);
    }

    findings
}

#[cfg(test)]
mod tests;
