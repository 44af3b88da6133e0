use super::*;
use crate::verdict::{max_severity, AlertLevel};
use chrono::Utc;

fn nominal_sample() -> SignalSample {
    SignalSample {
        region: "M1".into(),
        impedance_kohm: 250.0,
        snr_db: 15.0,
        spike_rate_hz: 50.0,
        signal_rate_hz: 50.0,
        consistency: 0.9,
        coherence: 0.8,
        anomaly_score: 0.2,
        source_verified: true,
        timestamp: Utc::now(),
    }
}

fn thresholds() -> SignalThresholds {
    SignalThresholds::default()
}

// ── Clean pass ───────────────────────────────────────────

#[test]
fn nominal_sample_has_no_findings() {
    assert!(validate_sample(&nominal_sample(), &thresholds()).is_empty());
}

// ── Individual checks ────────────────────────────────────

#[test]
fn impedance_too_high_flags_open_circuit() {
    let sample = SignalSample {
        impedance_kohm: 5000.0,
        ..nominal_sample()
    };
    assert_eq!(
        validate_sample(&sample, &thresholds()),
        vec![Violation::ImpedanceOutOfRange]
    );
}

#[test]
fn impedance_too_low_flags_short_circuit() {
    let sample = SignalSample {
        impedance_kohm: 0.5,
        ..nominal_sample()
    };
    assert_eq!(
        validate_sample(&sample, &thresholds()),
        vec![Violation::ImpedanceOutOfRange]
    );
}

#[test]
fn snr_below_floor_is_flagged() {
    let sample = SignalSample {
        snr_db: 2.0,
        ..nominal_sample()
    };
    assert_eq!(
        validate_sample(&sample, &thresholds()),
        vec![Violation::SnrBelowFloor]
    );
}

#[test]
fn spike_rate_surge_is_flagged() {
    let sample = SignalSample {
        spike_rate_hz: 500.0,
        ..nominal_sample()
    };
    assert_eq!(
        validate_sample(&sample, &thresholds()),
        vec![Violation::SpikeRateOutOfRange]
    );
}

#[test]
fn consistency_below_floor_is_flagged() {
    let sample = SignalSample {
        consistency: 0.2,
        ..nominal_sample()
    };
    assert_eq!(
        validate_sample(&sample, &thresholds()),
        vec![Violation::ConsistencyBelowFloor]
    );
}

#[test]
fn coherence_collapse_is_critical() {
    let sample = SignalSample {
        coherence: 0.1,
        ..nominal_sample()
    };
    let findings = validate_sample(&sample, &thresholds());
    assert_eq!(findings, vec![Violation::CoherenceCollapse]);
    assert_eq!(max_severity(&findings), AlertLevel::Critical);
}

#[test]
fn anomaly_score_breach_is_critical() {
    let sample = SignalSample {
        anomaly_score: 0.95,
        ..nominal_sample()
    };
    let findings = validate_sample(&sample, &thresholds());
    assert_eq!(findings, vec![Violation::AnomalyScoreExceeded]);
    assert_eq!(max_severity(&findings), AlertLevel::Critical);
}

#[test]
fn unverified_source_is_flagged_as_warning() {
    let sample = SignalSample {
        source_verified: false,
        ..nominal_sample()
    };
    let findings = validate_sample(&sample, &thresholds());
    assert_eq!(findings, vec![Violation::UnverifiedSource]);
    assert_eq!(max_severity(&findings), AlertLevel::Warning);
}

// ── Accumulation & ordering ──────────────────────────────

#[test]
fn multiple_failures_accumulate_in_fixed_order() {
    let sample = SignalSample {
        impedance_kohm: 5000.0,
        snr_db: 1.0,
        coherence: 0.05,
        anomaly_score: 0.99,
        ..nominal_sample()
    };
    assert_eq!(
        validate_sample(&sample, &thresholds()),
        vec![
            Violation::ImpedanceOutOfRange,
            Violation::SnrBelowFloor,
            Violation::CoherenceCollapse,
            Violation::AnomalyScoreExceeded,
        ]
    );
}

#[test]
fn boundary_values_pass() {
    let t = thresholds();
    let sample = SignalSample {
        impedance_kohm: t.impedance_kohm.max,
        snr_db: t.snr_floor_db,
        spike_rate_hz: t.spike_rate_hz.min,
        consistency: t.consistency_floor,
        coherence: t.coherence_floor,
        anomaly_score: t.anomaly_ceiling,
        ..nominal_sample()
    };
    assert!(validate_sample(&sample, &t).is_empty());
}
