use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;
use uuid::Uuid;

// ─── Decision & alert severity ──────────────────────────────────────────────

/// Per-message outcome. Ordering encodes precedence: `Block` strictly
/// dominates `Throttle`, which dominates `Allow`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Decision {
    /// Pass through unmodified.
    Allow,
    /// Accepted, but the caller must defer/pace delivery (rate policy only).
    Throttle,
    /// Hard rejection. Final for this message; resubmission of an unmodified
    /// message yields the same outcome.
    Block,
}

/// Alert severity attached to an evaluation, ordered `Info < Warning <
/// Critical`. `Critical` is reserved for safety-bound, charge-density, and
/// unauthorized-region findings.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}

// ─── Violations ─────────────────────────────────────────────────────────────

/// Machine-readable reason codes. The `Display` form (snake_case) is the
/// stable wire/audit representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Violation {
    // Outbound (stimulation) findings
    UnauthorizedRegion,
    AmplitudeOutOfBounds,
    FrequencyOutOfBounds,
    PulseWidthOutOfBounds,
    ChargeDensityExceeded,
    CumulativeChargeExceeded,
    RateLimitExceeded,
    UnverifiedSource,
    // Inbound (signal quality) findings
    ImpedanceOutOfRange,
    SnrBelowFloor,
    SpikeRateOutOfRange,
    ConsistencyBelowFloor,
    CoherenceCollapse,
    AnomalyScoreExceeded,
}

impl Violation {
    /// Fixed severity of this finding. Coherence collapse and anomaly-score
    /// breaches are treated as suspected spoofing/replay, hence critical.
    pub fn severity(self) -> AlertLevel {
        match self {
            Self::UnauthorizedRegion
            | Self::AmplitudeOutOfBounds
            | Self::FrequencyOutOfBounds
            | Self::PulseWidthOutOfBounds
            | Self::ChargeDensityExceeded
            | Self::CumulativeChargeExceeded
            | Self::CoherenceCollapse
            | Self::AnomalyScoreExceeded => AlertLevel::Critical,
            Self::RateLimitExceeded
            | Self::UnverifiedSource
            | Self::ImpedanceOutOfRange
            | Self::SnrBelowFloor
            | Self::SpikeRateOutOfRange
            | Self::ConsistencyBelowFloor => AlertLevel::Warning,
        }
    }
}

/// Highest severity among `reasons`, or `Info` when the list is empty.
pub(crate) fn max_severity(reasons: &[Violation]) -> AlertLevel {
    reasons
        .iter()
        .map(|v| v.severity())
        .max()
        .unwrap_or(AlertLevel::Info)
}

// ─── Evaluation results ─────────────────────────────────────────────────────

/// Outcome of screening one inbound signal sample. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalResult {
    pub decision: Decision,
    pub alert_level: AlertLevel,
    /// Violation codes in fixed evaluation order.
    pub reasons: Vec<Violation>,
    pub evaluated_at: DateTime<Utc>,
    pub evaluation_id: Uuid,
}

/// Outcome of screening one outbound stimulation command. Immutable once
/// produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StimulationResult {
    pub decision: Decision,
    pub alert_level: AlertLevel,
    /// Violation codes in fixed evaluation order.
    pub reasons: Vec<Violation>,
    pub evaluated_at: DateTime<Utc>,
    pub evaluation_id: Uuid,
}

macro_rules! result_accessors {
    ($name:ident) => {
        impl $name {
            pub(crate) fn new(
                decision: Decision,
                alert_level: AlertLevel,
                reasons: Vec<Violation>,
            ) -> Self {
                Self {
                    decision,
                    alert_level,
                    reasons,
                    evaluated_at: Utc::now(),
                    evaluation_id: Uuid::new_v4(),
                }
            }

            /// Whether the message was accepted (allowed or throttled).
            pub fn accepted(&self) -> bool {
                matches!(self.decision, Decision::Allow | Decision::Throttle)
            }

            pub fn blocked(&self) -> bool {
                self.decision == Decision::Block
            }

            pub fn throttled(&self) -> bool {
                self.decision == Decision::Throttle
            }
        }
    };
}

result_accessors!(SignalResult);
result_accessors!(StimulationResult);

/// Direction-tagged evaluation result returned by the unified entry point.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Evaluation {
    Signal(SignalResult),
    Stimulation(StimulationResult),
}

impl Evaluation {
    pub fn decision(&self) -> Decision {
        match self {
            Self::Signal(r) => r.decision,
            Self::Stimulation(r) => r.decision,
        }
    }

    pub fn alert_level(&self) -> AlertLevel {
        match self {
            Self::Signal(r) => r.alert_level,
            Self::Stimulation(r) => r.alert_level,
        }
    }

    pub fn reasons(&self) -> &[Violation] {
        match self {
            Self::Signal(r) => &r.reasons,
            Self::Stimulation(r) => &r.reasons,
        }
    }

    pub fn accepted(&self) -> bool {
        self.decision() != Decision::Block
    }
}
