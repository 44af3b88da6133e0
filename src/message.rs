use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

// ─── Flow direction ─────────────────────────────────────────────────────────

/// Direction of traffic through the gateway. Fixed per message; selects the
/// validator pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FlowDirection {
    /// Brain → pipeline: recorded signal samples (decode direction).
    Inbound,
    /// Pipeline → brain: stimulation commands (actuate direction).
    Outbound,
}

// ─── Inbound: signal samples ────────────────────────────────────────────────

/// One inbound signal-quality observation supplied by the acquisition layer.
///
/// Scores (`consistency`, `coherence`, `anomaly_score`) are normalized to
/// `[0, 1]` upstream; the gateway treats them as opaque quality metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalSample {
    /// Region or channel identifier, resolved against the policy table.
    pub region: String,
    pub impedance_kohm: f64,
    pub snr_db: f64,
    pub spike_rate_hz: f64,
    /// Declared acquisition event rate; carried for audit/display.
    pub signal_rate_hz: f64,
    pub consistency: f64,
    pub coherence: f64,
    pub anomaly_score: f64,
    /// Whether the acquisition source passed upstream verification.
    #[serde(default = "default_true")]
    pub source_verified: bool,
    pub timestamp: DateTime<Utc>,
}

// ─── Outbound: stimulation commands ─────────────────────────────────────────

/// One outbound constant-current stimulation command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StimulationCommand {
    /// Target region identifier, resolved against the policy table.
    pub region: String,
    pub amplitude_ma: f64,
    pub frequency_hz: f64,
    pub pulse_width_us: f64,
    pub duration_s: f64,
    /// Whether the issuing source passed upstream verification.
    #[serde(default = "default_true")]
    pub source_verified: bool,
    pub timestamp: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl StimulationCommand {
    /// Charge per phase in nanocoulombs: `Q = I · t`, with mA · µs = nC.
    pub fn charge_per_phase_nc(&self) -> f64 {
        self.amplitude_ma * self.pulse_width_us
    }

    /// Charge per phase in microcoulombs.
    pub fn charge_per_phase_uc(&self) -> f64 {
        self.charge_per_phase_nc() / 1000.0
    }

    /// Instantaneous charge density in µC/cm² for the given electrode area.
    pub fn charge_density_uc_cm2(&self, electrode_area_cm2: f64) -> f64 {
        self.charge_per_phase_uc() / electrode_area_cm2
    }
}

// ─── Unified message ────────────────────────────────────────────────────────

/// A direction-tagged message entering the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayMessage {
    Signal(SignalSample),
    Stimulation(StimulationCommand),
}

impl GatewayMessage {
    pub fn direction(&self) -> FlowDirection {
        match self {
            Self::Signal(_) => FlowDirection::Inbound,
            Self::Stimulation(_) => FlowDirection::Outbound,
        }
    }

    pub fn region(&self) -> &str {
        match self {
            Self::Signal(s) => &s.region,
            Self::Stimulation(c) => &c.region,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Signal(s) => s.timestamp,
            Self::Stimulation(c) => c.timestamp,
        }
    }
}

impl From<SignalSample> for GatewayMessage {
    fn from(sample: SignalSample) -> Self {
        Self::Signal(sample)
    }
}

impl From<StimulationCommand> for GatewayMessage {
    fn from(command: StimulationCommand) -> Self {
        Self::Stimulation(command)
    }
}
