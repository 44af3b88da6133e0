use std::collections::HashMap;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::error::PolicyError;

// ─── Bounds primitives ──────────────────────────────────────────────────────

/// Closed numeric interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundRange {
    pub min: f64,
    pub max: f64,
}

impl BoundRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Sliding-window message budget for one region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateLimitSpec {
    pub max_count: u32,
    pub window_s: f64,
}

impl RateLimitSpec {
    pub fn window(&self) -> TimeDelta {
        seconds_to_delta(self.window_s)
    }
}

/// Hard physiological safety envelope for one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyBounds {
    pub amplitude_ma: BoundRange,
    pub frequency_hz: BoundRange,
    pub pulse_width_us: BoundRange,
    /// Instantaneous per-phase ceiling, µC/cm².
    pub max_charge_density_uc_cm2: f64,
    pub electrode_area_cm2: f64,
    /// Rolling-window cumulative charge ceiling, µC.
    pub max_cumulative_charge_uc: f64,
    pub charge_window_s: f64,
    pub rate_limit: RateLimitSpec,
}

impl SafetyBounds {
    pub fn charge_window(&self) -> TimeDelta {
        seconds_to_delta(self.charge_window_s)
    }
}

pub(crate) fn seconds_to_delta(seconds: f64) -> TimeDelta {
    TimeDelta::milliseconds((seconds * 1000.0) as i64)
}

// ─── Inbound quality thresholds ─────────────────────────────────────────────

/// Signal-quality floors and ceilings for inbound screening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalThresholds {
    /// Electrode impedance band; readings outside it indicate an open or
    /// short circuit.
    pub impedance_kohm: BoundRange,
    pub snr_floor_db: f64,
    pub spike_rate_hz: BoundRange,
    pub consistency_floor: f64,
    pub coherence_floor: f64,
    pub anomaly_ceiling: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            impedance_kohm: BoundRange::new(10.0, 1000.0),
            snr_floor_db: 5.0,
            spike_rate_hz: BoundRange::new(1.0, 300.0),
            consistency_floor: 0.5,
            coherence_floor: 0.3,
            anomaly_ceiling: 0.7,
        }
    }
}

// ─── Inbound enforcement mode ───────────────────────────────────────────────

/// How inbound quality findings map to a decision.
///
/// `Enforce` blocks on critical findings (suspected spoofing/replay);
/// `Audit` records findings but always lets the sample through, for
/// deployments that flag-only on the decode direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InboundEnforcementMode {
    Audit,
    #[default]
    Enforce,
}

// ─── Policy table ───────────────────────────────────────────────────────────

/// Region-scoped safety policy. Read-only after construction; share it via
/// `Arc` across concurrent callers.
///
/// Unknown regions are unauthorized (fail closed). There is no permissive
/// default bound set.
#[derive(Debug, Clone)]
pub struct PolicyTable {
    regions: HashMap<String, SafetyBounds>,
    signal: SignalThresholds,
    inbound_mode: InboundEnforcementMode,
}

impl PolicyTable {
    pub fn new(signal: SignalThresholds, inbound_mode: InboundEnforcementMode) -> Self {
        Self {
            regions: HashMap::new(),
            signal,
            inbound_mode,
        }
    }

    /// Build from a validated policy file.
    pub fn from_config(config: &crate::config::GatewayConfig) -> Result<Self, crate::error::ConfigError> {
        config.validate()?;
        let signal = SignalThresholds {
            impedance_kohm: config.signal.impedance_kohm.into(),
            snr_floor_db: config.signal.snr_floor_db,
            spike_rate_hz: config.signal.spike_rate_hz.into(),
            consistency_floor: config.signal.consistency_floor,
            coherence_floor: config.signal.coherence_floor,
            anomaly_ceiling: config.signal.anomaly_ceiling,
        };
        let regions = config
            .regions
            .iter()
            .map(|(region, rc)| {
                let bounds = SafetyBounds {
                    amplitude_ma: rc.amplitude_ma.into(),
                    frequency_hz: rc.frequency_hz.into(),
                    pulse_width_us: rc.pulse_width_us.into(),
                    max_charge_density_uc_cm2: rc.max_charge_density_uc_cm2,
                    electrode_area_cm2: rc.electrode_area_cm2,
                    max_cumulative_charge_uc: rc.max_cumulative_charge_uc,
                    charge_window_s: rc.charge_window_s,
                    rate_limit: rc.rate_limit.into(),
                };
                (region.clone(), bounds)
            })
            .collect();
        Ok(Self {
            regions,
            signal,
            inbound_mode: config.inbound_mode,
        })
    }

    /// Builder-style region registration.
    pub fn with_region(mut self, region: impl Into<String>, bounds: SafetyBounds) -> Self {
        self.regions.insert(region.into(), bounds);
        self
    }

    pub fn is_authorized(&self, region: &str) -> bool {
        self.regions.contains_key(region)
    }

    pub fn bounds_for(&self, region: &str) -> Result<&SafetyBounds, PolicyError> {
        self.regions
            .get(region)
            .ok_or_else(|| PolicyError::UnauthorizedRegion {
                region: region.to_string(),
            })
    }

    /// Owned copy of a region's bounds for UI/audit display.
    pub fn snapshot(&self, region: &str) -> Result<SafetyBounds, PolicyError> {
        self.bounds_for(region).cloned()
    }

    pub fn signal_thresholds(&self) -> &SignalThresholds {
        &self.signal
    }

    pub fn inbound_mode(&self) -> InboundEnforcementMode {
        self.inbound_mode
    }

    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.regions.keys().map(String::as_str)
    }
}
