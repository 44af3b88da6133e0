use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::policy::{BoundRange, InboundEnforcementMode, RateLimitSpec};

// ─── Top-level policy file ───────────────────────────────────────────────────

/// On-disk gateway policy, deserialized from TOML.
///
/// Every field is defaulted so a minimal file only needs to declare its
/// regions; an empty `[regions]` table is valid and authorizes nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub inbound_mode: InboundEnforcementMode,

    #[serde(default)]
    pub signal: SignalConfig,

    /// Authorized regions keyed by id. Regions absent from this table are
    /// unauthorized.
    #[serde(default)]
    pub regions: HashMap<String, RegionConfig>,
}

impl GatewayConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.signal.validate()?;
        for (region, config) in &self.regions {
            config.validate(region)?;
        }
        Ok(())
    }
}

// ─── Numeric ranges ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeConfig {
    pub min: f64,
    pub max: f64,
}

impl RangeConfig {
    fn validate(self, label: &str) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ConfigError::Validation(format!(
                "{label}: bounds must be finite"
            )));
        }
        if self.min > self.max {
            return Err(ConfigError::Validation(format!(
                "{label}: min {} exceeds max {}",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

impl From<RangeConfig> for BoundRange {
    fn from(range: RangeConfig) -> Self {
        BoundRange::new(range.min, range.max)
    }
}

// ─── Inbound quality thresholds ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalConfig {
    #[serde(default = "default_impedance_kohm")]
    pub impedance_kohm: RangeConfig,
    #[serde(default = "default_snr_floor_db")]
    pub snr_floor_db: f64,
    #[serde(default = "default_spike_rate_hz")]
    pub spike_rate_hz: RangeConfig,
    #[serde(default = "default_consistency_floor")]
    pub consistency_floor: f64,
    #[serde(default = "default_coherence_floor")]
    pub coherence_floor: f64,
    #[serde(default = "default_anomaly_ceiling")]
    pub anomaly_ceiling: f64,
}

fn default_impedance_kohm() -> RangeConfig {
    RangeConfig {
        min: 10.0,
        max: 1000.0,
    }
}

fn default_snr_floor_db() -> f64 {
    5.0
}

fn default_spike_rate_hz() -> RangeConfig {
    RangeConfig {
        min: 1.0,
        max: 300.0,
    }
}

fn default_consistency_floor() -> f64 {
    0.5
}

fn default_coherence_floor() -> f64 {
    0.3
}

fn default_anomaly_ceiling() -> f64 {
    0.7
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            impedance_kohm: default_impedance_kohm(),
            snr_floor_db: default_snr_floor_db(),
            spike_rate_hz: default_spike_rate_hz(),
            consistency_floor: default_consistency_floor(),
            coherence_floor: default_coherence_floor(),
            anomaly_ceiling: default_anomaly_ceiling(),
        }
    }
}

impl SignalConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.impedance_kohm.validate("signal.impedance_kohm")?;
        self.spike_rate_hz.validate("signal.spike_rate_hz")?;
        for (label, value) in [
            ("signal.consistency_floor", self.consistency_floor),
            ("signal.coherence_floor", self.coherence_floor),
            ("signal.anomaly_ceiling", self.anomaly_ceiling),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Validation(format!(
                    "{label}: {value} outside [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

// ─── Per-region safety envelope ─────────────────────────────────────────────

/// Conservative defaults follow published charge-injection safety limits for
/// constant-current stimulation; deployments are expected to tighten them
/// per region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionConfig {
    #[serde(default = "default_amplitude_ma")]
    pub amplitude_ma: RangeConfig,
    #[serde(default = "default_frequency_hz")]
    pub frequency_hz: RangeConfig,
    #[serde(default = "default_pulse_width_us")]
    pub pulse_width_us: RangeConfig,
    #[serde(default = "default_max_charge_density")]
    pub max_charge_density_uc_cm2: f64,
    #[serde(default = "default_electrode_area")]
    pub electrode_area_cm2: f64,
    #[serde(default = "default_max_cumulative_charge")]
    pub max_cumulative_charge_uc: f64,
    #[serde(default = "default_charge_window_s")]
    pub charge_window_s: f64,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

fn default_amplitude_ma() -> RangeConfig {
    RangeConfig { min: 0.0, max: 5.0 }
}

fn default_frequency_hz() -> RangeConfig {
    RangeConfig {
        min: 0.1,
        max: 500.0,
    }
}

fn default_pulse_width_us() -> RangeConfig {
    RangeConfig {
        min: 50.0,
        max: 1000.0,
    }
}

fn default_max_charge_density() -> f64 {
    30.0
}

fn default_electrode_area() -> f64 {
    0.01
}

fn default_max_cumulative_charge() -> f64 {
    150.0
}

fn default_charge_window_s() -> f64 {
    10.0
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            amplitude_ma: default_amplitude_ma(),
            frequency_hz: default_frequency_hz(),
            pulse_width_us: default_pulse_width_us(),
            max_charge_density_uc_cm2: default_max_charge_density(),
            electrode_area_cm2: default_electrode_area(),
            max_cumulative_charge_uc: default_max_cumulative_charge(),
            charge_window_s: default_charge_window_s(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl RegionConfig {
    fn validate(&self, region: &str) -> Result<(), ConfigError> {
        self.amplitude_ma
            .validate(&format!("regions.{region}.amplitude_ma"))?;
        self.frequency_hz
            .validate(&format!("regions.{region}.frequency_hz"))?;
        self.pulse_width_us
            .validate(&format!("regions.{region}.pulse_width_us"))?;
        for (label, value) in [
            ("max_charge_density_uc_cm2", self.max_charge_density_uc_cm2),
            ("electrode_area_cm2", self.electrode_area_cm2),
            ("max_cumulative_charge_uc", self.max_cumulative_charge_uc),
            ("charge_window_s", self.charge_window_s),
            ("rate_limit.window_s", self.rate_limit.window_s),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Validation(format!(
                    "regions.{region}.{label}: {value} must be positive"
                )));
            }
        }
        Ok(())
    }
}

// ─── Rate limits ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_rate_max_count")]
    pub max_count: u32,
    #[serde(default = "default_rate_window_s")]
    pub window_s: f64,
}

fn default_rate_max_count() -> u32 {
    10
}

fn default_rate_window_s() -> f64 {
    1.0
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_count: default_rate_max_count(),
            window_s: default_rate_window_s(),
        }
    }
}

impl From<RateLimitConfig> for RateLimitSpec {
    fn from(config: RateLimitConfig) -> Self {
        RateLimitSpec {
            max_count: config.max_count,
            window_s: config.window_s,
        }
    }
}
