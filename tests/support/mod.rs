#![allow(dead_code)] // not every integration target uses every helper

use std::sync::{Arc, Once};

use chrono::{DateTime, Utc};
use neurogate::{
    GatewayConfig, MemoryAuditSink, NeuralGateway, PolicyTable, SignalSample, StimulationCommand,
};

static INIT: Once = Once::new();

/// Route gateway tracing output through the test harness.
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Policy fixture: one authorized region "M1" with tight, arithmetic-friendly
/// limits (rate 3 per second, 2 µC per 10 s).
pub const POLICY_TOML: &str = r#"
[regions.M1]
amplitude_ma = { min = 0.0, max = 2.0 }
frequency_hz = { min = 1.0, max = 200.0 }
pulse_width_us = { min = 50.0, max = 1000.0 }
max_charge_density_uc_cm2 = 30.0
electrode_area_cm2 = 0.01
max_cumulative_charge_uc = 2.0
charge_window_s = 10.0
rate_limit = { max_count = 3, window_s = 1.0 }
"#;

pub fn gateway() -> (NeuralGateway, Arc<MemoryAuditSink>) {
    init_tracing();
    let config = GatewayConfig::from_toml_str(POLICY_TOML).expect("fixture policy should parse");
    let policy = Arc::new(PolicyTable::from_config(&config).expect("fixture policy should build"));
    let sink = Arc::new(MemoryAuditSink::new());
    let audit: Arc<dyn neurogate::AuditSink> = sink.clone();
    let gateway = NeuralGateway::with_audit_sink(policy, audit);
    (gateway, sink)
}

pub fn t0() -> DateTime<Utc> {
    "2026-01-01T12:00:00Z".parse().unwrap()
}

pub fn command_at(at: DateTime<Utc>) -> StimulationCommand {
    StimulationCommand {
        region: "M1".into(),
        amplitude_ma: 1.5,
        frequency_hz: 50.0,
        pulse_width_us: 100.0,
        duration_s: 1.0,
        source_verified: true,
        timestamp: at,
    }
}

pub fn sample_at(at: DateTime<Utc>) -> SignalSample {
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
        timestamp: at,
    }
}
