#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

//! Neurogate — bidirectional safety gate for brain-computer interface traffic.
//!
//! A [`NeuralGateway`] sits between a neural-signal source/sink and the
//! decoding/stimulation pipeline and decides, per message, whether to allow,
//! throttle, or block it. Inbound recordings are screened against
//! signal-quality thresholds; outbound stimulation commands are screened
//! against hard physiological safety bounds, per-region authorization,
//! cumulative charge ceilings, and rate limits. Every decision is emitted to
//! an [`AuditSink`] with its machine-readable reasons.

pub mod config;
pub mod error;
pub mod gateway;
pub mod message;
pub mod policy;
pub mod session;
pub mod signal;
pub mod stimulation;
pub mod verdict;

pub use config::{GatewayConfig, RangeConfig, RateLimitConfig, RegionConfig, SignalConfig};
pub use error::{ConfigError, GatewayError, PolicyError, Result};
pub use gateway::NeuralGateway;
pub use gateway::audit::{AuditRecord, AuditSink, MemoryAuditSink, NullAuditSink, TracingAuditSink};
pub use message::{FlowDirection, GatewayMessage, SignalSample, StimulationCommand};
pub use policy::{
    BoundRange, InboundEnforcementMode, PolicyTable, RateLimitSpec, SafetyBounds, SignalThresholds,
};
pub use session::{DirectionStats, SessionStats};
pub use verdict::{AlertLevel, Decision, Evaluation, SignalResult, StimulationResult, Violation};
