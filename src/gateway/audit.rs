use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::message::FlowDirection;
use crate::verdict::{AlertLevel, Decision, Violation};

/// One gateway decision, as handed to the audit collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub evaluation_id: Uuid,
    pub session_id: String,
    pub direction: FlowDirection,
    pub region: String,
    pub decision: Decision,
    pub alert_level: AlertLevel,
    pub reasons: Vec<Violation>,
    pub evaluated_at: DateTime<Utc>,
}

/// Receives every decision the gateway makes, including clean passes.
/// Persistence and transport are the collaborator's concern.
pub trait AuditSink: Send + Sync {
    fn record(&self, record: &AuditRecord);
}

// ─── Bundled sinks ──────────────────────────────────────────────────────────

/// Emits each decision as a structured `tracing` event, severity mapped from
/// the alert level.
#[derive(Debug, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, record: &AuditRecord) {
        let reasons = serde_json::json!(record.reasons).to_string();
        match record.alert_level {
            AlertLevel::Info => tracing::info!(
                session = %record.session_id,
                region = %record.region,
                direction = %record.direction,
                decision = %record.decision,
                "gateway decision"
            ),
            AlertLevel::Warning => tracing::warn!(
                session = %record.session_id,
                region = %record.region,
                direction = %record.direction,
                decision = %record.decision,
                reasons = %reasons,
                "gateway decision"
            ),
            AlertLevel::Critical => tracing::error!(
                session = %record.session_id,
                region = %record.region,
                direction = %record.direction,
                decision = %record.decision,
                reasons = %reasons,
                "gateway decision"
            ),
        }
    }
}

/// Discards every record.
#[derive(Debug, Default)]
pub struct NullAuditSink;

impl AuditSink for NullAuditSink {
    fn record(&self, _record: &AuditRecord) {}
}

/// Retains records in memory, for tests and harnesses that inspect the
/// decision trail.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn records(&self) -> Vec<AuditRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, record: &AuditRecord) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
    }
}
