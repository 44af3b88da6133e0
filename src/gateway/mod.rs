//! The decision engine: sole public entry point for gateway traffic.
//!
//! Each call is synchronous and bounded — no I/O, no await points. A message
//! is dispatched to the direction-appropriate validators, the findings are
//! merged under a fixed precedence rule (block > throttle > allow, alert =
//! max of findings), shared rate/charge state is updated if and only if the
//! message was not blocked, and the decision is emitted to the audit sink.

pub mod audit;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use self::audit::{AuditRecord, AuditSink, TracingAuditSink};

use crate::message::{FlowDirection, GatewayMessage, SignalSample, StimulationCommand};
use crate::policy::{InboundEnforcementMode, PolicyTable, SafetyBounds};
use crate::session::{SessionContext, SessionStats};
use crate::verdict::{
    max_severity, AlertLevel, Decision, Evaluation, SignalResult, StimulationResult, Violation,
};
use crate::{error::PolicyError, signal, stimulation};

/// Bidirectional traffic gate between a neural-signal source/sink and the
/// decoding/stimulation pipeline.
///
/// Cheap to share: policy is behind an `Arc`, session state carries its own
/// locks. A blocked message is final — resubmitting an unmodified message
/// yields the same outcome, and a rejection never counts against the region's
/// rate or charge budget.
pub struct NeuralGateway {
    policy: Arc<PolicyTable>,
    sessions: Mutex<HashMap<String, Arc<SessionContext>>>,
    audit: Arc<dyn AuditSink>,
}

impl NeuralGateway {
    /// Gateway with the bundled `tracing` audit sink.
    pub fn new(policy: Arc<PolicyTable>) -> Self {
        Self::with_audit_sink(policy, Arc::new(TracingAuditSink))
    }

    pub fn with_audit_sink(policy: Arc<PolicyTable>, audit: Arc<dyn AuditSink>) -> Self {
        Self {
            policy,
            sessions: Mutex::new(HashMap::new()),
            audit,
        }
    }

    // ── Evaluation ──────────────────────────────────────────────────────

    /// Evaluate one direction-tagged message.
    pub fn evaluate(&self, session_id: &str, message: &GatewayMessage) -> Evaluation {
        match message {
            GatewayMessage::Signal(sample) => {
                Evaluation::Signal(self.evaluate_signal(session_id, sample))
            }
            GatewayMessage::Stimulation(command) => {
                Evaluation::Stimulation(self.evaluate_stimulation(session_id, command))
            }
        }
    }

    /// Evaluate a batch of messages, preserving input order.
    pub fn evaluate_batch(&self, session_id: &str, messages: &[GatewayMessage]) -> Vec<Evaluation> {
        messages
            .iter()
            .map(|message| self.evaluate(session_id, message))
            .collect()
    }

    /// Screen an inbound signal sample (decode direction).
    ///
    /// Stateless apart from session counters: inbound traffic never touches
    /// the rate or charge windows. Unauthorized regions fail closed in every
    /// enforcement mode; quality findings map to a decision according to the
    /// policy's inbound mode.
    pub fn evaluate_signal(&self, session_id: &str, sample: &SignalSample) -> SignalResult {
        let (decision, reasons) = if self.policy.is_authorized(&sample.region) {
            let reasons = signal::validate_sample(sample, self.policy.signal_thresholds());
            let decision = match self.policy.inbound_mode() {
                InboundEnforcementMode::Audit => Decision::Allow,
                InboundEnforcementMode::Enforce => {
                    if max_severity(&reasons) == AlertLevel::Critical {
                        Decision::Block
                    } else {
                        Decision::Allow
                    }
                }
            };
            (decision, reasons)
        } else {
            (Decision::Block, vec![Violation::UnauthorizedRegion])
        };

        let alert_level = max_severity(&reasons);
        let result = SignalResult::new(decision, alert_level, reasons);
        self.finish(AuditRecord {
            evaluation_id: result.evaluation_id,
            session_id: session_id.to_string(),
            direction: FlowDirection::Inbound,
            region: sample.region.clone(),
            decision: result.decision,
            alert_level: result.alert_level,
            reasons: result.reasons.clone(),
            evaluated_at: result.evaluated_at,
        });
        result
    }

    /// Screen an outbound stimulation command (actuate direction).
    pub fn evaluate_stimulation(
        &self,
        session_id: &str,
        command: &StimulationCommand,
    ) -> StimulationResult {
        let (decision, reasons) = match self.policy.bounds_for(&command.region) {
            Err(_) => (Decision::Block, vec![Violation::UnauthorizedRegion]),
            Ok(bounds) => {
                let reasons = stimulation::validate_against_bounds(command, bounds);
                if reasons.is_empty() {
                    self.check_windows(session_id, command, bounds)
                } else {
                    // Any safety finding blocks outright; the windows are
                    // never consulted, so a rejected command leaves no trace
                    // in the region's rate or charge state.
                    (Decision::Block, reasons)
                }
            }
        };

        let alert_level = max_severity(&reasons);
        let result = StimulationResult::new(decision, alert_level, reasons);
        self.finish(AuditRecord {
            evaluation_id: result.evaluation_id,
            session_id: session_id.to_string(),
            direction: FlowDirection::Outbound,
            region: command.region.clone(),
            decision: result.decision,
            alert_level: result.alert_level,
            reasons: result.reasons.clone(),
            evaluated_at: result.evaluated_at,
        });
        result
    }

    /// Cumulative-charge and rate checks plus the conditional state update,
    /// as one critical section per region: two concurrent pulses must never
    /// both pass a charge check that only one of them should pass.
    fn check_windows(
        &self,
        session_id: &str,
        command: &StimulationCommand,
        bounds: &SafetyBounds,
    ) -> (Decision, Vec<Violation>) {
        let session = self.session(session_id);
        let region = session.region_state(&command.region);
        let mut state = region.lock().unwrap_or_else(PoisonError::into_inner);

        let charge_uc = command.charge_per_phase_uc();
        let over_charge = state.charge.would_exceed(
            charge_uc,
            bounds.charge_window(),
            bounds.max_cumulative_charge_uc,
            command.timestamp,
        );
        let over_rate = state.rate.would_exceed(
            bounds.rate_limit.max_count,
            bounds.rate_limit.window(),
            command.timestamp,
        );

        let mut reasons = Vec::new();
        if over_charge {
            reasons.push(Violation::CumulativeChargeExceeded);
        }
        if over_rate {
            reasons.push(Violation::RateLimitExceeded);
        }

        // A rate breach alone throttles; a cumulative-charge breach blocks
        // and must not be masked by the milder outcome.
        let decision = if over_charge {
            Decision::Block
        } else if over_rate {
            Decision::Throttle
        } else {
            Decision::Allow
        };

        if decision != Decision::Block {
            state.charge.record(command.timestamp, charge_uc);
            state.rate.record(command.timestamp);
        }

        (decision, reasons)
    }

    // ── Sessions ────────────────────────────────────────────────────────

    /// Drop all region state and counters for a session. The next message
    /// for that session starts from a clean slate.
    pub fn reset_session(&self, session_id: &str) {
        lock(&self.sessions).remove(session_id);
    }

    /// Decision counters for a session, if it has seen any traffic.
    pub fn session_stats(&self, session_id: &str) -> Option<SessionStats> {
        lock(&self.sessions)
            .get(session_id)
            .map(|session| session.stats())
    }

    // ── Policy access ───────────────────────────────────────────────────

    /// Owned copy of a region's safety envelope for UI/audit display.
    pub fn policy_snapshot(&self, region: &str) -> Result<SafetyBounds, PolicyError> {
        self.policy.snapshot(region)
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn session(&self, session_id: &str) -> Arc<SessionContext> {
        let mut sessions = lock(&self.sessions);
        Arc::clone(
            sessions
                .entry(session_id.to_string())
                .or_insert_with(|| Arc::new(SessionContext::new())),
        )
    }

    /// Update session counters and emit the decision to the audit sink.
    fn finish(&self, record: AuditRecord) {
        self.session(&record.session_id).record_outcome(
            record.direction,
            record.decision,
            record.alert_level,
        );
        self.audit.record(&record);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
