//! Per-session shared state: region-scoped charge and rate windows, plus
//! decision counters.
//!
//! State lives for the lifetime of the active session — created on the first
//! message for a region, dropped on explicit teardown, never silently expired
//! mid-session. Each region carries its own lock so independent regions never
//! contend; the session-level map lock is held only long enough to fetch or
//! create a region's handle.

mod charge;
mod rate;

pub use charge::ChargeAccumulator;
pub use rate::RateLimiter;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::message::FlowDirection;
use crate::verdict::{AlertLevel, Decision};

// ─── Per-region state ───────────────────────────────────────────────────────

/// Mutable window state for one region. Locked as a unit so that
/// check-then-update is a single critical section: two concurrent pulses must
/// never both pass a charge check that only one of them should pass.
#[derive(Debug, Default)]
pub(crate) struct RegionState {
    pub(crate) charge: ChargeAccumulator,
    pub(crate) rate: RateLimiter,
}

impl RegionState {
    fn new() -> Self {
        Self {
            charge: ChargeAccumulator::new(),
            rate: RateLimiter::new(),
        }
    }
}

// ─── Session context ────────────────────────────────────────────────────────

/// Shared state for one active session.
#[derive(Debug, Default)]
pub struct SessionContext {
    regions: Mutex<HashMap<String, Arc<Mutex<RegionState>>>>,
    stats: Mutex<SessionStats>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            regions: Mutex::new(HashMap::new()),
            stats: Mutex::new(SessionStats::default()),
        }
    }

    /// Handle to a region's state, created on first use. The map lock is
    /// released before the caller locks the region itself.
    pub(crate) fn region_state(&self, region: &str) -> Arc<Mutex<RegionState>> {
        let mut regions = lock(&self.regions);
        Arc::clone(
            regions
                .entry(region.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(RegionState::new()))),
        )
    }

    pub(crate) fn record_outcome(
        &self,
        direction: FlowDirection,
        decision: Decision,
        alert_level: AlertLevel,
    ) {
        lock(&self.stats).record(direction, decision, alert_level);
    }

    /// Point-in-time copy of this session's decision counters.
    pub fn stats(&self) -> SessionStats {
        lock(&self.stats).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ─── Decision counters ──────────────────────────────────────────────────────

/// Decision counters for one traffic direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionStats {
    pub total: u64,
    pub allowed: u64,
    pub throttled: u64,
    pub blocked: u64,
    pub info: u64,
    pub warning: u64,
    pub critical: u64,
}

impl DirectionStats {
    fn record(&mut self, decision: Decision, alert_level: AlertLevel) {
        self.total += 1;
        match decision {
            Decision::Allow => self.allowed += 1,
            Decision::Throttle => self.throttled += 1,
            Decision::Block => self.blocked += 1,
        }
        match alert_level {
            AlertLevel::Info => self.info += 1,
            AlertLevel::Warning => self.warning += 1,
            AlertLevel::Critical => self.critical += 1,
        }
    }
}

/// Decision counters for one session, split by direction. Read-only snapshot
/// for audit/UI display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub inbound: DirectionStats,
    pub outbound: DirectionStats,
}

impl SessionStats {
    fn record(&mut self, direction: FlowDirection, decision: Decision, alert_level: AlertLevel) {
        match direction {
            FlowDirection::Inbound => self.inbound.record(decision, alert_level),
            FlowDirection::Outbound => self.outbound.record(decision, alert_level),
        }
    }
}

#[cfg(test)]
mod tests;
