use chrono::{DateTime, TimeDelta, Utc};

/// Rolling-window sum of delivered charge for one region.
///
/// Entries are evicted lazily, relative to the timestamp of the message being
/// evaluated, before every sum — the window never grows without bound and no
/// background sweeper is needed. Only accepted (allowed or throttled)
/// commands are recorded: a rejected command must not count against the
/// patient's cumulative dose.
#[derive(Debug, Default)]
pub struct ChargeAccumulator {
    entries: Vec<(DateTime<Utc>, f64)>,
}

impl ChargeAccumulator {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Whether delivering `charge_uc` at `at` would push the windowed sum
    /// over `ceiling_uc`. Evicts expired entries first.
    pub fn would_exceed(
        &mut self,
        charge_uc: f64,
        window: TimeDelta,
        ceiling_uc: f64,
        at: DateTime<Utc>,
    ) -> bool {
        self.evict(at, window);
        self.total_uc() + charge_uc > ceiling_uc
    }

    /// Record a delivered pulse. Call only after a non-block decision.
    pub fn record(&mut self, at: DateTime<Utc>, charge_uc: f64) {
        self.entries.push((at, charge_uc));
    }

    /// Sum of all contributions currently inside the window.
    pub fn total_uc(&self) -> f64 {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict(&mut self, at: DateTime<Utc>, window: TimeDelta) {
        let cutoff = at - window;
        self.entries.retain(|(t, _)| *t > cutoff);
    }
}
