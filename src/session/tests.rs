use super::*;
use chrono::{TimeDelta, Utc};

fn t0() -> chrono::DateTime<Utc> {
    "2026-01-01T12:00:00Z".parse().unwrap()
}

// ── ChargeAccumulator ────────────────────────────────────

#[test]
fn accumulator_starts_empty() {
    let acc = ChargeAccumulator::new();
    assert!(acc.is_empty());
    assert_eq!(acc.total_uc(), 0.0);
}

#[test]
fn would_exceed_compares_windowed_sum_plus_new_charge() {
    let mut acc = ChargeAccumulator::new();
    let window = TimeDelta::seconds(10);
    acc.record(t0(), 4.0);
    acc.record(t0() + TimeDelta::seconds(1), 4.0);

    // 8 µC delivered; 1.9 more stays under a 10 µC ceiling, 2.1 does not.
    assert!(!acc.would_exceed(1.9, window, 10.0, t0() + TimeDelta::seconds(2)));
    assert!(acc.would_exceed(2.1, window, 10.0, t0() + TimeDelta::seconds(2)));
}

#[test]
fn expired_entries_are_evicted_before_summing() {
    let mut acc = ChargeAccumulator::new();
    let window = TimeDelta::seconds(10);
    acc.record(t0(), 9.0);

    // Inside the window the old pulse still counts…
    assert!(acc.would_exceed(2.0, window, 10.0, t0() + TimeDelta::seconds(5)));
    // …but once it ages out, the same pulse fits again.
    assert!(!acc.would_exceed(2.0, window, 10.0, t0() + TimeDelta::seconds(11)));
    assert!(acc.is_empty());
}

#[test]
fn eviction_is_strict_at_the_window_edge() {
    let mut acc = ChargeAccumulator::new();
    let window = TimeDelta::seconds(10);
    acc.record(t0(), 5.0);
    // Exactly window-old entries are evicted (cutoff is exclusive).
    assert!(!acc.would_exceed(6.0, window, 10.0, t0() + TimeDelta::seconds(10)));
}

// ── RateLimiter ──────────────────────────────────────────

#[test]
fn limiter_allows_up_to_max_count_inside_window() {
    let mut limiter = RateLimiter::new();
    let window = TimeDelta::seconds(1);
    for i in 0..3 {
        let at = t0() + TimeDelta::milliseconds(i * 100);
        assert!(!limiter.would_exceed(3, window, at), "message {i} should fit");
        limiter.record(at);
    }
    assert!(limiter.would_exceed(3, window, t0() + TimeDelta::milliseconds(300)));
}

#[test]
fn limiter_frees_capacity_once_window_elapses() {
    let mut limiter = RateLimiter::new();
    let window = TimeDelta::seconds(1);
    for i in 0..2 {
        limiter.record(t0() + TimeDelta::milliseconds(i * 10));
    }
    assert!(limiter.would_exceed(2, window, t0() + TimeDelta::milliseconds(500)));
    assert!(!limiter.would_exceed(2, window, t0() + TimeDelta::seconds(2)));
    assert_eq!(limiter.count(), 0);
}

#[test]
fn zero_max_count_always_exceeds() {
    let mut limiter = RateLimiter::new();
    assert!(limiter.would_exceed(0, TimeDelta::seconds(1), t0()));
}

// ── SessionContext ───────────────────────────────────────

#[test]
fn region_state_is_created_on_first_use_and_reused() {
    let session = SessionContext::new();
    let a = session.region_state("M1");
    let b = session.region_state("M1");
    assert!(Arc::ptr_eq(&a, &b));

    let other = session.region_state("S1");
    assert!(!Arc::ptr_eq(&a, &other));
}

#[test]
fn region_locks_are_independent() {
    let session = SessionContext::new();
    let m1 = session.region_state("M1");
    let s1 = session.region_state("S1");

    // Holding one region's lock must not block access to another region.
    let _m1_guard = m1.lock().unwrap();
    let s1_guard = s1.try_lock();
    assert!(s1_guard.is_ok());
}

#[test]
fn stats_split_by_direction_and_decision() {
    let session = SessionContext::new();
    session.record_outcome(FlowDirection::Outbound, Decision::Allow, AlertLevel::Info);
    session.record_outcome(
        FlowDirection::Outbound,
        Decision::Throttle,
        AlertLevel::Warning,
    );
    session.record_outcome(
        FlowDirection::Outbound,
        Decision::Block,
        AlertLevel::Critical,
    );
    session.record_outcome(FlowDirection::Inbound, Decision::Allow, AlertLevel::Info);

    let stats = session.stats();
    assert_eq!(stats.outbound.total, 3);
    assert_eq!(stats.outbound.allowed, 1);
    assert_eq!(stats.outbound.throttled, 1);
    assert_eq!(stats.outbound.blocked, 1);
    assert_eq!(stats.outbound.critical, 1);
    assert_eq!(stats.inbound.total, 1);
    assert_eq!(stats.inbound.blocked, 0);
}

#[test]
fn stats_snapshot_is_independent_of_later_updates() {
    let session = SessionContext::new();
    session.record_outcome(FlowDirection::Inbound, Decision::Allow, AlertLevel::Info);
    let snapshot = session.stats();
    session.record_outcome(FlowDirection::Inbound, Decision::Allow, AlertLevel::Info);
    assert_eq!(snapshot.inbound.total, 1);
    assert_eq!(session.stats().inbound.total, 2);
}
