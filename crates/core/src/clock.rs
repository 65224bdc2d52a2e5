//! Wall-clock helpers

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

static LAST_HEARTBEAT: AtomicU64 = AtomicU64::new(0);

/// Current time in microseconds since the Unix epoch
pub fn now_micros() -> i64 {
    Utc::now().timestamp_micros()
}

/// Heartbeat timestamp in nanoseconds since the Unix epoch.
///
/// Never decreases within a process, even if the wall clock steps back.
pub fn heartbeat_nanos() -> u64 {
    let now = Utc::now()
        .timestamp_nanos_opt()
        .map(|n| n.max(0) as u64)
        .unwrap_or(u64::MAX);
    let prev = LAST_HEARTBEAT.fetch_max(now, Ordering::AcqRel);
    prev.max(now)
}
