//! Wall-clock budget and interrupt signaling for the search loop.

use instant::Instant;
use std::time::Duration;

/// Limits for one search run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOptions {
    /// Deepest iteration to run, at least 1.
    pub max_depth: u32,
    /// Wall-clock budget in milliseconds, at least 1.
    pub time_limit_ms: u64,
    /// Minimum gap between published snapshots. `None` uses the default
    /// interval; values below the floor are clamped up.
    pub snapshot_interval_ms: Option<u64>,
}

impl Default for SearchOptions {
    fn default() -> SearchOptions {
        SearchOptions {
            max_depth: 5,
            time_limit_ms: 3000,
            snapshot_interval_ms: None,
        }
    }
}

/// Why an in-flight depth was abandoned. Never surfaced to callers; the
/// driver commits the last finished depth instead.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum SearchInterrupt {
    Timeout,
    Cancelled,
}

pub(crate) struct SearchControl {
    started: Instant,
    limit: Duration,
}

impl SearchControl {
    pub fn new(time_limit_ms: u64) -> SearchControl {
        SearchControl {
            started: Instant::now(),
            limit: Duration::from_millis(time_limit_ms.max(1)),
        }
    }

    #[inline]
    pub fn expired(&self) -> bool {
        self.started.elapsed() >= self.limit
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_budget_is_clamped_to_one_millisecond() {
        let control = SearchControl::new(0);
        assert!(!control.expired() || control.elapsed_ms() >= 1);
    }

    #[test]
    fn generous_budget_does_not_expire_immediately() {
        let control = SearchControl::new(60_000);
        assert!(!control.expired());
    }
}
