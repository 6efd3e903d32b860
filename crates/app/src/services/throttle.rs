//! Minimum-interval guard for outbound polling.

use std::time::Duration;

use tokio::time::Instant;

/// Minimum time between two regular refreshes of a switch.
pub const MIN_TIME_BETWEEN_SCANS: Duration = Duration::from_secs(5);

/// Minimum time between two forced refreshes of a switch.
pub const MIN_TIME_BETWEEN_FORCED_SCANS: Duration = Duration::from_millis(100);

/// Gate that lets an operation through at most once per interval.
///
/// A forced acquisition is measured against the shorter forced interval.
/// Both kinds share the same "last run" timestamp.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    forced_interval: Duration,
    last_run: Option<Instant>,
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(MIN_TIME_BETWEEN_SCANS, MIN_TIME_BETWEEN_FORCED_SCANS)
    }
}

impl Throttle {
    #[must_use]
    pub const fn new(interval: Duration, forced_interval: Duration) -> Self {
        Self {
            interval,
            forced_interval,
            last_run: None,
        }
    }

    /// Try to run now. Returns `true` and records the run when allowed.
    pub fn try_acquire(&mut self, force: bool) -> bool {
        self.try_acquire_at(force, Instant::now())
    }

    /// Same as [`try_acquire`](Self::try_acquire) with an explicit clock.
    pub fn try_acquire_at(&mut self, force: bool, now: Instant) -> bool {
        let min = if force {
            self.forced_interval
        } else {
            self.interval
        };
        if self
            .last_run
            .is_some_and(|last| now.saturating_duration_since(last) < min)
        {
            return false;
        }
        self.last_run = Some(now);
        true
    }

    #[cfg(test)]
    fn last_run(&self) -> Option<Instant> {
        self.last_run
    }
}
