//! Debounce guard - minimum wall-clock time between accepted reps
//!
//! Detector flicker can push the smoothed signal back and forth across the
//! band several times around one physical rep. This is a hard floor on top
//! of the geometric hysteresis.

use std::time::Duration;

/// Default minimum interval between two accepted reps
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Clone, Debug)]
pub struct DebounceGuard {
    min_interval: Duration,
    last_accepted: Option<Duration>,
}

impl DebounceGuard {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_accepted: None,
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    pub fn last_accepted(&self) -> Option<Duration> {
        self.last_accepted
    }

    /// Would a rep at `now` be accepted?
    pub fn allows(&self, now: Duration) -> bool {
        match self.last_accepted {
            None => true,
            // A clock stepped backwards must not lock counting out
            Some(last) => now.checked_sub(last).map_or(true, |elapsed| elapsed >= self.min_interval),
        }
    }

    /// Accept and stamp `now`, or reject without touching the stamp
    pub fn try_accept(&mut self, now: Duration) -> bool {
        if !self.allows(now) {
            return false;
        }
        self.last_accepted = Some(now);
        true
    }

    pub fn reset(&mut self) {
        self.last_accepted = None;
    }
}

impl Default for DebounceGuard {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
