#![forbid(unsafe_code)]

//! Cancellable debounce timer driven by host timestamps.
//!
//! There is no background thread: the host passes `now` into
//! [`DebounceTimer::schedule`] and [`DebounceTimer::poll`], and the timer
//! fires at most once per armed deadline.
//!
//! # Invariants
//!
//! 1. Re-arming pushes the deadline out; only the last schedule fires.
//! 2. After `cancel()` the timer never fires until scheduled again.
//! 3. `poll` returns `true` exactly once per deadline.

use web_time::{Duration, Instant};

/// Default quiet period before a burst of resize notifications is applied.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(50);

/// A single pending deadline that can be re-armed or cancelled.
#[derive(Debug, Clone)]
pub struct DebounceTimer {
    interval: Duration,
    deadline: Option<Instant>,
}

impl DebounceTimer {
    /// Create an idle timer with the given quiet period.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    /// Quiet period between the last schedule and the fire.
    #[inline]
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Arm (or re-arm) the timer relative to `now`.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
    }

    /// Disarm the timer. Idempotent.
    ///
    /// Returns `true` if a pending deadline was dropped.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Whether a deadline is pending.
    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Deadline of the pending fire, if any.
    #[inline]
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fire if the deadline has passed. Disarms on fire.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for DebounceTimer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_10: Duration = Duration::from_millis(10);
    const MS_49: Duration = Duration::from_millis(49);
    const MS_50: Duration = Duration::from_millis(50);

    #[test]
    fn idle_timer_never_fires() {
        let mut timer = DebounceTimer::default();
        assert!(!timer.is_pending());
        assert!(!timer.poll(Instant::now()));
    }

    #[test]
    fn fires_once_after_interval() {
        let mut timer = DebounceTimer::default();
        let t = Instant::now();
        timer.schedule(t);
        assert!(!timer.poll(t + MS_49));
        assert!(timer.poll(t + MS_50));
        assert!(!timer.poll(t + MS_50 + MS_10));
    }

    #[test]
    fn rearm_pushes_deadline() {
        let mut timer = DebounceTimer::default();
        let t = Instant::now();
        timer.schedule(t);
        timer.schedule(t + MS_10 + MS_10);
        assert!(!timer.poll(t + MS_50));
        assert!(timer.poll(t + MS_50 + MS_10 + MS_10));
    }

    #[test]
    fn cancel_disarms() {
        let mut timer = DebounceTimer::default();
        let t = Instant::now();
        timer.schedule(t);
        assert!(timer.cancel());
        assert!(!timer.cancel());
        assert!(!timer.poll(t + MS_50 + MS_50));
    }
}
