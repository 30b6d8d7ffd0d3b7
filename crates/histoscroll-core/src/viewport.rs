#![forbid(unsafe_code)]

//! Viewport measurement and scrollability.
//!
//! [`ViewportTracker`] holds the host element's measured width and the
//! content extent, and decides whether scrolling is possible at all.
//!
//! # Lifecycle
//!
//! 1. [`mount`](ViewportTracker::mount) takes one synchronous measurement so
//!    the first frame never runs against a zero-sized viewport.
//! 2. [`observe_resize`](ViewportTracker::observe_resize) records the latest
//!    width and re-arms a [`DebounceTimer`]; [`poll`](ViewportTracker::poll)
//!    applies it once the quiet period elapses.
//! 3. [`set_content_length`](ViewportTracker::set_content_length) recomputes
//!    immediately.
//! 4. [`teardown`](ViewportTracker::teardown) cancels the pending timer.
//!
//! # Failure Modes
//!
//! Before `mount`, [`state`](ViewportTracker::state) is `None` and
//! consumers treat every gesture as a no-op. Non-finite or negative widths
//! are stored as zero.

use web_time::{Duration, Instant};

use crate::timer::DebounceTimer;

/// Measured geometry of one mounted timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    /// Width of the host element.
    pub viewport_length: f64,
    /// `item_count * step`.
    pub content_length: f64,
    /// `content_length > viewport_length`.
    pub scrollable: bool,
}

impl ViewportState {
    fn new(viewport_length: f64, content_length: f64) -> Self {
        Self {
            viewport_length,
            content_length,
            scrollable: content_length > viewport_length,
        }
    }

    /// Largest legal scroll offset.
    #[inline]
    #[must_use]
    pub fn max_offset(&self) -> f64 {
        (self.content_length - self.viewport_length).max(0.0)
    }
}

/// Tracks the viewport width and debounces resize bursts.
#[derive(Debug, Clone)]
pub struct ViewportTracker {
    measured: Option<f64>,
    pending: Option<f64>,
    content_length: f64,
    timer: DebounceTimer,
}

impl ViewportTracker {
    /// Create an unmounted tracker.
    #[must_use]
    pub fn new(debounce: Duration) -> Self {
        Self {
            measured: None,
            pending: None,
            content_length: 0.0,
            timer: DebounceTimer::new(debounce),
        }
    }

    /// Synchronous first measurement.
    pub fn mount(&mut self, width: f64) -> ViewportState {
        self.measured = Some(sanitize_length(width));
        self.pending = None;
        self.timer.cancel();
        let state = self.current();
        tracing::debug!(
            viewport = state.viewport_length,
            content = state.content_length,
            scrollable = state.scrollable,
            "viewport mounted"
        );
        state
    }

    /// Record a resize notification and (re)arm the debounce timer.
    ///
    /// Ignored before mount.
    pub fn observe_resize(&mut self, width: f64, now: Instant) {
        if self.measured.is_none() {
            return;
        }
        self.pending = Some(sanitize_length(width));
        self.timer.schedule(now);
    }

    /// Apply a pending resize if its quiet period has elapsed.
    ///
    /// Returns the new state when a measurement was applied.
    pub fn poll(&mut self, now: Instant) -> Option<ViewportState> {
        if !self.timer.poll(now) {
            return None;
        }
        let width = self.pending.take()?;
        self.measured = Some(width);
        let state = self.current();
        tracing::debug!(
            viewport = state.viewport_length,
            scrollable = state.scrollable,
            "debounced resize applied"
        );
        Some(state)
    }

    /// Replace the content extent. Recomputes immediately.
    pub fn set_content_length(&mut self, content_length: f64) -> Option<ViewportState> {
        self.content_length = sanitize_length(content_length);
        self.state()
    }

    /// Current measurement, or `None` before mount.
    #[must_use]
    pub fn state(&self) -> Option<ViewportState> {
        self.measured
            .map(|width| ViewportState::new(width, self.content_length))
    }

    /// `true` once mounted and the content overflows the viewport.
    #[inline]
    #[must_use]
    pub fn is_scrollable(&self) -> bool {
        self.state().is_some_and(|s| s.scrollable)
    }

    /// Whether a debounced resize is waiting to be applied.
    #[inline]
    #[must_use]
    pub fn has_pending_resize(&self) -> bool {
        self.timer.is_pending()
    }

    /// Cancel the debounce timer and forget the measurement.
    ///
    /// Returns `true` if a pending resize was discarded.
    pub fn teardown(&mut self) -> bool {
        let cancelled = self.timer.cancel();
        self.pending = None;
        self.measured = None;
        cancelled
    }

    fn current(&self) -> ViewportState {
        ViewportState::new(self.measured.unwrap_or(0.0), self.content_length)
    }
}

impl Default for ViewportTracker {
    fn default() -> Self {
        Self::new(crate::timer::DEFAULT_DEBOUNCE)
    }
}

fn sanitize_length(len: f64) -> f64 {
    if len.is_finite() { len.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_20: Duration = Duration::from_millis(20);
    const MS_50: Duration = Duration::from_millis(50);

    #[test]
    fn unmounted_has_no_state() {
        let mut tracker = ViewportTracker::default();
        assert!(tracker.state().is_none());
        assert!(!tracker.is_scrollable());
        assert!(tracker.set_content_length(100.0).is_none());
    }

    #[test]
    fn mount_measures_synchronously() {
        let mut tracker = ViewportTracker::default();
        tracker.set_content_length(21.0);
        let state = tracker.mount(14.0);
        assert_eq!(state.viewport_length, 14.0);
        assert!(state.scrollable);
        assert_eq!(state.max_offset(), 7.0);
    }

    #[test]
    fn content_equal_to_viewport_is_not_scrollable() {
        let mut tracker = ViewportTracker::default();
        tracker.mount(21.0);
        let state = tracker.set_content_length(21.0).unwrap();
        assert!(!state.scrollable);
        assert_eq!(state.max_offset(), 0.0);
    }

    #[test]
    fn resize_is_debounced() {
        let mut tracker = ViewportTracker::default();
        tracker.set_content_length(100.0);
        tracker.mount(50.0);

        let t = Instant::now();
        tracker.observe_resize(80.0, t);
        tracker.observe_resize(120.0, t + MS_20);
        assert!(tracker.poll(t + MS_50).is_none());
        assert_eq!(tracker.state().unwrap().viewport_length, 50.0);

        let state = tracker.poll(t + MS_20 + MS_50).unwrap();
        assert_eq!(state.viewport_length, 120.0);
        assert!(!state.scrollable);
    }

    #[test]
    fn resize_before_mount_is_ignored() {
        let mut tracker = ViewportTracker::default();
        let t = Instant::now();
        tracker.observe_resize(80.0, t);
        assert!(!tracker.has_pending_resize());
        assert!(tracker.poll(t + MS_50).is_none());
    }

    #[test]
    fn teardown_cancels_pending_resize() {
        let mut tracker = ViewportTracker::default();
        tracker.mount(50.0);
        let t = Instant::now();
        tracker.observe_resize(80.0, t);
        assert!(tracker.teardown());
        assert!(tracker.poll(t + MS_50).is_none());
        assert!(tracker.state().is_none());
    }

    #[test]
    fn bogus_widths_become_zero() {
        let mut tracker = ViewportTracker::default();
        assert_eq!(tracker.mount(f64::NAN).viewport_length, 0.0);
        assert_eq!(tracker.mount(-5.0).viewport_length, 0.0);
    }
}
