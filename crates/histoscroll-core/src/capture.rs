#![forbid(unsafe_code)]

//! Scoped global pointer listeners.
//!
//! While a press is active the host must see move/release events even
//! when the pointer leaves the timeline element, so it attaches listeners
//! to the whole window (or calls `setPointerCapture`). [`PointerCapture`]
//! models that registration as a resource: the gesture controller emits
//! [`CaptureCommand::Acquire`] on press and exactly one matching
//! [`CaptureCommand::Release`] on release, cancel, or teardown.
//!
//! # Invariants
//!
//! 1. Commands strictly alternate: `Acquire`, `Release`, `Acquire`, ...
//! 2. `release()` on an inactive capture emits nothing.
//! 3. After teardown no capture is held.

/// Host command for attaching or detaching global pointer listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureCommand {
    /// Start routing window-level move/release events to this timeline.
    Acquire,
    /// Stop routing them.
    Release,
}

/// Tracks whether this instance holds the global listener registration.
#[derive(Debug, Clone, Default)]
pub struct PointerCapture {
    active: bool,
    acquired: u64,
    released: u64,
}

impl PointerCapture {
    /// Create an inactive capture.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the registration. Emits nothing if already held.
    pub fn acquire(&mut self) -> Option<CaptureCommand> {
        if self.active {
            return None;
        }
        self.active = true;
        self.acquired += 1;
        tracing::trace!(acquired = self.acquired, "pointer capture acquired");
        Some(CaptureCommand::Acquire)
    }

    /// Drop the registration. Emits nothing if not held.
    pub fn release(&mut self) -> Option<CaptureCommand> {
        if !self.active {
            return None;
        }
        self.active = false;
        self.released += 1;
        tracing::trace!(released = self.released, "pointer capture released");
        Some(CaptureCommand::Release)
    }

    /// Whether the registration is currently held.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// `(acquired, released)` counts over the instance lifetime.
    #[inline]
    #[must_use]
    pub fn totals(&self) -> (u64, u64) {
        (self.acquired, self.released)
    }
}
