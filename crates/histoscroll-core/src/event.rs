#![forbid(unsafe_code)]

//! Host-neutral pointer and wheel input.
//!
//! Coordinates are in the host's pixel space; only differences between
//! positions matter to the gesture controller, so any origin works as long
//! as it is stable for the duration of a press.

/// Pointer location in host pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPosition {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl PointerPosition {
    /// Create a position.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - origin`.
    #[inline]
    #[must_use]
    pub fn delta_from(self, origin: Self) -> (f64, f64) {
        (self.x - origin.x, self.y - origin.y)
    }

    fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Pointer lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// Primary button pressed / touch started.
    Press,
    /// Pointer moved.
    Move,
    /// Primary button released / touch ended.
    Release,
    /// Interrupted: blur, lost capture, touch cancel.
    Cancel,
}

/// One pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Lifecycle phase.
    pub kind: PointerKind,
    /// Where it happened.
    pub pos: PointerPosition,
}

impl PointerEvent {
    /// A press at `(x, y)`.
    #[must_use]
    pub const fn press(x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::Press,
            pos: PointerPosition::new(x, y),
        }
    }

    /// A move to `(x, y)`.
    #[must_use]
    pub const fn moved(x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::Move,
            pos: PointerPosition::new(x, y),
        }
    }

    /// A release at `(x, y)`.
    #[must_use]
    pub const fn release(x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::Release,
            pos: PointerPosition::new(x, y),
        }
    }

    /// An interruption. Position is irrelevant.
    #[must_use]
    pub const fn cancel() -> Self {
        Self {
            kind: PointerKind::Cancel,
            pos: PointerPosition::new(0.0, 0.0),
        }
    }

    /// Events with NaN or infinite coordinates are dropped by consumers.
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.kind == PointerKind::Cancel || self.pos.is_finite()
    }
}

/// Wheel or trackpad scroll delta.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelEvent {
    /// Horizontal delta; positive scrolls toward later items.
    pub dx: f64,
    /// Vertical delta, used when `dx` is zero.
    pub dy: f64,
}

impl WheelEvent {
    /// Create a wheel event.
    #[must_use]
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// The delta to apply: `dx` when non-zero, else `dy`.
    #[inline]
    #[must_use]
    pub fn dominant(&self) -> f64 {
        if self.dx != 0.0 { self.dx } else { self.dy }
    }
}
