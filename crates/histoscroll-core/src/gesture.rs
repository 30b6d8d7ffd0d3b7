#![forbid(unsafe_code)]

//! Press, drag and settle recognition for a horizontally scrolling strip.
//!
//! [`GestureController`] owns the scroll offset. The host feeds it pointer
//! and wheel input plus frame deltas; it answers with [`PointerDispatch`]
//! values carrying capture commands and the kind of release that ended a
//! press.
//!
//! # State Machine
//!
//! ```text
//!             press                  move > threshold
//!   Idle ───────────────▶ Pressed ─────────────────────▶ Dragging
//!    ▲  ▲                   │ release (click)               │ release
//!    │  └───────────────────┘                               ▼
//!    │        settle finished                           Settling
//!    └──────────────────────────────────────────────────────┘
//! ```
//!
//! A press during `Settling` abandons the animation and zeroes velocity.
//! Wheel input and [`GestureController::scroll_to`] enter `Settling`
//! directly from `Idle`; a pointer release never does.
//!
//! # Invariants
//!
//! 1. `0 <= offset <= max_offset` after every call.
//! 2. A release after crossing the drag threshold never reports
//!    [`ReleaseKind::Click`].
//! 3. Every [`CaptureCommand::Acquire`] is matched by exactly one
//!    [`CaptureCommand::Release`] from release, cancel or teardown.
//! 4. [`GestureController::moved_significantly`] stays set from the
//!    crossing move until the next press.
//!
//! # Failure Modes
//!
//! - Before bounds are known (container unmeasured) every operation is a
//!   no-op returning an empty dispatch.
//! - Pointer events with non-finite coordinates are dropped.

use web_time::Duration;

use crate::capture::{CaptureCommand, PointerCapture};
use crate::config::{GestureConfig, PhysicsConfig};
use crate::event::{PointerPosition, WheelEvent};
use crate::settle::{self, Bounds, Settle, SnapSpring};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Where the controller is in the press/drag/settle cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GesturePhase {
    /// Nothing in progress.
    Idle,
    /// Pointer is down but has not crossed the drag threshold.
    Pressed {
        /// Press location.
        origin: PointerPosition,
        /// Offset at press time.
        anchor: f64,
    },
    /// Pointer is down and moving the strip.
    Dragging {
        /// Press location.
        origin: PointerPosition,
        /// Offset at press time.
        anchor: f64,
        /// Pointer x at the previous move.
        last_x: f64,
    },
    /// An animation owns the offset.
    Settling(Settle),
}

impl GesturePhase {
    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pressed { .. } => "pressed",
            Self::Dragging { .. } => "dragging",
            Self::Settling(_) => "settling",
        }
    }
}

/// How a press ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseKind {
    /// Released without crossing the drag threshold.
    Click,
    /// Released after dragging.
    Drag {
        /// Whether inertia runs before the snap.
        momentum: bool,
    },
    /// Interrupted by blur or lost capture. Never a click.
    Cancelled,
}

/// What the host has to act on after a pointer call.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerDispatch {
    /// Attach or detach global pointer listeners.
    pub capture: Option<CaptureCommand>,
    /// Set when this call ended a press.
    pub release: Option<ReleaseKind>,
    /// Whether the offset changed.
    pub moved: bool,
}

impl PointerDispatch {
    /// Nothing to do.
    pub const NONE: Self = Self {
        capture: None,
        release: None,
        moved: false,
    };

    /// Whether the host has nothing to act on.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.capture.is_none() && self.release.is_none() && !self.moved
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Offset owner and gesture state machine.
#[derive(Debug, Clone)]
pub struct GestureController {
    gesture: GestureConfig,
    physics: PhysicsConfig,
    bounds: Option<Bounds>,
    offset: f64,
    velocity: f64,
    phase: GesturePhase,
    moved_significantly: bool,
    capture: PointerCapture,
}

impl GestureController {
    /// Create an unmeasured controller at offset 0.
    #[must_use]
    pub fn new(gesture: GestureConfig, physics: PhysicsConfig) -> Self {
        Self {
            gesture,
            physics,
            bounds: None,
            offset: 0.0,
            velocity: 0.0,
            phase: GesturePhase::Idle,
            moved_significantly: false,
            capture: PointerCapture::new(),
        }
    }

    // -- accessors ----------------------------------------------------------

    /// Current scroll offset.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Signed velocity in px per reference frame. Zero unless dragging or
    /// in momentum.
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Current phase.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Bounds in effect, `None` while unmeasured.
    #[inline]
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Whether the content is wider than the viewport.
    #[inline]
    #[must_use]
    pub fn is_scrollable(&self) -> bool {
        self.bounds.is_some_and(|b| b.max_offset > 0.0)
    }

    /// Whether the pointer is moving the strip.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, GesturePhase::Dragging { .. })
    }

    /// Whether the pointer is down, dragging or not.
    #[inline]
    #[must_use]
    pub fn is_pointer_down(&self) -> bool {
        matches!(
            self.phase,
            GesturePhase::Pressed { .. } | GesturePhase::Dragging { .. }
        )
    }

    /// Whether an animation owns the offset.
    #[inline]
    #[must_use]
    pub fn is_settling(&self) -> bool {
        matches!(self.phase, GesturePhase::Settling(_))
    }

    /// Whether the current or most recent press crossed the drag
    /// threshold. Cleared by the next press.
    #[inline]
    #[must_use]
    pub fn moved_significantly(&self) -> bool {
        self.moved_significantly
    }

    /// Whether global pointer listeners are held.
    #[inline]
    #[must_use]
    pub fn has_capture(&self) -> bool {
        self.capture.is_active()
    }

    /// Gesture tuning.
    #[must_use]
    pub fn gesture_config(&self) -> &GestureConfig {
        &self.gesture
    }

    /// Physics tuning.
    #[must_use]
    pub fn physics_config(&self) -> &PhysicsConfig {
        &self.physics
    }

    // -- geometry -----------------------------------------------------------

    /// Install new bounds and re-clamp the offset and any running settle.
    ///
    /// Returns `true` when the offset moved.
    pub fn set_bounds(&mut self, bounds: Bounds) -> bool {
        self.bounds = Some(bounds);
        if let GesturePhase::Settling(settle) = self.phase {
            self.phase = GesturePhase::Settling(match settle {
                Settle::Snap(spring) => Settle::Snap(SnapSpring {
                    target: bounds.snap_target(spring.target),
                    ..spring
                }),
                Settle::Glide(glide) => Settle::Glide(settle::Glide {
                    to: bounds.clamp(glide.to),
                    ..glide
                }),
                momentum @ Settle::Momentum { .. } => momentum,
            });
        }
        let clamped = bounds.clamp(self.offset);
        if clamped == self.offset {
            return false;
        }
        tracing::debug!(from = self.offset, to = clamped, "offset re-clamped");
        self.offset = clamped;
        true
    }

    // -- pointer input ------------------------------------------------------

    /// Pointer down.
    ///
    /// Starts a press when the content is scrollable, abandoning any
    /// running settle. Emits [`CaptureCommand::Acquire`].
    pub fn press(&mut self, pos: PointerPosition) -> PointerDispatch {
        let Some(bounds) = self.bounds else {
            return PointerDispatch::NONE;
        };
        if !(pos.x.is_finite() && pos.y.is_finite()) {
            return PointerDispatch::NONE;
        }
        self.moved_significantly = false;
        if bounds.max_offset <= 0.0 {
            return PointerDispatch::NONE;
        }

        if let GesturePhase::Settling(settle) = self.phase {
            tracing::debug!(
                settle = settle.name(),
                offset = self.offset,
                "settle interrupted by press"
            );
        }
        self.velocity = 0.0;
        self.phase = GesturePhase::Pressed {
            origin: pos,
            anchor: self.offset,
        };
        tracing::trace!(x = pos.x, offset = self.offset, "press");
        PointerDispatch {
            capture: self.capture.acquire(),
            ..PointerDispatch::NONE
        }
    }

    /// Pointer moved while down. Ignored when no press is active.
    pub fn move_to(&mut self, pos: PointerPosition) -> PointerDispatch {
        let Some(bounds) = self.bounds else {
            return PointerDispatch::NONE;
        };
        if !(pos.x.is_finite() && pos.y.is_finite()) {
            return PointerDispatch::NONE;
        }
        let (origin, anchor, last_x) = match self.phase {
            GesturePhase::Pressed { origin, anchor } => {
                let (dx, dy) = pos.delta_from(origin);
                if self.gesture.drag_metric.distance(dx, dy) <= self.gesture.drag_threshold {
                    return PointerDispatch::NONE;
                }
                self.moved_significantly = true;
                tracing::debug!(offset = self.offset, dx, "drag started");
                (origin, anchor, origin.x)
            }
            GesturePhase::Dragging {
                origin,
                anchor,
                last_x,
            } => (origin, anchor, last_x),
            GesturePhase::Idle | GesturePhase::Settling(_) => return PointerDispatch::NONE,
        };

        let dx = pos.x - last_x;
        let next = bounds.clamp(self.offset - dx);
        let moved = next != self.offset;
        self.offset = next;
        self.velocity = -dx * self.gesture.effective_velocity_scale();
        self.phase = GesturePhase::Dragging {
            origin,
            anchor,
            last_x: pos.x,
        };
        PointerDispatch {
            moved,
            ..PointerDispatch::NONE
        }
    }

    /// Pointer up.
    ///
    /// A press that never crossed the threshold is a click. A drag hands
    /// over to momentum when `|velocity| > release_velocity`, otherwise
    /// straight to snapping.
    pub fn release(&mut self, _pos: PointerPosition) -> PointerDispatch {
        let Some(bounds) = self.bounds else {
            return PointerDispatch::NONE;
        };
        let release = match self.phase {
            GesturePhase::Pressed { .. } => {
                self.phase = GesturePhase::Idle;
                tracing::trace!(offset = self.offset, "click");
                ReleaseKind::Click
            }
            GesturePhase::Dragging { .. } => {
                let momentum = self.velocity.abs() > self.physics.release_velocity;
                let settle = if momentum {
                    Settle::Momentum {
                        velocity: self.velocity,
                    }
                } else {
                    self.velocity = 0.0;
                    Settle::snap_from(self.offset, &bounds)
                };
                tracing::debug!(
                    offset = self.offset,
                    velocity = self.velocity,
                    to = settle.name(),
                    "drag released"
                );
                self.phase = GesturePhase::Settling(settle);
                ReleaseKind::Drag { momentum }
            }
            GesturePhase::Idle | GesturePhase::Settling(_) => {
                return PointerDispatch {
                    capture: self.capture.release(),
                    ..PointerDispatch::NONE
                };
            }
        };
        PointerDispatch {
            capture: self.capture.release(),
            release: Some(release),
            moved: false,
        }
    }

    /// Interrupt the active press (blur, lost capture).
    ///
    /// A drag snaps without momentum; a bare press ends without a click.
    pub fn cancel(&mut self) -> PointerDispatch {
        let Some(bounds) = self.bounds else {
            return PointerDispatch::NONE;
        };
        let capture = self.capture.release();
        match self.phase {
            GesturePhase::Pressed { .. } => self.phase = GesturePhase::Idle,
            GesturePhase::Dragging { .. } => {
                self.velocity = 0.0;
                self.phase = GesturePhase::Settling(Settle::snap_from(self.offset, &bounds));
            }
            GesturePhase::Idle | GesturePhase::Settling(_) => {
                return PointerDispatch {
                    capture,
                    ..PointerDispatch::NONE
                };
            }
        }
        tracing::debug!(offset = self.offset, "press cancelled");
        PointerDispatch {
            capture,
            release: Some(ReleaseKind::Cancelled),
            moved: false,
        }
    }

    /// Wheel input: glide toward `offset + delta * wheel_scale`.
    ///
    /// Returns `true` when consumed (the host should suppress the native
    /// scroll). Ignored while the pointer is down or the content fits.
    pub fn wheel(&mut self, event: WheelEvent) -> bool {
        let Some(bounds) = self.bounds else {
            return false;
        };
        if bounds.max_offset <= 0.0 || self.is_pointer_down() {
            return false;
        }
        let threshold = self.gesture.wheel_threshold;
        if !(event.dx.abs() > threshold || event.dy.abs() > threshold) {
            return false;
        }
        let delta = event.dominant();
        if !delta.is_finite() {
            return false;
        }
        let target = bounds.clamp(self.offset + delta * self.gesture.wheel_scale);
        tracing::trace!(from = self.offset, to = target, "wheel glide");
        self.velocity = 0.0;
        self.phase = GesturePhase::Settling(Settle::glide(
            self.offset,
            target,
            self.physics.glide_duration(),
        ));
        true
    }

    /// Move to `offset` (clamped), jumping or spring-animating.
    ///
    /// Ignored while the pointer is down. Returns `true` when accepted.
    pub fn scroll_to(&mut self, offset: f64, animate: bool) -> bool {
        let Some(bounds) = self.bounds else {
            return false;
        };
        if self.is_pointer_down() {
            return false;
        }
        let target = bounds.clamp(offset);
        self.velocity = 0.0;
        if animate && target != self.offset {
            self.phase = GesturePhase::Settling(Settle::Snap(SnapSpring {
                target,
                velocity: 0.0,
            }));
        } else {
            self.offset = target;
            self.phase = GesturePhase::Idle;
        }
        tracing::debug!(to = target, animate, "scroll to");
        true
    }

    // -- time ---------------------------------------------------------------

    /// Advance the running settle by `dt`.
    ///
    /// Returns `true` while an animation remains, i.e. the host should
    /// request another frame.
    pub fn frame(&mut self, dt: Duration) -> bool {
        let GesturePhase::Settling(settle) = self.phase else {
            return false;
        };
        let Some(bounds) = self.bounds else {
            return false;
        };
        let step = settle::advance(settle, self.offset, &bounds, &self.physics, dt);
        self.offset = step.offset;
        match step.next {
            Some(next) => {
                if next.name() != settle.name() {
                    tracing::debug!(
                        from = settle.name(),
                        to = next.name(),
                        offset = self.offset,
                        "settle phase change"
                    );
                }
                self.velocity = next.velocity();
                self.phase = GesturePhase::Settling(next);
                true
            }
            None => {
                tracing::debug!(offset = self.offset, "settled");
                self.velocity = 0.0;
                self.phase = GesturePhase::Idle;
                false
            }
        }
    }

    // -- lifecycle ----------------------------------------------------------

    /// Stop everything and forget the bounds.
    ///
    /// Returns the capture release the host still owes, if any.
    pub fn teardown(&mut self) -> Option<CaptureCommand> {
        self.phase = GesturePhase::Idle;
        self.velocity = 0.0;
        self.bounds = None;
        self.capture.release()
    }
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new(GestureConfig::default(), PhysicsConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
