#![forbid(unsafe_code)]

//! Post-release settle physics as a pure frame-step function.
//!
//! [`advance`] maps `(settle, offset, bounds, dt)` to the next offset and
//! the next settle phase (or `None` when finished). It owns no clock and
//! schedules nothing, so tests drive it with synthetic `dt` values.
//!
//! # Phases
//!
//! - **Momentum**: with `T = dt / reference_frame`,
//!   `offset += velocity * T`, then `velocity *= friction^T`. Runs until
//!   `|velocity| < stop_velocity`, then hands over to **Snap**.
//! - **Snap**: moves the offset to `round(offset / step) * step` (clamped),
//!   either in one jump or with a damped spring integrated in 4 ms
//!   semi-implicit Euler substeps.
//! - **Glide**: fixed-duration ease-out toward a wheel target. Does not
//!   snap afterwards.
//!
//! # Invariants
//!
//! 1. Every returned offset lies in `[0, bounds.max_offset]`; hitting a
//!    bound hard-clamps, it never bounces.
//! 2. [`Bounds::snap_target`] is idempotent.
//! 3. A finished phase always returns the exact target of that phase.

use web_time::Duration;

use crate::config::{PhysicsConfig, SnapMode};

/// Maximum dt per spring integration step, in seconds.
const MAX_SPRING_STEP_SECS: f64 = 0.004;

/// Spring speed (px/s) below which a snap may come to rest.
const SNAP_REST_SPEED: f64 = 1.0;

/// Scroll limits and grid unit for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Largest legal offset; `0` when the content fits.
    pub max_offset: f64,
    /// Grid unit for snapping.
    pub step: f64,
}

impl Bounds {
    /// Bounds for a given content and viewport extent.
    #[must_use]
    pub fn new(content_length: f64, viewport_length: f64, step: f64) -> Self {
        let max_offset = content_length - viewport_length;
        Self {
            max_offset: if max_offset.is_finite() {
                max_offset.max(0.0)
            } else {
                0.0
            },
            step,
        }
    }

    /// Clamp `offset` into `[0, max_offset]`. NaN maps to 0.
    #[inline]
    #[must_use]
    pub fn clamp(&self, offset: f64) -> f64 {
        if offset.is_nan() {
            return 0.0;
        }
        offset.clamp(0.0, self.max_offset)
    }

    /// Nearest grid-aligned offset, clamped.
    #[must_use]
    pub fn snap_target(&self, offset: f64) -> f64 {
        if !(self.step.is_finite() && self.step > 0.0) {
            return self.clamp(offset);
        }
        self.clamp((offset / self.step).round() * self.step)
    }
}

/// Spring state for a snap in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapSpring {
    /// Where the offset is heading.
    pub target: f64,
    /// Spring velocity in px/s.
    pub velocity: f64,
}

/// Ease-out glide toward a fixed target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glide {
    /// Offset when the glide began.
    pub from: f64,
    /// Offset when it ends.
    pub to: f64,
    /// Time spent so far.
    pub elapsed: Duration,
    /// Total glide time.
    pub duration: Duration,
}

/// The active settle animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Settle {
    /// Inertial decay after a flick. Velocity in px per reference frame.
    Momentum {
        /// Signed velocity; positive moves toward later items.
        velocity: f64,
    },
    /// Moving to the nearest grid line.
    Snap(SnapSpring),
    /// Wheel-driven glide.
    Glide(Glide),
}

impl Settle {
    /// Begin snapping from `offset`.
    #[must_use]
    pub fn snap_from(offset: f64, bounds: &Bounds) -> Self {
        Self::Snap(SnapSpring {
            target: bounds.snap_target(offset),
            velocity: 0.0,
        })
    }

    /// Begin a glide from `from` to `to` over `duration`.
    #[must_use]
    pub fn glide(from: f64, to: f64, duration: Duration) -> Self {
        Self::Glide(Glide {
            from,
            to,
            elapsed: Duration::ZERO,
            duration,
        })
    }

    /// Short phase name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Momentum { .. } => "momentum",
            Self::Snap(_) => "snap",
            Self::Glide(_) => "glide",
        }
    }

    /// Momentum velocity, or `0` in other phases.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        match self {
            Self::Momentum { velocity } => *velocity,
            _ => 0.0,
        }
    }
}

/// Result of one frame step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleFrame {
    /// Offset after the step.
    pub offset: f64,
    /// Phase to continue with, `None` when the settle completed.
    pub next: Option<Settle>,
}

/// Advance `settle` by `dt`. Pure.
#[must_use]
pub fn advance(
    settle: Settle,
    offset: f64,
    bounds: &Bounds,
    physics: &PhysicsConfig,
    dt: Duration,
) -> SettleFrame {
    let offset = bounds.clamp(offset);
    match settle {
        Settle::Momentum { velocity } => momentum_step(velocity, offset, bounds, physics, dt),
        Settle::Snap(spring) => snap_step(spring, offset, bounds, physics, dt),
        Settle::Glide(glide) => glide_step(glide, bounds, dt),
    }
}

fn momentum_step(
    velocity: f64,
    offset: f64,
    bounds: &Bounds,
    physics: &PhysicsConfig,
    dt: Duration,
) -> SettleFrame {
    if !velocity.is_finite() || velocity.abs() < physics.stop_velocity {
        return SettleFrame {
            offset,
            next: Some(Settle::snap_from(offset, bounds)),
        };
    }

    let frames = dt.as_secs_f64() * 1000.0 / physics.reference_frame_ms;
    let offset = bounds.clamp(offset + velocity * frames);
    let velocity = velocity * physics.friction.powf(frames);
    SettleFrame {
        offset,
        next: Some(Settle::Momentum { velocity }),
    }
}

fn snap_step(
    spring: SnapSpring,
    offset: f64,
    bounds: &Bounds,
    physics: &PhysicsConfig,
    dt: Duration,
) -> SettleFrame {
    let target = bounds.clamp(spring.target);
    let (stiffness, damping) = match physics.snap {
        SnapMode::Jump => {
            return SettleFrame {
                offset: target,
                next: None,
            };
        }
        SnapMode::Spring { stiffness, damping } => (stiffness.max(0.1), damping.max(0.0)),
    };

    let mut position = offset;
    let mut velocity = spring.velocity;
    let mut remaining = dt.as_secs_f64();
    while remaining > 0.0 {
        let h = remaining.min(MAX_SPRING_STEP_SECS);
        let acceleration = -stiffness * (position - target) - damping * velocity;
        velocity += acceleration * h;
        position += velocity * h;
        let clamped = bounds.clamp(position);
        if clamped != position {
            position = clamped;
            velocity = 0.0;
        }
        remaining -= h;
    }

    if (position - target).abs() < physics.snap_rest_delta && velocity.abs() < SNAP_REST_SPEED {
        return SettleFrame {
            offset: target,
            next: None,
        };
    }
    SettleFrame {
        offset: position,
        next: Some(Settle::Snap(SnapSpring { target, velocity })),
    }
}

fn glide_step(glide: Glide, bounds: &Bounds, dt: Duration) -> SettleFrame {
    let elapsed = glide.elapsed.saturating_add(dt);
    if elapsed >= glide.duration || glide.duration.is_zero() {
        return SettleFrame {
            offset: bounds.clamp(glide.to),
            next: None,
        };
    }
    let t = elapsed.as_secs_f64() / glide.duration.as_secs_f64();
    let offset = glide.from + (glide.to - glide.from) * ease_out_cubic(t);
    SettleFrame {
        offset: bounds.clamp(offset),
        next: Some(Settle::Glide(Glide { elapsed, ..glide })),
    }
}

/// `1 - (1 - t)^3`.
#[inline]
#[must_use]
pub fn ease_out_cubic(t: f64) -> f64 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn bounds() -> Bounds {
        Bounds::new(7_000.0, 140.0, 7.0)
    }

    fn run(mut settle: Settle, mut offset: f64, b: &Bounds, p: &PhysicsConfig) -> (f64, usize) {
        for frame in 1..=1_000 {
            let out = advance(settle, offset, b, p, FRAME);
            offset = out.offset;
            match out.next {
                Some(next) => settle = next,
                None => return (offset, frame),
            }
        }
        panic!("settle did not finish");
    }

    #[test]
    fn bounds_clamp() {
        let b = bounds();
        assert_eq!(b.max_offset, 6_860.0);
        assert_eq!(b.clamp(-4.0), 0.0);
        assert_eq!(b.clamp(9_999.0), 6_860.0);
        assert_eq!(b.clamp(f64::NAN), 0.0);
    }

    #[test]
    fn content_smaller_than_viewport_pins_to_zero() {
        let b = Bounds::new(21.0, 100.0, 7.0);
        assert_eq!(b.max_offset, 0.0);
        assert_eq!(b.snap_target(3.0), 0.0);
    }

    #[test]
    fn snap_target_rounds_to_grid() {
        let b = bounds();
        assert_eq!(b.snap_target(10.0), 7.0);
        assert_eq!(b.snap_target(10.6), 14.0);
        assert_eq!(b.snap_target(3.4), 0.0);
    }

    #[test]
    fn snap_target_is_idempotent() {
        let b = bounds();
        for offset in [0.0, 3.5, 10.49, 123.456, 6_859.0] {
            let once = b.snap_target(offset);
            assert_eq!(b.snap_target(once), once);
        }
    }

    #[test]
    fn snap_target_clamps_unaligned_max() {
        // max_offset 7 * 3 - 10 = 11 is off-grid; nearest grid line 14 clamps.
        let b = Bounds::new(21.0, 10.0, 7.0);
        assert_eq!(b.snap_target(10.9), 11.0);
    }

    #[test]
    fn momentum_decays_per_reference_frame() {
        let p = PhysicsConfig::default();
        let out = advance(Settle::Momentum { velocity: 2.0 }, 100.0, &bounds(), &p, FRAME);
        assert!((out.offset - 102.0).abs() < 1e-9);
        let v = out.next.unwrap().velocity();
        assert!((v - 1.72).abs() < 1e-9);
    }

    #[test]
    fn momentum_is_frame_rate_independent() {
        let p = PhysicsConfig::default();
        let b = bounds();
        let two_small = {
            let a = advance(
                Settle::Momentum { velocity: 2.0 },
                100.0,
                &b,
                &p,
                Duration::from_millis(8),
            );
            advance(a.next.unwrap(), a.offset, &b, &p, Duration::from_millis(8))
        };
        let one_big = advance(Settle::Momentum { velocity: 2.0 }, 100.0, &b, &p, FRAME);
        let drift = two_small.next.unwrap().velocity() - one_big.next.unwrap().velocity();
        assert!(drift.abs() < 1e-9);
    }

    #[test]
    fn momentum_scenario_snaps_to_multiple_of_step() {
        let p = PhysicsConfig::default();
        let b = bounds();
        let mut settle = Settle::Momentum { velocity: 2.0 };
        let mut offset = 100.0;
        let mut momentum_frames = 0;
        while let Settle::Momentum { .. } = settle {
            let out = advance(settle, offset, &b, &p, FRAME);
            offset = out.offset;
            settle = out.next.unwrap();
            momentum_frames += 1;
            assert!(momentum_frames < 40, "momentum did not decay");
        }
        // 2.0 * 0.86^n < 0.1 after 20 moving frames, plus the hand-over frame.
        assert_eq!(momentum_frames, 21);

        let (final_offset, _) = run(settle, offset, &b, &p);
        assert_eq!(final_offset % 7.0, 0.0);
        assert_eq!(final_offset, b.snap_target(offset));
    }

    #[test]
    fn momentum_hard_clamps_at_bounds() {
        let p = PhysicsConfig::default();
        let b = bounds();
        let out = advance(Settle::Momentum { velocity: -50.0 }, 10.0, &b, &p, FRAME);
        assert_eq!(out.offset, 0.0);
        let out = advance(Settle::Momentum { velocity: 500.0 }, 6_850.0, &b, &p, FRAME);
        assert_eq!(out.offset, b.max_offset);
    }

    #[test]
    fn jump_snap_finishes_in_one_frame() {
        let p = PhysicsConfig {
            snap: SnapMode::Jump,
            ..PhysicsConfig::default()
        };
        let out = advance(Settle::snap_from(45.0, &bounds()), 45.0, &bounds(), &p, FRAME);
        assert_eq!(out.offset, 42.0);
        assert!(out.next.is_none());
    }

    #[test]
    fn spring_snap_converges_within_bounds() {
        let p = PhysicsConfig::default();
        let b = bounds();
        let mut settle = Settle::snap_from(45.0, &b);
        let mut offset = 45.0;
        loop {
            let out = advance(settle, offset, &b, &p, FRAME);
            assert!(out.offset >= 0.0 && out.offset <= b.max_offset);
            offset = out.offset;
            match out.next {
                Some(next) => settle = next,
                None => break,
            }
        }
        assert_eq!(offset, 42.0);
    }

    #[test]
    fn spring_snap_to_upper_bound_never_overshoots() {
        let p = PhysicsConfig::default();
        let b = Bounds::new(21.0, 10.0, 7.0);
        let mut settle = Settle::snap_from(10.6, &b);
        let mut offset = 10.6;
        for _ in 0..500 {
            let out = advance(settle, offset, &b, &p, FRAME);
            assert!(out.offset <= 11.0);
            offset = out.offset;
            match out.next {
                Some(next) => settle = next,
                None => break,
            }
        }
        assert_eq!(offset, 11.0);
    }

    #[test]
    fn glide_eases_out_to_target() {
        let b = bounds();
        let p = PhysicsConfig::default();
        let settle = Settle::glide(100.0, 180.0, Duration::from_millis(200));
        let first = advance(settle, 100.0, &b, &p, Duration::from_millis(100));
        // Ease-out covers more than half the distance in half the time.
        assert!(first.offset > 140.0 && first.offset < 180.0);
        let done = advance(first.next.unwrap(), first.offset, &b, &p, Duration::from_millis(100));
        assert_eq!(done.offset, 180.0);
        assert!(done.next.is_none());
    }

    #[test]
    fn glide_target_outside_bounds_is_clamped() {
        let b = bounds();
        let p = PhysicsConfig::default();
        let out = advance(
            Settle::glide(10.0, -50.0, Duration::from_millis(200)),
            10.0,
            &b,
            &p,
            Duration::from_secs(1),
        );
        assert_eq!(out.offset, 0.0);
    }

    #[test]
    fn zero_dt_is_stationary() {
        let p = PhysicsConfig::default();
        let out = advance(Settle::Momentum { velocity: 3.0 }, 50.0, &bounds(), &p, Duration::ZERO);
        assert_eq!(out.offset, 50.0);
        assert_eq!(out.next.unwrap().velocity(), 3.0);
    }

    #[test]
    fn easing_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
    }
}
