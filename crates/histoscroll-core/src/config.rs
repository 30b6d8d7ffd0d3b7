#![forbid(unsafe_code)]

//! Tunable parameters for layout, gesture recognition and settle physics.
//!
//! Every field has a default, so `TimelineConfig::default()` produces the
//! stock behavior. With the `config` feature the whole tree can be loaded
//! from TOML or JSON:
//!
//! ```toml
//! [layout]
//! item_width = 6.0
//! overscan = 12
//!
//! [physics]
//! friction = 0.9
//! snap = { mode = "jump" }
//! ```
//!
//! ```rust,ignore
//! let config = TimelineConfig::from_toml_file("timeline.toml")?;
//! ```
//!
//! Exact numeric tuning is configuration, not contract: the physics only
//! relies on `friction` lying in `(0, 1)` and on thresholds being
//! non-negative, which [`TimelineConfig::validate`] checks.

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::error::ConfigError;

/// Lower bound for the drag velocity scale.
pub const MIN_VELOCITY_SCALE: f64 = 0.4;
/// Upper bound for the drag velocity scale.
pub const MAX_VELOCITY_SCALE: f64 = 1.0;

// ---------------------------------------------------------------------------
// Top-level TimelineConfig
// ---------------------------------------------------------------------------

/// All tunables for one timeline instance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct TimelineConfig {
    /// Bar geometry and windowing.
    pub layout: LayoutConfig,
    /// Press/drag/wheel recognition.
    pub gesture: GestureConfig,
    /// Momentum, snap and glide physics.
    pub physics: PhysicsConfig,
    /// Quiet period before a resize burst is applied, in milliseconds.
    pub resize_debounce_ms: u64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            gesture: GestureConfig::default(),
            physics: PhysicsConfig::default(),
            resize_debounce_ms: 50,
        }
    }
}

impl TimelineConfig {
    /// Replace the layout section.
    #[must_use]
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Replace the gesture section.
    #[must_use]
    pub fn with_gesture(mut self, gesture: GestureConfig) -> Self {
        self.gesture = gesture;
        self
    }

    /// Replace the physics section.
    #[must_use]
    pub fn with_physics(mut self, physics: PhysicsConfig) -> Self {
        self.physics = physics;
        self
    }

    /// Set the bar width.
    #[must_use]
    pub fn with_item_width(mut self, width: f64) -> Self {
        self.layout.item_width = width;
        self
    }

    /// Set the gap between bars.
    #[must_use]
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.layout.spacing = spacing;
        self
    }

    /// Set the overscan, in items per side.
    #[must_use]
    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.layout.overscan = overscan;
        self
    }

    /// Set the drag start threshold.
    #[must_use]
    pub fn with_drag_threshold(mut self, threshold: f64) -> Self {
        self.gesture.drag_threshold = threshold;
        self
    }

    /// Set the momentum friction coefficient.
    #[must_use]
    pub fn with_friction(mut self, friction: f64) -> Self {
        self.physics.friction = friction;
        self
    }

    /// Set the resize debounce interval.
    #[must_use]
    pub fn with_resize_debounce(mut self, debounce: Duration) -> Self {
        self.resize_debounce_ms = u64::try_from(debounce.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Resize debounce interval.
    #[inline]
    #[must_use]
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    /// `item_width + spacing`.
    #[inline]
    #[must_use]
    pub fn step(&self) -> f64 {
        self.layout.item_width + self.layout.spacing
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let l = &self.layout;
        let g = &self.gesture;
        let p = &self.physics;

        if !(l.item_width.is_finite() && l.item_width > 0.0) {
            errors.push(format!("layout.item_width must be > 0, got {}", l.item_width));
        }
        if !(l.spacing.is_finite() && l.spacing >= 0.0) {
            errors.push(format!("layout.spacing must be >= 0, got {}", l.spacing));
        }
        if !(l.max_height.is_finite() && l.max_height >= 0.0) {
            errors.push(format!("layout.max_height must be >= 0, got {}", l.max_height));
        }
        if !(l.min_item_height.is_finite() && l.min_item_height >= 0.0) {
            errors.push(format!(
                "layout.min_item_height must be >= 0, got {}",
                l.min_item_height
            ));
        }

        if !(g.drag_threshold.is_finite() && g.drag_threshold >= 0.0) {
            errors.push(format!(
                "gesture.drag_threshold must be >= 0, got {}",
                g.drag_threshold
            ));
        }
        if !(MIN_VELOCITY_SCALE..=MAX_VELOCITY_SCALE).contains(&g.velocity_scale) {
            errors.push(format!(
                "gesture.velocity_scale must be in [{MIN_VELOCITY_SCALE}, {MAX_VELOCITY_SCALE}], got {}",
                g.velocity_scale
            ));
        }
        if !(g.wheel_threshold.is_finite() && g.wheel_threshold >= 0.0) {
            errors.push(format!(
                "gesture.wheel_threshold must be >= 0, got {}",
                g.wheel_threshold
            ));
        }
        if !(g.wheel_scale.is_finite() && g.wheel_scale > 0.0) {
            errors.push(format!("gesture.wheel_scale must be > 0, got {}", g.wheel_scale));
        }

        if !(p.friction > 0.0 && p.friction < 1.0) {
            errors.push(format!("physics.friction must be in (0, 1), got {}", p.friction));
        }
        if !(p.stop_velocity.is_finite() && p.stop_velocity > 0.0) {
            errors.push(format!(
                "physics.stop_velocity must be > 0, got {}",
                p.stop_velocity
            ));
        }
        if !(p.release_velocity.is_finite() && p.release_velocity >= 0.0) {
            errors.push(format!(
                "physics.release_velocity must be >= 0, got {}",
                p.release_velocity
            ));
        }
        if !(p.reference_frame_ms.is_finite() && p.reference_frame_ms > 0.0) {
            errors.push(format!(
                "physics.reference_frame_ms must be > 0, got {}",
                p.reference_frame_ms
            ));
        }
        if !(p.snap_rest_delta.is_finite() && p.snap_rest_delta > 0.0) {
            errors.push(format!(
                "physics.snap_rest_delta must be > 0, got {}",
                p.snap_rest_delta
            ));
        }
        if let SnapMode::Spring { stiffness, damping } = p.snap {
            if !(stiffness.is_finite() && stiffness > 0.0) {
                errors.push(format!("physics.snap.stiffness must be > 0, got {stiffness}"));
            }
            if !(damping.is_finite() && damping >= 0.0) {
                errors.push(format!("physics.snap.damping must be >= 0, got {damping}"));
            }
        }
        if p.glide_duration_ms == 0 {
            errors.push("physics.glide_duration_ms must be > 0".into());
        }

        if self.resize_debounce_ms == 0 {
            errors.push("resize_debounce_ms must be > 0".into());
        }

        errors
    }

    /// Validate, turning any findings into [`ConfigError::Validation`].
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str::<Self>(s)
            .map_err(ConfigError::Toml)?
            .validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str::<Self>(s)
            .map_err(ConfigError::Json)?
            .validated()
    }

    /// Serialize to a TOML string.
    #[cfg(feature = "config")]
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::TomlSerialize)
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Bar geometry and windowing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct LayoutConfig {
    /// Width of one bar (default: 5).
    pub item_width: f64,
    /// Gap between bars (default: 2).
    pub spacing: f64,
    /// Height of the tallest bar, i.e. the viewport height (default: 36).
    pub max_height: f64,
    /// Minimum height of any bar with a positive value (default: 12).
    pub min_item_height: f64,
    /// Extra items rendered on each side of the visible span (default: 10).
    pub overscan: usize,
    /// Index scrolled into view at mount (default: none).
    pub initial_index: Option<usize>,
    /// Color token for the selected bar (default: `#0BA5BE`).
    pub selected_color: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            item_width: 5.0,
            spacing: 2.0,
            max_height: 36.0,
            min_item_height: 12.0,
            overscan: 10,
            initial_index: None,
            selected_color: "#0BA5BE".to_string(),
        }
    }
}

/// How displacement is measured against the drag threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum DragMetric {
    /// `|dx|` only; vertical wobble never starts a drag.
    #[default]
    Horizontal,
    /// `sqrt(dx² + dy²)`.
    Euclidean,
}

impl DragMetric {
    /// Displacement of `(dx, dy)` under this metric.
    #[inline]
    #[must_use]
    pub fn distance(self, dx: f64, dy: f64) -> f64 {
        match self {
            Self::Horizontal => dx.abs(),
            Self::Euclidean => dx.hypot(dy),
        }
    }
}

/// Press/drag/wheel recognition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct GestureConfig {
    /// Displacement that turns a press into a drag (default: 5).
    pub drag_threshold: f64,
    /// Metric for `drag_threshold` (default: horizontal).
    pub drag_metric: DragMetric,
    /// Multiplier from last per-move delta to velocity, in
    /// `[0.4, 1.0]` (default: 0.5).
    pub velocity_scale: f64,
    /// Minimum wheel delta that scrolls (default: 1).
    pub wheel_threshold: f64,
    /// Multiplier from wheel delta to offset change (default: 0.8).
    pub wheel_scale: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_threshold: 5.0,
            drag_metric: DragMetric::Horizontal,
            velocity_scale: 0.5,
            wheel_threshold: 1.0,
            wheel_scale: 0.8,
        }
    }
}

impl GestureConfig {
    /// Velocity scale clamped to its legal range.
    #[inline]
    #[must_use]
    pub fn effective_velocity_scale(&self) -> f64 {
        if self.velocity_scale.is_nan() {
            return MIN_VELOCITY_SCALE;
        }
        self.velocity_scale
            .clamp(MIN_VELOCITY_SCALE, MAX_VELOCITY_SCALE)
    }
}

/// How the offset reaches its grid-aligned target after momentum.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(tag = "mode", rename_all = "snake_case"))]
pub enum SnapMode {
    /// Jump straight to the target on the frame momentum ends.
    Jump,
    /// Animate with a damped spring.
    Spring {
        /// Restoring force strength.
        stiffness: f64,
        /// Velocity drag.
        damping: f64,
    },
}

impl Default for SnapMode {
    fn default() -> Self {
        Self::Spring {
            stiffness: 300.0,
            damping: 30.0,
        }
    }
}

/// Momentum, snap and glide physics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct PhysicsConfig {
    /// Velocity retained per reference frame, in `(0, 1)` (default: 0.86).
    pub friction: f64,
    /// Release speed above which momentum runs before snapping
    /// (default: 0.5).
    pub release_velocity: f64,
    /// Speed below which momentum ends and snapping begins (default: 0.1).
    pub stop_velocity: f64,
    /// Length of the reference frame velocities are expressed in, in
    /// milliseconds (default: 16).
    pub reference_frame_ms: f64,
    /// Snap animation (default: spring, stiffness 300, damping 30).
    pub snap: SnapMode,
    /// Distance from the target at which a snap spring settles
    /// (default: 0.1).
    pub snap_rest_delta: f64,
    /// Duration of the ease-out glide started by wheel input
    /// (default: 200).
    pub glide_duration_ms: u64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            friction: 0.86,
            release_velocity: 0.5,
            stop_velocity: 0.1,
            reference_frame_ms: 16.0,
            snap: SnapMode::default(),
            snap_rest_delta: 0.1,
            glide_duration_ms: 200,
        }
    }
}

impl PhysicsConfig {
    /// Glide duration.
    #[inline]
    #[must_use]
    pub fn glide_duration(&self) -> Duration {
        Duration::from_millis(self.glide_duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = TimelineConfig::default();
        assert!(config.validate().is_empty(), "{:?}", config.validate());
        assert_eq!(config.step(), 7.0);
        assert_eq!(config.resize_debounce(), Duration::from_millis(50));
    }

    #[test]
    fn default_values_match_stock_behavior() {
        let config = TimelineConfig::default();
        assert_eq!(config.layout.overscan, 10);
        assert_eq!(config.gesture.drag_threshold, 5.0);
        assert_eq!(config.physics.friction, 0.86);
        assert_eq!(config.layout.selected_color, "#0BA5BE");
    }

    #[test]
    fn validate_catches_bad_friction() {
        for friction in [0.0, 1.0, 1.5, -0.2, f64::NAN] {
            let config = TimelineConfig::default().with_friction(friction);
            let errors = config.validate();
            assert!(
                errors.iter().any(|e| e.contains("physics.friction")),
                "friction {friction} accepted"
            );
        }
    }

    #[test]
    fn validate_catches_zero_width() {
        let config = TimelineConfig::default().with_item_width(0.0);
        assert!(config.validate().iter().any(|e| e.contains("layout.item_width")));
    }

    #[test]
    fn validate_catches_velocity_scale_out_of_range() {
        let mut config = TimelineConfig::default();
        config.gesture.velocity_scale = 0.2;
        assert!(config.validate().iter().any(|e| e.contains("velocity_scale")));
    }

    #[test]
    fn validated_wraps_errors() {
        let err = TimelineConfig::default()
            .with_spacing(-1.0)
            .validated()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref v) if v.len() == 1));
    }

    #[test]
    fn velocity_scale_is_clamped() {
        let mut g = GestureConfig::default();
        g.velocity_scale = 3.0;
        assert_eq!(g.effective_velocity_scale(), MAX_VELOCITY_SCALE);
        g.velocity_scale = 0.0;
        assert_eq!(g.effective_velocity_scale(), MIN_VELOCITY_SCALE);
    }

    #[test]
    fn drag_metrics() {
        assert_eq!(DragMetric::Horizontal.distance(-3.0, 40.0), 3.0);
        assert_eq!(DragMetric::Euclidean.distance(3.0, 4.0), 5.0);
    }

    #[test]
    fn builder_chain() {
        let config = TimelineConfig::default()
            .with_item_width(6.0)
            .with_spacing(3.0)
            .with_overscan(4)
            .with_drag_threshold(8.0)
            .with_resize_debounce(Duration::from_millis(120));
        assert_eq!(config.step(), 9.0);
        assert_eq!(config.layout.overscan, 4);
        assert_eq!(config.gesture.drag_threshold, 8.0);
        assert_eq!(config.resize_debounce_ms, 120);
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_partial_overrides_defaults() {
        let toml = r#"
            [layout]
            item_width = 6.0

            [physics]
            friction = 0.9
            snap = { mode = "jump" }
        "#;
        let config = TimelineConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.layout.item_width, 6.0);
        assert_eq!(config.layout.spacing, 2.0);
        assert_eq!(config.physics.friction, 0.9);
        assert_eq!(config.physics.snap, SnapMode::Jump);
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_roundtrip_preserves_defaults() {
        let text = TimelineConfig::default().to_toml_string().unwrap();
        let back = TimelineConfig::from_toml_str(&text).unwrap();
        assert_eq!(back, TimelineConfig::default());
    }

    #[cfg(feature = "config")]
    #[test]
    fn json_invalid_friction_rejected() {
        let err = TimelineConfig::from_json_str(r#"{"physics": {"friction": 1.2}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
