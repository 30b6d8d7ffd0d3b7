// Forbid unsafe in production; deny in tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: scroll state, gesture recognition, settle physics and windowing
//! for horizontally scrolling bar timelines.
//!
//! # Role in histoscroll
//! `histoscroll-core` is headless. It never touches a render tree; the host
//! feeds it pointer events, resize notifications and frame timestamps, and
//! reads back an offset plus a visible index range.
//!
//! # Primary responsibilities
//! - **metrics**: `step` and `peak` derived from the dataset.
//! - **viewport**: measured width, content extent, debounced resize.
//! - **gesture**: press → drag → settle state machine that owns the offset.
//! - **settle**: pure frame-step physics for momentum, snap and glide.
//! - **window**: overscanned index range for the current offset.
//! - **selection**: controlled and uncontrolled selection.
//!
//! # How it fits in the system
//! The facade crate (`histoscroll`) composes these pieces into a
//! `Timeline<T>` and turns the visible range into per-bar geometry.

pub mod capture;
pub mod config;
pub mod error;
pub mod event;
pub mod gesture;
pub mod item;
pub mod logging;
pub mod metrics;
pub mod selection;
pub mod settle;
pub mod timer;
pub mod viewport;
pub mod window;

pub use capture::{CaptureCommand, PointerCapture};
pub use config::{
    DragMetric, GestureConfig, LayoutConfig, PhysicsConfig, SnapMode, TimelineConfig,
};
pub use error::ConfigError;
pub use event::{PointerEvent, PointerKind, PointerPosition, WheelEvent};
pub use gesture::{GestureController, GesturePhase, PointerDispatch, ReleaseKind};
pub use item::Item;
pub use metrics::{LayoutMetrics, MetricsCache};
pub use selection::{SelectionController, SelectionMode};
pub use settle::{Bounds, Settle};
pub use timer::DebounceTimer;
pub use viewport::{ViewportState, ViewportTracker};
pub use window::VisibleWindow;
