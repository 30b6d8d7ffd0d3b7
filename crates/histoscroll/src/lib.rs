#![forbid(unsafe_code)]

//! histoscroll public facade crate.
//!
//! A virtualized, horizontally scrolling bar timeline: drag to pan with
//! momentum, snap to the bar grid, click to select, and only ever
//! materialize the bars in view. This crate composes the headless pieces
//! from `histoscroll-core` into [`Timeline`] and turns the visible range
//! into per-bar [`BarAttrs`].
//!
//! ```
//! use histoscroll::prelude::*;
//!
//! let items: Vec<Item> = (0..1_000)
//!     .map(|i| Item::new(format!("bar-{i}"), (i % 40) as f64, "#9aa5b1"))
//!     .collect();
//! let mut timeline: Timeline = Timeline::new(TimelineConfig::default())?.with_dataset(items);
//! timeline.mount(280.0);
//!
//! for bar in timeline.bars() {
//!     let _ = (bar.left - timeline.offset(), bar.height, &bar.color);
//! }
//! # Ok::<(), histoscroll::Error>(())
//! ```

use std::fmt;

pub mod bar;
pub mod timeline;

// --- Core re-exports -------------------------------------------------------

pub use histoscroll_core::config::{
    DragMetric, GestureConfig, LayoutConfig, PhysicsConfig, SnapMode, TimelineConfig,
};
pub use histoscroll_core::event::{PointerEvent, PointerKind, PointerPosition, WheelEvent};
pub use histoscroll_core::gesture::{GesturePhase, PointerDispatch, ReleaseKind};
pub use histoscroll_core::item::Item;
pub use histoscroll_core::logging;
pub use histoscroll_core::metrics::LayoutMetrics;
pub use histoscroll_core::viewport::ViewportState;
pub use histoscroll_core::window::VisibleWindow;
pub use histoscroll_core::{CaptureCommand, ConfigError};

// --- Facade types ----------------------------------------------------------

pub use bar::{BarAttrs, SelectedColor};
pub use timeline::{CursorHint, SelectionEvent, Teardown, Timeline};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for histoscroll.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// Configuration failed to load or validate.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid timeline configuration: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for histoscroll APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude ---------------------------------------------------------------

/// Everything a host needs for day-to-day use.
pub mod prelude {
    pub use crate::{
        BarAttrs, CaptureCommand, CursorHint, Error, Item, PointerEvent, Result, SelectedColor,
        SelectionEvent, Timeline, TimelineConfig, WheelEvent,
    };

    pub use crate::core;
}

pub use histoscroll_core as core;
