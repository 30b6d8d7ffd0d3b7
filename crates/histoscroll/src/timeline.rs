#![forbid(unsafe_code)]

//! The composed timeline.
//!
//! [`Timeline`] wires the core pieces together for one mounted instance:
//!
//! ```text
//! dataset ──▶ MetricsCache ──▶ {step, peak}
//!                                 │
//! resize ──▶ ViewportTracker ─────┼──▶ Bounds ──▶ GestureController ──▶ offset
//!                                 │                                      │
//!                                 └──────────────▶ VisibleWindow ◀───────┘
//!                                                      │
//! click ──▶ SelectionController ──▶ SelectionEvent     ▼
//!                                                   BarAttrs
//! ```
//!
//! The host owns the clock and the render tree. It calls [`Timeline::frame`]
//! from its animation scheduler, forwards pointer and wheel input, and
//! draws [`Timeline::bars`].
//!
//! # Invariants
//!
//! 1. Bounds are re-derived whenever the dataset, the bar geometry or the
//!    applied viewport width changes.
//! 2. A click is dropped when the press it came from crossed the drag
//!    threshold.
//! 3. [`Timeline::teardown`] returns every outstanding host obligation.

use std::sync::Arc;

use histoscroll_core::gesture::{GestureController, PointerDispatch};
use histoscroll_core::{
    Bounds, CaptureCommand, Item, LayoutMetrics, MetricsCache, PointerEvent, PointerKind,
    SelectionController, TimelineConfig, ViewportState, ViewportTracker, VisibleWindow,
    WheelEvent,
};
use web_time::{Duration, Instant};

use crate::Result;
use crate::bar::{BarAttrs, SelectedColor, bar_height};

/// Pointer cursor the host should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    /// Content fits; nothing to grab.
    Default,
    /// Scrollable and idle.
    Grab,
    /// Dragging.
    Grabbing,
}

/// An accepted click.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionEvent<'a, T = ()> {
    /// Id of the clicked item.
    pub id: &'a str,
    /// Its position in the dataset.
    pub index: usize,
    /// The item itself.
    pub item: &'a Item<T>,
}

/// What the host still owes after [`Timeline::teardown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Teardown {
    /// Detach global pointer listeners.
    pub capture: Option<CaptureCommand>,
    /// Whether a pending resize was discarded.
    pub cancelled_resize: bool,
}

/// One horizontally scrolling bar timeline.
#[derive(Debug)]
pub struct Timeline<T = ()> {
    config: TimelineConfig,
    items: Arc<[Item<T>]>,
    metrics_cache: MetricsCache<T>,
    metrics: LayoutMetrics,
    viewport: ViewportTracker,
    gesture: GestureController,
    selection: SelectionController,
    selected_color: SelectedColor<T>,
    last_frame: Option<Instant>,
}

impl<T> Timeline<T> {
    /// Create an empty, unmounted timeline.
    ///
    /// Fails when `config` does not validate.
    pub fn new(config: TimelineConfig) -> Result<Self> {
        let config = config.validated()?;
        let items: Arc<[Item<T>]> = Arc::from(Vec::new());
        let mut metrics_cache = MetricsCache::new();
        let metrics = metrics_cache.get(&items, config.layout.item_width, config.layout.spacing);
        Ok(Self {
            viewport: ViewportTracker::new(config.resize_debounce()),
            gesture: GestureController::new(config.gesture.clone(), config.physics.clone()),
            selection: SelectionController::new(),
            selected_color: SelectedColor::Fixed(config.layout.selected_color.clone()),
            config,
            items,
            metrics_cache,
            metrics,
            last_frame: None,
        })
    }

    /// Builder form of [`set_dataset`](Self::set_dataset).
    #[must_use]
    pub fn with_dataset(mut self, items: impl Into<Arc<[Item<T>]>>) -> Self {
        self.set_dataset(items);
        self
    }

    /// Builder form of [`set_selected_color`](Self::set_selected_color).
    #[must_use]
    pub fn with_selected_color(mut self, color: impl Into<SelectedColor<T>>) -> Self {
        self.selected_color = color.into();
        self
    }

    // -- inputs -------------------------------------------------------------

    /// Replace the dataset wholesale.
    pub fn set_dataset(&mut self, items: impl Into<Arc<[Item<T>]>>) {
        self.items = items.into();
        self.refresh_metrics();
        tracing::debug!(
            items = self.items.len(),
            peak = self.metrics.peak,
            "dataset replaced"
        );
    }

    /// Fill for the selected bar.
    pub fn set_selected_color(&mut self, color: impl Into<SelectedColor<T>>) {
        self.selected_color = color.into();
    }

    /// Change the bar geometry. Bounds and the offset follow.
    ///
    /// A non-positive width or negative spacing is ignored.
    pub fn set_bar_geometry(&mut self, item_width: f64, spacing: f64) {
        if !(item_width.is_finite() && item_width > 0.0 && spacing.is_finite() && spacing >= 0.0) {
            tracing::warn!(item_width, spacing, "invalid bar geometry ignored");
            return;
        }
        self.config.layout.item_width = item_width;
        self.config.layout.spacing = spacing;
        self.refresh_metrics();
    }

    /// Take control of the selection. `None` selects nothing.
    pub fn set_controlled_selection(&mut self, id: Option<String>) {
        self.selection.set_controlled(id);
    }

    /// Hand selection back to the timeline.
    pub fn release_selection_control(&mut self) {
        self.selection.release_control();
    }

    // -- lifecycle ----------------------------------------------------------

    /// First synchronous measurement. Applies the configured initial index.
    pub fn mount(&mut self, width: f64) -> ViewportState {
        let state = self.viewport.mount(width);
        self.sync_bounds();
        if let Some(index) = self.config.layout.initial_index {
            self.scroll_to_index(index, false);
        }
        state
    }

    /// Host reported a new element width. Applied after the debounce
    /// interval by [`frame`](Self::frame) or [`advance`](Self::advance).
    pub fn resize(&mut self, width: f64, now: Instant) {
        self.viewport.observe_resize(width, now);
    }

    /// Stop animations, drop the debounce timer and release listeners.
    pub fn teardown(mut self) -> Teardown {
        let cancelled_resize = self.viewport.teardown();
        let capture = self.gesture.teardown();
        tracing::debug!(
            release_capture = capture.is_some(),
            cancelled_resize,
            "timeline torn down"
        );
        Teardown {
            capture,
            cancelled_resize,
        }
    }

    // -- time ---------------------------------------------------------------

    /// Animation-frame callback.
    ///
    /// `dt` is measured from the previous call while an animation runs; the
    /// first frame after idle advances by zero. Returns `true` when the host
    /// should schedule another frame.
    pub fn frame(&mut self, now: Instant) -> bool {
        let dt = self
            .last_frame
            .map_or(Duration::ZERO, |prev| now.saturating_duration_since(prev));
        let more = self.step(now, dt);
        self.last_frame = more.then_some(now);
        more
    }

    /// Advance by an explicit `dt`, with `now` driving the resize debounce.
    pub fn advance(&mut self, now: Instant, dt: Duration) -> bool {
        self.step(now, dt)
    }

    fn step(&mut self, now: Instant, dt: Duration) -> bool {
        if self.viewport.poll(now).is_some() {
            self.sync_bounds();
        }
        let animating = self.gesture.frame(dt);
        animating || self.viewport.has_pending_resize()
    }

    // -- pointer ------------------------------------------------------------

    /// Forward a pointer event.
    pub fn pointer(&mut self, event: PointerEvent) -> PointerDispatch {
        if !event.is_valid() {
            return PointerDispatch::NONE;
        }
        let dispatch = match event.kind {
            PointerKind::Press => self.gesture.press(event.pos),
            PointerKind::Move => self.gesture.move_to(event.pos),
            PointerKind::Release => self.gesture.release(event.pos),
            PointerKind::Cancel => self.gesture.cancel(),
        };
        if dispatch.release.is_some() || dispatch.capture.is_some() {
            self.last_frame = None;
        }
        dispatch
    }

    /// Forward a wheel event. `true` means consumed.
    pub fn wheel(&mut self, event: WheelEvent) -> bool {
        let consumed = self.gesture.wheel(event);
        if consumed {
            self.last_frame = None;
        }
        consumed
    }

    /// A click on the bar at `index`.
    ///
    /// Dropped when the originating press dragged, or the index is out of
    /// range. Otherwise updates an uncontrolled selection and reports the
    /// click either way.
    pub fn click(&mut self, index: usize) -> Option<SelectionEvent<'_, T>> {
        if self.gesture.moved_significantly() {
            tracing::trace!(index, "click after drag suppressed");
            return None;
        }
        let item = self.items.get(index)?;
        if self.selection.select(&item.id) {
            tracing::debug!(id = %item.id, index, "selection changed");
        }
        Some(SelectionEvent {
            id: &item.id,
            index,
            item,
        })
    }

    /// A click at viewport x-coordinate `x`.
    pub fn click_at(&mut self, x: f64) -> Option<SelectionEvent<'_, T>> {
        let index = self.hit_test(x)?;
        self.click(index)
    }

    /// Jump or spring to bar `index` (clamped into the scroll range).
    pub fn scroll_to_index(&mut self, index: usize, animate: bool) -> bool {
        let target = index as f64 * self.metrics.step;
        let accepted = self.gesture.scroll_to(target, animate);
        if accepted && animate {
            self.last_frame = None;
        }
        accepted
    }

    // -- queries ------------------------------------------------------------

    /// Index whose hitbox contains viewport x-coordinate `x`.
    ///
    /// Hitboxes are `step` wide and centred on each bar, so the spacing
    /// between bars is split between its neighbours.
    #[must_use]
    pub fn hit_test(&self, x: f64) -> Option<usize> {
        let step = self.metrics.step;
        if !x.is_finite() || self.items.is_empty() {
            return None;
        }
        let content_x = self.gesture.offset() + x;
        let shifted = content_x - self.config.layout.item_width / 2.0 + step / 2.0;
        if shifted < 0.0 {
            return None;
        }
        let index = (shifted / step).floor() as usize;
        (index < self.items.len()).then_some(index)
    }

    /// Indices to render for the current offset. Empty until mounted.
    #[must_use]
    pub fn visible_window(&self) -> VisibleWindow {
        let Some(state) = self.viewport.state() else {
            return VisibleWindow::EMPTY;
        };
        VisibleWindow::compute(
            self.gesture.offset(),
            state.viewport_length,
            self.metrics.step,
            self.items.len(),
            self.config.layout.overscan,
        )
    }

    /// Render attributes for every bar in the visible window.
    pub fn bars(&self) -> impl Iterator<Item = BarAttrs<'_, T>> + '_ {
        self.visible_window()
            .range()
            .filter_map(move |index| self.bar(index))
    }

    /// Render attributes for the bar at `index`.
    #[must_use]
    pub fn bar(&self, index: usize) -> Option<BarAttrs<'_, T>> {
        let item = self.items.get(index)?;
        let layout = &self.config.layout;
        let selected = self.selection.is_selected(&item.id);
        let color = if selected {
            self.selected_color.resolve(item)
        } else {
            item.color.as_str().into()
        };
        Some(BarAttrs {
            index,
            item,
            left: index as f64 * self.metrics.step,
            width: layout.item_width,
            height: bar_height(
                item.value,
                self.metrics.peak,
                layout.max_height,
                layout.min_item_height,
            ),
            color,
            selected,
        })
    }

    /// Current scroll offset.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.gesture.offset()
    }

    /// Current velocity in px per reference frame.
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.gesture.velocity()
    }

    /// Whether the pointer is dragging the strip.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    /// Whether the content overflows the measured viewport.
    #[inline]
    #[must_use]
    pub fn is_scrollable(&self) -> bool {
        self.viewport.is_scrollable()
    }

    /// Cursor to show over the timeline.
    #[must_use]
    pub fn cursor(&self) -> CursorHint {
        if !self.is_scrollable() {
            CursorHint::Default
        } else if self.is_dragging() {
            CursorHint::Grabbing
        } else {
            CursorHint::Grab
        }
    }

    /// Id that renders as selected.
    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.selection.selected()
    }

    /// Layout metrics for the current dataset.
    #[inline]
    #[must_use]
    pub fn metrics(&self) -> LayoutMetrics {
        self.metrics
    }

    /// Applied viewport geometry, `None` until mounted.
    #[must_use]
    pub fn viewport(&self) -> Option<ViewportState> {
        self.viewport.state()
    }

    /// The dataset.
    #[must_use]
    pub fn items(&self) -> &Arc<[Item<T>]> {
        &self.items
    }

    /// Effective configuration.
    #[must_use]
    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    /// The gesture controller, for inspection.
    #[must_use]
    pub fn gesture(&self) -> &GestureController {
        &self.gesture
    }

    // -- internals ----------------------------------------------------------

    fn refresh_metrics(&mut self) {
        let layout = &self.config.layout;
        self.metrics = self
            .metrics_cache
            .get(&self.items, layout.item_width, layout.spacing);
        self.viewport
            .set_content_length(self.metrics.content_length(self.items.len()));
        self.sync_bounds();
    }

    fn sync_bounds(&mut self) {
        if let Some(state) = self.viewport.state() {
            self.gesture.set_bounds(Bounds::new(
                state.content_length,
                state.viewport_length,
                self.metrics.step,
            ));
        }
    }
}
