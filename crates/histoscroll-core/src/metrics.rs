#![forbid(unsafe_code)]

//! Per-item layout constants derived from the dataset.
//!
//! [`LayoutMetrics::compute`] is a pure function of the items and the bar
//! geometry. [`MetricsCache`] memoizes it on dataset identity so that the
//! scan over every item happens when the dataset is replaced, never on a
//! gesture frame.
//!
//! # Invariants
//!
//! 1. `peak >= 1` for every input, including an empty dataset.
//! 2. `peak >= item.magnitude()` for every item.
//! 3. `step = item_width + spacing`.

use std::fmt;
use std::sync::{Arc, Weak};

use crate::item::Item;

/// Grid step and value ceiling for one dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    /// Distance between the starts of consecutive bars.
    pub step: f64,
    /// Largest magnitude in the dataset, floored at 1.
    pub peak: f64,
}

impl LayoutMetrics {
    /// Derive metrics from the dataset.
    #[must_use]
    pub fn compute<T>(items: &[Item<T>], item_width: f64, spacing: f64) -> Self {
        let peak = items
            .iter()
            .map(Item::magnitude)
            .fold(1.0_f64, f64::max);
        Self {
            step: item_width + spacing,
            peak,
        }
    }

    /// Total content extent for `count` items.
    #[inline]
    #[must_use]
    pub fn content_length(&self, count: usize) -> f64 {
        count as f64 * self.step
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Geometry {
    item_width: f64,
    spacing: f64,
}

/// Memoizes [`LayoutMetrics`] on dataset identity.
///
/// The cache holds a [`Weak`] handle to the last dataset it measured.
/// Replacing the dataset with a new `Arc` (even one with equal contents)
/// recomputes, while cloning the same `Arc` does not. The weak handle pins
/// the allocation, so a dropped dataset can never alias a later one.
pub struct MetricsCache<T = ()> {
    dataset: Weak<[Item<T>]>,
    geometry: Option<Geometry>,
    metrics: Option<LayoutMetrics>,
    recomputes: u64,
}

impl<T> Default for MetricsCache<T> {
    fn default() -> Self {
        Self {
            dataset: Weak::<[Item<T>; 0]>::new(),
            geometry: None,
            metrics: None,
            recomputes: 0,
        }
    }
}

impl<T> fmt::Debug for MetricsCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetricsCache")
            .field("live", &(self.dataset.strong_count() > 0))
            .field("geometry", &self.geometry)
            .field("metrics", &self.metrics)
            .field("recomputes", &self.recomputes)
            .finish()
    }
}

impl<T> MetricsCache<T> {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Metrics for `items`, recomputed only when the dataset or the bar
    /// geometry changed since the last call.
    pub fn get(&mut self, items: &Arc<[Item<T>]>, item_width: f64, spacing: f64) -> LayoutMetrics {
        let geometry = Geometry {
            item_width,
            spacing,
        };
        if let Some(metrics) = self.metrics
            && self.geometry == Some(geometry)
            && Weak::ptr_eq(&self.dataset, &Arc::downgrade(items))
        {
            return metrics;
        }

        let metrics = LayoutMetrics::compute(items, item_width, spacing);
        tracing::trace!(
            items = items.len(),
            step = metrics.step,
            peak = metrics.peak,
            "layout metrics recomputed"
        );
        self.dataset = Arc::downgrade(items);
        self.geometry = Some(geometry);
        self.metrics = Some(metrics);
        self.recomputes += 1;
        metrics
    }

    /// Number of full recomputations performed so far.
    #[inline]
    #[must_use]
    pub fn recomputes(&self) -> u64 {
        self.recomputes
    }
}
