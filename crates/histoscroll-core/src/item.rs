#![forbid(unsafe_code)]

//! Timeline items.

/// One bar on the timeline.
///
/// Items are immutable once handed to a timeline. Position on the axis is
/// the item's index in the dataset; `id` must be unique within it.
#[derive(Debug, Clone, PartialEq)]
pub struct Item<T = ()> {
    /// Stable identifier, reported back on selection.
    pub id: String,
    /// Magnitude to visualize. Expected `>= 0`; anything else draws as zero.
    pub value: f64,
    /// Display token for the unselected bar. Opaque to the core.
    pub color: String,
    /// Caller data carried alongside the bar.
    pub payload: T,
}

impl Item<()> {
    /// Create an item without payload.
    #[must_use]
    pub fn new(id: impl Into<String>, value: f64, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value,
            color: color.into(),
            payload: (),
        }
    }
}

impl<T> Item<T> {
    /// Create an item carrying `payload`.
    #[must_use]
    pub fn with_payload(
        id: impl Into<String>,
        value: f64,
        color: impl Into<String>,
        payload: T,
    ) -> Self {
        Self {
            id: id.into(),
            value,
            color: color.into(),
            payload,
        }
    }

    /// The value with non-finite and negative inputs collapsed to zero.
    #[inline]
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        sanitize_value(self.value)
    }
}

/// Collapse non-finite and negative magnitudes to zero.
#[inline]
#[must_use]
pub fn sanitize_value(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magnitude_clamps_bad_values() {
        assert_eq!(Item::new("a", f64::NAN, "#ccc").magnitude(), 0.0);
        assert_eq!(Item::new("a", f64::INFINITY, "#ccc").magnitude(), 0.0);
        assert_eq!(Item::new("a", -3.0, "#ccc").magnitude(), 0.0);
        assert_eq!(Item::new("a", 4.5, "#ccc").magnitude(), 4.5);
    }

    #[test]
    fn payload_is_carried() {
        let item = Item::with_payload("bar-1", 2.0, "#f66", 42_u32);
        assert_eq!(item.payload, 42);
        assert_eq!(item.id, "bar-1");
    }
}
