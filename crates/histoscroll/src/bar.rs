#![forbid(unsafe_code)]

//! Per-bar render attributes.
//!
//! The presentation layer draws whatever [`BarAttrs`] says: a rectangle at
//! `left` of `width` by `height`, filled with `color`. Everything here is
//! derived from the item, its index and the layout metrics, so bars outside
//! the visible window cost nothing.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use histoscroll_core::item::{Item, sanitize_value};

/// Fill for the selected bar.
pub enum SelectedColor<T = ()> {
    /// The same token for every item.
    Fixed(String),
    /// Computed from the selected item.
    Resolver(Arc<dyn Fn(&Item<T>) -> String + Send + Sync>),
}

impl<T> SelectedColor<T> {
    /// Wrap a resolver function.
    pub fn resolver(f: impl Fn(&Item<T>) -> String + Send + Sync + 'static) -> Self {
        Self::Resolver(Arc::new(f))
    }

    /// The selected fill for `item`.
    #[must_use]
    pub fn resolve<'a>(&'a self, item: &Item<T>) -> Cow<'a, str> {
        match self {
            Self::Fixed(token) => Cow::Borrowed(token),
            Self::Resolver(f) => Cow::Owned(f(item)),
        }
    }
}

impl<T> Clone for SelectedColor<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Fixed(token) => Self::Fixed(token.clone()),
            Self::Resolver(f) => Self::Resolver(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for SelectedColor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(token) => f.debug_tuple("Fixed").field(token).finish(),
            Self::Resolver(_) => f.write_str("Resolver(..)"),
        }
    }
}

impl<T> From<&str> for SelectedColor<T> {
    fn from(token: &str) -> Self {
        Self::Fixed(token.to_owned())
    }
}

impl<T> From<String> for SelectedColor<T> {
    fn from(token: String) -> Self {
        Self::Fixed(token)
    }
}

/// Bar height for `value` against `peak`.
///
/// `(value / peak) * max_height`, floored at `min_height` when the value is
/// positive. Zero, negative and non-finite values draw at height 0.
#[must_use]
pub fn bar_height(value: f64, peak: f64, max_height: f64, min_height: f64) -> f64 {
    let value = sanitize_value(value);
    if value <= 0.0 || !(peak.is_finite() && peak > 0.0) {
        return 0.0;
    }
    (value / peak * max_height).max(min_height)
}

/// Everything needed to draw one bar.
#[derive(Debug, Clone, PartialEq)]
pub struct BarAttrs<'a, T = ()> {
    /// Position in the dataset.
    pub index: usize,
    /// The item this bar draws.
    pub item: &'a Item<T>,
    /// Left edge in content coordinates, `index * step`.
    pub left: f64,
    /// Bar width.
    pub width: f64,
    /// Bar height.
    pub height: f64,
    /// Resolved fill.
    pub color: Cow<'a, str>,
    /// Whether this bar is the selected one.
    pub selected: bool,
}

impl<T> BarAttrs<'_, T> {
    /// The item id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.item.id
    }

    /// Hover label.
    #[must_use]
    pub fn tooltip(&self) -> String {
        tooltip_label(self.item)
    }

    /// Left edge relative to the viewport for scroll offset `offset`.
    #[inline]
    #[must_use]
    pub fn viewport_left(&self, offset: f64) -> f64 {
        self.left - offset
    }
}

/// `"ID: {id}, Value: {value}"`.
#[must_use]
pub fn tooltip_label<T>(item: &Item<T>) -> String {
    format!("ID: {}, Value: {}", item.id, item.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_scales_against_peak() {
        assert_eq!(bar_height(50.0, 100.0, 36.0, 12.0), 18.0);
        assert_eq!(bar_height(100.0, 100.0, 36.0, 12.0), 36.0);
    }

    #[test]
    fn small_positive_values_hit_the_floor() {
        assert_eq!(bar_height(1.0, 100.0, 36.0, 12.0), 12.0);
    }

    #[test]
    fn zero_and_invalid_values_draw_flat() {
        assert_eq!(bar_height(0.0, 100.0, 36.0, 12.0), 0.0);
        assert_eq!(bar_height(-3.0, 100.0, 36.0, 12.0), 0.0);
        assert_eq!(bar_height(f64::NAN, 100.0, 36.0, 12.0), 0.0);
    }

    #[test]
    fn tooltip_format() {
        let item = Item::new("bar-4", 12.0, "#ccc");
        assert_eq!(tooltip_label(&item), "ID: bar-4, Value: 12");
        let item = Item::new("x", 3.5, "#ccc");
        assert_eq!(tooltip_label(&item), "ID: x, Value: 3.5");
    }

    #[test]
    fn fixed_color_borrows() {
        let color: SelectedColor = "#0BA5BE".into();
        let item = Item::new("a", 1.0, "#ccc");
        assert!(matches!(color.resolve(&item), Cow::Borrowed("#0BA5BE")));
    }

    #[test]
    fn resolver_sees_the_item() {
        let color =
            SelectedColor::<u8>::resolver(|item| format!("hsl({}, 80%, 50%)", item.payload));
        let item = Item::with_payload("a", 1.0, "#ccc", 200u8);
        assert_eq!(color.resolve(&item), "hsl(200, 80%, 50%)");
        assert_eq!(format!("{color:?}"), "Resolver(..)");
    }
}
