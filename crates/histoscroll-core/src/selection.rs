#![forbid(unsafe_code)]

//! Controlled and uncontrolled selection.
//!
//! The mode is an explicit tag instead of an "external value, else internal
//! value" fallback:
//!
//! - [`SelectionMode::Controlled`]: the caller owns the selected id. A click
//!   only reports intent; what renders as selected changes when the caller
//!   passes a new controlled value.
//! - [`SelectionMode::Uncontrolled`]: the controller owns the id and
//!   updates it on every accepted click.
//!
//! The last uncontrolled id is retained while control is held, so handing
//! control back resumes where the internal state left off.

/// Who owns the selected id, and what it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionMode {
    /// Caller-owned. `None` means the caller selected nothing.
    Controlled(Option<String>),
    /// Internally owned.
    Uncontrolled(Option<String>),
}

impl Default for SelectionMode {
    fn default() -> Self {
        Self::Uncontrolled(None)
    }
}

/// Tracks the selected id.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    mode: SelectionMode,
    retained: Option<String>,
}

impl SelectionController {
    /// Uncontrolled, nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Controlled from the start.
    #[must_use]
    pub fn controlled(id: Option<String>) -> Self {
        Self {
            mode: SelectionMode::Controlled(id),
            retained: None,
        }
    }

    /// Current mode.
    #[inline]
    #[must_use]
    pub fn mode(&self) -> &SelectionMode {
        &self.mode
    }

    /// Whether the caller owns the selection.
    #[inline]
    #[must_use]
    pub fn is_controlled(&self) -> bool {
        matches!(self.mode, SelectionMode::Controlled(_))
    }

    /// The id that renders as selected.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        match &self.mode {
            SelectionMode::Controlled(id) | SelectionMode::Uncontrolled(id) => id.as_deref(),
        }
    }

    /// Whether `id` renders as selected.
    #[inline]
    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected() == Some(id)
    }

    /// Take control with the given value, or update the controlled value.
    pub fn set_controlled(&mut self, id: Option<String>) {
        if let SelectionMode::Uncontrolled(internal) =
            std::mem::replace(&mut self.mode, SelectionMode::Controlled(id))
        {
            self.retained = internal;
        }
    }

    /// Hand control back; the retained internal id becomes current.
    pub fn release_control(&mut self) {
        if self.is_controlled() {
            self.mode = SelectionMode::Uncontrolled(self.retained.take());
        }
    }

    /// Record an accepted click on `id`.
    ///
    /// Uncontrolled: `id` becomes selected. Controlled: nothing changes;
    /// the caller decides. Returns `true` when the rendered selection
    /// changed.
    pub fn select(&mut self, id: &str) -> bool {
        match &mut self.mode {
            SelectionMode::Controlled(_) => false,
            SelectionMode::Uncontrolled(current) => {
                if current.as_deref() == Some(id) {
                    return false;
                }
                *current = Some(id.to_owned());
                true
            }
        }
    }

    /// Clear an uncontrolled selection. No effect when controlled.
    pub fn clear(&mut self) {
        if let SelectionMode::Uncontrolled(current) = &mut self.mode {
            *current = None;
        }
    }
}
