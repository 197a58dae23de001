//! Keyboard highlight over the suggestion list
//!
//! Movement saturates at both ends instead of wrapping. Moving up from the
//! first row returns to "no highlight".

use crate::suggest::SuggestionEntry;

/// Highlighted row in the current suggestion list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigationCursor {
    index: Option<usize>,
}

impl NavigationCursor {
    /// Create a cursor with nothing highlighted
    #[must_use]
    pub const fn new() -> Self {
        Self { index: None }
    }

    /// Highlighted index, if any
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        self.index
    }

    /// Whether nothing is highlighted
    #[must_use]
    pub const fn is_none(&self) -> bool {
        self.index.is_none()
    }

    /// Move down one row within a list of `len` rows
    pub fn move_next(&mut self, len: usize) {
        if len == 0 {
            self.index = None;
            return;
        }
        self.index = Some(match self.index {
            None => 0,
            Some(idx) => (idx + 1).min(len - 1),
        });
    }

    /// Move up one row; from the first row this clears the highlight
    pub const fn move_previous(&mut self) {
        self.index = match self.index {
            None | Some(0) => None,
            Some(idx) => Some(idx - 1),
        };
    }

    /// Clear the highlight
    pub const fn reset(&mut self) {
        self.index = None;
    }

    /// Resolve the highlighted entry in `list`
    ///
    /// Returns `None` when nothing is highlighted or the index does not
    /// address a row of this list.
    #[must_use]
    pub fn activate<'a>(&self, list: &'a [SuggestionEntry]) -> Option<&'a SuggestionEntry> {
        self.index.and_then(|idx| list.get(idx))
    }
}
