//! Selection model
//!
//! Ordered set of chosen values. Insertion order is display order, and a
//! companion hash set gives constant-time membership checks.
//!
//! Invariants held after every mutation:
//! - no value appears twice
//! - `count() <= max_tags` when a ceiling is set
//! - every selected value has an option in the catalog
//!
//! The `min_tags` floor is only checked on removal, so an initial
//! population may start below it.

use crate::catalog::{OptionCatalog, TagOption};
use std::collections::HashSet;

/// Count limits applied to a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    /// Selection ceiling (`None` = unlimited)
    pub max_tags: Option<usize>,
    /// Removal floor
    pub min_tags: usize,
}

impl Bounds {
    /// Create bounds from a ceiling and a floor
    #[must_use]
    pub const fn new(max_tags: Option<usize>, min_tags: usize) -> Self {
        Self { max_tags, min_tags }
    }

    /// Whether `count` selected tags leaves no room for another
    #[must_use]
    pub const fn is_full(&self, count: usize) -> bool {
        match self.max_tags {
            Some(max) => count >= max,
            None => false,
        }
    }
}

/// Currently chosen values plus the catalog they are drawn from
#[derive(Debug, Clone)]
pub struct SelectionModel {
    catalog: OptionCatalog,
    values: Vec<String>,
    members: HashSet<String>,
    bounds: Bounds,
}

impl SelectionModel {
    /// Create an empty selection over a catalog
    #[must_use]
    pub fn new(catalog: OptionCatalog, bounds: Bounds) -> Self {
        Self {
            catalog,
            values: Vec::new(),
            members: HashSet::new(),
            bounds,
        }
    }

    /// Select a value
    ///
    /// Refused (returns `false`, no state change) when the value is already
    /// selected or the ceiling is reached. A value unknown to the catalog is
    /// appended to it as `{value, label}`.
    pub fn select(&mut self, value: &str, label: &str) -> bool {
        if self.members.contains(value) {
            tracing::debug!(value, "select refused: already selected");
            return false;
        }
        if self.bounds.is_full(self.values.len()) {
            tracing::debug!(value, max = ?self.bounds.max_tags, "select refused: limit reached");
            return false;
        }

        if self.catalog.insert(TagOption::new(value, label)) {
            tracing::debug!(value, label, "created catalog option");
        }
        self.values.push(value.to_string());
        self.members.insert(value.to_string());
        tracing::debug!(value, count = self.values.len(), "selected");
        true
    }

    /// Deselect a value
    ///
    /// Refused when the value is not selected or removal would drop the
    /// count below `min_tags`. The catalog is left untouched.
    pub fn deselect(&mut self, value: &str) -> bool {
        if !self.members.contains(value) {
            return false;
        }
        if self.values.len() <= self.bounds.min_tags {
            tracing::debug!(value, min = self.bounds.min_tags, "deselect refused: floor reached");
            return false;
        }

        self.members.remove(value);
        self.values.retain(|v| v != value);
        tracing::debug!(value, count = self.values.len(), "deselected");
        true
    }

    /// Snapshot of selected values in insertion order
    #[must_use]
    pub fn current_values(&self) -> Vec<String> {
        self.values.clone()
    }

    /// Borrow selected values in insertion order
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Number of selected values
    #[must_use]
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// Whether a value is selected
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.members.contains(value)
    }

    /// Most recently selected value
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.values.last().map(String::as_str)
    }

    /// Selected options in display order
    #[must_use]
    pub fn selected_options(&self) -> Vec<TagOption> {
        self.values
            .iter()
            .filter_map(|value| self.catalog.get(value).cloned())
            .collect()
    }

    /// Whether the ceiling is reached
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.bounds.is_full(self.values.len())
    }

    /// The catalog backing this selection
    #[must_use]
    pub const fn catalog(&self) -> &OptionCatalog {
        &self.catalog
    }

    /// Configured bounds
    #[must_use]
    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }
}
