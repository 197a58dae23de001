//! Option catalog
//!
//! The universe of known `(value, label)` pairs a widget can offer. The
//! catalog keeps host order and is unique by value; it only grows when a
//! new tag is created through the selection model.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single selectable option
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagOption {
    /// Unique key submitted with the form
    pub value: String,
    /// Display text
    pub label: String,
}

impl TagOption {
    /// Create a new option
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Ordered, value-unique collection of options
#[derive(Debug, Clone, Default)]
pub struct OptionCatalog {
    options: Vec<TagOption>,
    index: HashMap<String, usize>,
}

impl OptionCatalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from host options
    ///
    /// Later duplicates of a value are dropped; the first occurrence wins.
    #[must_use]
    pub fn from_options(options: impl IntoIterator<Item = TagOption>) -> Self {
        let mut catalog = Self::new();
        for option in options {
            catalog.insert(option);
        }
        catalog
    }

    /// Append an option if its value is not already known
    ///
    /// Returns `true` if the option was added.
    pub(crate) fn insert(&mut self, option: TagOption) -> bool {
        if self.index.contains_key(&option.value) {
            return false;
        }
        self.index.insert(option.value.clone(), self.options.len());
        self.options.push(option);
        true
    }

    /// Look up an option by value
    #[must_use]
    pub fn get(&self, value: &str) -> Option<&TagOption> {
        self.index.get(value).map(|&idx| &self.options[idx])
    }

    /// Whether an option with this value exists
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.index.contains_key(value)
    }

    /// Iterate options in catalog order
    pub fn iter(&self) -> std::slice::Iter<'_, TagOption> {
        self.options.iter()
    }

    /// Number of options
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Whether the catalog has no options
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl<'a> IntoIterator for &'a OptionCatalog {
    type Item = &'a TagOption;
    type IntoIter = std::slice::Iter<'a, TagOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
