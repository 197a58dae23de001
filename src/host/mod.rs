//! Host form-control adapter
//!
//! The widget enhances a multi-select control owned by its host (a form,
//! a config file, a terminal session). The host is the persistence layer
//! for the final selection: the widget reads the option list and initial
//! selection from it, and writes every accepted change back.
//!
//! [`SelectControl`] is an in-memory implementation that can be loaded from
//! a TOML catalog file:
//!
//! ```toml
//! multiple = true
//!
//! [[options]]
//! value = "rust"
//! label = "Rust"
//! selected = true
//! ```

use crate::catalog::TagOption;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Interface to the control the widget enhances
pub trait HostControl {
    /// Whether the control accepts more than one selection
    fn is_multiple(&self) -> bool;

    /// All options in host order
    fn options(&self) -> Vec<TagOption>;

    /// Values currently flagged as selected, in host order
    fn selected_values(&self) -> Vec<String>;

    /// Set the selected flag of an option
    ///
    /// When selecting a value the host does not know, a new option is
    /// appended first.
    fn set_selected(&mut self, option: &TagOption, selected: bool);

    /// Notify observers of the control that its value changed
    fn dispatch_change(&mut self);

    /// Mark the control as hidden behind (or restored from) the widget
    fn set_enhanced(&mut self, enhanced: bool);
}

/// An option as stored by [`SelectControl`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostOption {
    /// Submitted value
    pub value: String,
    /// Display text
    pub label: String,
    /// Selected flag
    #[serde(default)]
    pub selected: bool,
}

impl HostOption {
    /// Create an unselected option
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            selected: false,
        }
    }

    /// Set the selected flag
    #[must_use]
    pub const fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

const fn default_multiple() -> bool {
    true
}

/// In-memory multi-select control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectControl {
    /// Whether multiple selection is enabled
    #[serde(default = "default_multiple")]
    pub multiple: bool,
    /// Options in host order
    #[serde(default)]
    pub options: Vec<HostOption>,
    #[serde(skip)]
    change_events: usize,
    #[serde(skip)]
    enhanced: bool,
}

impl Default for SelectControl {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl SelectControl {
    /// Create a multi-select control with the given options
    #[must_use]
    pub const fn new(options: Vec<HostOption>) -> Self {
        Self {
            multiple: true,
            options,
            change_events: 0,
            enhanced: false,
        }
    }

    /// Create a single-select control (rejected by the widget)
    #[must_use]
    pub const fn single(options: Vec<HostOption>) -> Self {
        Self {
            multiple: false,
            options,
            change_events: 0,
            enhanced: false,
        }
    }

    /// Parse a control from TOML text
    ///
    /// # Errors
    ///
    /// Returns `TagSelectError::Catalog` if the text is not a valid catalog.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a control from a TOML catalog file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Write the control back to a TOML catalog file
    ///
    /// # Errors
    ///
    /// Returns an error if the control cannot be serialized or written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = toml::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }

    /// Number of change notifications dispatched so far
    #[must_use]
    pub const fn change_count(&self) -> usize {
        self.change_events
    }

    /// Whether the widget currently hides this control
    #[must_use]
    pub const fn is_enhanced(&self) -> bool {
        self.enhanced
    }
}

impl HostControl for SelectControl {
    fn is_multiple(&self) -> bool {
        self.multiple
    }

    fn options(&self) -> Vec<TagOption> {
        self.options
            .iter()
            .map(|o| TagOption::new(o.value.clone(), o.label.clone()))
            .collect()
    }

    fn selected_values(&self) -> Vec<String> {
        self.options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value.clone())
            .collect()
    }

    fn set_selected(&mut self, option: &TagOption, selected: bool) {
        if let Some(existing) = self.options.iter_mut().find(|o| o.value == option.value) {
            existing.selected = selected;
        } else if selected {
            self.options
                .push(HostOption::new(option.value.clone(), option.label.clone()).selected(true));
        }
    }

    fn dispatch_change(&mut self) {
        self.change_events += 1;
    }

    fn set_enhanced(&mut self, enhanced: bool) {
        self.enhanced = enhanced;
    }
}
