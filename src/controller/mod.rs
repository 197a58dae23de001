//! Widget controller
//!
//! [`TagSelect`] owns the catalog, selection, query, suggestion list and
//! cursor for one enhanced host control, and reacts to events reported by a
//! rendering layer. Every operation is synchronous and runs to completion.
//!
//! After any accepted change (query edit, select, deselect) the suggestion
//! list is rebuilt and the cursor is reset, so a highlight never points into
//! a stale list.
//!
//! # Examples
//!
//! ```
//! use tagselect::{HostOption, Key, SelectControl, TagSelect, TagSelectConfig};
//!
//! let host = SelectControl::new(vec![
//!     HostOption::new("a", "Apple"),
//!     HostOption::new("b", "Banana"),
//! ]);
//! let mut widget = TagSelect::builder(host)
//!     .config(TagSelectConfig { max_tags: Some(2), ..TagSelectConfig::default() })
//!     .build()?;
//!
//! widget.on_query_changed("ban");
//! widget.on_key(Key::Down);
//! widget.on_key(Key::Enter);
//! assert_eq!(widget.values(), vec!["b"]);
//! # Ok::<(), tagselect::TagSelectError>(())
//! ```

use crate::catalog::{OptionCatalog, TagOption};
use crate::config::TagSelectConfig;
use crate::cursor::NavigationCursor;
use crate::error::{Result, TagSelectError};
use crate::host::HostControl;
use crate::selection::SelectionModel;
use crate::suggest::{self, SuggestionEntry, SuggestionPolicy};
use std::fmt;

/// Callback invoked with the full ordered value list after each change
pub type ChangeCallback = Box<dyn FnMut(&[String])>;

/// Keys the controller reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Move the highlight up
    Up,
    /// Move the highlight down
    Down,
    /// Activate the highlight, or create from the query
    Enter,
    /// Hide the dropdown
    Escape,
    /// Remove the last tag when the query is empty
    Backspace,
}

/// What the rendering layer should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Nothing changed
    Ignored,
    /// State changed, repaint
    Redraw,
    /// Highlight moved onto this row; repaint and scroll it into view
    ScrollTo(usize),
    /// Hide the dropdown
    HideDropdown,
}

/// Builder for [`TagSelect`]
pub struct TagSelectBuilder<H: HostControl> {
    host: H,
    config: TagSelectConfig,
    on_change: Option<ChangeCallback>,
}

impl<H: HostControl> TagSelectBuilder<H> {
    /// Use this configuration
    #[must_use]
    pub fn config(mut self, config: TagSelectConfig) -> Self {
        self.config = config;
        self
    }

    /// Call `callback` after every accepted change
    #[must_use]
    pub fn on_change(mut self, callback: impl FnMut(&[String]) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Validate and build the widget
    ///
    /// # Errors
    ///
    /// Returns `TagSelectError::NotMultiple` if the host control is not a
    /// multi-select, or `TagSelectError::InvalidConfig` if the configuration
    /// fails validation.
    pub fn build(self) -> Result<TagSelect<H>> {
        if !self.host.is_multiple() {
            return Err(TagSelectError::NotMultiple);
        }
        self.config.validate()?;

        let mut widget = TagSelect {
            policy: self.config.policy(),
            selection: SelectionModel::new(OptionCatalog::new(), self.config.bounds()),
            host: self.host,
            config: self.config,
            query: String::new(),
            suggestions: Vec::new(),
            cursor: NavigationCursor::new(),
            open: false,
            initialized: false,
            destroyed: false,
            on_change: self.on_change,
        };

        if widget.config.auto_initialize {
            widget.initialize();
        }
        Ok(widget)
    }
}

/// Tag-entry widget controller over a host control
pub struct TagSelect<H: HostControl> {
    host: H,
    config: TagSelectConfig,
    policy: SuggestionPolicy,
    selection: SelectionModel,
    query: String,
    suggestions: Vec<SuggestionEntry>,
    cursor: NavigationCursor,
    open: bool,
    initialized: bool,
    destroyed: bool,
    on_change: Option<ChangeCallback>,
}

impl<H: HostControl> fmt::Debug for TagSelect<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagSelect")
            .field("config", &self.config)
            .field("values", &self.selection.values())
            .field("query", &self.query)
            .field("suggestions", &self.suggestions)
            .field("cursor", &self.cursor)
            .field("open", &self.open)
            .field("initialized", &self.initialized)
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}

impl<H: HostControl> TagSelect<H> {
    /// Start building a widget over `host` with default configuration
    #[must_use]
    pub fn builder(host: H) -> TagSelectBuilder<H> {
        TagSelectBuilder {
            host,
            config: TagSelectConfig::default(),
            on_change: None,
        }
    }

    /// Build a widget over `host` with `config`
    ///
    /// # Errors
    ///
    /// See [`TagSelectBuilder::build`].
    pub fn new(host: H, config: TagSelectConfig) -> Result<Self> {
        Self::builder(host).config(config).build()
    }

    /// Build one widget per host, sharing a configuration
    ///
    /// Each widget owns its own catalog and selection.
    ///
    /// # Errors
    ///
    /// Fails on the first host that cannot be enhanced.
    pub fn init_all(
        hosts: impl IntoIterator<Item = H>,
        config: &TagSelectConfig,
    ) -> Result<Vec<Self>> {
        hosts
            .into_iter()
            .map(|host| Self::new(host, config.clone()))
            .collect()
    }

    /// Populate from the host and start accepting events
    ///
    /// Called by the builder unless `auto_initialize` is off. Repeated calls
    /// are no-ops.
    pub fn initialize(&mut self) {
        if self.initialized || self.destroyed {
            return;
        }
        self.host.set_enhanced(true);
        self.load_from_host();
        self.recompute();
        self.initialized = true;
    }

    /// Rebuild catalog and selection from the host's current state
    ///
    /// Each host selection is re-added like a user selection and notifies
    /// once. Host selections beyond the ceiling are unflagged in the host so
    /// the two never disagree.
    fn load_from_host(&mut self) {
        let catalog = OptionCatalog::from_options(self.host.options());
        self.selection = SelectionModel::new(catalog, self.config.bounds());

        for value in self.host.selected_values() {
            let Some(option) = self.selection.catalog().get(&value).cloned() else {
                continue;
            };
            if self.selection.select(&option.value, &option.label) {
                self.notify();
            } else {
                tracing::warn!(
                    value = %option.value,
                    "initial selection refused, unselecting in host"
                );
                self.host.set_selected(&option, false);
            }
        }
    }

    const fn is_active(&self) -> bool {
        self.initialized && !self.destroyed
    }

    /// Rebuild the suggestion list and clear the highlight
    fn recompute(&mut self) {
        self.suggestions = suggest::suggest(&self.selection, &self.query, &self.policy);
        self.cursor.reset();
        tracing::trace!(
            query = %self.query,
            rows = self.suggestions.len(),
            "suggestions recomputed"
        );
    }

    fn notify(&mut self) {
        self.host.dispatch_change();
        if let Some(callback) = self.on_change.as_mut() {
            callback(self.selection.values());
        }
    }

    /// Select, write back to the host and notify
    fn commit_select(&mut self, value: &str, label: &str) -> bool {
        if !self.is_active() || !self.selection.select(value, label) {
            return false;
        }
        if let Some(option) = self.selection.catalog().get(value).cloned() {
            self.host.set_selected(&option, true);
        }
        self.notify();
        self.recompute();
        true
    }

    /// Deselect, write back to the host and notify
    fn commit_deselect(&mut self, value: &str) -> bool {
        if !self.is_active() || !self.selection.deselect(value) {
            return false;
        }
        if let Some(option) = self.selection.catalog().get(value).cloned() {
            self.host.set_selected(&option, false);
        }
        self.notify();
        self.recompute();
        true
    }

    /// Activate a suggestion row, then clear the query
    fn activate(&mut self, entry: &SuggestionEntry) -> EventResult {
        let Some((value, label)) = entry.target() else {
            return EventResult::Ignored;
        };
        let (value, label) = (value.to_string(), label.to_string());
        self.commit_select(&value, &label);
        self.query.clear();
        self.recompute();
        EventResult::Redraw
    }

    // Event sinks

    /// The input gained focus: show the dropdown
    pub fn on_focus(&mut self) -> EventResult {
        if !self.is_active() {
            return EventResult::Ignored;
        }
        self.open = true;
        self.recompute();
        EventResult::Redraw
    }

    /// The user interacted outside the widget: hide the dropdown
    pub const fn on_outside_interaction(&mut self) -> EventResult {
        self.close_dropdown()
    }

    /// Hide the dropdown without touching the model
    pub const fn close_dropdown(&mut self) -> EventResult {
        if self.open {
            self.open = false;
            EventResult::HideDropdown
        } else {
            EventResult::Ignored
        }
    }

    /// The query text changed
    pub fn on_query_changed(&mut self, text: &str) -> EventResult {
        if !self.is_active() {
            return EventResult::Ignored;
        }
        self.query = text.to_string();
        self.open = true;
        self.recompute();
        EventResult::Redraw
    }

    /// A navigation or editing key was pressed
    pub fn on_key(&mut self, key: Key) -> EventResult {
        if !self.is_active() {
            return EventResult::Ignored;
        }

        match key {
            Key::Down => {
                self.cursor.move_next(self.suggestions.len());
                self.cursor.index().map_or(EventResult::Redraw, EventResult::ScrollTo)
            }
            Key::Up => {
                self.cursor.move_previous();
                self.cursor.index().map_or(EventResult::Redraw, EventResult::ScrollTo)
            }
            Key::Enter => {
                if let Some(entry) = self.cursor.activate(&self.suggestions).cloned() {
                    self.activate(&entry)
                } else if self.cursor.is_none()
                    && self.policy.allow_new
                    && !suggest::is_blank(&self.query)
                {
                    let value = suggest::propose_value(&self.query);
                    let label = self.query.trim().to_string();
                    self.commit_select(&value, &label);
                    self.query.clear();
                    self.recompute();
                    EventResult::Redraw
                } else {
                    EventResult::Ignored
                }
            }
            Key::Escape => self.close_dropdown(),
            Key::Backspace => {
                if !self.query.is_empty() {
                    return EventResult::Ignored;
                }
                let Some(last) = self.selection.last().map(str::to_string) else {
                    return EventResult::Ignored;
                };
                if self.commit_deselect(&last) {
                    EventResult::Redraw
                } else {
                    EventResult::Ignored
                }
            }
        }
    }

    /// A suggestion row was clicked
    pub fn on_suggestion_clicked(&mut self, index: usize) -> EventResult {
        if !self.is_active() {
            return EventResult::Ignored;
        }
        match self.suggestions.get(index).cloned() {
            Some(entry) => self.activate(&entry),
            None => EventResult::Ignored,
        }
    }

    /// A tag's remove button was clicked
    pub fn on_tag_remove_clicked(&mut self, value: &str) -> EventResult {
        if self.commit_deselect(value) {
            EventResult::Redraw
        } else {
            EventResult::Ignored
        }
    }

    // Host-callable surface

    /// Selected values in display order
    #[must_use]
    pub fn values(&self) -> Vec<String> {
        self.selection.current_values()
    }

    /// Add a tag whose label is its value
    pub fn add(&mut self, value: &str) -> bool {
        self.commit_select(value, value)
    }

    /// Add a tag with a display label
    pub fn add_labeled(&mut self, value: &str, label: &str) -> bool {
        self.commit_select(value, label)
    }

    /// Remove a tag
    pub fn remove(&mut self, value: &str) -> bool {
        self.commit_deselect(value)
    }

    /// Remove every removable tag, returning how many were removed
    ///
    /// Tags held by the `min_tags` floor are skipped.
    pub fn clear(&mut self) -> usize {
        let mut removed = 0;
        for value in self.selection.current_values() {
            if self.commit_deselect(&value) {
                removed += 1;
            }
        }
        removed
    }

    /// Re-read the host and re-derive tags and suggestions
    pub fn refresh(&mut self) {
        if !self.is_active() {
            return;
        }
        self.load_from_host();
        self.recompute();
    }

    /// Restore the host control and stop reacting to events
    ///
    /// Idempotent. The host keeps the final selection.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.host.set_enhanced(false);
        self.open = false;
        self.suggestions.clear();
        self.cursor.reset();
        self.on_change = None;
        self.destroyed = true;
        tracing::debug!(values = ?self.selection.values(), "widget destroyed");
    }

    // Rendering surface

    /// Current suggestion rows
    #[must_use]
    pub fn suggestions(&self) -> &[SuggestionEntry] {
        &self.suggestions
    }

    /// Text to paint for a suggestion row
    #[must_use]
    pub fn entry_text(&self, entry: &SuggestionEntry) -> String {
        entry.display_text(&self.policy)
    }

    /// Highlighted row
    #[must_use]
    pub const fn highlight_index(&self) -> Option<usize> {
        self.cursor.index()
    }

    /// Selected tags in display order
    #[must_use]
    pub fn selected_tags(&self) -> Vec<TagOption> {
        self.selection.selected_options()
    }

    /// Current query text
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Input placeholder
    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.config.placeholder
    }

    /// Whether the dropdown is visible
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the widget has been populated from the host
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether `destroy` has been called
    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// The option catalog
    #[must_use]
    pub const fn catalog(&self) -> &OptionCatalog {
        self.selection.catalog()
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &TagSelectConfig {
        &self.config
    }

    /// The enhanced host control
    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Give the host control back
    #[must_use]
    pub fn into_host(self) -> H {
        self.host
    }
}
