//! Tagselect - a tag-entry widget engine
//!
//! Enhances a multi-select control with free-text filtering, inline creation
//! of new tags, and keyboard navigation, while keeping the control's option
//! list and selection in sync.
//!
//! The engine is rendering-agnostic: a front-end reports events to a
//! [`TagSelect`] and paints what it exposes (suggestions, highlight, tags).
//! The `tui` module is a terminal front-end built on ratatui.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────┐ events  ┌──────────────────────────┐ write-back ┌─────────────┐
//! │ Rendering (tui)│ ──────▶ │ TagSelect (controller)   │ ─────────▶ │ HostControl │
//! └────────────────┘ ◀────── │  SelectionModel          │            └─────────────┘
//!                    state   │  suggest / cursor        │
//!                            └──────────────────────────┘
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod controller;
pub mod cursor;
pub mod error;
pub mod host;
pub mod selection;
pub mod suggest;
pub mod tui;

#[cfg(test)]
pub mod testing;

pub use catalog::{OptionCatalog, TagOption};
pub use config::TagSelectConfig;
pub use controller::{ChangeCallback, EventResult, Key, TagSelect, TagSelectBuilder};
pub use cursor::NavigationCursor;
pub use error::{Result, TagSelectError};
pub use host::{HostControl, HostOption, SelectControl};
pub use selection::{Bounds, SelectionModel};
pub use suggest::{SuggestionEntry, SuggestionPolicy};
