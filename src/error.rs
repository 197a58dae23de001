//! Error types
//!
//! Only construction and the binary's I/O can fail. Refused mutations
//! (duplicates, ceiling, floor) are reported as `false` returns, never as
//! errors.

use thiserror::Error;

/// Errors produced by `tagselect`
#[derive(Debug, Error)]
pub enum TagSelectError {
    /// Host control cannot hold more than one selection
    #[error("TagSelect requires a select control with multiple selection enabled")]
    NotMultiple,

    /// A configuration option failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be loaded or saved
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Catalog file could not be parsed
    #[error("Catalog error: {0}")]
    Catalog(#[from] toml::de::Error),

    /// Catalog could not be serialized
    #[error("Catalog write error: {0}")]
    CatalogWrite(#[from] toml::ser::Error),

    /// Selection could not be encoded as JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error (terminal or files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for `tagselect` operations
pub type Result<T> = std::result::Result<T, TagSelectError>;
