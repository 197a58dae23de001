//! Testing utilities for tagselect
//!
//! Fixture catalogs and host controls shared by the unit tests.
//!
//! Only available when compiled with `cfg(test)`.

use crate::catalog::{OptionCatalog, TagOption};
use crate::config::TagSelectConfig;
use crate::controller::TagSelect;
use crate::host::{HostOption, SelectControl};

/// Apple, Banana, Cherry with values `a`, `b`, `c`
#[must_use]
pub fn fruit_catalog() -> OptionCatalog {
    OptionCatalog::from_options(vec![
        TagOption::new("a", "Apple"),
        TagOption::new("b", "Banana"),
        TagOption::new("c", "Cherry"),
    ])
}

/// Multi-select host over the fruit catalog with nothing selected
#[must_use]
pub fn fruit_host() -> SelectControl {
    SelectControl::new(
        fruit_catalog()
            .iter()
            .map(|o| HostOption::new(o.value.clone(), o.label.clone()))
            .collect(),
    )
}

/// Widget over the fruit host with default configuration
///
/// # Panics
/// Panics if the widget cannot be built.
#[must_use]
pub fn widget() -> TagSelect<SelectControl> {
    widget_with(TagSelectConfig::default())
}

/// Widget over the fruit host with the given configuration
///
/// # Panics
/// Panics if the configuration is rejected.
#[must_use]
pub fn widget_with(config: TagSelectConfig) -> TagSelect<SelectControl> {
    TagSelect::new(fruit_host(), config).expect("Failed to build test widget")
}
