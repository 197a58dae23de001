//! Suggestion engine
//!
//! Derives the dropdown contents from the catalog, the current selection,
//! the query, and the creation policy. The list is always rebuilt from
//! scratch; nothing is patched incrementally.
//!
//! Derivation order:
//! 1. ceiling reached: a single [`SuggestionEntry::LimitReached`]
//! 2. catalog options whose label contains the query (case-insensitive)
//!    and whose value is not selected, in catalog order
//! 3. nothing matched, query non-blank, creation allowed: a single
//!    [`SuggestionEntry::CreateNew`]
//! 4. otherwise a single [`SuggestionEntry::NoResults`]

use crate::catalog::{OptionCatalog, TagOption};
use crate::selection::SelectionModel;

/// Placeholder replaced with the proposed label in the create prompt
pub const TAG_PLACEHOLDER: &str = "{tag}";

/// Placeholder replaced with the ceiling in the limit message
pub const MAX_PLACEHOLDER: &str = "{max}";

/// Policy inputs for suggestion derivation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionPolicy {
    /// Offer a create-new entry when nothing matches
    pub allow_new: bool,
    /// Selection ceiling
    pub max_tags: Option<usize>,
    /// Create prompt, containing `{tag}`
    pub create_prompt: String,
    /// Text of the no-results entry
    pub no_results_text: String,
    /// Text of the limit-reached entry, may contain `{max}`
    pub max_reached_text: String,
}

impl Default for SuggestionPolicy {
    fn default() -> Self {
        Self {
            allow_new: true,
            max_tags: None,
            create_prompt: "Create \"{tag}\"".to_string(),
            no_results_text: "No options available".to_string(),
            max_reached_text: "Maximum {max} tags reached".to_string(),
        }
    }
}

/// One row of the dropdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionEntry {
    /// An existing catalog option
    Existing(TagOption),
    /// Offer to create a tag from the query
    CreateNew {
        /// Normalized value (see [`propose_value`])
        value: String,
        /// Trimmed query text
        label: String,
    },
    /// Informational: nothing to offer
    NoResults,
    /// Informational: the selection ceiling is reached
    LimitReached {
        /// The configured ceiling
        max: usize,
    },
}

impl SuggestionEntry {
    /// Whether activating this entry selects something
    #[must_use]
    pub const fn is_actionable(&self) -> bool {
        matches!(self, Self::Existing(_) | Self::CreateNew { .. })
    }

    /// The `(value, label)` pair activation would select
    #[must_use]
    pub fn target(&self) -> Option<(&str, &str)> {
        match self {
            Self::Existing(option) => Some((&option.value, &option.label)),
            Self::CreateNew { value, label } => Some((value, label)),
            Self::NoResults | Self::LimitReached { .. } => None,
        }
    }

    /// Text shown for this row
    #[must_use]
    pub fn display_text(&self, policy: &SuggestionPolicy) -> String {
        match self {
            Self::Existing(option) => option.label.clone(),
            Self::CreateNew { label, .. } => {
                policy.create_prompt.replacen(TAG_PLACEHOLDER, label, 1)
            }
            Self::NoResults => policy.no_results_text.clone(),
            Self::LimitReached { max } => policy
                .max_reached_text
                .replace(MAX_PLACEHOLDER, &max.to_string()),
        }
    }
}

/// Normalize typed text into a tag value
///
/// Trims, lower-cases, and collapses each whitespace run into a single
/// hyphen: `"  Red   Apple "` becomes `"red-apple"`.
#[must_use]
pub fn propose_value(query: &str) -> String {
    query
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Whether a query counts as blank
#[must_use]
pub fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}

/// Lazily iterate catalog options matching a query
///
/// Matching is a case-insensitive substring test on the label; selected
/// values are skipped. The iterator is cheap to clone, so callers can
/// restart it.
pub fn matching<'a>(
    catalog: &'a OptionCatalog,
    selection: &'a SelectionModel,
    query: &str,
) -> impl Iterator<Item = &'a TagOption> + Clone + 'a {
    let needle = query.to_lowercase();
    catalog.iter().filter(move |option| {
        !selection.contains(&option.value) && option.label.to_lowercase().contains(&needle)
    })
}

/// Derive the full suggestion list
#[must_use]
pub fn suggest(
    selection: &SelectionModel,
    query: &str,
    policy: &SuggestionPolicy,
) -> Vec<SuggestionEntry> {
    if let Some(max) = policy.max_tags
        && selection.count() >= max
    {
        return vec![SuggestionEntry::LimitReached { max }];
    }

    let entries: Vec<SuggestionEntry> = matching(selection.catalog(), selection, query)
        .cloned()
        .map(SuggestionEntry::Existing)
        .collect();

    if !entries.is_empty() {
        return entries;
    }

    if policy.allow_new && !is_blank(query) {
        vec![SuggestionEntry::CreateNew {
            value: propose_value(query),
            label: query.trim().to_string(),
        }]
    } else {
        vec![SuggestionEntry::NoResults]
    }
}
