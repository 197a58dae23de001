//! Integration tests for tagselect
//!
//! These tests drive the widget through its public event sinks and
//! host-callable surface, the way a rendering layer or form would.

use proptest::prelude::*;
use std::cell::RefCell;
use std::fs;
use std::rc::Rc;
use tagselect::{
    EventResult, HostControl, HostOption, Key, SelectControl, SuggestionEntry, TagOption, TagSelect,
    TagSelectConfig, TagSelectError,
};
use tempfile::TempDir;

/// Helper to create a host with Apple, Banana and Cherry
fn fruit_host() -> SelectControl {
    SelectControl::new(vec![
        HostOption::new("a", "Apple"),
        HostOption::new("b", "Banana"),
        HostOption::new("c", "Cherry"),
    ])
}

fn build(config: TagSelectConfig) -> TagSelect<SelectControl> {
    TagSelect::new(fruit_host(), config).unwrap()
}

#[test]
fn test_ceiling_and_deselect_workflow() {
    let mut widget = build(TagSelectConfig {
        max_tags: Some(2),
        ..TagSelectConfig::default()
    });

    assert!(widget.add("a"));
    assert!(widget.add("b"));
    assert!(!widget.add("c"));
    assert_eq!(widget.values(), vec!["a", "b"]);

    widget.on_focus();
    assert_eq!(widget.suggestions(), &[SuggestionEntry::LimitReached { max: 2 }]);
    assert_eq!(widget.entry_text(&widget.suggestions()[0]), "Maximum 2 tags reached");

    assert!(widget.remove("a"));
    assert_eq!(widget.values(), vec!["b"]);
    assert!(widget.catalog().contains("a"));
    assert_eq!(widget.catalog().len(), 3);

    // "a" is offered again once removed
    widget.on_query_changed("");
    let values: Vec<&str> = widget
        .suggestions()
        .iter()
        .filter_map(|e| e.target().map(|(v, _)| v))
        .collect();
    assert_eq!(values, vec!["a", "c"]);
}

#[test]
fn test_no_results_without_creation() {
    let mut widget = build(TagSelectConfig {
        allow_new: false,
        ..TagSelectConfig::default()
    });

    widget.on_query_changed("zzz");
    assert_eq!(widget.suggestions(), &[SuggestionEntry::NoResults]);
    assert_eq!(widget.entry_text(&widget.suggestions()[0]), "No options available");

    assert_eq!(widget.on_key(Key::Enter), EventResult::Ignored);
    assert!(widget.values().is_empty());
    assert_eq!(widget.query(), "zzz");

    // Highlighting the informational row does not make it selectable
    widget.on_key(Key::Down);
    assert_eq!(widget.on_key(Key::Enter), EventResult::Ignored);
    assert!(widget.values().is_empty());
}

#[test]
fn test_create_new_from_query() {
    let mut widget = build(TagSelectConfig::default());

    widget.on_query_changed("Red Apple");
    assert_eq!(
        widget.suggestions(),
        &[SuggestionEntry::CreateNew {
            value: "red-apple".to_string(),
            label: "Red Apple".to_string(),
        }]
    );
    assert_eq!(widget.entry_text(&widget.suggestions()[0]), "Create \"Red Apple\"");

    widget.on_key(Key::Down);
    assert_eq!(widget.on_key(Key::Enter), EventResult::Redraw);

    assert_eq!(widget.values(), vec!["red-apple"]);
    assert_eq!(widget.catalog().get("red-apple").unwrap().label, "Red Apple");
    assert_eq!(widget.query(), "");

    // The host learns about the new option too
    let host = widget.host();
    assert_eq!(host.selected_values(), vec!["red-apple"]);
    assert_eq!(host.options().len(), 4);
}

#[test]
fn test_enter_without_highlight_creates_from_query() {
    let mut widget = build(TagSelectConfig::default());

    widget.on_query_changed("  Star   Fruit ");
    assert_eq!(widget.highlight_index(), None);
    widget.on_key(Key::Enter);

    assert_eq!(widget.values(), vec!["star-fruit"]);
}

#[test]
fn test_keyboard_selection_flow() {
    let mut widget = build(TagSelectConfig::default());

    widget.on_query_changed("an");
    assert_eq!(widget.suggestions().len(), 1);

    assert_eq!(widget.on_key(Key::Down), EventResult::ScrollTo(0));
    assert_eq!(widget.on_key(Key::Down), EventResult::ScrollTo(0));
    widget.on_key(Key::Enter);
    assert_eq!(widget.values(), vec!["b"]);

    // Backspace on an empty query removes the most recent tag
    widget.add("c");
    widget.on_key(Key::Backspace);
    assert_eq!(widget.values(), vec!["b"]);

    assert_eq!(widget.on_key(Key::Escape), EventResult::HideDropdown);
    assert!(!widget.is_open());
}

#[test]
fn test_min_tags_floor() {
    let host = SelectControl::new(vec![
        HostOption::new("a", "Apple").selected(true),
        HostOption::new("b", "Banana").selected(true),
        HostOption::new("c", "Cherry").selected(true),
    ]);
    let mut widget = TagSelect::new(
        host,
        TagSelectConfig {
            min_tags: 2,
            ..TagSelectConfig::default()
        },
    )
    .unwrap();

    assert_eq!(widget.clear(), 1);
    assert_eq!(widget.values().len(), 2);
    assert_eq!(widget.on_key(Key::Backspace), EventResult::Ignored);
    assert!(!widget.remove("a"));
}

#[test]
fn test_change_notifications() {
    let seen: Rc<RefCell<Vec<Vec<String>>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut widget = TagSelect::builder(fruit_host())
        .on_change(move |values| sink.borrow_mut().push(values.to_vec()))
        .build()
        .unwrap();

    widget.add("a");
    widget.add("a");
    widget.add("c");
    widget.remove("x");
    widget.remove("a");

    assert_eq!(
        *seen.borrow(),
        vec![vec!["a".to_string()], vec!["a".to_string(), "c".to_string()], vec!["c".to_string()]]
    );
    assert_eq!(widget.host().change_count(), 3);
}

#[test]
fn test_destroy_is_idempotent() {
    let mut widget = build(TagSelectConfig::default());
    widget.add("b");
    assert!(widget.host().is_enhanced());

    widget.destroy();
    widget.destroy();

    assert!(widget.is_destroyed());
    assert!(!widget.host().is_enhanced());
    assert_eq!(widget.on_key(Key::Down), EventResult::Ignored);
    assert!(!widget.add("c"));
    assert_eq!(widget.into_host().selected_values(), vec!["b"]);
}

#[test]
fn test_single_select_host_rejected() {
    let result = TagSelect::new(SelectControl::single(Vec::new()), TagSelectConfig::default());
    assert!(matches!(result, Err(TagSelectError::NotMultiple)));
}

#[test]
fn test_invalid_prompt_rejected() {
    let result = TagSelect::new(
        fruit_host(),
        TagSelectConfig {
            create_prompt: "Add it".to_string(),
            ..TagSelectConfig::default()
        },
    );
    assert!(matches!(result, Err(TagSelectError::InvalidConfig(_))));
}

/// One user or host action against the widget
#[derive(Debug, Clone)]
enum Op {
    Add(&'static str),
    Remove(&'static str),
    Backspace,
    QueryEnter(&'static str),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let value = prop::sample::select(vec!["a", "b", "c", "d", "e"]);
    prop_oneof![
        value.clone().prop_map(Op::Add),
        value.clone().prop_map(Op::Remove),
        Just(Op::Backspace),
        value.prop_map(Op::QueryEnter),
    ]
}

proptest! {
    #[test]
    fn prop_bounds_hold_over_operation_sequences(
        max in 1usize..5,
        min in 0usize..3,
        ops in prop::collection::vec(op_strategy(), 0..60),
    ) {
        prop_assume!(min <= max);
        let mut widget = build(TagSelectConfig {
            max_tags: Some(max),
            min_tags: min,
            ..TagSelectConfig::default()
        });

        for op in ops {
            let before = widget.values().len();
            match op {
                Op::Add(value) => {
                    widget.add(value);
                }
                Op::Remove(value) => {
                    widget.remove(value);
                }
                Op::Backspace => {
                    widget.on_query_changed("");
                    widget.on_key(Key::Backspace);
                }
                Op::QueryEnter(value) => {
                    widget.on_query_changed(value);
                    widget.on_key(Key::Down);
                    widget.on_key(Key::Enter);
                }
            }

            let current = widget.values();
            prop_assert!(current.len() <= max);
            if current.len() < before {
                prop_assert!(current.len() >= min);
            }
            let mut unique = current.clone();
            unique.sort();
            unique.dedup();
            prop_assert_eq!(unique.len(), current.len());
            prop_assert_eq!(widget.host().selected_values().len(), current.len());
        }
    }
}

#[test]
fn test_initial_overflow_is_trimmed() {
    let host = SelectControl::new(vec![
        HostOption::new("a", "Apple").selected(true),
        HostOption::new("b", "Banana").selected(true),
        HostOption::new("c", "Cherry").selected(true),
    ]);
    let widget = TagSelect::new(
        host,
        TagSelectConfig {
            max_tags: Some(2),
            ..TagSelectConfig::default()
        },
    )
    .unwrap();

    assert_eq!(widget.values(), vec!["a", "b"]);
    assert_eq!(widget.host().selected_values(), vec!["a", "b"]);
    assert_eq!(widget.host().change_count(), 2);
}

#[test]
fn test_refresh_picks_up_host_changes() {
    let mut widget = build(TagSelectConfig::default());
    widget.add("a");

    let mut host = widget.into_host();
    host.set_selected(&TagOption::new("kiwi", "Kiwi"), true);

    let mut widget = TagSelect::new(host, TagSelectConfig::default()).unwrap();
    assert_eq!(widget.values(), vec!["a", "kiwi"]);

    widget.refresh();
    assert_eq!(widget.values(), vec!["a", "kiwi"]);
    assert_eq!(widget.catalog().get("kiwi").unwrap().label, "Kiwi");
}

#[test]
fn test_deferred_initialization() {
    let mut widget = build(TagSelectConfig {
        auto_initialize: false,
        ..TagSelectConfig::default()
    });

    assert!(!widget.is_initialized());
    assert!(!widget.add("a"));

    widget.initialize();
    widget.initialize();
    assert!(widget.is_initialized());
    assert!(widget.add("a"));
}

#[test]
fn test_init_all_keeps_widgets_independent() {
    let mut widgets =
        TagSelect::init_all(vec![fruit_host(), fruit_host()], &TagSelectConfig::default())
            .unwrap();

    widgets[0].add_labeled("kiwi", "Kiwi");
    assert!(widgets[0].catalog().contains("kiwi"));
    assert!(!widgets[1].catalog().contains("kiwi"));
}

#[test]
fn test_catalog_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fruit.toml");
    fs::write(
        &path,
        r#"
[[options]]
value = "a"
label = "Apple"
selected = true

[[options]]
value = "b"
label = "Banana"
"#,
    )
    .unwrap();

    let host = SelectControl::load(&path).unwrap();
    let mut widget = TagSelect::new(host, TagSelectConfig::default()).unwrap();
    assert_eq!(widget.values(), vec!["a"]);

    widget.on_query_changed("Blood Orange");
    widget.on_key(Key::Enter);
    widget.destroy();
    widget.into_host().save(&path).unwrap();

    let reloaded = SelectControl::load(&path).unwrap();
    assert_eq!(reloaded.selected_values(), vec!["a", "blood-orange"]);
    assert_eq!(reloaded.options[2].label, "Blood Orange");
}

#[test]
fn test_config_file_drives_widget() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "allow_new = false\nmax_tags = 1\n").unwrap();

    let config = TagSelectConfig::load_from(&path).unwrap();
    let mut widget = build(config);

    widget.on_query_changed("kiwi");
    assert_eq!(widget.suggestions(), &[SuggestionEntry::NoResults]);

    widget.add("a");
    widget.on_query_changed("");
    assert_eq!(widget.suggestions(), &[SuggestionEntry::LimitReached { max: 1 }]);
}
