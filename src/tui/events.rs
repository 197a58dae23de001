//! Event handling for the terminal front-end
//!
//! Maps crossterm keyboard and mouse events onto the query editor and the
//! widget's event sinks.

use super::input::QueryInput;
use super::view::{Hit, ViewState};
use crate::controller::{EventResult, Key, TagSelect};
use crate::host::HostControl;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::time::Duration;

/// Whether the event loop should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    /// Keep running
    Continue,
    /// Finish and keep the selection
    Done,
    /// Finish without reporting a selection
    Abort,
}

/// Convert a navigation key to a widget key
#[must_use]
pub const fn widget_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Backspace => Some(Key::Backspace),
        _ => None,
    }
}

/// Push the edited text to the widget
fn query_changed<H: HostControl>(widget: &mut TagSelect<H>, input: &QueryInput) {
    widget.on_query_changed(input.text());
}

/// Pull the widget's query back after it cleared it
fn sync_input<H: HostControl>(widget: &TagSelect<H>, input: &mut QueryInput) {
    if widget.query() != input.text() {
        input.set(widget.query());
    }
}

fn track(result: EventResult, state: &mut ViewState) {
    if let EventResult::ScrollTo(index) = result {
        state.list.select(Some(index));
    }
}

/// Handle a key press
pub fn handle_key<H: HostControl>(
    widget: &mut TagSelect<H>,
    input: &mut QueryInput,
    state: &mut ViewState,
    key: KeyEvent,
) -> LoopControl {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => return LoopControl::Abort,
        (KeyCode::Esc, _) if !widget.is_open() => return LoopControl::Done,

        (KeyCode::Up | KeyCode::Down | KeyCode::Esc, _) => {
            if let Some(k) = widget_key(key.code) {
                track(widget.on_key(k), state);
            }
        }
        (KeyCode::Enter, _) => {
            widget.on_key(Key::Enter);
            sync_input(widget, input);
        }
        (KeyCode::Backspace, _) => {
            if input.is_empty() {
                widget.on_key(Key::Backspace);
            } else if input.backspace() {
                query_changed(widget, input);
            }
        }
        (KeyCode::Tab, _) => {
            widget.on_focus();
        }

        // Query editing
        (KeyCode::Char('w'), KeyModifiers::CONTROL) => {
            if input.delete_word_backwards() {
                query_changed(widget, input);
            }
        }
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
            if input.clear() {
                query_changed(widget, input);
            }
        }
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
            input.insert_char(c);
            query_changed(widget, input);
        }
        (KeyCode::Delete, _) => {
            if input.delete() {
                query_changed(widget, input);
            }
        }
        (KeyCode::Left, _) => input.cursor_left(),
        (KeyCode::Right, _) => input.cursor_right(),
        (KeyCode::Home, _) => input.cursor_home(),
        (KeyCode::End, _) => input.cursor_end(),

        _ => {}
    }
    LoopControl::Continue
}

/// Handle a mouse event using the hit map of the last frame
pub fn handle_mouse<H: HostControl>(
    widget: &mut TagSelect<H>,
    input: &mut QueryInput,
    state: &mut ViewState,
    mouse: MouseEvent,
) -> LoopControl {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => match state.hit(mouse.column, mouse.row) {
            Hit::RemoveTag(value) => {
                widget.on_tag_remove_clicked(&value);
            }
            Hit::Suggestion(index) => {
                widget.on_suggestion_clicked(index);
                sync_input(widget, input);
            }
            Hit::Input => {
                widget.on_focus();
            }
            Hit::Inside => {}
            Hit::Outside => {
                widget.on_outside_interaction();
            }
        },
        MouseEventKind::ScrollUp if widget.is_open() => track(widget.on_key(Key::Up), state),
        MouseEventKind::ScrollDown if widget.is_open() => track(widget.on_key(Key::Down), state),
        _ => {}
    }
    LoopControl::Continue
}

/// Dispatch any terminal event
pub fn handle_event<H: HostControl>(
    widget: &mut TagSelect<H>,
    input: &mut QueryInput,
    state: &mut ViewState,
    event: Event,
) -> LoopControl {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(widget, input, state, key),
        Event::Mouse(mouse) => handle_mouse(widget, input, state, mouse),
        Event::FocusLost => {
            widget.on_outside_interaction();
            LoopControl::Continue
        }
        _ => LoopControl::Continue,
    }
}

/// Poll for an event and handle it
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn poll_and_handle<H: HostControl>(
    widget: &mut TagSelect<H>,
    input: &mut QueryInput,
    state: &mut ViewState,
    timeout: Duration,
) -> std::io::Result<LoopControl> {
    if !event::poll(timeout)? {
        return Ok(LoopControl::Continue);
    }

    Ok(handle_event(widget, input, state, event::read()?))
}
