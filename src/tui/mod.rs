//! Terminal front-end
//!
//! Renders a [`TagSelect`] with ratatui and feeds it crossterm events. The
//! widget stays the single source of truth; this layer only paints what it
//! exposes and reports what the user did.

mod events;
mod input;
mod theme;
mod view;

pub use events::{LoopControl, handle_event, handle_key, handle_mouse, poll_and_handle, widget_key};
pub use input::QueryInput;
pub use theme::Theme;
pub use view::{Hit, TagSelectView, ViewState};

use crate::controller::TagSelect;
use crate::error::Result;
use crate::host::HostControl;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io::{self, Stdout, Write};
use std::time::Duration;

/// Widest the widget is drawn, in columns
const MAX_WIDTH: u16 = 72;

/// How the interactive session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The user finished editing
    Submitted,
    /// The user aborted
    Aborted,
}

/// Ratatui-based front-end for a tag-select widget
#[derive(Debug, Clone)]
pub struct TerminalFrontend {
    theme: Theme,
    title: String,
    poll_interval: Duration,
}

impl Default for TerminalFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalFrontend {
    /// Create a front-end with the default theme
    #[must_use]
    pub fn new() -> Self {
        Self {
            theme: Theme::default(),
            title: "Tags".to_string(),
            poll_interval: Duration::from_millis(100),
        }
    }

    /// Set custom theme
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the chip box title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Switch `out` to the alternate screen with mouse and focus reporting
    ///
    /// On failure, whatever was switched on is switched back off.
    fn enter_screen<W: Write>(out: &mut W) -> io::Result<()> {
        let result = execute!(out, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange);
        if result.is_err() {
            let _ = execute!(out, DisableFocusChange, DisableMouseCapture, LeaveAlternateScreen);
        }
        result
    }

    /// Setup terminal for TUI
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = Self::enter_screen(&mut stdout) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
        Terminal::new(CrosstermBackend::new(stdout)).map_err(|e| {
            let _ = Self::cleanup_terminal();
            e.into()
        })
    }

    /// Cleanup terminal after TUI
    fn cleanup_terminal() -> Result<()> {
        disable_raw_mode()?;
        execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableFocusChange
        )?;
        Ok(())
    }

    fn widget_area(area: Rect) -> Rect {
        let width = area.width.min(MAX_WIDTH);
        Rect::new(area.x + (area.width - width) / 2, area.y, width, area.height)
    }

    fn run_loop<H: HostControl>(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        widget: &mut TagSelect<H>,
    ) -> Result<Outcome> {
        let mut input = QueryInput::new();
        input.set(widget.query());
        let mut state = ViewState::default();
        widget.on_focus();

        loop {
            terminal.draw(|frame| {
                let area = Self::widget_area(frame.area());
                let view = TagSelectView::new(widget, &input, &self.theme).with_title(&self.title);
                frame.render_stateful_widget(view, area, &mut state);
            })?;

            match poll_and_handle(widget, &mut input, &mut state, self.poll_interval)? {
                LoopControl::Continue => {}
                LoopControl::Done => return Ok(Outcome::Submitted),
                LoopControl::Abort => return Ok(Outcome::Aborted),
            }
        }
    }

    /// Run the widget interactively until the user finishes or aborts
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be set up or drawn to.
    pub fn run<H: HostControl>(&self, widget: &mut TagSelect<H>) -> Result<Outcome> {
        let mut terminal = Self::setup_terminal()?;

        let result = self.run_loop(&mut terminal, widget);

        // Cleanup terminal (always, even on error)
        if let Err(e) = Self::cleanup_terminal() {
            tracing::warn!(error = %e, "terminal cleanup failed");
        }

        tracing::debug!(
            outcome = ?result.as_ref().ok(),
            values = ?widget.values(),
            "session finished"
        );
        result
    }
}
