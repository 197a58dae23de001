//! Color theme for the terminal front-end

use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background of the highlighted suggestion
    pub highlight_bg: Color,
    /// Foreground of the highlighted suggestion
    pub highlight_fg: Color,
    /// Background of tag chips
    pub chip_bg: Color,
    /// Foreground of tag chips
    pub chip_fg: Color,
    /// Color of the chip remove marker
    pub chip_remove: Color,
    /// Color for the input cursor
    pub cursor: Color,
    /// Color for the create-new row
    pub create: Color,
    /// Color for borders
    pub border: Color,
    /// Color for borders of the focused input
    pub focus_border: Color,
    /// Color for dimmed/informational text
    pub dimmed: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme (default)
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            highlight_bg: Color::Blue,
            highlight_fg: Color::White,
            chip_bg: Color::Cyan,
            chip_fg: Color::Black,
            chip_remove: Color::Red,
            cursor: Color::Cyan,
            create: Color::Green,
            border: Color::DarkGray,
            focus_border: Color::Cyan,
            dimmed: Color::DarkGray,
        }
    }

    /// Style for the highlighted suggestion
    #[must_use]
    pub fn highlight_style(&self) -> Style {
        Style::default()
            .bg(self.highlight_bg)
            .fg(self.highlight_fg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for ordinary suggestion rows
    #[must_use]
    pub fn normal_style(&self) -> Style {
        Style::default()
    }

    /// Style for tag chips
    #[must_use]
    pub fn chip_style(&self) -> Style {
        Style::default()
            .bg(self.chip_bg)
            .fg(self.chip_fg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the remove marker inside a chip
    #[must_use]
    pub fn chip_remove_style(&self) -> Style {
        Style::default().bg(self.chip_bg).fg(self.chip_remove)
    }

    /// Style for the input cursor cell
    #[must_use]
    pub fn cursor_style(&self) -> Style {
        Style::default()
            .bg(self.cursor)
            .fg(Color::Black)
            .add_modifier(Modifier::SLOW_BLINK)
    }

    /// Style for the create-new row
    #[must_use]
    pub fn create_style(&self) -> Style {
        Style::default().fg(self.create)
    }

    /// Style for non-interactive rows (no results, limit reached)
    #[must_use]
    pub fn informational_style(&self) -> Style {
        Style::default()
            .fg(self.dimmed)
            .add_modifier(Modifier::ITALIC)
    }

    /// Style for borders
    #[must_use]
    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused { self.focus_border } else { self.border })
    }

    /// Style for dimmed text
    #[must_use]
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.dimmed)
    }
}
