//! Tag-select widget rendering
//!
//! Paints the selected tags as chips, the query input, and the dropdown.
//! While rendering it records where chips and rows landed so mouse clicks
//! can be mapped back to widget events.

use super::input::QueryInput;
use super::theme::Theme;
use crate::catalog::TagOption;
use crate::controller::TagSelect;
use crate::host::HostControl;
use crate::suggest::SuggestionEntry;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

/// Maximum dropdown rows shown at once
const MAX_VISIBLE_ROWS: u16 = 8;

/// Marker painted inside each chip; clicking it removes the tag
const REMOVE_MARKER: &str = "×";

/// What a mouse position landed on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hit {
    /// The remove marker of a tag chip
    RemoveTag(String),
    /// A dropdown row
    Suggestion(usize),
    /// The query input
    Input,
    /// Elsewhere inside the widget
    Inside,
    /// Outside the widget
    Outside,
}

/// Render state kept across frames
#[derive(Debug, Default)]
pub struct ViewState {
    /// Dropdown list state (keeps the scroll offset)
    pub list: ListState,
    widget_area: Rect,
    input_area: Rect,
    dropdown_area: Option<Rect>,
    remove_markers: Vec<(Rect, String)>,
}

impl ViewState {
    /// Map a terminal cell to the element painted there last frame
    #[must_use]
    pub fn hit(&self, column: u16, row: u16) -> Hit {
        let position = Position::new(column, row);

        if let Some((_, value)) = self.remove_markers.iter().find(|(r, _)| r.contains(position)) {
            return Hit::RemoveTag(value.clone());
        }
        if let Some(area) = self.dropdown_area
            && area.contains(position)
        {
            return Hit::Suggestion(usize::from(row - area.y) + self.list.offset());
        }
        if self.input_area.contains(position) {
            return Hit::Input;
        }
        if self.widget_area.contains(position) {
            Hit::Inside
        } else {
            Hit::Outside
        }
    }
}

/// Chip placement within the chip area
#[derive(Debug, Clone, PartialEq, Eq)]
struct ChipPlacement {
    row: u16,
    x: u16,
    label: String,
    value: String,
}

impl ChipPlacement {
    /// Painted width: " label × "
    fn width(&self) -> u16 {
        chip_width(&self.label)
    }
}

/// Terminal columns taken by `text`
fn text_width(text: &str) -> usize {
    Span::raw(text).width()
}

/// Terminal columns taken by a single character
fn char_width(c: char) -> usize {
    let mut utf8 = [0u8; 4];
    text_width(c.encode_utf8(&mut utf8))
}

/// Longest prefix of `text` that fits in `max` columns
fn truncate_to_width(text: &str, max: usize) -> String {
    let mut used = 0;
    text.chars()
        .take_while(|&c| {
            used += char_width(c);
            used <= max
        })
        .collect()
}

#[allow(clippy::cast_possible_truncation)]
fn chip_width(label: &str) -> u16 {
    (text_width(label) + 4).min(u16::MAX as usize) as u16
}

/// First character to draw so the cursor cell fits in `width` columns
///
/// Once the text overflows, up to half the width is kept to the right of
/// the cursor.
fn window_start(widths: &[usize], cursor: usize, width: usize) -> usize {
    let cursor_width = widths.get(cursor).copied().unwrap_or(1);
    let before: usize = widths.iter().take(cursor).sum();
    let after: usize = widths.iter().skip(cursor + 1).sum();
    if before + cursor_width + after <= width {
        return 0;
    }

    let budget = width.saturating_sub(cursor_width + after.min(width / 2));
    let mut start = cursor.min(widths.len());
    let mut used = 0;
    while start > 0 && used + widths[start - 1] <= budget {
        used += widths[start - 1];
        start -= 1;
    }
    start
}

/// Flow chips left-to-right, wrapping to a new row when `width` is exceeded
fn layout_chips(tags: &[TagOption], width: u16) -> Vec<ChipPlacement> {
    let mut placements = Vec::with_capacity(tags.len());
    let (mut row, mut x) = (0u16, 0u16);

    let max_label = usize::from(width.saturating_sub(4));

    for tag in tags {
        let label = truncate_to_width(&tag.label, max_label);
        let w = chip_width(&label);
        if x > 0 && x.saturating_add(w) > width {
            row += 1;
            x = 0;
        }
        placements.push(ChipPlacement {
            row,
            x,
            label,
            value: tag.value.clone(),
        });
        x = x.saturating_add(w + 1);
    }
    placements
}

/// Tag-select widget view
pub struct TagSelectView<'a, H: HostControl> {
    widget: &'a TagSelect<H>,
    input: &'a QueryInput,
    theme: &'a Theme,
    title: &'a str,
}

impl<'a, H: HostControl> TagSelectView<'a, H> {
    /// Create a view over a widget and its input buffer
    #[must_use]
    pub const fn new(widget: &'a TagSelect<H>, input: &'a QueryInput, theme: &'a Theme) -> Self {
        Self {
            widget,
            input,
            theme,
            title: "Tags",
        }
    }

    /// Set the chip box title
    #[must_use]
    pub const fn with_title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    fn chip_title(&self, count: usize) -> String {
        match self.widget.config().max_tags {
            Some(max) => format!(" {} ({count}/{max}) ", self.title),
            None => format!(" {} ({count}) ", self.title),
        }
    }

    fn render_chips(
        &self,
        chips: &[ChipPlacement],
        area: Rect,
        buf: &mut Buffer,
        state: &mut ViewState,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false))
            .title(self.chip_title(chips.len()));
        let inner = block.inner(area);
        block.render(area, buf);

        if chips.is_empty() {
            buf.set_string(inner.x, inner.y, "(no tags)", self.theme.dimmed_style());
            return;
        }

        for chip in chips {
            if chip.row >= inner.height || inner.x + chip.x + chip.width() > inner.right() {
                continue;
            }
            let x = inner.x + chip.x;
            let y = inner.y + chip.row;
            let label = format!(" {} ", chip.label);
            let label_width = chip.width() - 2;

            buf.set_string(x, y, &label, self.theme.chip_style());
            buf.set_string(x + label_width, y, REMOVE_MARKER, self.theme.chip_remove_style());
            buf.set_string(x + label_width + 1, y, " ", self.theme.chip_style());
            state
                .remove_markers
                .push((Rect::new(x + label_width, y, 1, 1), chip.value.clone()));
        }
    }

    fn render_input(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.widget.is_open()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.input.is_empty() {
            let line = Line::from(vec![
                Span::styled(" ", self.theme.cursor_style()),
                Span::styled(self.widget.placeholder().to_string(), self.theme.dimmed_style()),
            ]);
            Paragraph::new(line).render(inner, buf);
            return;
        }

        let chars: Vec<char> = self.input.text().chars().collect();
        let widths: Vec<usize> = chars.iter().map(|&c| char_width(c)).collect();
        let cursor = self.input.cursor().min(chars.len());
        let start = window_start(&widths, cursor, usize::from(inner.width));

        let before: String = chars[start..cursor].iter().collect();
        let at: String = chars.get(cursor).map_or_else(|| " ".to_string(), char::to_string);
        let after: String = chars.iter().skip(cursor + 1).collect();

        let line = Line::from(vec![
            Span::raw(before),
            Span::styled(at, self.theme.cursor_style()),
            Span::raw(after),
        ]);
        Paragraph::new(line).render(inner, buf);
    }

    fn render_dropdown(&self, area: Rect, buf: &mut Buffer, state: &mut ViewState) {
        let items: Vec<ListItem<'static>> = self
            .widget
            .suggestions()
            .iter()
            .map(|entry| {
                let text = self.widget.entry_text(entry);
                let style = match entry {
                    SuggestionEntry::Existing(_) => self.theme.normal_style(),
                    SuggestionEntry::CreateNew { .. } => self.theme.create_style(),
                    SuggestionEntry::NoResults | SuggestionEntry::LimitReached { .. } => {
                        self.theme.informational_style()
                    }
                };
                ListItem::new(Line::from(Span::styled(text, style)))
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(true));
        state.dropdown_area = Some(block.inner(area));

        let list = List::new(items)
            .block(block)
            .highlight_style(self.theme.highlight_style())
            .highlight_symbol("▶ ");

        state.list.select(self.widget.highlight_index());
        StatefulWidget::render(list, area, buf, &mut state.list);
    }
}

impl<H: HostControl> StatefulWidget for TagSelectView<'_, H> {
    type State = ViewState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut ViewState) {
        state.widget_area = area;
        state.remove_markers.clear();
        state.dropdown_area = None;

        let chips = layout_chips(&self.widget.selected_tags(), area.width.saturating_sub(2));
        let chip_rows = chips.last().map_or(1, |c| c.row + 1);

        #[allow(clippy::cast_possible_truncation)]
        let dropdown_height = if self.widget.is_open() {
            (self.widget.suggestions().len() as u16).min(MAX_VISIBLE_ROWS) + 2
        } else {
            0
        };

        let chunks = Layout::vertical([
            Constraint::Length(chip_rows + 2),
            Constraint::Length(3),
            Constraint::Length(dropdown_height),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

        self.render_chips(&chips, chunks[0], buf, state);

        state.input_area = chunks[1];
        self.render_input(chunks[1], buf);

        if dropdown_height > 0 {
            self.render_dropdown(chunks[2], buf, state);
        }

        let help = if self.widget.is_open() {
            "↑↓: navigate | Enter: select | Bksp: remove last | Esc: close | Ctrl+C: abort"
        } else {
            "Type to search | Enter: create | Esc: done | Ctrl+C: abort"
        };
        Paragraph::new(help)
            .style(self.theme.dimmed_style())
            .render(chunks[3], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::widget;

    fn render(
        widget: &TagSelect<crate::host::SelectControl>,
        input: &QueryInput,
    ) -> (Buffer, ViewState) {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        let mut state = ViewState::default();
        TagSelectView::new(widget, input, &theme).render(area, &mut buf, &mut state);
        (buf, state)
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_layout_chips_wraps() {
        let tags = vec![
            TagOption::new("a", "Apple"),
            TagOption::new("b", "Banana"),
            TagOption::new("c", "Cherry"),
        ];
        let placements = layout_chips(&tags, 20);

        assert_eq!((placements[0].row, placements[0].x), (0, 0));
        assert_eq!((placements[1].row, placements[1].x), (0, 10));
        assert_eq!((placements[2].row, placements[2].x), (1, 0));
    }

    #[test]
    fn test_renders_chips_and_dropdown() {
        let mut widget = widget();
        widget.add("a");
        widget.on_focus();
        let (buf, state) = render(&widget, &QueryInput::new());

        assert!(row_text(&buf, 1).contains("Apple"));
        assert!(row_text(&buf, 0).contains("Tags (1)"));
        let dropdown: String = (0..buf.area.height).map(|y| row_text(&buf, y)).collect();
        assert!(dropdown.contains("Banana"));
        assert!(dropdown.contains("Cherry"));
        assert!(state.dropdown_area.is_some());
    }

    #[test]
    fn test_hit_testing() {
        let mut widget = widget();
        widget.add("a");
        widget.on_focus();
        let (_, state) = render(&widget, &QueryInput::new());

        let (marker, value) = state.remove_markers[0].clone();
        assert_eq!(state.hit(marker.x, marker.y), Hit::RemoveTag(value));

        let dropdown = state.dropdown_area.unwrap();
        assert_eq!(state.hit(dropdown.x, dropdown.y + 1), Hit::Suggestion(1));
        assert_eq!(state.hit(state.input_area.x + 2, state.input_area.y + 1), Hit::Input);
        assert_eq!(state.hit(59, 18), Hit::Inside);
        assert_eq!(state.hit(100, 100), Hit::Outside);
    }

    #[test]
    fn test_wide_labels_measured_in_columns() {
        assert_eq!(chip_width("苹果"), 8);
        assert_eq!(truncate_to_width("苹果苹果", 5), "苹果");

        let tags = vec![TagOption::new("cn", "苹果"), TagOption::new("k", "Kiwi")];
        let placements = layout_chips(&tags, 40);
        assert_eq!((placements[1].row, placements[1].x), (0, 9));
    }

    #[test]
    fn test_wide_chip_marker_after_label() {
        let mut widget = widget();
        widget.add_labeled("cn", "苹果");
        widget.add_labeled("k", "Kiwi");
        let (buf, state) = render(&widget, &QueryInput::new());

        let (marker, value) = state.remove_markers[0].clone();
        assert_eq!(value, "cn");
        assert_eq!(marker.x, 7);
        assert_eq!(buf[(4, 1)].symbol(), "果");
        assert_eq!(buf[(6, 1)].symbol(), " ");
        assert_eq!(buf[(7, 1)].symbol(), "×");
        assert_eq!(buf[(8, 1)].symbol(), " ");

        let (kiwi_marker, _) = state.remove_markers[1].clone();
        assert_eq!(buf[(kiwi_marker.x, 1)].symbol(), "×");
        assert_eq!(state.hit(kiwi_marker.x, 1), Hit::RemoveTag("k".to_string()));
    }

    #[test]
    fn test_window_start_keeps_cursor_visible() {
        assert_eq!(window_start(&[1; 4], 4, 10), 0);
        assert_eq!(window_start(&[1; 10], 10, 5), 6);
        assert_eq!(window_start(&[2; 4], 4, 5), 2);
        assert_eq!(window_start(&[1; 10], 0, 5), 0);
    }

    #[test]
    fn test_closed_dropdown_not_hit() {
        let widget = widget();
        let (_, state) = render(&widget, &QueryInput::new());
        assert!(state.dropdown_area.is_none());
    }
}
