//! Common UI widgets and styles for the spendlog TUI

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, ListState, Paragraph},
    Frame,
};

/// Common UI styles
pub struct Styles;

impl Styles {
    pub fn default() -> Style {
        Style::default()
    }

    pub fn selected() -> Style {
        Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn success() -> Style {
        Style::default().fg(Color::Green)
    }

    pub fn warning() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn info() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn inactive() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn active_border() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn inactive_border() -> Style {
        Style::default().fg(Color::Gray)
    }
}

/// What an input field accepts. Numeric and date fields enforce the same
/// constraints the source form's widgets did: non-negative numbers and
/// `YYYY-MM-DD` calendar dates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputKind {
    Text,
    Numeric,
    Date,
}

/// Single-line input field widget
#[derive(Clone)]
pub struct InputField {
    pub label: String,
    pub value: String,
    pub placeholder: String,
    pub kind: InputKind,
    pub is_focused: bool,
    pub cursor_position: usize,
    pub validation_error: Option<String>,
}

impl InputField {
    pub fn new(label: &str, kind: InputKind) -> Self {
        Self {
            label: label.to_string(),
            value: String::new(),
            placeholder: String::new(),
            kind,
            is_focused: false,
            cursor_position: 0,
            validation_error: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor_position = self.value.len();
        self.validation_error = None;
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.is_focused = focused;
    }

    /// Insert a character at the cursor, subject to the field kind. A numeric
    /// field takes digits and at most one decimal point, so the value stays a
    /// non-negative number by construction. A date field takes digits and
    /// dashes only.
    pub fn insert_char(&mut self, c: char) {
        let accepted = match self.kind {
            InputKind::Text => true,
            InputKind::Numeric => c.is_ascii_digit() || (c == '.' && !self.value.contains('.')),
            InputKind::Date => c.is_ascii_digit() || c == '-',
        };
        if !accepted {
            return;
        }
        self.value.insert(self.cursor_position, c);
        self.cursor_position += 1;
        self.validation_error = None;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            self.value.remove(self.cursor_position);
            self.validation_error = None;
        }
    }

    pub fn delete_char_forward(&mut self) {
        if self.cursor_position < self.value.len() {
            self.value.remove(self.cursor_position);
            self.validation_error = None;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.value.len() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_to_start(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.cursor_position = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor_position = 0;
        self.validation_error = None;
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Validate the value against the field kind, recording an error for the
    /// border/title to show. Empty values pass; presence rules belong to the
    /// caller.
    pub fn validate(&mut self) -> bool {
        self.validation_error = None;

        match self.kind {
            InputKind::Date => {
                if !self.value.is_empty()
                    && chrono::NaiveDate::parse_from_str(&self.value, "%Y-%m-%d").is_err()
                {
                    self.validation_error = Some("Invalid date (YYYY-MM-DD)".to_string());
                    return false;
                }
            }
            InputKind::Numeric => {
                if !self.value.is_empty() && self.value.parse::<f64>().is_err() {
                    self.validation_error = Some("Invalid amount".to_string());
                    return false;
                }
            }
            InputKind::Text => {}
        }

        true
    }

    /// Render the input field as a bordered paragraph
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let display_text = if self.value.is_empty() && !self.placeholder.is_empty() {
            &self.placeholder
        } else {
            &self.value
        };

        let border_style = if self.is_focused {
            Styles::active_border()
        } else if self.validation_error.is_some() {
            Styles::error()
        } else {
            Styles::inactive_border()
        };

        let title = if let Some(ref error) = self.validation_error {
            format!("{} - {}", self.label, error)
        } else {
            self.label.clone()
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style);

        let text_style = if self.value.is_empty() && !self.placeholder.is_empty() {
            Styles::inactive()
        } else {
            Styles::default()
        };

        let paragraph = Paragraph::new(display_text.to_string())
            .style(text_style)
            .block(block);

        f.render_widget(paragraph, area);

        if self.is_focused {
            let cursor_x = area.x + 1 + self.cursor_position as u16;
            let cursor_y = area.y + 1;
            if cursor_x < area.x + area.width - 1 {
                f.set_cursor(cursor_x, cursor_y);
            }
        }
    }
}

/// Selectable list widget with state
pub struct SelectableList<T> {
    pub items: Vec<T>,
    pub state: ListState,
}

impl<T> SelectableList<T> {
    pub fn new(items: Vec<T>) -> Self {
        let mut state = ListState::default();
        if !items.is_empty() {
            state.select(Some(0));
        }
        Self { items, state }
    }

    pub fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => (i + 1) % self.items.len(),
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.items.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn selected(&self) -> Option<&T> {
        self.state.selected().and_then(|i| self.items.get(i))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.state.selected()
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.state.select(index);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Center a rectangle within another rectangle
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_field_rejects_non_numeric_input() {
        let mut field = InputField::new("Amount", InputKind::Numeric);
        for c in "12.5".chars() {
            field.insert_char(c);
        }
        field.insert_char('-');
        field.insert_char('a');
        field.insert_char('.');
        assert_eq!(field.value, "12.5");
        assert!(field.validate());
    }

    #[test]
    fn date_field_validates_calendar_dates() {
        let mut field = InputField::new("Date", InputKind::Date);
        field.set_value("2024-02-30");
        assert!(!field.validate());
        field.set_value("2024-02-29");
        assert!(field.validate());
    }

    #[test]
    fn selectable_list_wraps_around() {
        let mut list = SelectableList::new(vec!["a", "b", "c"]);
        list.previous();
        assert_eq!(list.selected_index(), Some(2));
        list.next();
        assert_eq!(list.selected_index(), Some(0));
    }
}
