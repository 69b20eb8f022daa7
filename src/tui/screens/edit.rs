//! Edit form screen: date, category and amount for one selected expense.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::models::Currency;
use crate::session::EditSession;
use crate::tui::ui::{centered_rect, InputField, InputKind, SelectableList, Styles};

/// Form fields in tab order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditField {
    Date,
    Category,
    Currency,
    Amount,
}

impl EditField {
    pub fn as_str(&self) -> &str {
        match self {
            EditField::Date => "Date",
            EditField::Category => "Category",
            EditField::Currency => "Currency",
            EditField::Amount => "Amount",
        }
    }
}

/// Edit form state
pub struct EditScreen {
    pub session: EditSession,
    pub current_field: usize,
    pub fields: Vec<EditField>,

    pub date_input: InputField,
    pub category_input: InputField,
    pub amount_input: InputField,

    /// Display currency picker. Cosmetic, like the dollar/euro/rupee selector
    /// in the source form: never serialized into a request.
    pub currency_list: SelectableList<Currency>,
    pub show_currency_dropdown: bool,

    pub is_submitting: bool,
}

impl EditScreen {
    pub fn new() -> Self {
        let mut screen = Self {
            session: EditSession::new(),
            current_field: 0,
            fields: vec![
                EditField::Date,
                EditField::Category,
                EditField::Currency,
                EditField::Amount,
            ],
            date_input: InputField::new("Edit Date (YYYY-MM-DD)", InputKind::Date)
                .with_placeholder("2024-01-01"),
            category_input: InputField::new("Edit Category", InputKind::Text)
                .with_placeholder("Enter Category"),
            amount_input: InputField::new("Edit Expense Value", InputKind::Numeric)
                .with_placeholder("0"),
            currency_list: SelectableList::new(Currency::ALL.to_vec()),
            show_currency_dropdown: false,
            is_submitting: false,
        };
        screen.sync_inputs_from_session();
        screen.update_field_focus();
        screen
    }

    pub fn current_field(&self) -> EditField {
        self.fields[self.current_field]
    }

    /// Copy the session draft into the visible inputs (after a load or reset).
    pub fn sync_inputs_from_session(&mut self) {
        let draft = self.session.draft.clone();
        self.date_input.set_value(&draft.date);
        self.category_input.set_value(&draft.category);
        self.amount_input.set_value(&draft.amount);
    }

    /// Copy the visible inputs into the session draft (before a submit).
    pub fn sync_draft_from_inputs(&mut self) {
        self.session.draft.date = self.date_input.value.clone();
        self.session.draft.category = self.category_input.value.clone();
        self.session.draft.amount = self.amount_input.value.clone();
    }

    /// Validate the typed fields, recording per-field errors. Date and
    /// amount must be present: the source form's picker widgets could not
    /// produce an empty submission, so neither can this one.
    pub fn validate(&mut self) -> bool {
        let mut date_ok = self.date_input.validate();
        if self.date_input.is_empty() {
            self.date_input.validation_error = Some("Required".to_string());
            date_ok = false;
        }

        let mut amount_ok = self.amount_input.validate();
        if self.amount_input.is_empty() {
            self.amount_input.validation_error = Some("Required".to_string());
            amount_ok = false;
        }

        date_ok && amount_ok
    }

    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % self.fields.len();
        self.update_field_focus();
    }

    pub fn previous_field(&mut self) {
        self.current_field = if self.current_field == 0 {
            self.fields.len() - 1
        } else {
            self.current_field - 1
        };
        self.update_field_focus();
    }

    pub fn update_field_focus(&mut self) {
        self.date_input.set_focus(false);
        self.category_input.set_focus(false);
        self.amount_input.set_focus(false);

        match self.current_field() {
            EditField::Date => self.date_input.set_focus(true),
            EditField::Category => self.category_input.set_focus(true),
            EditField::Amount => self.amount_input.set_focus(true),
            EditField::Currency => {}
        }
    }

    fn focused_input_mut(&mut self) -> Option<&mut InputField> {
        match self.current_field() {
            EditField::Date => Some(&mut self.date_input),
            EditField::Category => Some(&mut self.category_input),
            EditField::Amount => Some(&mut self.amount_input),
            EditField::Currency => None,
        }
    }

    pub fn handle_char_input(&mut self, c: char) {
        if let Some(input) = self.focused_input_mut() {
            input.insert_char(c);
        }
    }

    pub fn handle_backspace(&mut self) {
        if let Some(input) = self.focused_input_mut() {
            input.delete_char();
        }
    }

    pub fn handle_delete(&mut self) {
        if let Some(input) = self.focused_input_mut() {
            input.delete_char_forward();
        }
    }

    pub fn handle_cursor_left(&mut self) {
        if let Some(input) = self.focused_input_mut() {
            input.move_cursor_left();
        }
    }

    pub fn handle_cursor_right(&mut self) {
        if let Some(input) = self.focused_input_mut() {
            input.move_cursor_right();
        }
    }

    pub fn handle_cursor_home(&mut self) {
        if let Some(input) = self.focused_input_mut() {
            input.move_cursor_to_start();
        }
    }

    pub fn handle_cursor_end(&mut self) {
        if let Some(input) = self.focused_input_mut() {
            input.move_cursor_to_end();
        }
    }

    /// Draw the edit form screen
    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(2), // Hint
                Constraint::Length(3), // Date
                Constraint::Length(3), // Category
                Constraint::Length(3), // Currency + Amount
                Constraint::Min(0),    // Spacer
                Constraint::Length(4), // Instructions
            ])
            .split(area);

        self.draw_title(f, chunks[0]);

        let hint = Paragraph::new("Select one expense from the table to edit.")
            .style(Styles::info());
        f.render_widget(hint, chunks[1]);

        self.date_input.render(f, chunks[2]);
        self.category_input.render(f, chunks[3]);
        self.draw_amount_row(f, chunks[4]);
        self.draw_instructions(f, chunks[6]);

        if self.show_currency_dropdown {
            self.draw_currency_dropdown(f, area);
        }
    }

    fn draw_title(&self, f: &mut Frame, area: Rect) {
        let title = if self.is_submitting {
            "Edit Expense - Submitting..."
        } else if self.session.is_editable() {
            "Edit Expense"
        } else {
            "Edit Expense - no single expense selected"
        };

        let widget = Paragraph::new(title)
            .style(if self.is_submitting { Styles::warning() } else { Styles::title() })
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(widget, area);
    }

    fn draw_amount_row(&mut self, f: &mut Frame, area: Rect) {
        let row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(12), Constraint::Min(0)])
            .split(area);

        let currency = self
            .currency_list
            .selected()
            .copied()
            .unwrap_or(Currency::Dollar);
        let currency_style = if self.current_field() == EditField::Currency {
            Styles::active_border()
        } else {
            Styles::inactive_border()
        };
        let currency_widget = Paragraph::new(format!("{} {}", currency.symbol(), currency.as_str()))
            .block(
                Block::default()
                    .title("Currency")
                    .borders(Borders::ALL)
                    .border_style(currency_style),
            );
        f.render_widget(currency_widget, row[0]);

        self.amount_input.render(f, row[1]);
    }

    fn draw_instructions(&self, f: &mut Frame, area: Rect) {
        let instructions = vec![
            Line::from("Tab/Shift+Tab: Navigate fields | Enter: Submit edit"),
            Line::from("Enter on Currency: Show picker (display only) | Esc: Back to table"),
        ];

        let widget = Paragraph::new(instructions)
            .style(Styles::info())
            .block(
                Block::default()
                    .title("Instructions")
                    .borders(Borders::ALL)
                    .border_style(Styles::inactive_border()),
            );
        f.render_widget(widget, area);
    }

    fn draw_currency_dropdown(&mut self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(30, 30, area);

        let items: Vec<ListItem> = self
            .currency_list
            .items
            .iter()
            .enumerate()
            .map(|(i, currency)| {
                let style = if Some(i) == self.currency_list.selected_index() {
                    Styles::selected()
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(Span::styled(
                    format!("{} {}", currency.symbol(), currency.as_str()),
                    style,
                )))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .title("Select Currency")
                .borders(Borders::ALL)
                .border_style(Styles::active_border()),
        );

        f.render_widget(Clear, popup_area);
        f.render_stateful_widget(list, popup_area, &mut self.currency_list.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_input_goes_to_the_focused_field() {
        let mut screen = EditScreen::new();
        screen.current_field = 1; // Category
        screen.update_field_focus();
        screen.category_input.clear();
        screen.handle_char_input('F');
        assert_eq!(screen.category_input.value, "F");
        assert!(screen.amount_input.value != "F");
    }

    #[test]
    fn currency_field_swallows_typing() {
        let mut screen = EditScreen::new();
        screen.current_field = 2; // Currency
        screen.update_field_focus();
        let before = screen.amount_input.value.clone();
        screen.handle_char_input('5');
        assert_eq!(screen.amount_input.value, before);
    }

    #[test]
    fn draft_round_trips_through_the_inputs() {
        let mut screen = EditScreen::new();
        screen.session.draft.date = "2024-02-02".to_string();
        screen.session.draft.category = "Rent".to_string();
        screen.session.draft.amount = "500".to_string();
        screen.sync_inputs_from_session();
        assert_eq!(screen.date_input.value, "2024-02-02");

        screen.amount_input.set_value("600");
        screen.sync_draft_from_inputs();
        assert_eq!(screen.session.draft.amount, "600");
        assert_eq!(screen.session.draft.category, "Rent");
    }

    #[test]
    fn cleared_date_or_amount_cannot_be_submitted() {
        let mut screen = EditScreen::new();
        screen.date_input.set_value("");
        screen.amount_input.set_value("");
        screen.category_input.set_value("Rent");

        assert!(!screen.validate());
        assert_eq!(screen.date_input.validation_error.as_deref(), Some("Required"));
        assert_eq!(screen.amount_input.validation_error.as_deref(), Some("Required"));

        // Refilling both fields clears the errors.
        screen.date_input.set_value("2024-02-02");
        screen.amount_input.set_value("500");
        assert!(screen.validate());
        assert!(screen.date_input.validation_error.is_none());
    }

    #[test]
    fn validation_flags_bad_dates_and_amounts() {
        let mut screen = EditScreen::new();
        screen.date_input.set_value("not-a-date");
        assert!(!screen.validate());
        screen.date_input.set_value("2024-05-17");
        screen.amount_input.set_value("12.5");
        assert!(screen.validate());
    }
}
