//! Expense table screen: lists the remote expenses and owns the selection
//! handed to the edit screen.

use std::collections::BTreeSet;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::models::ExpenseRecord;
use crate::tui::ui::Styles;

/// Expense table state
pub struct ExpensesScreen {
    pub expenses: Vec<ExpenseRecord>,
    pub cursor_state: ListState,
    /// Marked row indices. The selection is positional because that is all
    /// the remote service offers; the marked set rendered as strings is what
    /// the edit session consumes.
    pub marked: BTreeSet<usize>,
    pub is_loading: bool,
}

impl ExpensesScreen {
    pub fn new() -> Self {
        Self {
            expenses: Vec::new(),
            cursor_state: ListState::default(),
            marked: BTreeSet::new(),
            is_loading: false,
        }
    }

    /// Replace the table contents after a fetch. Marks are cleared: row
    /// indices from the previous listing are meaningless against new data.
    pub fn set_expenses(&mut self, expenses: Vec<ExpenseRecord>) {
        self.expenses = expenses;
        self.marked.clear();
        self.cursor_state
            .select(if self.expenses.is_empty() { None } else { Some(0) });
    }

    pub fn navigate_up(&mut self) {
        if self.expenses.is_empty() {
            return;
        }
        let selected = self.cursor_state.selected().unwrap_or(0);
        let new_selected = if selected == 0 {
            self.expenses.len() - 1
        } else {
            selected - 1
        };
        self.cursor_state.select(Some(new_selected));
    }

    pub fn navigate_down(&mut self) {
        if self.expenses.is_empty() {
            return;
        }
        let selected = self.cursor_state.selected().unwrap_or(0);
        self.cursor_state
            .select(Some((selected + 1) % self.expenses.len()));
    }

    /// Toggle the mark on the row under the cursor.
    pub fn toggle_mark(&mut self) {
        if let Some(index) = self.cursor_state.selected() {
            if !self.marked.remove(&index) {
                self.marked.insert(index);
            }
        }
    }

    /// The current selection as string-encoded indices, ascending.
    pub fn selection(&self) -> Vec<String> {
        self.marked.iter().map(|i| i.to_string()).collect()
    }

    /// Draw the expense table screen
    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(0),    // Table
                Constraint::Length(4), // Instructions
            ])
            .split(area);

        self.draw_title(f, chunks[0]);
        self.draw_table(f, chunks[1]);
        self.draw_instructions(f, chunks[2]);
    }

    fn draw_title(&self, f: &mut Frame, area: Rect) {
        let title = if self.is_loading {
            "Expenses - Loading...".to_string()
        } else {
            format!("Expenses ({} records, {} marked)", self.expenses.len(), self.marked.len())
        };

        let title_widget = Paragraph::new(title)
            .style(if self.is_loading { Styles::warning() } else { Styles::title() })
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title_widget, area);
    }

    fn draw_table(&mut self, f: &mut Frame, area: Rect) {
        let header = Line::from(vec![
            Span::styled("     Date       ", Styles::title()),
            Span::styled("| Category             ", Styles::title()),
            Span::styled("| Amount", Styles::title()),
        ]);

        let mut items = vec![ListItem::new(header)];
        items.extend(self.expenses.iter().enumerate().map(|(i, expense)| {
            let style = if Some(i) == self.cursor_state.selected() {
                Styles::selected()
            } else if self.marked.contains(&i) {
                Styles::info()
            } else {
                Style::default()
            };

            let mark = if self.marked.contains(&i) { "[x]" } else { "[ ]" };
            let content = format!(
                "{} {:10} | {:20} | {}",
                mark,
                expense.expense_date,
                expense.expense_category.get(0..20).unwrap_or(&expense.expense_category),
                expense.expense_amount,
            );
            ListItem::new(Line::from(Span::styled(content, style)))
        }));

        let block = Block::default()
            .title("Recorded Expenses")
            .borders(Borders::ALL)
            .border_style(Styles::active_border());

        f.render_widget(List::new(items).block(block), area);
    }

    fn draw_instructions(&self, f: &mut Frame, area: Rect) {
        let instructions = vec![
            Line::from("↑/↓: Navigate | Space: Mark/unmark | e/Enter: Edit marked expense"),
            Line::from("r: Refresh list | q: Quit"),
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
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen_with(count: usize) -> ExpensesScreen {
        let mut screen = ExpensesScreen::new();
        screen.set_expenses(
            (0..count)
                .map(|i| ExpenseRecord {
                    expense_date: format!("2024-01-{:02}", i + 1),
                    expense_category: "Food".to_string(),
                    expense_amount: "10".to_string(),
                })
                .collect(),
        );
        screen
    }

    #[test]
    fn marking_rows_yields_string_indices_in_order() {
        let mut screen = screen_with(3);
        screen.navigate_down();
        screen.navigate_down();
        screen.toggle_mark();
        screen.cursor_state.select(Some(0));
        screen.toggle_mark();

        assert_eq!(screen.selection(), vec!["0".to_string(), "2".to_string()]);
    }

    #[test]
    fn toggling_twice_unmarks() {
        let mut screen = screen_with(2);
        screen.toggle_mark();
        screen.toggle_mark();
        assert!(screen.selection().is_empty());
    }

    #[test]
    fn new_data_clears_marks() {
        let mut screen = screen_with(2);
        screen.toggle_mark();
        screen.set_expenses(Vec::new());
        assert!(screen.selection().is_empty());
        assert_eq!(screen.cursor_state.selected(), None);
    }
}
