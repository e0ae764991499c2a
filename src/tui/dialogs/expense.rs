//! Add expense dialog
//!
//! Modal form with amount, category, date and note fields. Tab moves between
//! fields, ↑/↓ cycles category suggestions, Enter saves. The form keeps its
//! category and date between entries and clears amount and note after a save.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::category::cycle_suggestion;
use crate::models::today;
use crate::services::{ExpenseDraft, ExpenseService};
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;

/// Which field is currently focused in the expense form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpenseField {
    #[default]
    Amount,
    Category,
    Date,
    Note,
}

impl ExpenseField {
    /// Get the next field (for Tab navigation)
    pub fn next(self) -> Self {
        match self {
            Self::Amount => Self::Category,
            Self::Category => Self::Date,
            Self::Date => Self::Note,
            Self::Note => Self::Amount,
        }
    }

    /// Get the previous field (for Shift+Tab navigation)
    pub fn prev(self) -> Self {
        match self {
            Self::Amount => Self::Note,
            Self::Category => Self::Amount,
            Self::Date => Self::Category,
            Self::Note => Self::Date,
        }
    }
}

/// State for the add expense form
#[derive(Debug, Clone)]
pub struct ExpenseFormState {
    /// Currently focused field
    pub focused_field: ExpenseField,
    pub amount_input: TextInput,
    pub category_input: TextInput,
    pub date_input: TextInput,
    pub note_input: TextInput,
    /// Error message to display
    pub error_message: Option<String>,
}

impl ExpenseFormState {
    /// Create a new form with today's date and the default category
    pub fn new(default_category: &str) -> Self {
        let mut state = Self {
            focused_field: ExpenseField::Amount,
            amount_input: TextInput::new().label("Amount").placeholder("0.00"),
            category_input: TextInput::new()
                .label("Category")
                .content(default_category),
            date_input: TextInput::new()
                .label("Date")
                .placeholder("YYYY-MM-DD")
                .content(today()),
            note_input: TextInput::new().label("Note").placeholder("Optional note"),
            error_message: None,
        };
        state.update_focus();
        state
    }

    /// Prepare the form for another entry
    pub fn reopen(&mut self) {
        self.error_message = None;
        if self.date_input.value().trim().is_empty() {
            self.date_input.set_value(today());
        }
        self.set_focus(ExpenseField::Amount);
    }

    /// Move to the next field
    pub fn next_field(&mut self) {
        self.set_focus(self.focused_field.next());
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        self.set_focus(self.focused_field.prev());
    }

    /// Set focus to a specific field
    pub fn set_focus(&mut self, field: ExpenseField) {
        self.focused_field = field;
        self.update_focus();
    }

    fn update_focus(&mut self) {
        self.amount_input.focused = self.focused_field == ExpenseField::Amount;
        self.category_input.focused = self.focused_field == ExpenseField::Category;
        self.date_input.focused = self.focused_field == ExpenseField::Date;
        self.note_input.focused = self.focused_field == ExpenseField::Note;
    }

    /// Get the currently focused input
    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.focused_field {
            ExpenseField::Amount => &mut self.amount_input,
            ExpenseField::Category => &mut self.category_input,
            ExpenseField::Date => &mut self.date_input,
            ExpenseField::Note => &mut self.note_input,
        }
    }

    /// Replace the category with the next or previous suggestion
    pub fn cycle_category(&mut self, suggestions: &[String], forward: bool) {
        if let Some(next) = cycle_suggestion(suggestions, self.category_input.value().trim(), forward) {
            self.category_input.set_value(next);
        }
    }

    /// The form contents as service input
    pub fn to_draft(&self) -> ExpenseDraft {
        ExpenseDraft::new(
            self.amount_input.value(),
            self.category_input.value(),
            self.date_input.value(),
            self.note_input.value(),
        )
    }

    /// Clear amount and note after a successful save
    pub fn reset_after_save(&mut self) {
        self.amount_input.clear();
        self.note_input.clear();
        self.error_message = None;
        self.set_focus(ExpenseField::Amount);
    }

    /// Clear any error message
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Set an error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
    }
}

/// Render the add expense dialog
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = centered_rect_fixed(64, 12, frame.area());

    // Clear the background
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Add Expense ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(block, area);

    let inner = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(2),
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Category
            Constraint::Length(1), // Suggestions
            Constraint::Length(1), // Date
            Constraint::Length(1), // Note
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Error
            Constraint::Length(1), // Hints
            Constraint::Min(0),
        ])
        .split(inner);

    let form = &app.expense_form;
    frame.render_widget(form.amount_input.clone(), chunks[0]);
    frame.render_widget(form.category_input.clone(), chunks[1]);
    frame.render_widget(form.date_input.clone(), chunks[3]);
    frame.render_widget(form.note_input.clone(), chunks[4]);

    if form.focused_field == ExpenseField::Category && !app.settings.categories.is_empty() {
        let suggestions = format!(
            "{:>10}  ↑/↓: {}",
            "",
            app.settings.categories.join(", ")
        );
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                suggestions,
                Style::default().fg(Color::DarkGray),
            ))),
            chunks[2],
        );
    }

    if let Some(ref error) = form.error_message {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                error.as_str(),
                Style::default().fg(Color::Red),
            ))),
            chunks[6],
        );
    }

    let hints = Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" Next  "),
        Span::styled("[Shift+Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" Prev  "),
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Save  "),
        Span::styled("[Esc]", Style::default().fg(Color::Red)),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[7]);
}

/// Handle a key while the dialog is open
pub fn handle_key(app: &mut App, key: KeyEvent) {
    let form = &mut app.expense_form;

    match key.code {
        KeyCode::Esc => app.close_dialog(),
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => form.prev_field(),
        KeyCode::Tab => form.next_field(),
        KeyCode::BackTab => form.prev_field(),
        KeyCode::Enter => save_expense(app),
        KeyCode::Up | KeyCode::Down if form.focused_field == ExpenseField::Category => {
            form.cycle_category(&app.settings.categories, key.code == KeyCode::Down);
        }
        KeyCode::Up => form.prev_field(),
        KeyCode::Down => form.next_field(),
        KeyCode::Backspace => {
            form.clear_error();
            form.focused_input().backspace();
        }
        KeyCode::Delete => {
            form.clear_error();
            form.focused_input().delete();
        }
        KeyCode::Left => form.focused_input().move_left(),
        KeyCode::Right => form.focused_input().move_right(),
        KeyCode::Home => form.focused_input().move_start(),
        KeyCode::End => form.focused_input().move_end(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.clear_error();
            form.focused_input().insert(c);
        }
        _ => {}
    }
}

/// Validate and store the form contents
fn save_expense(app: &mut App) {
    let draft = app.expense_form.to_draft();

    match ExpenseService::new(app.storage).add_record(draft) {
        Ok(expense) => {
            app.expense_form.reset_after_save();
            app.close_dialog();

            // Select the new row wherever the current sort puts it
            let expenses = app.expenses();
            if let Some(index) = app
                .table_view
                .order(&expenses)
                .iter()
                .position(|&p| expenses[p].id == expense.id)
            {
                app.selected_index = index;
            }
            app.set_status(format!("Added {}", expense));
        }
        Err(e) => app.expense_form.set_error(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::category::default_categories;

    #[test]
    fn test_field_cycle() {
        let mut form = ExpenseFormState::new("Food");
        assert_eq!(form.focused_field, ExpenseField::Amount);
        assert!(form.amount_input.focused);

        form.next_field();
        form.next_field();
        form.next_field();
        assert_eq!(form.focused_field, ExpenseField::Note);
        assert!(form.note_input.focused);
        assert!(!form.amount_input.focused);

        form.next_field();
        assert_eq!(form.focused_field, ExpenseField::Amount);
        form.prev_field();
        assert_eq!(form.focused_field, ExpenseField::Note);
    }

    #[test]
    fn test_defaults() {
        let form = ExpenseFormState::new("Bills");
        assert_eq!(form.category_input.value(), "Bills");
        assert_eq!(form.date_input.value(), today());
        assert!(form.amount_input.value().is_empty());
    }

    #[test]
    fn test_cycle_category() {
        let mut form = ExpenseFormState::new("Food");
        let suggestions = default_categories();

        form.cycle_category(&suggestions, true);
        assert_eq!(form.category_input.value(), "Transport");
        form.cycle_category(&suggestions, false);
        form.cycle_category(&suggestions, false);
        assert_eq!(form.category_input.value(), "Other");
    }

    #[test]
    fn test_reset_keeps_category_and_date() {
        let mut form = ExpenseFormState::new("Food");
        form.amount_input.set_value("12");
        form.note_input.set_value("lunch");
        form.date_input.set_value("2025-01-15");
        form.set_focus(ExpenseField::Note);

        form.reset_after_save();

        let draft = form.to_draft();
        assert_eq!(draft.amount, "");
        assert_eq!(draft.note, "");
        assert_eq!(draft.category, "Food");
        assert_eq!(draft.date, "2025-01-15");
        assert_eq!(form.focused_field, ExpenseField::Amount);
    }
}
