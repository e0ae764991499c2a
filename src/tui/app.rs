//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.

use crate::config::settings::Settings;
use crate::display::TableView;
use crate::models::Expense;
use crate::storage::Storage;

use super::dialogs::expense::ExpenseFormState;
use super::dialogs::export::ExportFormState;

/// Currently active dialog (if any)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    AddExpense,
    Export,
    Help,
    /// Full note of the selected expense
    Note(String),
    /// Delete the expense at a storage position once confirmed; `summary`
    /// is the expense as shown to the user
    ConfirmDelete { position: usize, summary: String },
}

/// Main application state
pub struct App<'a> {
    /// The storage layer
    pub storage: &'a Storage,

    /// Application settings
    pub settings: &'a Settings,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Currently active dialog
    pub active_dialog: ActiveDialog,

    /// Sort order of the expense table
    pub table_view: TableView,

    /// Selected row, as a display index
    pub selected_index: usize,

    /// Status message to display
    pub status_message: Option<String>,

    /// Add expense form state
    pub expense_form: ExpenseFormState,

    /// Export dialog state
    pub export_form: ExportFormState,
}

impl<'a> App<'a> {
    /// Create a new App instance
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self {
            storage,
            settings,
            should_quit: false,
            active_dialog: ActiveDialog::default(),
            table_view: TableView::unsorted(),
            selected_index: 0,
            status_message: None,
            expense_form: ExpenseFormState::new(settings.default_category()),
            export_form: ExportFormState::new(&settings.default_export_file),
        }
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Open a dialog
    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        match &dialog {
            ActiveDialog::AddExpense => self.expense_form.reopen(),
            ActiveDialog::Export => self.export_form.clear_error(),
            _ => {}
        }
        self.active_dialog = dialog;
    }

    /// Close the current dialog
    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    /// Check if a dialog is active
    pub fn has_dialog(&self) -> bool {
        !matches!(self.active_dialog, ActiveDialog::None)
    }

    /// Snapshot of the store, in storage order
    pub fn expenses(&self) -> Vec<Expense> {
        self.storage.expenses.get_all().unwrap_or_default()
    }

    /// Storage position of the selected row
    pub fn selected_position(&self) -> Option<usize> {
        self.table_view
            .storage_position(&self.expenses(), self.selected_index)
            .ok()
    }

    /// The selected expense
    pub fn selected_expense(&self) -> Option<Expense> {
        let expenses = self.expenses();
        let position = self
            .table_view
            .storage_position(&expenses, self.selected_index)
            .ok()?;
        expenses.into_iter().nth(position)
    }

    /// Move selection up
    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Move selection down, staying within `count` rows
    pub fn move_down(&mut self, count: usize) {
        if self.selected_index + 1 < count {
            self.selected_index += 1;
        }
    }

    /// Jump to the last row
    pub fn select_last(&mut self, count: usize) {
        self.selected_index = count.saturating_sub(1);
    }

    /// Keep the selection on an existing row after the store shrinks
    pub fn clamp_selection(&mut self) {
        let count = self.storage.expenses.count().unwrap_or(0);
        self.selected_index = self.selected_index.min(count.saturating_sub(1));
    }

    /// Sort by the next column
    pub fn cycle_sort(&mut self) {
        self.table_view.cycle_column();
        self.set_status(format!("Sorted by {}", self.table_view.describe()));
    }

    /// Flip the sort direction
    pub fn reverse_sort(&mut self) {
        self.table_view.reverse();
        self.set_status(format!("Sorted by {}", self.table_view.describe()));
    }
}
