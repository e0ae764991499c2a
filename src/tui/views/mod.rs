//! TUI Views module
//!
//! The expense table with its header, and the status bar.

pub mod expense_table;
pub mod status_bar;

use ratatui::Frame;

use super::app::{ActiveDialog, App};
use super::dialogs;
use super::layout::AppLayout;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &mut App) {
    let layout = AppLayout::new(frame.area());

    expense_table::render_header(frame, app, layout.header);
    expense_table::render(frame, app, layout.table);
    status_bar::render(frame, app, layout.status_bar);

    if app.has_dialog() {
        render_dialog(frame, app);
    }
}

/// Render active dialog
fn render_dialog(frame: &mut Frame, app: &mut App) {
    match app.active_dialog.clone() {
        ActiveDialog::Help => dialogs::help::render(frame),
        ActiveDialog::AddExpense => dialogs::expense::render(frame, app),
        ActiveDialog::Export => dialogs::export::render(frame, app),
        ActiveDialog::Note(note) => dialogs::note::render(frame, &note),
        ActiveDialog::ConfirmDelete { summary, .. } => {
            dialogs::confirm::render(frame, app, &summary)
        }
        ActiveDialog::None => {}
    }
}
