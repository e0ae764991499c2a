//! Event handler for the TUI
//!
//! Routes keyboard events to the table or to the active dialog.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::services::ExpenseService;

use super::app::{ActiveDialog, App};
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick | Event::Resize(_, _) => Ok(()),
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    // Windows reports releases too
    if key.kind == KeyEventKind::Release {
        return Ok(());
    }

    if app.has_dialog() {
        handle_dialog_key(app, key);
        return Ok(());
    }

    handle_table_key(app, key);
    Ok(())
}

/// Handle keys on the expense table
fn handle_table_key(app: &mut App, key: KeyEvent) {
    let count = app.storage.expenses.count().unwrap_or(0);
    app.clear_status();

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('?') => app.open_dialog(ActiveDialog::Help),

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => app.move_down(count),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('g') | KeyCode::Home => app.selected_index = 0,
        KeyCode::Char('G') | KeyCode::End => app.select_last(count),

        // Sorting
        KeyCode::Char('s') => app.cycle_sort(),
        KeyCode::Char('r') => app.reverse_sort(),

        // Actions
        KeyCode::Char('a') => app.open_dialog(ActiveDialog::AddExpense),
        KeyCode::Char('e') => app.open_dialog(ActiveDialog::Export),
        KeyCode::Char('d') | KeyCode::Delete => request_delete(app),
        KeyCode::Char('n') | KeyCode::Enter => show_note(app),

        _ => {}
    }
}

/// Handle keys while a dialog is open
fn handle_dialog_key(app: &mut App, key: KeyEvent) {
    match &app.active_dialog {
        ActiveDialog::Help | ActiveDialog::Note(_) => app.close_dialog(),
        ActiveDialog::ConfirmDelete { position, .. } => {
            let position = *position;
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    app.close_dialog();
                    delete_at(app, position);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    app.close_dialog();
                    app.set_status("Delete cancelled");
                }
                _ => {}
            }
        }
        ActiveDialog::AddExpense => super::dialogs::expense::handle_key(app, key),
        ActiveDialog::Export => super::dialogs::export::handle_key(app, key),
        ActiveDialog::None => {}
    }
}

/// Ask before deleting the selected expense (or delete right away)
fn request_delete(app: &mut App) {
    let Some(position) = app.selected_position() else {
        app.set_status("Nothing selected");
        return;
    };

    if app.settings.confirm_delete {
        let summary = app
            .selected_expense()
            .map(|expense| expense.to_string())
            .unwrap_or_default();
        app.open_dialog(ActiveDialog::ConfirmDelete { position, summary });
    } else {
        delete_at(app, position);
    }
}

fn delete_at(app: &mut App, position: usize) {
    match ExpenseService::new(app.storage).delete_record(position) {
        Ok(removed) => {
            app.clamp_selection();
            app.set_status(format!("Deleted {}", removed));
        }
        Err(e) => app.set_status(format!("Delete failed: {}", e)),
    }
}

fn show_note(app: &mut App) {
    match app.selected_expense() {
        Some(expense) => app.open_dialog(ActiveDialog::Note(expense.note)),
        None => app.set_status("Nothing selected"),
    }
}
