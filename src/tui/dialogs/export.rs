//! Export dialog
//!
//! Asks for a destination path and a format, then writes the whole store.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::export::ExportFormat;
use crate::services::ExpenseService;
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;

/// State for the export dialog
#[derive(Debug, Clone)]
pub struct ExportFormState {
    pub path_input: TextInput,
    pub format: ExportFormat,
    /// Error message to display
    pub error_message: Option<String>,
}

impl ExportFormState {
    /// Create the form with a proposed destination
    pub fn new(default_path: &str) -> Self {
        let mut path_input = TextInput::new()
            .label("File")
            .placeholder("expenses-export.csv")
            .content(default_path);
        path_input.focused = true;

        Self {
            path_input,
            format: ExportFormat::from_path(&PathBuf::from(default_path)),
            error_message: None,
        }
    }

    /// Switch to the next format
    pub fn cycle_format(&mut self) {
        self.format = self.format.next();
    }

    /// Destination path, if one was entered
    pub fn destination(&self) -> Option<PathBuf> {
        let path = self.path_input.value().trim();
        if path.is_empty() {
            None
        } else {
            Some(PathBuf::from(path))
        }
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

/// Render the export dialog
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = centered_rect_fixed(64, 9, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Export ")
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
            Constraint::Length(1), // Path
            Constraint::Length(1), // Format
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Error
            Constraint::Length(1), // Hints
            Constraint::Min(0),
        ])
        .split(inner);

    let form = &app.export_form;
    frame.render_widget(form.path_input.clone(), chunks[0]);

    let mut format_spans = vec![Span::styled(
        format!("{:>10}: ", "Format"),
        Style::default().fg(Color::Cyan),
    )];
    for format in ExportFormat::ALL {
        let style = if format == form.format {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        format_spans.push(Span::styled(format!(" {} ", format), style));
        format_spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(format_spans)), chunks[1]);

    if let Some(ref error) = form.error_message {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                error.as_str(),
                Style::default().fg(Color::Red),
            ))),
            chunks[3],
        );
    }

    let hints = Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" Format  "),
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Export  "),
        Span::styled("[Esc]", Style::default().fg(Color::Red)),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[4]);
}

/// Handle a key while the dialog is open
pub fn handle_key(app: &mut App, key: KeyEvent) {
    let form = &mut app.export_form;

    match key.code {
        KeyCode::Esc => app.close_dialog(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => form.cycle_format(),
        KeyCode::Enter => run_export(app),
        KeyCode::Backspace => {
            form.clear_error();
            form.path_input.backspace();
        }
        KeyCode::Delete => {
            form.clear_error();
            form.path_input.delete();
        }
        KeyCode::Left => form.path_input.move_left(),
        KeyCode::Right => form.path_input.move_right(),
        KeyCode::Home => form.path_input.move_start(),
        KeyCode::End => form.path_input.move_end(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.clear_error();
            form.path_input.insert(c);
        }
        _ => {}
    }
}

fn run_export(app: &mut App) {
    let Some(destination) = app.export_form.destination() else {
        app.export_form.set_error("Enter a file name");
        return;
    };
    let format = app.export_form.format;

    match ExpenseService::new(app.storage).export_to(&destination, format) {
        Ok(count) => {
            app.close_dialog();
            app.set_status(format!(
                "Exported {} expenses as {} to {}",
                count,
                format,
                destination.display()
            ));
        }
        Err(e) => app.export_form.set_error(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_follows_default_path() {
        assert_eq!(ExportFormState::new("out.json").format, ExportFormat::Json);
        assert_eq!(ExportFormState::new("out.csv").format, ExportFormat::Csv);
    }

    #[test]
    fn test_destination() {
        let mut form = ExportFormState::new("  ");
        assert!(form.destination().is_none());

        form.path_input.set_value("dir/out.yaml");
        assert_eq!(form.destination(), Some(PathBuf::from("dir/out.yaml")));
    }

    #[test]
    fn test_cycle_format() {
        let mut form = ExportFormState::new("out.csv");
        form.cycle_format();
        assert_eq!(form.format, ExportFormat::Json);
    }
}
