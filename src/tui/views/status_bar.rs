//! Status bar view
//!
//! Shows the total, the backing file and the latest status message

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::display::format_total;
use crate::tui::app::App;

/// Render the status bar
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let total = app.storage.expenses.total().unwrap_or_default();
    let count = app.storage.expenses.count().unwrap_or(0);

    let mut spans = vec![
        Span::raw(" "),
        Span::styled(
            format_total(total, &app.settings.currency_symbol),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" │ "),
        Span::styled(
            format!("{} expenses", count),
            Style::default().fg(Color::White),
        ),
        Span::raw(" │ "),
        Span::styled(
            format!(
                "Saved to: {}",
                app.storage.paths().expenses_file_display().display()
            ),
            Style::default().fg(Color::Cyan),
        ),
    ];

    if let Some(ref message) = app.status_message {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            message.clone(),
            Style::default().fg(Color::Yellow),
        ));
    }

    // Key hints (right-aligned) when there is room
    let hints = " q:Quit  ?:Help ";
    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let room = (area.width as usize).saturating_sub(left_len);
    if room > hints.len() {
        spans.push(Span::raw(" ".repeat(room - hints.len())));
        spans.push(Span::styled(hints, Style::default().fg(Color::White)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
