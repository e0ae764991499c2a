//! Delete confirmation dialog
//!
//! Shows the expense about to be removed and the file it is removed from.

use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;

/// Render the delete confirmation for the expense described by `summary`
pub fn render(frame: &mut Frame, app: &App, summary: &str) {
    let area = centered_rect_fixed(64, 9, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Delete Expense ")
        .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let file_name = app
        .storage
        .paths()
        .expenses_file()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            summary,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("will be removed from {}", file_name),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y/Enter]", Style::default().fg(Color::Red)),
            Span::raw(" Delete  "),
            Span::styled("[n/Esc]", Style::default().fg(Color::Green)),
            Span::raw(" Keep"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}
