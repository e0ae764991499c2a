//! Expense table view
//!
//! Shows every expense in the current sort order

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::display::{note_preview, SortColumn};
use crate::tui::app::App;

/// Render the title block with key hints
pub fn render_header(frame: &mut Frame, app: &mut App, area: Rect) {
    let title = format!(" Expenses - sorted by {} ", app.table_view.describe());
    let block = Block::default()
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let hints = "a:Add  d:Delete  n:Note  e:Export  s:Sort  r:Reverse";
    let paragraph = Paragraph::new(hints)
        .block(block)
        .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(paragraph, area);
}

/// Render the expense table
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let expenses = app.expenses();
    if expenses.is_empty() {
        let text = Paragraph::new("No expenses. Press 'a' to add one.")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let widths = [
        Constraint::Length(12), // Date
        Constraint::Length(16), // Category
        Constraint::Min(20),    // Note
        Constraint::Length(14), // Amount
    ];

    let sorted = app.table_view.column();
    let arrow = app.table_view.direction().arrow();
    let header_cell = |column: SortColumn| {
        let label = if sorted == Some(column) {
            format!("{} {}", column, arrow)
        } else {
            column.to_string()
        };
        Cell::from(label).style(Style::default().add_modifier(Modifier::BOLD))
    };

    let header = Row::new(vec![
        header_cell(SortColumn::Date),
        header_cell(SortColumn::Category),
        header_cell(SortColumn::Note),
        header_cell(SortColumn::Amount),
    ])
    .style(Style::default().fg(Color::Yellow))
    .height(1);

    let currency = app.settings.currency_symbol.as_str();
    let rows: Vec<Row> = app
        .table_view
        .rows(&expenses)
        .into_iter()
        .map(|(_, expense)| {
            Row::new(vec![
                Cell::from(expense.date_string()),
                Cell::from(expense.category.clone()),
                Cell::from(note_preview(&expense.note, 60)),
                Cell::from(format!(
                    "{:>12}",
                    expense.amount.format_with_symbol(currency)
                ))
                .style(Style::default().fg(Color::Green)),
            ])
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_index.min(expenses.len() - 1)));

    frame.render_stateful_widget(table, area, &mut state);
}
