//! Expense display formatting
//!
//! Renders the expense table for the CLI with `tabled`. Row numbers are the
//! 1-based display indices accepted by `delete` and `note`.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use super::sort::TableView;
use crate::models::{Expense, Money};

/// Longest note shown in a table cell
const NOTE_WIDTH: usize = 40;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Note")]
    note: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format expenses as a table in the order given by `view`
///
/// At most `limit` rows are shown; the total always covers every expense.
pub fn format_expense_table(
    expenses: &[Expense],
    view: &TableView,
    limit: Option<usize>,
    currency: &str,
) -> String {
    if expenses.is_empty() {
        return "No expenses recorded yet.\n".to_string();
    }

    let rows: Vec<ExpenseRow> = view
        .rows(expenses)
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .enumerate()
        .map(|(display_index, (_, expense))| ExpenseRow {
            index: display_index + 1,
            date: expense.date_string(),
            category: expense.category.clone(),
            note: note_preview(&expense.note, NOTE_WIDTH),
            amount: expense.amount.format_with_symbol(currency),
        })
        .collect();
    let shown = rows.len();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::single(0), Alignment::right())
        .modify(Columns::single(4), Alignment::right());

    let total: Money = expenses.iter().map(|e| e.amount).sum();
    let mut output = table.to_string();
    output.push('\n');
    if shown < expenses.len() {
        output.push_str(&format!("Showing {} of {} expenses\n", shown, expenses.len()));
    }
    output.push_str(&format_total(total, currency));
    output.push('\n');
    output
}

/// "Total: ₹30.50"
pub fn format_total(total: Money, currency: &str) -> String {
    format!("Total: {}", total.format_with_symbol(currency))
}

/// Format a single expense for display
pub fn format_expense_details(expense: &Expense, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:  {}\n", expense.id.to_full_string()));
    output.push_str(&format!("Date:     {}\n", expense.date_string()));
    output.push_str(&format!("Category: {}\n", expense.category));
    output.push_str(&format!(
        "Amount:   {}\n",
        expense.amount.format_with_symbol(currency)
    ));
    if !expense.note.is_empty() {
        output.push_str(&format!("Note:     {}\n", expense.note));
    }

    output
}

/// First line of a note, shortened to `width` characters
pub fn note_preview(note: &str, width: usize) -> String {
    let mut lines = note.lines();
    let first = lines.next().unwrap_or("");
    let more_lines = lines.next().is_some();

    let mut preview: String = first.chars().take(width).collect();
    if more_lines || first.chars().count() > width {
        preview.push('…');
    }
    preview
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::sort::{SortColumn, SortDirection};
    use chrono::NaiveDate;

    fn sample() -> Vec<Expense> {
        vec![
            Expense::new(
                Money::from_cents(2050),
                "Transport",
                NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
                "bus",
            ),
            Expense::new(
                Money::from_cents(1000),
                "Food",
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                "",
            ),
        ]
    }

    #[test]
    fn test_empty_table() {
        let output = format_expense_table(&[], &TableView::unsorted(), None, "₹");
        assert_eq!(output, "No expenses recorded yet.\n");
    }

    #[test]
    fn test_table_contents() {
        let output = format_expense_table(&sample(), &TableView::unsorted(), None, "₹");

        assert!(output.contains("Category"));
        assert!(output.contains("Transport"));
        assert!(output.contains("₹20.50"));
        assert!(output.ends_with("Total: ₹30.50\n"));
    }

    #[test]
    fn test_sorted_table_renumbers_rows() {
        let view = TableView::sorted(SortColumn::Amount, SortDirection::Ascending);
        let output = format_expense_table(&sample(), &view, None, "$");

        let food = output.find("Food").unwrap();
        let transport = output.find("Transport").unwrap();
        assert!(food < transport);
    }

    #[test]
    fn test_limit_keeps_full_total() {
        let output = format_expense_table(&sample(), &TableView::unsorted(), Some(1), "$");

        assert!(output.contains("Transport"));
        assert!(!output.contains("Food"));
        assert!(output.contains("Showing 1 of 2 expenses"));
        assert!(output.contains("Total: $30.50"));
    }

    #[test]
    fn test_note_preview() {
        assert_eq!(note_preview("short", 10), "short");
        assert_eq!(note_preview("a very long note", 6), "a very…");
        assert_eq!(note_preview("first\nsecond", 10), "first…");
        assert_eq!(note_preview("", 10), "");
    }

    #[test]
    fn test_details() {
        let expense = &sample()[0];
        let details = format_expense_details(expense, "₹");
        assert!(details.contains("Amount:   ₹20.50"));
        assert!(details.contains("Note:     bus"));
    }
}
