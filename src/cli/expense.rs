//! Expense CLI commands
//!
//! Implements the add/list/delete/note/total/categories/history commands.
//! Rows are addressed by the 1-based number shown in `list` under the same
//! sort options.

use std::io::{self, BufRead, Write};

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_expense_details, format_expense_table, format_total, SortColumn, TableView};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{today, Expense};
use crate::services::{ExpenseDraft, ExpenseService};
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Amount spent (e.g., "12.50" or "12")
        amount: String,
        /// Category (defaults to the first configured suggestion)
        #[arg(short, long)]
        category: Option<String>,
        /// Date of the expense (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Free-form note
        #[arg(short, long, default_value = "")]
        note: String,
    },
    /// List expenses
    #[command(alias = "ls")]
    List {
        /// Sort by column
        #[arg(short, long, value_enum)]
        sort: Option<SortColumn>,
        /// Reverse the order
        #[arg(long)]
        desc: bool,
        /// Show at most this many rows
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Delete the expense shown at a row number
    #[command(alias = "rm")]
    Delete {
        /// Row number as shown by `list`
        row: usize,
        /// Sort used when the row number was read
        #[arg(short, long, value_enum)]
        sort: Option<SortColumn>,
        /// Reverse the order
        #[arg(long)]
        desc: bool,
        /// Don't ask for confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Print the note of the expense at a row number
    Note {
        /// Row number as shown by `list`
        row: usize,
        /// Sort used when the row number was read
        #[arg(short, long, value_enum)]
        sort: Option<SortColumn>,
        /// Reverse the order
        #[arg(long)]
        desc: bool,
    },
    /// Show the sum of all expenses
    Total,
    /// List category suggestions
    Categories,
    /// Show recent changes
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> ExpenseResult<()> {
    let service = ExpenseService::new(storage);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            date,
            note,
        } => {
            let draft = ExpenseDraft::new(
                amount,
                category.unwrap_or_else(|| settings.default_category().to_string()),
                date.unwrap_or_else(today),
                note,
            );
            let expense = service.add_record(draft)?;

            println!("Added expense: {}", expense);
            println!(
                "Saved to: {}",
                storage.paths().expenses_file_display().display()
            );
        }

        ExpenseCommands::List { sort, desc, limit } => {
            let expenses = service.all_records()?;
            let view = TableView::from_options(sort, desc);
            print!("{}", format_expense_table(&expenses, &view, limit, currency));
        }

        ExpenseCommands::Delete {
            row,
            sort,
            desc,
            force,
        } => {
            let expenses = service.all_records()?;
            let position = resolve_row(&expenses, &TableView::from_options(sort, desc), row)?;
            let target = &expenses[position];

            if !force && settings.confirm_delete {
                print!("{}", format_expense_details(target, currency));
                let stdin = io::stdin();
                let confirmed =
                    confirm(&mut stdin.lock(), &mut io::stdout(), "Delete this expense? (y/N): ")?;
                if !confirmed {
                    println!("Aborted.");
                    return Ok(());
                }
            }

            let removed = service.delete_record(position)?;
            println!("Deleted expense: {}", removed);
        }

        ExpenseCommands::Note { row, sort, desc } => {
            let expenses = service.all_records()?;
            let position = resolve_row(&expenses, &TableView::from_options(sort, desc), row)?;
            let expense = &expenses[position];

            if expense.note.is_empty() {
                eprintln!("Expense {} has no note.", row);
            } else {
                println!("{}", expense.note);
            }
        }

        ExpenseCommands::Total => {
            println!("{}", format_total(service.current_total()?, currency));
        }

        ExpenseCommands::Categories => {
            if settings.categories.is_empty() {
                println!("No category suggestions configured.");
            }
            for (i, category) in settings.categories.iter().enumerate() {
                if i == 0 {
                    println!("  {} (default)", category);
                } else {
                    println!("  {}", category);
                }
            }
        }

        ExpenseCommands::History { limit } => {
            let entries = storage.audit().read_recent(limit)?;
            if entries.is_empty() {
                println!("No history yet.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
    }

    Ok(())
}

/// Map a 1-based row number to a storage position
pub fn resolve_row(expenses: &[Expense], view: &TableView, row: usize) -> ExpenseResult<usize> {
    if row == 0 {
        return Err(ExpenseError::Validation("Row numbers start at 1".into()));
    }
    view.storage_position(expenses, row - 1)
}

/// Ask a yes/no question; anything but "y" or "yes" is a no
pub fn confirm<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    prompt: &str,
) -> ExpenseResult<bool> {
    write!(writer, "{}", prompt)?;
    writer.flush()?;

    let mut answer = String::new();
    reader.read_line(&mut answer)?;

    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::SortDirection;
    use crate::models::Money;
    use chrono::NaiveDate;
    use std::io::Cursor;

    fn sample() -> Vec<Expense> {
        vec![
            Expense::new(
                Money::from_cents(300),
                "Food",
                NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
                "",
            ),
            Expense::new(
                Money::from_cents(100),
                "Food",
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                "",
            ),
        ]
    }

    #[test]
    fn test_resolve_row() {
        let expenses = sample();
        assert_eq!(resolve_row(&expenses, &TableView::unsorted(), 1).unwrap(), 0);

        let by_amount = TableView::sorted(SortColumn::Amount, SortDirection::Ascending);
        assert_eq!(resolve_row(&expenses, &by_amount, 1).unwrap(), 1);
    }

    #[test]
    fn test_resolve_row_bounds() {
        let expenses = sample();
        assert!(resolve_row(&expenses, &TableView::unsorted(), 0)
            .unwrap_err()
            .is_validation());
        assert!(resolve_row(&expenses, &TableView::unsorted(), 3)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_confirm() {
        for (input, expected) in [("y\n", true), ("YES\n", true), ("n\n", false), ("", false)] {
            let mut out = Vec::new();
            let answer = confirm(&mut Cursor::new(input), &mut out, "Sure? ").unwrap();
            assert_eq!(answer, expected, "input {:?}", input);
            assert_eq!(String::from_utf8(out).unwrap(), "Sure? ");
        }
    }
}
