//! Display formatting for terminal output
//!
//! Sorted table views and the tabled rendering used by the CLI.

pub mod expense;
pub mod sort;

pub use expense::{format_expense_details, format_expense_table, format_total, note_preview};
pub use sort::{SortColumn, SortDirection, TableView};
