//! CSV Export functionality
//!
//! The exported file uses exactly the persisted layout, so it can be opened
//! later as a backing file with `--file`.

use std::io::Write;

use crate::codec;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Expense;

/// Export expenses to CSV
pub fn export_csv<W: Write>(writer: &mut W, expenses: &[Expense]) -> ExpenseResult<()> {
    codec::encode_file(writer, expenses).map_err(|e| ExpenseError::Export(e.to_string()))
}
