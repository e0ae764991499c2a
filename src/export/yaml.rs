//! YAML Export functionality
//!
//! Same document as the JSON export, for reading by humans.

use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::export::json::ExportDocument;
use crate::models::Expense;

/// Export expenses to YAML
pub fn export_yaml<W: Write>(writer: &mut W, expenses: &[Expense]) -> ExpenseResult<()> {
    let document = ExportDocument::from_expenses(expenses);

    let to_export_err = |e: std::io::Error| ExpenseError::Export(e.to_string());
    writeln!(writer, "# Expense Tracker Export").map_err(to_export_err)?;
    writeln!(writer, "# Generated: {}", document.exported_at).map_err(to_export_err)?;
    writeln!(writer, "# Expenses: {}, total: {}", document.count, document.total)
        .map_err(to_export_err)?;
    writeln!(writer).map_err(to_export_err)?;

    serde_yaml::to_writer(writer, &document).map_err(|e| ExpenseError::Export(e.to_string()))?;

    Ok(())
}
