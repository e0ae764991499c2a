//! JSON Export functionality
//!
//! Exports the store as a single document with schema versioning, a count and
//! the aggregate total.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, Money};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Exported document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocument {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Number of expenses
    pub count: usize,

    /// Sum of all amounts
    pub total: Money,

    /// Earliest expense date
    pub earliest: Option<NaiveDate>,

    /// Latest expense date
    pub latest: Option<NaiveDate>,

    /// All expenses, in storage order
    pub expenses: Vec<Expense>,
}

impl ExportDocument {
    /// Build a document from the store contents
    pub fn from_expenses(expenses: &[Expense]) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            count: expenses.len(),
            total: expenses.iter().map(|e| e.amount).sum(),
            earliest: expenses.iter().map(|e| e.date).min(),
            latest: expenses.iter().map(|e| e.date).max(),
            expenses: expenses.to_vec(),
        }
    }

    /// Check that the summary fields agree with the expense list
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }
        if self.count != self.expenses.len() {
            return Err(format!(
                "Count says {} but {} expenses are present",
                self.count,
                self.expenses.len()
            ));
        }
        let total: Money = self.expenses.iter().map(|e| e.amount).sum();
        if total != self.total {
            return Err(format!("Total says {} but expenses sum to {}", self.total, total));
        }
        Ok(())
    }
}

/// Export expenses to pretty-printed JSON
pub fn export_json<W: Write>(writer: &mut W, expenses: &[Expense]) -> ExpenseResult<()> {
    let document = ExportDocument::from_expenses(expenses);

    serde_json::to_writer_pretty(&mut *writer, &document)
        .map_err(|e| ExpenseError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| ExpenseError::Export(e.to_string()))?;

    Ok(())
}
