//! Export module for the expense tracker
//!
//! Writes the whole store to an arbitrary destination:
//! - CSV: identical to the persisted format (can be used as a backing file)
//! - JSON: machine-readable document with count and total
//! - YAML: human-readable variant of the JSON document
//!
//! Every export goes through the same temp-then-rename path as persistence,
//! so a failed export never leaves a half-written destination.

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_csv;
pub use self::json::{export_json, ExportDocument, EXPORT_SCHEMA_VERSION};
pub use self::yaml::export_yaml;

use std::fmt;
use std::path::Path;

use clap::ValueEnum;
use tracing::debug;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Expense;
use crate::storage::write_atomic;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    /// CSV, same layout as the backing file
    #[default]
    Csv,
    /// JSON document
    Json,
    /// YAML document
    Yaml,
}

impl ExportFormat {
    /// All formats, in cycling order
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Csv, ExportFormat::Json, ExportFormat::Yaml];

    /// Guess a format from a file extension, defaulting to CSV
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => ExportFormat::Json,
            Some("yaml") | Some("yml") => ExportFormat::Yaml,
            _ => ExportFormat::Csv,
        }
    }

    /// The format after this one
    pub fn next(self) -> Self {
        match self {
            ExportFormat::Csv => ExportFormat::Json,
            ExportFormat::Json => ExportFormat::Yaml,
            ExportFormat::Yaml => ExportFormat::Csv,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "CSV"),
            ExportFormat::Json => write!(f, "JSON"),
            ExportFormat::Yaml => write!(f, "YAML"),
        }
    }
}

/// Write `expenses` to `destination` in the given format
///
/// Returns the number of exported expenses.
pub fn export_expenses(
    expenses: &[Expense],
    destination: &Path,
    format: ExportFormat,
) -> ExpenseResult<usize> {
    let mut failure: Option<ExpenseError> = None;

    let written = write_atomic(destination, |writer| {
        let result = match format {
            ExportFormat::Csv => export_csv(writer, expenses),
            ExportFormat::Json => export_json(writer, expenses),
            ExportFormat::Yaml => export_yaml(writer, expenses),
        };
        result.map_err(|e| {
            let io_err = std::io::Error::other(e.to_string());
            failure = Some(e);
            io_err
        })
    });

    match (written, failure) {
        (Ok(()), _) => {
            debug!(path = %destination.display(), %format, count = expenses.len(), "exported");
            Ok(expenses.len())
        }
        (Err(_), Some(e)) => Err(e),
        (Err(e), None) => Err(ExpenseError::Export(format!(
            "Failed to write {}: {}",
            destination.display(),
            e
        ))),
    }
}
