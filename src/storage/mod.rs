//! Storage layer for the expense tracker
//!
//! Provides CSV file storage with atomic writes, an in-memory record store,
//! and the audit trail for every change.

pub mod expenses;
pub mod file_io;
pub mod store;

pub use expenses::ExpenseRepository;
pub use file_io::{read_text, write_atomic, write_text_atomic};
pub use store::ExpenseStore;

use tracing::warn;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::ExpensePaths;
use crate::error::ExpenseResult;
use crate::models::Expense;

/// Main storage coordinator
pub struct Storage {
    paths: ExpensePaths,
    pub expenses: ExpenseRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    ///
    /// Only the base directory is created here; the CSV file appears on the
    /// first successful mutation.
    pub fn new(paths: ExpensePaths) -> ExpenseResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseRepository::new(paths.expenses_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &ExpensePaths {
        &self.paths
    }

    /// Load all data from disk, returning the number of skipped records
    pub fn load_all(&self) -> ExpenseResult<usize> {
        self.expenses.load()
    }

    /// Get the audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Record an added expense in the audit log
    pub fn log_create(&self, expense: &Expense) {
        let entry = AuditEntry::create(
            expense.id.to_full_string(),
            Some(audit_label(expense)),
            expense,
        );
        self.write_audit(&entry);
    }

    /// Record a deleted expense in the audit log
    pub fn log_delete(&self, expense: &Expense) {
        let entry = AuditEntry::delete(
            expense.id.to_full_string(),
            Some(audit_label(expense)),
            expense,
        );
        self.write_audit(&entry);
    }

    fn write_audit(&self, entry: &AuditEntry) {
        // The data file is already written; a lost audit line is not fatal
        if let Err(e) = self.audit.log(entry) {
            warn!(error = %e, path = %self.audit.path().display(), "failed to write audit entry");
        }
    }
}

fn audit_label(expense: &Expense) -> String {
    format!(
        "{} {} {}",
        expense.date_string(),
        expense.category,
        expense.amount
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().join("base"));
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_storage_creation() {
        let (temp_dir, storage) = create_storage();

        assert!(temp_dir.path().join("base").exists());
        assert!(!storage.paths().expenses_file().exists());
        assert_eq!(storage.load_all().unwrap(), 0);
    }

    #[test]
    fn test_audit_entries() {
        let (_temp_dir, storage) = create_storage();
        let expense = Expense::new(
            Money::from_cents(1250),
            "Food",
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            "",
        );

        storage.log_create(&expense);
        storage.log_delete(&expense);

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[1].operation, Operation::Delete);
        assert_eq!(
            entries[0].entity_name.as_deref(),
            Some("2025-01-15 Food 12.50")
        );
    }
}
