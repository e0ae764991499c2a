//! Expense service
//!
//! The only entry point the CLI and TUI use to touch expenses: validates
//! user input, mutates the store through the repository, and records each
//! change in the audit log.

use std::path::Path;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{self, ExportFormat};
use crate::models::{Expense, Money, MoneyParseError, DATE_FORMAT};
use crate::storage::Storage;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

/// Raw user input for a new expense
#[derive(Debug, Clone, Default)]
pub struct ExpenseDraft {
    pub amount: String,
    pub category: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub note: String,
}

impl ExpenseDraft {
    /// Create a draft from the four form fields
    pub fn new(
        amount: impl Into<String>,
        category: impl Into<String>,
        date: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            amount: amount.into(),
            category: category.into(),
            date: date.into(),
            note: note.into(),
        }
    }
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Validate a draft and prepend the resulting expense
    ///
    /// Only the amount and date are checked; category and note are stored
    /// verbatim. On any validation or write failure the store is left
    /// unchanged.
    pub fn add_record(&self, draft: ExpenseDraft) -> ExpenseResult<Expense> {
        let amount = parse_amount(&draft.amount)?;
        let date = parse_date(&draft.date)?;

        let expense = Expense::new(amount, draft.category, date, draft.note);
        expense
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.storage.expenses.insert_front(expense.clone())?;
        self.storage.log_create(&expense);
        debug!(id = %expense.id, "added expense");

        Ok(expense)
    }

    /// Delete the expense at a storage position
    pub fn delete_record(&self, position: usize) -> ExpenseResult<Expense> {
        let removed = self.storage.expenses.remove_at(position)?;
        self.storage.log_delete(&removed);
        debug!(id = %removed.id, position, "deleted expense");

        Ok(removed)
    }

    /// Write every expense to `destination`, returning how many were written
    pub fn export_to(&self, destination: &Path, format: ExportFormat) -> ExpenseResult<usize> {
        let expenses = self.storage.expenses.get_all()?;
        export::export_expenses(&expenses, destination, format)
    }

    /// Sum of all amounts
    pub fn current_total(&self) -> ExpenseResult<Money> {
        self.storage.expenses.total()
    }

    /// Every expense in storage order
    pub fn all_records(&self) -> ExpenseResult<Vec<Expense>> {
        self.storage.expenses.get_all()
    }
}

/// Parse a user-entered amount, rejecting negatives
pub fn parse_amount(input: &str) -> ExpenseResult<Money> {
    let amount = Money::parse(input).map_err(|e| match e {
        MoneyParseError::Empty => ExpenseError::Validation("Amount is required".into()),
        MoneyParseError::InvalidFormat(s) => {
            ExpenseError::Validation(format!("Invalid amount '{}'", s))
        }
    })?;

    if amount.is_negative() {
        return Err(ExpenseError::Validation("Amount cannot be negative".into()));
    }
    Ok(amount)
}

/// Parse a user-entered `YYYY-MM-DD` date
pub fn parse_date(input: &str) -> ExpenseResult<NaiveDate> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| {
        ExpenseError::Validation(format!(
            "Invalid date '{}', expected YYYY-MM-DD",
            trimmed
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ExpensePaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn draft(amount: &str, note: &str) -> ExpenseDraft {
        ExpenseDraft::new(amount, "Food", "2025-01-15", note)
    }

    #[test]
    fn test_add_record() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let expense = service
            .add_record(ExpenseDraft::new(" 12.5 ", "Food", " 2025-01-15 ", "lunch"))
            .unwrap();

        assert_eq!(expense.amount.to_fixed(), "12.50");
        assert_eq!(expense.category, "Food");
        assert_eq!(expense.note, "lunch");
        assert_eq!(service.all_records().unwrap(), vec![expense]);
        assert!(storage.paths().expenses_file().exists());
    }

    #[test]
    fn test_newest_first() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        for note in ["A", "B", "C"] {
            service.add_record(draft("1", note)).unwrap();
        }

        let notes: Vec<String> = service
            .all_records()
            .unwrap()
            .into_iter()
            .map(|e| e.note)
            .collect();
        assert_eq!(notes, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_invalid_input_leaves_store_unchanged() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        service.add_record(draft("5", "kept")).unwrap();

        let bad = [
            draft("abc", ""),
            draft("", ""),
            draft("-1", ""),
            ExpenseDraft::new("1", "Food", "15/01/2025", ""),
            ExpenseDraft::new("1", "Food", "2025-02-30", ""),
        ];
        for input in bad {
            let err = service.add_record(input).unwrap_err();
            assert!(err.is_validation(), "{err}");
        }

        assert_eq!(service.all_records().unwrap().len(), 1);
    }

    #[test]
    fn test_category_and_note_kept_verbatim() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let blank = service
            .add_record(ExpenseDraft::new("1", "", "2025-01-15", ""))
            .unwrap();
        let padded = service
            .add_record(ExpenseDraft::new("2", " Food ", "2025-01-15", " spaced "))
            .unwrap();

        assert_eq!(blank.category, "");
        assert_eq!(padded.category, " Food ");
        assert_eq!(padded.note, " spaced ");

        storage.load_all().unwrap();
        assert_eq!(service.all_records().unwrap(), vec![padded, blank]);
    }

    #[test]
    fn test_full_precision_total() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        service.add_record(draft("0.125", "")).unwrap();
        service.add_record(draft("0.125", "")).unwrap();

        assert_eq!(service.current_total().unwrap().to_fixed(), "0.25");
    }

    #[test]
    fn test_delete_record() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        service.add_record(draft("1", "A")).unwrap();
        service.add_record(draft("2", "B")).unwrap();

        let removed = service.delete_record(0).unwrap();
        assert_eq!(removed.note, "B");
        assert_eq!(service.all_records().unwrap().len(), 1);

        let err = service.delete_record(1).unwrap_err();
        assert!(err.is_out_of_range());
        assert_eq!(service.all_records().unwrap().len(), 1);
    }

    #[test]
    fn test_changes_are_audited() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let added = service.add_record(draft("3", "")).unwrap();
        service.delete_record(0).unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].entity_id, added.id.to_full_string());
    }

    #[test]
    fn test_export_to() {
        let (temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        service.add_record(draft("10.00", "")).unwrap();
        service.add_record(draft("20.50", "x, y")).unwrap();

        let dest = temp_dir.path().join("out").join("export.csv");
        assert_eq!(service.export_to(&dest, ExportFormat::Csv).unwrap(), 2);

        let exported = std::fs::read_to_string(&dest).unwrap();
        let backing = std::fs::read_to_string(storage.paths().expenses_file()).unwrap();
        assert_eq!(exported, backing);
    }

    #[test]
    fn test_reload_reconstructs_order() {
        let (temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        for note in ["A", "B", "C"] {
            service.add_record(draft("1", note)).unwrap();
        }
        let before = service.all_records().unwrap();

        let reopened =
            Storage::new(ExpensePaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        reopened.load_all().unwrap();

        assert_eq!(ExpenseService::new(&reopened).all_records().unwrap(), before);
    }
}
