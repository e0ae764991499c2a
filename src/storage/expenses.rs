//! Expense repository for CSV storage
//!
//! Owns the in-memory store and keeps it in step with the backing file.
//! Every mutation is applied to a staged copy, written to disk, and only
//! committed in memory once the write succeeded.

use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, warn};

use crate::codec;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, Money};

use super::file_io::{read_text, write_atomic};
use super::store::ExpenseStore;

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
    store: RwLock<ExpenseStore>,
}

impl ExpenseRepository {
    /// Create a repository backed by `path`; nothing is read until `load`
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            store: RwLock::new(ExpenseStore::new()),
        }
    }

    /// Path of the backing CSV file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load expenses from disk, replacing whatever is in memory
    ///
    /// A missing file yields an empty store. Undecodable records are skipped.
    /// Returns the number of skipped records.
    pub fn load(&self) -> ExpenseResult<usize> {
        let decoded = match read_text(&self.path)? {
            Some(text) => codec::decode_file(&text),
            None => {
                debug!(path = %self.path.display(), "no expense file yet, starting empty");
                codec::DecodedFile::default()
            }
        };

        if decoded.skipped > 0 {
            warn!(
                path = %self.path.display(),
                skipped = decoded.skipped,
                "skipped undecodable records while loading"
            );
        }
        debug!(count = decoded.expenses.len(), "loaded expenses");

        self.write_lock()?.replace_all(decoded.expenses);
        Ok(decoded.skipped)
    }

    /// Rewrite the backing file from the current store
    pub fn save(&self) -> ExpenseResult<()> {
        let store = self.read_lock()?;
        self.persist(&store)
    }

    /// Apply a mutation, persist it, then commit it
    ///
    /// If `mutate` fails or the write fails, neither memory nor disk changes.
    pub fn mutate<T, F>(&self, mutate: F) -> ExpenseResult<T>
    where
        F: FnOnce(&mut ExpenseStore) -> ExpenseResult<T>,
    {
        let mut store = self.write_lock()?;
        let mut staged = store.clone();

        let out = mutate(&mut staged)?;
        self.persist(&staged)?;

        *store = staged;
        Ok(out)
    }

    /// Prepend an expense and persist
    pub fn insert_front(&self, expense: Expense) -> ExpenseResult<()> {
        self.mutate(|store| {
            store.insert_front(expense);
            Ok(())
        })
    }

    /// Remove the expense at a storage position and persist
    pub fn remove_at(&self, position: usize) -> ExpenseResult<Expense> {
        self.mutate(|store| store.remove_at(position))
    }

    /// Snapshot of all expenses in storage order
    pub fn get_all(&self) -> ExpenseResult<Vec<Expense>> {
        Ok(self.read_lock()?.list_all().to_vec())
    }

    /// Expense at a storage position
    pub fn get(&self, position: usize) -> ExpenseResult<Option<Expense>> {
        Ok(self.read_lock()?.get(position).cloned())
    }

    /// Sum of all amounts
    pub fn total(&self) -> ExpenseResult<Money> {
        Ok(self.read_lock()?.total())
    }

    /// Count expenses
    pub fn count(&self) -> ExpenseResult<usize> {
        Ok(self.read_lock()?.len())
    }

    fn persist(&self, store: &ExpenseStore) -> ExpenseResult<()> {
        write_atomic(&self.path, |w| codec::encode_file(w, store.list_all()))?;
        debug!(path = %self.path.display(), count = store.len(), "persisted expenses");
        Ok(())
    }

    fn read_lock(&self) -> ExpenseResult<RwLockReadGuard<'_, ExpenseStore>> {
        self.store
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write_lock(&self) -> ExpenseResult<RwLockWriteGuard<'_, ExpenseStore>> {
        self.store
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.csv");
        let repo = ExpenseRepository::new(path);
        (temp_dir, repo)
    }

    fn expense(cents: i64, note: &str) -> Expense {
        Expense::new(
            Money::from_cents(cents),
            "Food",
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            note,
        )
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let (_temp_dir, repo) = create_test_repo();
        assert_eq!(repo.load().unwrap(), 0);
        assert_eq!(repo.count().unwrap(), 0);
        assert!(!repo.path().exists());
    }

    #[test]
    fn test_insert_persists_immediately() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let e = expense(1250, "lunch");
        repo.insert_front(e.clone()).unwrap();

        let text = fs::read_to_string(repo.path()).unwrap();
        assert!(text.starts_with("id,amount,category,date,note\n"));
        assert!(text.contains(&e.id.to_full_string()));
    }

    #[test]
    fn test_save_and_reload_keeps_order() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let a = expense(100, "A");
        let b = expense(200, "B");
        let c = expense(300, "C");
        repo.insert_front(a.clone()).unwrap();
        repo.insert_front(b.clone()).unwrap();
        repo.insert_front(c.clone()).unwrap();

        let repo2 = ExpenseRepository::new(temp_dir.path().join("expenses.csv"));
        repo2.load().unwrap();

        assert_eq!(repo2.get_all().unwrap(), vec![c, b, a]);
    }

    #[test]
    fn test_order_stable_across_restarts() {
        let (temp_dir, repo) = create_test_repo();
        let path = temp_dir.path().join("expenses.csv");
        repo.load().unwrap();
        let a = expense(100, "A");
        let b = expense(200, "B");
        repo.insert_front(a.clone()).unwrap();
        repo.insert_front(b.clone()).unwrap();

        // Each restart loads the file and writes it back after one change
        let second = ExpenseRepository::new(path.clone());
        second.load().unwrap();
        let c = expense(300, "C");
        second.insert_front(c.clone()).unwrap();

        let third = ExpenseRepository::new(path.clone());
        third.load().unwrap();
        assert_eq!(third.get_all().unwrap(), vec![c.clone(), b.clone(), a.clone()]);
        third.save().unwrap();

        let fourth = ExpenseRepository::new(path.clone());
        fourth.load().unwrap();
        assert_eq!(fourth.get_all().unwrap(), vec![c, b, a]);

        // Newest record is the physically last line
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.lines().last().unwrap().ends_with(",C"));
    }

    #[test]
    fn test_load_skips_bad_lines() {
        let (_temp_dir, repo) = create_test_repo();
        let good = expense(1000, "ok");
        fs::write(
            repo.path(),
            format!(
                "id,amount,category,date,note\n{}\n{},abc,Food,2025-01-15,\n",
                codec::encode_expense(&good),
                good.id.to_full_string()
            ),
        )
        .unwrap();

        assert_eq!(repo.load().unwrap(), 1);
        assert_eq!(repo.get_all().unwrap(), vec![good]);
    }

    #[test]
    fn test_unreadable_file_is_an_error() {
        let (_temp_dir, repo) = create_test_repo();
        fs::write(repo.path(), [0xff, 0xfe, 0xfd]).unwrap();

        assert!(repo.load().is_err());
    }

    #[test]
    fn test_remove_out_of_range_leaves_file_untouched() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        repo.insert_front(expense(100, "only")).unwrap();
        let before = fs::read_to_string(repo.path()).unwrap();

        let err = repo.remove_at(1).unwrap_err();
        assert!(err.is_out_of_range());
        assert_eq!(repo.count().unwrap(), 1);
        assert_eq!(fs::read_to_string(repo.path()).unwrap(), before);
    }

    #[test]
    fn test_failed_persist_rolls_back_memory() {
        let temp_dir = TempDir::new().unwrap();
        // A regular file where the parent directory should be
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let repo = ExpenseRepository::new(blocker.join("expenses.csv"));
        repo.load().unwrap_or_default();

        assert!(repo.insert_front(expense(100, "lost")).is_err());
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_total() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        repo.insert_front(expense(1000, "")).unwrap();
        repo.insert_front(expense(2050, "")).unwrap();
        repo.insert_front(expense(0, "")).unwrap();

        assert_eq!(repo.total().unwrap().to_fixed(), "30.50");
    }
}
