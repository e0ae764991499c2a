//! Path management for the expense tracker
//!
//! ## Path Resolution Order
//!
//! 1. `EXPENSE_TRACKER_DATA_DIR` environment variable (if set)
//! 2. The platform data directory (`~/.local/share/expense-tracker`,
//!    `~/Library/Application Support/expense-tracker`, `%APPDATA%\expense-tracker`)
//!
//! The backing CSV file can additionally be pointed anywhere with
//! [`ExpensePaths::with_data_file`].

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::ExpenseError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "EXPENSE_TRACKER_DATA_DIR";

/// Manages all paths used by the expense tracker
#[derive(Debug, Clone)]
pub struct ExpensePaths {
    /// Base directory for settings, logs and (by default) the data file
    base_dir: PathBuf,
    /// Explicit location of the backing CSV file
    data_file: Option<PathBuf>,
}

impl ExpensePaths {
    /// Resolve paths from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home/data directory can be determined.
    pub fn new() -> Result<Self, ExpenseError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self {
            base_dir,
            data_file: None,
        })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            data_file: None,
        }
    }

    /// Use a specific CSV file instead of `<base>/expenses.csv`
    pub fn with_data_file(mut self, data_file: PathBuf) -> Self {
        self.data_file = Some(data_file);
        self
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// The backing CSV file
    pub fn expenses_file(&self) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(|| self.base_dir.join("expenses.csv"))
    }

    /// The backing CSV file as an absolute path, for display
    pub fn expenses_file_display(&self) -> PathBuf {
        let file = self.expenses_file();
        std::path::absolute(&file).unwrap_or(file)
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to the diagnostic log used while the TUI owns the terminal
    pub fn log_file(&self) -> PathBuf {
        self.base_dir.join("expense.log")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), ExpenseError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| ExpenseError::Io(format!("Failed to create base directory: {}", e)))
    }
}

/// Resolve the default base directory for this platform
fn resolve_default_path() -> Result<PathBuf, ExpenseError> {
    ProjectDirs::from("", "", "expense-tracker")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| ExpenseError::Config("Could not determine a data directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.expenses_file(), temp_dir.path().join("expenses.csv"));
    }

    #[test]
    fn test_data_file_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom = temp_dir.path().join("elsewhere").join("mine.csv");
        let paths =
            ExpensePaths::with_base_dir(temp_dir.path().to_path_buf()).with_data_file(custom.clone());

        assert_eq!(paths.expenses_file(), custom);
        // Everything else stays under the base directory
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.audit_log(), temp_dir.path().join("audit.log"));
        assert_eq!(paths.log_file(), temp_dir.path().join("expense.log"));
    }

    #[test]
    fn test_display_path_is_absolute() {
        let paths = ExpensePaths::with_base_dir(PathBuf::from("relative-base"));
        assert!(paths.expenses_file_display().is_absolute());
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("nested").join("base");
        let paths = ExpensePaths::with_base_dir(base.clone());

        paths.ensure_directories().unwrap();
        assert!(base.exists());
    }
}
