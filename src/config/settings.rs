//! User settings for the expense tracker
//!
//! Manages user preferences such as the currency symbol, the category
//! suggestion list and the logging level.

use serde::{Deserialize, Serialize};

use super::paths::ExpensePaths;
use crate::error::ExpenseError;
use crate::models::category::default_categories;

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol shown in front of amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Category suggestions, first one is the default for new expenses
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    /// File name proposed when exporting
    #[serde(default = "default_export_file")]
    pub default_export_file: String,

    /// Log level for diagnostics (overridden by `RUST_LOG`)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Ask before deleting an expense
    #[serde(default = "default_confirm_delete")]
    pub confirm_delete: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_export_file() -> String {
    "expenses-export.csv".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_confirm_delete() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            categories: default_categories(),
            default_export_file: default_export_file(),
            log_level: default_log_level(),
            confirm_delete: default_confirm_delete(),
        }
    }
}

impl Settings {
    /// Category preselected for new expenses
    pub fn default_category(&self) -> &str {
        self.categories
            .first()
            .map(String::as_str)
            .unwrap_or("Other")
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                ExpenseError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ExpenseError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            ExpenseError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        crate::storage::file_io::write_text_atomic(paths.settings_file(), &contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "₹");
        assert_eq!(settings.categories.len(), 8);
        assert_eq!(settings.default_category(), "Food");
        assert_eq!(settings.default_export_file, "expenses-export.csv");
        assert!(settings.confirm_delete);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.currency_symbol = "$".to_string();
        settings.categories = vec!["Rent".to_string(), "Coffee".to_string()];

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "$");
        assert_eq!(loaded.default_category(), "Rent");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"currency_symbol": "€"}"#).unwrap();
        assert_eq!(settings.currency_symbol, "€");
        assert_eq!(settings.categories[0], "Food");
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn test_empty_category_list_falls_back() {
        let mut settings = Settings::default();
        settings.categories.clear();
        assert_eq!(settings.default_category(), "Other");
    }

    #[test]
    fn test_invalid_settings_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, ExpenseError::Config(_)));
    }
}
