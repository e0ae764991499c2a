//! Diagnostic logging setup
//!
//! Installs a `tracing` subscriber. The level comes from `RUST_LOG` when set,
//! otherwise from the `log_level` setting. The TUI owns the terminal, so in
//! that mode logs go to a file instead of stderr.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use super::settings::Settings;
use crate::error::ExpenseError;

/// Where diagnostic output goes
#[derive(Debug, Clone)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Build the filter for this application's crates
pub fn build_filter(settings: &Settings) -> Result<EnvFilter, ExpenseError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(format!(
        "expense_tracker={level},expense={level}",
        level = settings.log_level
    ))
    .map_err(|e| ExpenseError::Config(format!("Invalid log level '{}': {}", settings.log_level, e)))
}

/// Install the global subscriber
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_logging(settings: &Settings, target: LogTarget) -> Result<(), ExpenseError> {
    let filter = build_filter(settings)?;

    let installed = match target {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| {
                    ExpenseError::Io(format!("Failed to open log file {}: {}", path.display(), e))
                })?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    if installed.is_err() {
        tracing::debug!("logging already initialised");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_is_config_error() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let mut settings = Settings::default();
        settings.log_level = "not a level!!".to_string();
        assert!(matches!(build_filter(&settings), Err(ExpenseError::Config(_))));
    }

    #[test]
    fn test_default_level_builds() {
        assert!(build_filter(&Settings::default()).is_ok());
    }
}
