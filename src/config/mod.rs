//! Configuration module for the expense tracker
//!
//! - Path resolution (base directory, backing file, logs)
//! - User settings persistence
//! - Diagnostic logging setup

pub mod logging;
pub mod paths;
pub mod settings;

pub use paths::ExpensePaths;
pub use settings::Settings;
