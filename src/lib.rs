//! Expense Tracker - terminal-based personal expense tracking
//!
//! Expenses live in an ordered in-memory store that is written back to a
//! plain CSV file after every change. The same store backs a command line
//! interface and an interactive ratatui table.
//!
//! # Architecture
//!
//! - `config`: Paths, settings and logging setup
//! - `error`: Custom error types
//! - `models`: Expense, money and category types
//! - `codec`: The CSV line and file format
//! - `storage`: The record store and its backing file
//! - `services`: Validation and the add/delete/total/export operations
//! - `audit`: Append-only history of changes
//! - `export`: CSV, JSON and YAML exports
//! - `display`: Sorting and table formatting
//! - `cli`: Command handlers
//! - `tui`: Interactive interface
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::config::{paths::ExpensePaths, settings::Settings};
//! use expense_tracker::services::{ExpenseDraft, ExpenseService};
//! use expense_tracker::storage::Storage;
//!
//! let paths = ExpensePaths::new()?;
//! let storage = Storage::new(paths)?;
//! storage.load_all()?;
//! ExpenseService::new(&storage)
//!     .add_record(ExpenseDraft::new("12.50", "Food", "2025-01-15", "lunch"))?;
//! ```

pub mod audit;
pub mod cli;
pub mod codec;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;
pub mod tui;

pub use error::{ExpenseError, ExpenseResult};
