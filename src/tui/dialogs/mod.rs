//! Dialog modules for the TUI
//!
//! Contains modal dialogs for adding, exporting and confirming

pub mod confirm;
pub mod expense;
pub mod export;
pub mod help;
pub mod note;
