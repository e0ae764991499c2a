//! Terminal User Interface module
//!
//! An interactive expense table built on ratatui, with dialogs for adding,
//! deleting, reading notes and exporting.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub use app::App;
pub use terminal::run_tui;
