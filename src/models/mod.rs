//! Core data models for the expense tracker
//!
//! Expenses, their identifiers, and the money type used for amounts.

pub mod category;
pub mod expense;
pub mod ids;
pub mod money;

pub use category::{default_categories, DEFAULT_CATEGORIES};
pub use expense::{today, Expense, ExpenseValidationError, DATE_FORMAT};
pub use ids::ExpenseId;
pub use money::{Money, MoneyParseError};
