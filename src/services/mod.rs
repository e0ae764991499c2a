//! Service layer for the expense tracker
//!
//! The service layer provides business logic on top of the storage layer,
//! handling input validation and audit logging.

pub mod expense;

pub use expense::{parse_amount, parse_date, ExpenseDraft, ExpenseService};
