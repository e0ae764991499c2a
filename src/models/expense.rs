//! Expense model
//!
//! A single expense entry: how much, on what, when, and an optional note.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;
use super::money::Money;

/// Date format used everywhere an expense date is written or read
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's local date as YYYY-MM-DD
pub fn today() -> String {
    chrono::Local::now().date_naive().format(DATE_FORMAT).to_string()
}

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// Amount spent
    pub amount: Money,

    /// Category label (free text)
    pub category: String,

    /// Day the expense happened
    pub date: NaiveDate,

    /// Free-form note, possibly empty
    #[serde(default)]
    pub note: String,
}

impl Expense {
    /// Create a new expense with a freshly generated ID
    pub fn new(
        amount: Money,
        category: impl Into<String>,
        date: NaiveDate,
        note: impl Into<String>,
    ) -> Self {
        Self::with_id(ExpenseId::new(), amount, category, date, note)
    }

    /// Rebuild an expense that already has an identity (e.g. read from disk)
    pub fn with_id(
        id: ExpenseId,
        amount: Money,
        category: impl Into<String>,
        date: NaiveDate,
        note: impl Into<String>,
    ) -> Self {
        Self {
            id,
            amount,
            category: category.into(),
            date,
            note: note.into(),
        }
    }

    /// Validate the expense as user input
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.amount.is_negative() {
            return Err(ExpenseValidationError::NegativeAmount);
        }
        Ok(())
    }

    /// Date formatted as YYYY-MM-DD
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date_string(),
            self.category,
            self.amount
        )?;
        if !self.note.is_empty() {
            write!(f, " ({})", self.note)?;
        }
        Ok(())
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NegativeAmount,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount => write!(f, "Amount cannot be negative"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
