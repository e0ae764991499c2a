//! In-memory expense store
//!
//! Holds the authoritative ordered sequence of expenses. New entries go to the
//! front; the order carries no other meaning and is never changed by sorting
//! for display.

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, Money};

/// Ordered collection of expenses, newest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseStore {
    expenses: Vec<Expense>,
}

impl ExpenseStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given sequence verbatim
    pub fn from_expenses(expenses: Vec<Expense>) -> Self {
        Self { expenses }
    }

    /// Prepend an expense
    pub fn insert_front(&mut self, expense: Expense) {
        self.expenses.insert(0, expense);
    }

    /// Remove the expense at a storage position
    ///
    /// Positions refer to the stored order, not to any sorted display order.
    pub fn remove_at(&mut self, position: usize) -> ExpenseResult<Expense> {
        if position >= self.expenses.len() {
            return Err(ExpenseError::OutOfRange {
                position,
                len: self.expenses.len(),
            });
        }
        Ok(self.expenses.remove(position))
    }

    /// Discard the current contents and install `expenses` as-is
    pub fn replace_all(&mut self, expenses: Vec<Expense>) {
        self.expenses = expenses;
    }

    /// The full ordered sequence
    pub fn list_all(&self) -> &[Expense] {
        &self.expenses
    }

    /// Get the expense at a storage position
    pub fn get(&self, position: usize) -> Option<&Expense> {
        self.expenses.get(position)
    }

    /// Exact sum of all amounts, zero when empty
    pub fn total(&self) -> Money {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// Number of stored expenses
    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }
}
