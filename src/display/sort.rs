//! Sorted views over the store
//!
//! Sorting is purely presentational: a `TableView` computes a display order as
//! a list of storage positions and never reorders the store itself. Any row
//! the user picks by its displayed index is mapped back to its storage
//! position before a delete.

use std::cmp::Ordering;
use std::fmt;

use clap::ValueEnum;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Expense;

/// Column a table can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortColumn {
    Date,
    Category,
    Note,
    Amount,
}

impl SortColumn {
    fn compare(self, a: &Expense, b: &Expense) -> Ordering {
        match self {
            SortColumn::Date => a.date.cmp(&b.date),
            SortColumn::Category => compare_text(&a.category, &b.category),
            SortColumn::Note => compare_text(&a.note, &b.note),
            SortColumn::Amount => a.amount.cmp(&b.amount),
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortColumn::Date => write!(f, "Date"),
            SortColumn::Category => write!(f, "Category"),
            SortColumn::Note => write!(f, "Note"),
            SortColumn::Amount => write!(f, "Amount"),
        }
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Arrow shown next to the sorted column header
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Display order for a table of expenses
///
/// With no sort column the display order is the storage order (newest first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableView {
    column: Option<SortColumn>,
    direction: SortDirection,
}

impl TableView {
    /// A view in storage order
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// A view sorted by `column`
    pub fn sorted(column: SortColumn, direction: SortDirection) -> Self {
        Self {
            column: Some(column),
            direction,
        }
    }

    /// Build from CLI flags
    pub fn from_options(column: Option<SortColumn>, descending: bool) -> Self {
        Self {
            column,
            direction: if descending {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            },
        }
    }

    pub fn column(&self) -> Option<SortColumn> {
        self.column
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Storage positions in display order
    ///
    /// The sort is stable: rows that compare equal keep their storage order,
    /// in either direction.
    pub fn order(&self, expenses: &[Expense]) -> Vec<usize> {
        let mut positions: Vec<usize> = (0..expenses.len()).collect();

        match (self.column, self.direction) {
            (None, SortDirection::Ascending) => {}
            (None, SortDirection::Descending) => positions.reverse(),
            (Some(column), SortDirection::Ascending) => {
                positions.sort_by(|&a, &b| column.compare(&expenses[a], &expenses[b]))
            }
            (Some(column), SortDirection::Descending) => {
                positions.sort_by(|&a, &b| column.compare(&expenses[b], &expenses[a]))
            }
        }

        positions
    }

    /// Expenses in display order, each paired with its storage position
    pub fn rows<'a>(&self, expenses: &'a [Expense]) -> Vec<(usize, &'a Expense)> {
        self.order(expenses)
            .into_iter()
            .map(|position| (position, &expenses[position]))
            .collect()
    }

    /// Map a zero-based display index to a storage position
    pub fn storage_position(&self, expenses: &[Expense], display_index: usize) -> ExpenseResult<usize> {
        self.order(expenses)
            .get(display_index)
            .copied()
            .ok_or_else(|| ExpenseError::row_not_found((display_index + 1).to_string()))
    }

    /// Advance to the next sort column: none, Date, Category, Note, Amount, none
    pub fn cycle_column(&mut self) {
        self.column = match self.column {
            None => Some(SortColumn::Date),
            Some(SortColumn::Date) => Some(SortColumn::Category),
            Some(SortColumn::Category) => Some(SortColumn::Note),
            Some(SortColumn::Note) => Some(SortColumn::Amount),
            Some(SortColumn::Amount) => None,
        };
    }

    /// Flip the sort direction
    pub fn reverse(&mut self) {
        self.direction = self.direction.reversed();
    }

    /// Short description, e.g. "Amount ▼" or "newest first"
    pub fn describe(&self) -> String {
        match (self.column, self.direction) {
            (None, SortDirection::Ascending) => "newest first".to_string(),
            (None, SortDirection::Descending) => "oldest first".to_string(),
            (Some(column), direction) => format!("{} {}", column, direction.arrow()),
        }
    }
}
