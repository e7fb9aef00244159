//! # Storage Traits
//!
//! The persistence seam used by the domain layer. The domain only hands over
//! an [`ExpenseFilter`] (owner, resolved date range, raw category) and gets
//! records back; how the filter is applied is up to the implementation.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::Expense;
use crate::domain::period::DateRange;

/// Filter for listing a user's expenses.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseFilter {
    pub user_id: String,
    pub range: DateRange,
    /// Matched by exact equality; a value outside the category set matches nothing
    pub category: Option<String>,
}

impl ExpenseFilter {
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            range: DateRange::unbounded(),
            category: None,
        }
    }
}

#[async_trait]
pub trait ExpenseStorage: Send + Sync {
    /// Store a new expense
    async fn store_expense(&self, expense: &Expense) -> Result<()>;

    /// Retrieve an expense by ID regardless of owner
    async fn get_expense(&self, expense_id: &str) -> Result<Option<Expense>>;

    /// List expenses matching the filter, most recent date first
    async fn list_expenses(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>>;

    /// Overwrite the mutable fields of an existing expense
    async fn update_expense(&self, expense: &Expense) -> Result<()>;

    /// Returns true if the expense was found and deleted
    async fn delete_expense(&self, expense_id: &str) -> Result<bool>;

    /// Sum of amounts per category name within the range, ordered by category
    async fn totals_by_category(&self, user_id: &str, range: &DateRange) -> Result<Vec<(String, f64)>>;
}
