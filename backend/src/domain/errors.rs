use crate::domain::validation::ValidationErrors;

/// Failures of the expense use cases
#[derive(Debug, thiserror::Error)]
pub enum ExpenseError {
    /// One or more request fields broke their declared rules
    #[error("{0}")]
    Validation(#[from] ValidationErrors),
    #[error("invalid category: {0}")]
    InvalidCategory(String),
    #[error("invalid date format: {0}")]
    InvalidDate(String),
    #[error("expense not found")]
    NotFound,
    #[error("unauthorized")]
    Unauthorized,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
