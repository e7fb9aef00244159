//! # Storage Module
//!
//! Persistence for expenses. The domain layer talks to the
//! [`ExpenseStorage`] trait; [`ExpenseRepository`] implements it on SQLite
//! through sqlx.

pub mod connection;
pub mod repositories;
pub mod traits;

pub use connection::DbConnection;
pub use repositories::ExpenseRepository;
pub use traits::{ExpenseFilter, ExpenseStorage};
