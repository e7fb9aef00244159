//! # Domain Module
//!
//! Business logic of the expense tracker.
//!
//! - **validation**: declarative per-field rules for request bodies
//! - **period**: turns a period token or explicit dates into a date range
//! - **models**: expense records and the closed category set
//! - **expense_service**: the expense use cases on top of storage
//!
//! The validation engine and the period resolver are pure: no I/O, no shared
//! mutable state and no logging. Only the service logs, through the span it
//! is constructed with.

pub mod errors;
pub mod expense_service;
pub mod models;
pub mod period;
pub mod validation;

pub use errors::ExpenseError;
pub use expense_service::ExpenseService;
