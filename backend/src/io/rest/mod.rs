//! # REST API Interface Layer
//!
//! Axum handlers for the expense tracker. Handlers only extract input, call
//! the domain service and translate the outcome:
//!
//! - `201`/`200`/`204` on success
//! - `400` with `{error, details: [{field, error}]}` for rule violations
//! - `400` for unknown categories and unreadable dates
//! - `401` without an `X-User-Id` header, `403` for another user's expense
//! - `404` for unknown expenses, `500` for storage failures

pub mod category_apis;
pub mod errors;
pub mod expense_apis;
pub mod mappers;
pub mod user;

pub use category_apis::*;
pub use errors::MissingUserId;
pub use expense_apis::*;
pub use user::{UserId, USER_ID_HEADER};
