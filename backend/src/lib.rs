//! # Expense Tracker Backend
//!
//! Request validation and filter resolution in front of a CRUD expense
//! store.
//!
//! ```text
//! IO Layer (axum handlers, error translation)
//!     ↓
//! Domain Layer (validation, period resolution, expense service)
//!     ↓
//! Storage Layer (SQLite via sqlx)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, Span};

use crate::config::Config;
use crate::domain::period::SystemClock;
use crate::domain::ExpenseService;
use crate::storage::{DbConnection, ExpenseRepository};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub expense_service: ExpenseService,
    /// Parent span of request logging
    pub span: Span,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &Config, span: Span) -> Result<AppState> {
    info!(parent: &span, "Setting up database at {}", config.database_url);
    let db_conn = DbConnection::new(&config.database_url, config.max_connections).await?;

    info!(parent: &span, "Setting up domain model");
    let expense_service = ExpenseService::new(
        Arc::new(ExpenseRepository::new(db_conn)),
        Arc::new(SystemClock),
        span.clone(),
    );

    Ok(AppState {
        expense_service,
        span,
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &Config) -> Result<Router> {
    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin '{}'", config.cors_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/expenses", get(io::list_expenses).post(io::create_expense))
        .route("/expenses/summary", get(io::summarize_expenses))
        .route(
            "/expenses/:id",
            get(io::get_expense).put(io::update_expense).delete(io::delete_expense),
        )
        .route("/categories", get(io::list_categories))
        .route("/health", get(io::health));

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state))
}
