//! # REST API for Expenses
//!
//! CRUD endpoints plus the per-category summary.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::{CreateExpenseRequest, ExpenseListQuery, UpdateExpenseRequest};
use tracing::{error, info};

use crate::domain::ExpenseError;
use crate::io::rest::user::UserId;
use crate::AppState;

fn log_failure(state: &AppState, operation: &str, e: &ExpenseError) {
    match e {
        ExpenseError::Storage(_) => error!(parent: &state.span, "Failed to {}: {:?}", operation, e),
        _ => info!(parent: &state.span, "Failed to {}: {}", operation, e),
    }
}

/// List expenses with optional period and category filtering
pub async fn list_expenses(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Query(query): Query<ExpenseListQuery>,
) -> impl IntoResponse {
    info!(parent: &state.span, "GET /api/expenses - query: {:?}", query);

    match state.expense_service.list_expenses(&user_id, &query).await {
        Ok(expenses) => (StatusCode::OK, Json(expenses)).into_response(),
        Err(e) => {
            log_failure(&state, "list expenses", &e);
            e.into_response()
        }
    }
}

/// Create a new expense
pub async fn create_expense(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Json(request): Json<CreateExpenseRequest>,
) -> impl IntoResponse {
    info!(parent: &state.span, "POST /api/expenses - request: {:?}", request);

    match state.expense_service.create_expense(&user_id, request).await {
        Ok(expense) => (StatusCode::CREATED, Json(expense)).into_response(),
        Err(e) => {
            log_failure(&state, "create expense", &e);
            e.into_response()
        }
    }
}

/// Totals per category over the requested period
pub async fn summarize_expenses(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Query(query): Query<ExpenseListQuery>,
) -> impl IntoResponse {
    info!(parent: &state.span, "GET /api/expenses/summary - query: {:?}", query);

    match state.expense_service.summarize(&user_id, &query).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => {
            log_failure(&state, "summarize expenses", &e);
            e.into_response()
        }
    }
}

pub async fn get_expense(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(expense_id): Path<String>,
) -> impl IntoResponse {
    info!(parent: &state.span, "GET /api/expenses/{}", expense_id);

    match state.expense_service.get_expense(&user_id, &expense_id).await {
        Ok(expense) => (StatusCode::OK, Json(expense)).into_response(),
        Err(e) => {
            log_failure(&state, "get expense", &e);
            e.into_response()
        }
    }
}

/// Partially update an expense
pub async fn update_expense(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(expense_id): Path<String>,
    Json(request): Json<UpdateExpenseRequest>,
) -> impl IntoResponse {
    info!(parent: &state.span, "PUT /api/expenses/{} - request: {:?}", expense_id, request);

    match state.expense_service.update_expense(&user_id, &expense_id, request).await {
        Ok(expense) => (StatusCode::OK, Json(expense)).into_response(),
        Err(e) => {
            log_failure(&state, "update expense", &e);
            e.into_response()
        }
    }
}

pub async fn delete_expense(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(expense_id): Path<String>,
) -> impl IntoResponse {
    info!(parent: &state.span, "DELETE /api/expenses/{}", expense_id);

    match state.expense_service.delete_expense(&user_id, &expense_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            log_failure(&state, "delete expense", &e);
            e.into_response()
        }
    }
}
