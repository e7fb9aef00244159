//! # REST API for Categories and Health

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::AppState;

/// The fixed category set, in declaration order
pub async fn list_categories(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.expense_service.categories()))
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}
