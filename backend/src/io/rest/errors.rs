//! Translation of domain errors into HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use shared::ErrorResponse;

use crate::domain::ExpenseError;
use crate::io::rest::mappers::ExpenseMapper;

impl IntoResponse for ExpenseError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ExpenseError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: errors.to_string(),
                    details: ExpenseMapper::to_field_errors(errors),
                },
            ),
            ExpenseError::InvalidCategory(_) | ExpenseError::InvalidDate(_) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::new(self.to_string()))
            }
            ExpenseError::NotFound => (StatusCode::NOT_FOUND, ErrorResponse::new(self.to_string())),
            ExpenseError::Unauthorized => (StatusCode::FORBIDDEN, ErrorResponse::new(self.to_string())),
            // storage details stay in the logs
            ExpenseError::Storage(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("internal server error"),
            ),
        };
        (status, Json(body)).into_response()
    }
}

/// Rejection for requests without a caller identity
#[derive(Debug)]
pub struct MissingUserId;

impl IntoResponse for MissingUserId {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("missing X-User-Id header")),
        )
            .into_response()
    }
}
