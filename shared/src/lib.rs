use serde::{Deserialize, Serialize};

/// Body of `POST /api/expenses`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    /// Amount spent, must be greater than zero
    #[serde(default)]
    pub amount: f64,
    /// One of the fixed expense categories (see `GET /api/categories`)
    #[serde(default)]
    pub category: String,
    /// Free text, at most 500 characters
    #[serde(default)]
    pub description: String,
    /// Calendar date of the expense (YYYY-MM-DD)
    #[serde(default)]
    pub date: String,
}

/// Body of `PUT /api/expenses/:id`
///
/// Every field is optional; only the fields present in the request are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateExpenseRequest {
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub description: Option<String>,
    /// Calendar date of the expense (YYYY-MM-DD)
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseResponse {
    pub id: String,
    pub amount: f64,
    pub category: String,
    pub description: String,
    /// RFC 3339 timestamp (midnight UTC of the expense date)
    pub date: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Query parameters of `GET /api/expenses` and `GET /api/expenses/summary`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseListQuery {
    /// week, month, threeMonths (or 3months), custom
    #[serde(default)]
    pub period: String,
    /// Used with period=custom (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// Used with period=custom (YYYY-MM-DD)
    pub end_date: Option<String>,
    /// Exact category match; unknown values match nothing
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSummaryResponse {
    /// Start of the summarized window (RFC 3339), absent when unbounded
    pub start_date: Option<String>,
    /// End of the summarized window (RFC 3339), absent when unbounded
    pub end_date: Option<String>,
    pub totals: Vec<CategoryTotal>,
    pub grand_total: f64,
}

/// One rejected field of a request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub error: String,
}

/// Error body returned for every non-2xx response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldError>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_missing_fields_default_to_empty() {
        let request: CreateExpenseRequest = serde_json::from_str(r#"{"amount": 12.5}"#).unwrap();

        assert_eq!(request.amount, 12.5);
        assert_eq!(request.category, "");
        assert_eq!(request.description, "");
        assert_eq!(request.date, "");
    }

    #[test]
    fn test_update_request_absent_fields_are_none() {
        let request: UpdateExpenseRequest =
            serde_json::from_str(r#"{"description": "lunch"}"#).unwrap();

        assert_eq!(request.amount, None);
        assert_eq!(request.description, Some("lunch".to_string()));
    }

    #[test]
    fn test_error_response_omits_empty_details() {
        let body = serde_json::to_value(ErrorResponse::new("expense not found")).unwrap();

        assert_eq!(body, serde_json::json!({ "error": "expense not found" }));
    }

    #[test]
    fn test_error_response_field_errors_shape() {
        let body = ErrorResponse {
            error: "amount: amount is required".to_string(),
            details: vec![FieldError {
                field: "amount".to_string(),
                error: "amount is required".to_string(),
            }],
        };

        let value = serde_json::to_value(body).unwrap();
        assert_eq!(value["details"][0]["field"], "amount");
        assert_eq!(value["details"][0]["error"], "amount is required");
    }
}
