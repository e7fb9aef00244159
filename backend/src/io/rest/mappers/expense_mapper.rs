use chrono::{DateTime, SecondsFormat, Utc};
use shared::{ExpenseResponse, FieldError};

use crate::domain::models::Expense;
use crate::domain::validation::ValidationErrors;

pub struct ExpenseMapper;

impl ExpenseMapper {
    pub fn to_dto(domain: Expense) -> ExpenseResponse {
        ExpenseResponse {
            id: domain.id,
            amount: domain.amount,
            category: domain.category.to_string(),
            description: domain.description,
            date: Self::format_instant(domain.date),
            created_at: Self::format_instant(domain.created_at),
            updated_at: Self::format_instant(domain.updated_at),
        }
    }

    pub fn format_instant(instant: DateTime<Utc>) -> String {
        instant.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    pub fn to_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
        errors
            .iter()
            .map(|e| FieldError {
                field: e.field().to_string(),
                error: e.message().to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Category;
    use crate::domain::validation::ValidationError;
    use chrono::TimeZone;

    #[test]
    fn test_to_dto() {
        let created = Utc.with_ymd_and_hms(2024, 6, 15, 9, 30, 0).unwrap();
        let expense = Expense {
            id: "e1".to_string(),
            user_id: "alice".to_string(),
            amount: 19.99,
            category: Category::Clothing,
            description: "socks".to_string(),
            date: Utc.with_ymd_and_hms(2024, 6, 14, 0, 0, 0).unwrap(),
            created_at: created,
            updated_at: created,
        };

        let dto = ExpenseMapper::to_dto(expense);

        assert_eq!(dto.category, "clothing");
        assert_eq!(dto.date, "2024-06-14T00:00:00Z");
        assert_eq!(dto.created_at, "2024-06-15T09:30:00Z");
    }

    #[test]
    fn test_to_field_errors_keeps_order() {
        let errors = ValidationErrors::from_errors(vec![
            ValidationError::new("amount", "amount is required"),
            ValidationError::new("date", "date is required"),
        ])
        .unwrap();

        let fields = ExpenseMapper::to_field_errors(&errors);

        assert_eq!(fields[0].field, "amount");
        assert_eq!(fields[1].error, "date is required");
    }
}
