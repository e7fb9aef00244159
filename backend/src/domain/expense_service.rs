//! Expense use cases: validation, category and date checks, period
//! resolution and ownership checks in front of the storage layer.

use chrono::{DateTime, SubsecRound, Utc};
use shared::{
    CategoryTotal, CreateExpenseRequest, ExpenseListQuery, ExpenseResponse, ExpenseSummaryResponse,
    UpdateExpenseRequest,
};
use std::sync::Arc;
use tracing::{info, warn, Span};

use crate::domain::errors::ExpenseError;
use crate::domain::models::{Category, Expense};
use crate::domain::period::{parse_date, Clock, FilterSpec, PeriodResolver};
use crate::domain::validation::Validator;
use crate::io::rest::mappers::ExpenseMapper;
use crate::storage::{ExpenseFilter, ExpenseStorage};

fn parse_category(value: &str) -> Result<Category, ExpenseError> {
    value
        .parse::<Category>()
        .map_err(|_| ExpenseError::InvalidCategory(value.to_string()))
}

fn parse_expense_date(value: &str) -> Result<DateTime<Utc>, ExpenseError> {
    parse_date(value).ok_or_else(|| ExpenseError::InvalidDate(value.to_string()))
}

#[derive(Clone)]
pub struct ExpenseService {
    storage: Arc<dyn ExpenseStorage>,
    validator: Validator,
    clock: Arc<dyn Clock>,
    resolver: PeriodResolver,
    span: Span,
}

impl ExpenseService {
    /// `span` is the parent of every event the service logs.
    pub fn new(storage: Arc<dyn ExpenseStorage>, clock: Arc<dyn Clock>, span: Span) -> Self {
        Self {
            storage,
            validator: Validator::new(),
            resolver: PeriodResolver::new(clock.clone()),
            clock,
            span,
        }
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.now().trunc_subsecs(0)
    }

    pub async fn create_expense(
        &self,
        user_id: &str,
        request: CreateExpenseRequest,
    ) -> Result<ExpenseResponse, ExpenseError> {
        if let Err(errors) = self.validator.validate(&request) {
            info!(parent: &self.span, user_id, %errors, "Rejected create request");
            return Err(errors.into());
        }

        let category = parse_category(&request.category)?;
        let date = parse_expense_date(&request.date)?;
        let now = self.now();

        let expense = Expense {
            id: Expense::generate_id(),
            user_id: user_id.to_string(),
            amount: request.amount,
            category,
            description: request.description,
            date,
            created_at: now,
            updated_at: now,
        };

        self.storage.store_expense(&expense).await?;
        info!(parent: &self.span, user_id, expense_id = %expense.id, "Created expense");

        Ok(ExpenseMapper::to_dto(expense))
    }

    pub async fn list_expenses(
        &self,
        user_id: &str,
        query: &ExpenseListQuery,
    ) -> Result<Vec<ExpenseResponse>, ExpenseError> {
        let spec = FilterSpec::from(query);
        let filter = ExpenseFilter {
            range: self.resolver.resolve(&spec),
            category: spec.category,
            ..ExpenseFilter::for_user(user_id)
        };

        let expenses = self.storage.list_expenses(&filter).await?;
        info!(
            parent: &self.span,
            user_id,
            count = expenses.len(),
            unbounded = filter.range.is_unbounded(),
            "Listed expenses"
        );

        Ok(expenses.into_iter().map(ExpenseMapper::to_dto).collect())
    }

    pub async fn get_expense(&self, user_id: &str, expense_id: &str) -> Result<ExpenseResponse, ExpenseError> {
        let expense = self.find_owned(user_id, expense_id).await?;
        Ok(ExpenseMapper::to_dto(expense))
    }

    /// Apply the fields present in `request`.
    pub async fn update_expense(
        &self,
        user_id: &str,
        expense_id: &str,
        request: UpdateExpenseRequest,
    ) -> Result<ExpenseResponse, ExpenseError> {
        if let Err(errors) = self.validator.validate(&request) {
            info!(parent: &self.span, user_id, %errors, "Rejected update request");
            return Err(errors.into());
        }

        let mut expense = self.find_owned(user_id, expense_id).await?;

        if let Some(amount) = request.amount {
            expense.amount = amount;
        }
        if let Some(category) = &request.category {
            expense.category = parse_category(category)?;
        }
        if let Some(description) = request.description {
            expense.description = description;
        }
        if let Some(date) = &request.date {
            expense.date = parse_expense_date(date)?;
        }
        expense.updated_at = self.now();

        self.storage.update_expense(&expense).await?;
        info!(parent: &self.span, user_id, expense_id, "Updated expense");

        Ok(ExpenseMapper::to_dto(expense))
    }

    pub async fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<(), ExpenseError> {
        self.find_owned(user_id, expense_id).await?;

        if !self.storage.delete_expense(expense_id).await? {
            return Err(ExpenseError::NotFound);
        }
        info!(parent: &self.span, user_id, expense_id, "Deleted expense");
        Ok(())
    }

    /// Per-category totals over the resolved period. A category filter narrows
    /// the totals to that one category.
    pub async fn summarize(
        &self,
        user_id: &str,
        query: &ExpenseListQuery,
    ) -> Result<ExpenseSummaryResponse, ExpenseError> {
        let spec = FilterSpec::from(query);
        let range = self.resolver.resolve(&spec);

        let totals: Vec<CategoryTotal> = self
            .storage
            .totals_by_category(user_id, &range)
            .await?
            .into_iter()
            .filter(|(category, _)| spec.category.as_ref().map_or(true, |wanted| wanted == category))
            .map(|(category, total)| CategoryTotal { category, total })
            .collect();
        let grand_total = totals.iter().map(|t| t.total).sum();

        Ok(ExpenseSummaryResponse {
            start_date: range.start.map(ExpenseMapper::format_instant),
            end_date: range.end.map(ExpenseMapper::format_instant),
            totals,
            grand_total,
        })
    }

    pub fn categories(&self) -> Vec<String> {
        Category::ALL.iter().map(|c| c.to_string()).collect()
    }

    async fn find_owned(&self, user_id: &str, expense_id: &str) -> Result<Expense, ExpenseError> {
        let expense = self
            .storage
            .get_expense(expense_id)
            .await?
            .ok_or(ExpenseError::NotFound)?;

        if !expense.is_owned_by(user_id) {
            warn!(parent: &self.span, user_id, expense_id, "Expense belongs to another user");
            return Err(ExpenseError::Unauthorized);
        }
        Ok(expense)
    }
}
