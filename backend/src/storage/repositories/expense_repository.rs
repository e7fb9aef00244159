use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};

use crate::domain::models::{Category, Expense};
use crate::domain::period::DateRange;
use crate::storage::connection::DbConnection;
use crate::storage::traits::{ExpenseFilter, ExpenseStorage};

/// Fixed-width UTC timestamps, so text order is chronological order
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const EXPENSE_COLUMNS: &str =
    "id, user_id, amount, category, description, date, created_at, updated_at";

fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.format(TIMESTAMP_FORMAT).to_string()
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map_err(|e| anyhow!("Invalid stored timestamp '{}': {}", value, e))?;
    Ok(naive.and_utc())
}

fn row_to_expense(row: &SqliteRow) -> Result<Expense> {
    let category: String = row.get("category");
    Ok(Expense {
        id: row.get("id"),
        user_id: row.get("user_id"),
        amount: row.get("amount"),
        category: category.parse::<Category>()?,
        description: row.get("description"),
        date: parse_timestamp(row.get("date"))?,
        created_at: parse_timestamp(row.get("created_at"))?,
        updated_at: parse_timestamp(row.get("updated_at"))?,
    })
}

fn push_range(builder: &mut QueryBuilder<'_, Sqlite>, range: &DateRange) {
    if let Some(start) = range.start {
        builder.push(" AND date >= ").push_bind(format_timestamp(start));
    }
    if let Some(end) = range.end {
        builder.push(" AND date <= ").push_bind(format_timestamp(end));
    }
}

/// SQLite-backed expense repository
#[derive(Clone)]
pub struct ExpenseRepository {
    db: DbConnection,
}

impl ExpenseRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ExpenseStorage for ExpenseRepository {
    async fn store_expense(&self, expense: &Expense) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO expenses (id, user_id, amount, category, description, date, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&expense.id)
        .bind(&expense.user_id)
        .bind(expense.amount)
        .bind(expense.category.as_str())
        .bind(&expense.description)
        .bind(format_timestamp(expense.date))
        .bind(format_timestamp(expense.created_at))
        .bind(format_timestamp(expense.updated_at))
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_expense(&self, expense_id: &str) -> Result<Option<Expense>> {
        let row = sqlx::query(&format!("SELECT {} FROM expenses WHERE id = ?", EXPENSE_COLUMNS))
            .bind(expense_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(row_to_expense).transpose()
    }

    async fn list_expenses(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>> {
        let mut builder = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {} FROM expenses WHERE user_id = ",
            EXPENSE_COLUMNS
        ));
        builder.push_bind(filter.user_id.clone());
        push_range(&mut builder, &filter.range);
        if let Some(category) = &filter.category {
            builder.push(" AND category = ").push_bind(category.clone());
        }
        builder.push(" ORDER BY date DESC, created_at DESC");

        let rows = builder.build().fetch_all(self.db.pool()).await?;
        rows.iter().map(row_to_expense).collect()
    }

    async fn update_expense(&self, expense: &Expense) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE expenses
            SET amount = ?, category = ?, description = ?, date = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(expense.amount)
        .bind(expense.category.as_str())
        .bind(&expense.description)
        .bind(format_timestamp(expense.date))
        .bind(format_timestamp(expense.updated_at))
        .bind(&expense.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete_expense(&self, expense_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(expense_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn totals_by_category(&self, user_id: &str, range: &DateRange) -> Result<Vec<(String, f64)>> {
        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT category, SUM(amount) AS total FROM expenses WHERE user_id = ",
        );
        builder.push_bind(user_id.to_string());
        push_range(&mut builder, range);
        builder.push(" GROUP BY category ORDER BY category");

        let rows = builder.build().fetch_all(self.db.pool()).await?;
        Ok(rows
            .iter()
            .map(|row| (row.get("category"), row.get("total")))
            .collect())
    }
}
