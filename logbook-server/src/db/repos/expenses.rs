//! Expense repository

use sqlx::PgPool;

use super::DbError;
use crate::models::{Expense, NewExpense};

const EXPENSE_COLUMNS: &str = "id, name, user_id, city_id, kind, cost, date";

pub struct ExpenseRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ExpenseRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List expenses, newest first, optionally narrowed to a user or city.
    pub async fn list(
        &self,
        user_id: Option<i32>,
        city_id: Option<i32>,
    ) -> Result<Vec<Expense>, DbError> {
        let expenses = sqlx::query_as::<_, Expense>(&format!(
            r#"
            SELECT {EXPENSE_COLUMNS}
            FROM expenses
            WHERE ($1::int IS NULL OR user_id = $1)
              AND ($2::int IS NULL OR city_id = $2)
            ORDER BY date DESC
            "#
        ))
        .bind(user_id)
        .bind(city_id)
        .fetch_all(self.pool)
        .await?;
        Ok(expenses)
    }

    pub async fn get(&self, id: i64) -> Result<Expense, DbError> {
        sqlx::query_as::<_, Expense>(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "expense",
            id: id.to_string(),
        })
    }

    pub async fn create(&self, expense: &NewExpense) -> Result<Expense, DbError> {
        let expense = sqlx::query_as::<_, Expense>(&format!(
            r#"
            INSERT INTO expenses (name, user_id, city_id, kind, cost, date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {EXPENSE_COLUMNS}
            "#
        ))
        .bind(&expense.name)
        .bind(expense.user_id)
        .bind(expense.city_id)
        .bind(expense.kind.as_str())
        .bind(expense.cost)
        .bind(expense.date)
        .fetch_one(self.pool)
        .await?;
        Ok(expense)
    }

    /// Full replace. Missing row maps to NotFound instead of a silent no-op.
    pub async fn update(&self, id: i64, expense: &NewExpense) -> Result<Expense, DbError> {
        sqlx::query_as::<_, Expense>(&format!(
            r#"
            UPDATE expenses
            SET name = $2, user_id = $3, city_id = $4, kind = $5, cost = $6, date = $7
            WHERE id = $1
            RETURNING {EXPENSE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&expense.name)
        .bind(expense.user_id)
        .bind(expense.city_id)
        .bind(expense.kind.as_str())
        .bind(expense.cost)
        .bind(expense.date)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "expense",
            id: id.to_string(),
        })
    }

    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "expense",
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
