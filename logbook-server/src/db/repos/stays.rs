//! Stay repository

use sqlx::PgPool;

use super::DbError;
use crate::models::{NewStay, Stay};

pub struct StayRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> StayRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List stays, most recent start first, optionally for a single user.
    pub async fn list(&self, user_id: Option<i32>) -> Result<Vec<Stay>, DbError> {
        let stays = sqlx::query_as::<_, Stay>(
            r#"
            SELECT user_id, city_id, status, start_date, end_date
            FROM user_cities
            WHERE ($1::int IS NULL OR user_id = $1)
            ORDER BY start_date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;
        Ok(stays)
    }

    pub async fn create(&self, stay: &NewStay) -> Result<Stay, DbError> {
        let stay = sqlx::query_as::<_, Stay>(
            r#"
            INSERT INTO user_cities (user_id, city_id, status, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING user_id, city_id, status, start_date, end_date
            "#,
        )
        .bind(stay.user_id)
        .bind(stay.city_id)
        .bind(stay.status.as_str())
        .bind(stay.start_date)
        .bind(stay.end_date)
        .fetch_one(self.pool)
        .await?;
        Ok(stay)
    }
}

#[cfg(test)]
mod tests {
    // Integration tests require a real database.
    // Run with: PGHOST=... cargo test -p logbook-server -- --ignored
}
