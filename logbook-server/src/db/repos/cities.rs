//! City repository

use sqlx::PgPool;

use super::DbError;
use crate::models::{City, NewCity};

pub struct CityRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CityRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<City>, DbError> {
        let cities = sqlx::query_as::<_, City>("SELECT id, name, country FROM cities ORDER BY name")
            .fetch_all(self.pool)
            .await?;
        Ok(cities)
    }

    pub async fn get(&self, id: i32) -> Result<City, DbError> {
        sqlx::query_as::<_, City>("SELECT id, name, country FROM cities WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "city",
                id: id.to_string(),
            })
    }

    pub async fn create(&self, city: &NewCity) -> Result<City, DbError> {
        let city = sqlx::query_as::<_, City>(
            "INSERT INTO cities (name, country) VALUES ($1, $2) RETURNING id, name, country",
        )
        .bind(&city.name)
        .bind(&city.country)
        .fetch_one(self.pool)
        .await?;
        Ok(city)
    }

    /// Full replace. Missing row maps to NotFound instead of a silent no-op.
    pub async fn update(&self, id: i32, city: &NewCity) -> Result<City, DbError> {
        sqlx::query_as::<_, City>(
            "UPDATE cities SET name = $2, country = $3 WHERE id = $1 RETURNING id, name, country",
        )
        .bind(id)
        .bind(&city.name)
        .bind(&city.country)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "city",
            id: id.to_string(),
        })
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM cities WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "city",
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    // Integration tests require a real database.
    // Run with: PGHOST=... cargo test -p logbook-server -- --ignored
}
