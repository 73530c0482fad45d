//! Schema reconciliation for the expense tables
//!
//! All statements are idempotent, so reconciliation can run on every
//! startup. It is invoked by the connection guard after the liveness
//! check, as its own attributable step.

use sqlx::PgPool;

/// Apply pending structural changes to the backing schema.
pub async fn reconcile(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("reconciling database schema");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS cities (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            country TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS expenses (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            user_id INTEGER NOT NULL,
            city_id INTEGER NOT NULL REFERENCES cities(id),
            kind TEXT NOT NULL,
            cost DOUBLE PRECISION NOT NULL,
            date TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS user_cities (
            user_id INTEGER NOT NULL,
            city_id INTEGER NOT NULL REFERENCES cities(id),
            status TEXT NOT NULL DEFAULT 'planned',
            start_date TIMESTAMPTZ NOT NULL,
            end_date TIMESTAMPTZ,
            PRIMARY KEY (user_id, city_id, start_date)
        )
        "#,
    )
    .execute(pool)
    .await?;

    create_indexes(pool).await?;

    tracing::info!("schema reconciliation complete");
    Ok(())
}

async fn create_indexes(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_expenses_user ON expenses(user_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_expenses_city ON expenses(city_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date DESC)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_user_cities_user ON user_cities(user_id)")
        .execute(pool)
        .await?;

    Ok(())
}
