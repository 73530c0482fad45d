//! Guarded initialization of the shared database connection pool
//!
//! Uses sqlx PgPool with an explicit connection ceiling. The pool is built
//! at most once per process; every request task clones the same handle.

use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;
use tokio::sync::Mutex;

use logbook_config::{Config, DatabaseConfig};

/// Ceiling for concurrent pool connections. PostgreSQL ships with
/// `max_connections = 100`; staying below it leaves headroom for
/// administrative and maintenance sessions.
const POOL_MAX_CONNECTIONS: u32 = 90;

/// Error raised while establishing the shared pool.
///
/// Each variant names the startup stage that failed. None of them is
/// retried here; the caller decides whether to call [`ConnectionGuard::acquire`]
/// again or abort.
#[derive(Debug, thiserror::Error)]
pub enum DbInitError {
    #[error("failed to open database connection")]
    Connect(#[source] sqlx::Error),

    #[error("database liveness check failed")]
    Liveness(#[source] sqlx::Error),

    #[error("schema reconciliation failed")]
    SchemaSync(#[source] sqlx::Error),
}

/// Serializes construction of the process-wide connection pool.
///
/// Concurrent callers block on the internal lock; only one runs the
/// open/verify/reconcile sequence at a time. A successful sequence stores
/// the pool, and every later call returns a clone of the same handle. A
/// failed sequence stores nothing, so the next call re-attempts from
/// scratch - errors are never cached.
#[derive(Debug, Default)]
pub struct ConnectionGuard {
    pool: Mutex<Option<PgPool>>,
}

impl ConnectionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the shared connection pool, creating it on first call.
    ///
    /// The open sequence is: connect with the configured coordinates and
    /// the sizing ceiling, verify liveness with an explicit round trip,
    /// then reconcile the schema. Any failure aborts the sequence and
    /// leaves the guard empty.
    pub async fn acquire(&self, config: &Config) -> Result<PgPool, DbInitError> {
        let mut slot = self.pool.lock().await;

        if let Some(pool) = slot.as_ref() {
            return Ok(pool.clone());
        }

        let options = connect_options(&config.database).map_err(DbInitError::Connect)?;
        let pool = PgPoolOptions::new()
            .max_connections(POOL_MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .map_err(DbInitError::Connect)?;

        // Explicit round trip before trusting the pool
        sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .map_err(DbInitError::Liveness)?;

        super::schema::reconcile(&pool)
            .await
            .map_err(DbInitError::SchemaSync)?;

        *slot = Some(pool.clone());
        Ok(pool)
    }
}

/// Map config fields onto sqlx connect options.
///
/// sqlx only parses URL-form DSNs, so the libpq keyword/value string from
/// [`Config::conn_string`] is not used here; both are built from the same
/// fields. A malformed ssl-mode surfaces as a connection error.
fn connect_options(db: &DatabaseConfig) -> Result<PgConnectOptions, sqlx::Error> {
    let ssl_mode = PgSslMode::from_str(&db.ssl_mode)?;

    let mut options = PgConnectOptions::new()
        .host(&db.host)
        .port(db.port)
        .database(&db.name)
        .ssl_mode(ssl_mode);

    if !db.user.is_empty() {
        options = options.username(&db.user);
    }

    if !db.password.is_empty() {
        options = options.password(&db.password);
    }

    Ok(options)
}
