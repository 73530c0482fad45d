//! Repository implementations for database access
//!
//! Repositories borrow the shared pool per call; the pool itself parcels
//! out connections, so no extra locking happens here.

pub mod cities;
pub mod expenses;
pub mod stays;

pub use cities::CityRepo;
pub use expenses::ExpenseRepo;
pub use stays::StayRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}
