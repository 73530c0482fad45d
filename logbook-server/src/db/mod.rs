//! Database layer - guarded connection pool, schema, and repositories
//!
//! # Design Principles
//!
//! - One shared pool per process, built once behind [`ConnectionGuard`]
//! - Schema reconciliation is a distinct startup step, not fused into connect
//! - Rely on DB constraints, handle conflicts - no check-then-insert

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{ConnectionGuard, DbInitError};
pub use repos::*;
