//! HTTP layer - router, handlers, and the serve/drain lifecycle
//!
//! Axum server with:
//! - Request tracing and permissive CORS on /api
//! - PATCH synthesized from GET + PUT via JSON merge patch
//! - Deadline-bounded graceful shutdown on cancellation

pub mod error;
pub mod patch;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{run_server, ServeError, ServerConfig};
