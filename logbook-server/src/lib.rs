//! logbook-server: HTTP backend for travel expense tracking
//!
//! Owns the two pieces of process machinery the binary builds on:
//! the guarded connection-pool initializer ([`db::ConnectionGuard`]) and
//! the serve/drain lifecycle ([`http::run_server`]). Everything else is
//! plain CRUD over the `cities`, `expenses`, and `user_cities` tables.

pub mod db;
pub mod http;
pub mod models;

pub use db::{ConnectionGuard, DbInitError};
pub use http::{run_server, ServeError, ServerConfig};
