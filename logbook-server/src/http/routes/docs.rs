//! API documentation endpoint
//!
//! Serves a JSON catalog of the exposed endpoints so clients can discover
//! the surface without external tooling.

use axum::{routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
pub struct ApiDocs {
    pub name: &'static str,
    pub version: &'static str,
    pub endpoints: Vec<EndpointDoc>,
}

#[derive(Serialize)]
pub struct EndpointDoc {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

fn endpoint(method: &'static str, path: &'static str, description: &'static str) -> EndpointDoc {
    EndpointDoc {
        method,
        path,
        description,
    }
}

/// GET /docs
async fn docs() -> Json<ApiDocs> {
    Json(ApiDocs {
        name: "logbook",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: vec![
            endpoint("GET", "/health", "service health"),
            endpoint("GET", "/api/cities", "list cities"),
            endpoint("POST", "/api/cities", "create a city"),
            endpoint("GET", "/api/cities/{id}", "get a city"),
            endpoint("PUT", "/api/cities/{id}", "replace a city"),
            endpoint("PATCH", "/api/cities/{id}", "merge-patch a city"),
            endpoint("DELETE", "/api/cities/{id}", "delete a city"),
            endpoint("GET", "/api/expenses", "list expenses (filter: user_id, city_id)"),
            endpoint("POST", "/api/expenses", "create an expense"),
            endpoint("GET", "/api/expenses/{id}", "get an expense"),
            endpoint("PUT", "/api/expenses/{id}", "replace an expense"),
            endpoint("PATCH", "/api/expenses/{id}", "merge-patch an expense"),
            endpoint("DELETE", "/api/expenses/{id}", "delete an expense"),
            endpoint("GET", "/api/stays", "list stays (filter: user_id)"),
            endpoint("POST", "/api/stays", "record a stay"),
        ],
    })
}

/// Documentation routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/docs", get(docs))
}
