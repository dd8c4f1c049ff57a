//! Liveness endpoint.
//!
//! The response is fixed: it reports the server as healthy whenever the
//! process can answer HTTP, independent of any backing state.

use axum::{Json, Router, routing::get};
use serde::Serialize;

/// Body returned by `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub server: String,
}

impl Health {
    pub fn healthy(server: impl Into<String>) -> Self {
        Self {
            status: "healthy",
            server: server.into(),
        }
    }
}

/// Router answering `GET /health` for the named server.
pub fn route(server: impl Into<String>) -> Router {
    let health = Health::healthy(server);
    Router::new().route(
        "/health",
        get(move || {
            let health = health.clone();
            async move { Json(health) }
        }),
    )
}
