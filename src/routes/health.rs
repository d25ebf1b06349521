// src/routes/health.rs
//! API health check endpoint for the air quality backend.
//!
//! This module defines the `/api/health` route used by container
//! orchestrators and the dashboard's dev proxy to verify that the service is
//! running and able to respond to HTTP requests. It follows the same layout as
//! its siblings in `routes`:
//! - Internal to this file: endpoint handler(s) and related types
//! - Exports to the gateway (`mod.rs`): a subrouter containing the route

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// JSON response body for the `/api/health` endpoint.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Handle `GET /api/health`.
///
/// Returns a static JSON object. Does not touch the generators or the
/// external model.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Create a subrouter containing the `/api/health` route.
///
/// Generic over the application state so it merges cleanly with the gateway
/// router regardless of the state type.
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/api/health", get(health))
}
