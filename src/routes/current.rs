use axum::{routing::get, Json, Router};
use tracing::info;

use super::{AppState, QueryParams};
use crate::generate;
use crate::models::Reading;
use crate::ApiError;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/api/aqi/current", get(handler))
}

async fn handler(params: QueryParams) -> Result<Json<Reading>, ApiError> {
    // ---
    let coords = params.coordinates()?;
    let reading = generate::current_reading(&coords, &mut rand::thread_rng());

    info!(
        "GET /api/aqi/current lat={} lon={} -> aqi {}",
        coords.latitude, coords.longitude, reading.aqi
    );
    Ok(Json(reading))
}
