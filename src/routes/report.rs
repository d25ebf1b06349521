use axum::{routing::get, Json, Router};
use chrono::Utc;
use tracing::info;

use super::{AppState, QueryParams};
use crate::generate;
use crate::models::TimelineReport;
use crate::ApiError;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/api/aqi/report24h", get(handler))
}

/// Handle `GET /api/aqi/report24h`: 24 historical and 25 forecast hours.
async fn handler(params: QueryParams) -> Result<Json<TimelineReport>, ApiError> {
    // ---
    let coords = params.coordinates()?;
    let report = generate::timeline(&coords, Utc::now(), &mut rand::thread_rng());

    info!(
        "GET /api/aqi/report24h lat={} lon={} -> {} + {} points",
        coords.latitude,
        coords.longitude,
        report.historical.len(),
        report.forecast.len()
    );
    Ok(Json(report))
}
