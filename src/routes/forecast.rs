use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use tracing::{debug, info};

use super::{AppState, QueryParams};
use crate::generate::{self, DEFAULT_FORECAST_DAYS};
use crate::models::ForecastPoint;
use crate::ApiError;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/api/aqi/forecast", get(handler))
}

/// Handle `GET /api/aqi/forecast`. `days` counts today and defaults to 7.
async fn handler(
    State((_, config)): State<AppState>,
    params: QueryParams,
) -> Result<Json<Vec<ForecastPoint>>, ApiError> {
    // ---
    let coords = params.coordinates()?;
    let days = parse_days(params.first("days"), config.max_forecast_days)?;
    debug!("GET /api/aqi/forecast - {} days", days);

    let today = Utc::now().date_naive();
    let points = generate::forecast(&coords, days, today, &mut rand::thread_rng());

    info!(
        "GET /api/aqi/forecast lat={} lon={} -> {} points from {}",
        coords.latitude,
        coords.longitude,
        points.len(),
        today
    );
    Ok(Json(points))
}

/// Absent or blank means the default. Anything else must be a whole number
/// between 0 and `max`.
fn parse_days(raw: Option<&str>, max: u32) -> Result<u32, ApiError> {
    // ---
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(DEFAULT_FORECAST_DAYS),
        Some(value) => value
            .parse::<u32>()
            .ok()
            .filter(|days| *days <= max)
            .ok_or_else(|| ApiError::InvalidRequest("Invalid days".to_string())),
    }
}
