use axum::{routing::get, Json, Router};
use tracing::info;

use super::{AppState, QueryParams};
use crate::generate;
use crate::models::City;
use crate::ApiError;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/api/aqi/cities", get(handler))
}

/// Handle `GET /api/aqi/cities`: every map city with a fresh AQI.
async fn handler(params: QueryParams) -> Result<Json<Vec<City>>, ApiError> {
    // ---
    let ranked = parse_ranked(params.first("ranked"))?;
    let mut cities = generate::city_readings(&mut rand::thread_rng());
    if ranked {
        cities = generate::rank(cities);
    }

    info!(
        "GET /api/aqi/cities ranked={} -> {} cities",
        ranked,
        cities.len()
    );
    Ok(Json(cities))
}

/// Sort worst to best instead of reference-list order. A bare `?ranked`
/// turns it on.
fn parse_ranked(raw: Option<&str>) -> Result<bool, ApiError> {
    // ---
    let Some(raw) = raw else {
        return Ok(false);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ApiError::InvalidRequest("Invalid ranked".to_string())),
    }
}
