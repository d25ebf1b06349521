//! Route gateway.
//!
//! Each sibling module owns one endpoint family and exports a sub-router;
//! this module merges them, attaches CORS, and supplies the shared state.
//! `main.rs` only ever sees [`router`].

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::advisor::SharedModel;
use crate::models::Coordinates;
use crate::{ApiError, Config};

mod advisory;
mod chat;
mod cities;
mod current;
mod forecast;
mod health;
mod report;

// ---

/// State shared by every handler: the advisor model and the config snapshot.
pub type AppState = (SharedModel, Config);

pub fn router(model: SharedModel, config: Config) -> Router {
    // ---
    Router::new()
        .merge(current::router())
        .merge(forecast::router())
        .merge(report::router())
        .merge(cities::router())
        .merge(advisory::router())
        .merge(chat::router())
        .merge(health::router())
        .layer(CorsLayer::permissive())
        .with_state((model, config))
}

/// Query-string pairs in arrival order.
///
/// A repeated key keeps its first value. A query string that cannot be decoded
/// is rejected as `InvalidRequest`, so clients always get the JSON error body.
#[derive(Debug, Default)]
struct QueryParams(Vec<(String, String)>);

impl<S: Send + Sync> FromRequestParts<S> for QueryParams {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // ---
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::InvalidRequest(e.body_text()))?;
        Ok(QueryParams(pairs))
    }
}

impl QueryParams {
    fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// `lat`/`lon`, both required.
    fn coordinates(&self) -> Result<Coordinates, ApiError> {
        Coordinates::from_query(self.first("lat"), self.first("lon"))
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        QueryParams(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_repeated_key_keeps_first_value() {
        // ---
        let q = params(&[("lat", "28.6"), ("lat", "28.7"), ("lon", "77.2")]);
        assert_eq!(q.first("lat"), Some("28.6"));
        assert_eq!(
            q.coordinates(),
            Ok(Coordinates {
                latitude: 28.6,
                longitude: 77.2
            })
        );
    }

    #[test]
    fn test_missing_key() {
        // ---
        let q = params(&[("lat", "28.6")]);
        assert_eq!(q.first("lon"), None);
        assert_eq!(q.coordinates(), Err(ApiError::missing_coordinates()));
        assert_eq!(QueryParams::default().first("lat"), None);
    }

    #[test]
    fn test_extractor_decodes_query_string() {
        // ---
        let (mut parts, _) = axum::http::Request::builder()
            .uri("/api/aqi/current?lat=28.6&lat=1&lon=77%2E2&city=New+Delhi")
            .body(())
            .unwrap()
            .into_parts();
        let q = tokio_test::block_on(QueryParams::from_request_parts(&mut parts, &())).unwrap();

        assert_eq!(q.first("lat"), Some("28.6"));
        assert_eq!(q.first("lon"), Some("77.2"));
        assert_eq!(q.first("city"), Some("New Delhi"));
    }
}
