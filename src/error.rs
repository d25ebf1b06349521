//! Error type returned by the HTTP handlers.
//!
//! There is a single client-facing failure: a request that is missing or
//! carries an unusable parameter. It renders as `400` with an `{error}` body.

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use serde::Serialize;
use thiserror::Error;

// ---

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Both coordinates are required on every generator endpoint.
    pub fn missing_coordinates() -> Self {
        ApiError::InvalidRequest("Missing lat/lon".to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // ---
        let status = match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_missing_coordinates_message() {
        // ---
        let err = ApiError::missing_coordinates();
        assert_eq!(err.to_string(), "Missing lat/lon");
    }

    #[test]
    fn test_invalid_request_is_bad_request() {
        // ---
        let response = ApiError::InvalidRequest("Invalid days".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
