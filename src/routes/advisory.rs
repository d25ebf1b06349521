use axum::{extract::State, routing::get, Json, Router};
use tracing::{debug, info};

use super::{AppState, QueryParams};
use crate::advisor::{self, AdvisoryContext};
use crate::models::{Advisory, HealthCondition};
use crate::ApiError;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/api/advisory", get(handler))
}

/// Query parameters for the advisory endpoint
#[derive(Debug)]
struct AdvisoryQuery {
    aqi: Option<String>,
    /// Label shown to the user, e.g. the searched city.
    location: Option<String>,
    /// Health condition from the user's profile.
    condition: Option<String>,
}

impl AdvisoryQuery {
    fn from_params(params: &QueryParams) -> Self {
        let owned = |key: &str| params.first(key).map(str::to_string);
        AdvisoryQuery {
            aqi: owned("aqi"),
            location: owned("location"),
            condition: owned("condition"),
        }
    }

    fn context(self) -> Result<AdvisoryContext, ApiError> {
        // ---
        let aqi = match self.aqi.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            None => return Err(ApiError::InvalidRequest("Missing aqi".to_string())),
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|_| ApiError::InvalidRequest("Invalid aqi".to_string()))?,
        };

        // Unknown conditions are treated as none rather than rejected.
        let condition = match self.condition.as_deref() {
            None => HealthCondition::None,
            Some(raw) => raw.parse::<HealthCondition>().unwrap_or_else(|e| {
                debug!("Ignoring condition: {}", e);
                HealthCondition::None
            }),
        };

        Ok(AdvisoryContext {
            aqi,
            location: self.location,
            condition,
        })
    }
}

/// Handle `GET /api/advisory`. Always answers with an advisory once `aqi` is
/// present; model failures fall back to the static text.
async fn handler(
    State((model, _)): State<AppState>,
    params: QueryParams,
) -> Result<Json<Advisory>, ApiError> {
    // ---
    let ctx = AdvisoryQuery::from_params(&params).context()?;
    info!(
        "GET /api/advisory aqi={} location={:?} condition={:?}",
        ctx.aqi, ctx.location, ctx.condition
    );

    let advisory = advisor::advise(model.as_ref(), &ctx).await;
    Ok(Json(advisory))
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn query(aqi: Option<&str>, condition: Option<&str>) -> AdvisoryQuery {
        AdvisoryQuery {
            aqi: aqi.map(String::from),
            location: Some("Pune".to_string()),
            condition: condition.map(String::from),
        }
    }

    #[test]
    fn test_aqi_is_required() {
        // ---
        assert_eq!(
            query(None, None).context(),
            Err(ApiError::InvalidRequest("Missing aqi".to_string()))
        );
        assert_eq!(
            query(Some("high"), None).context(),
            Err(ApiError::InvalidRequest("Invalid aqi".to_string()))
        );
    }

    #[test]
    fn test_condition_parsing_is_lenient() {
        // ---
        let ctx = query(Some("120"), Some("heart")).context().unwrap();
        assert_eq!(ctx.condition, HealthCondition::Heart);
        assert_eq!(ctx.aqi, 120);

        let ctx = query(Some("120"), Some("flu")).context().unwrap();
        assert_eq!(ctx.condition, HealthCondition::None);
    }
}
