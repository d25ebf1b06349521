use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tracing::trace;

use super::{base_aqi, clamp_round, unit};
use crate::models::{Aqi, Coordinates, SegmentKind, TimelinePoint, TimelineReport};

// ---

const HISTORICAL_HOURS: i64 = 24;
const FORECAST_HOURS: i64 = 24;

/// Generate the 48h report around `now`.
///
/// All 49 points scatter independently (±20) around one shared baseline, so
/// neighbouring hours are not correlated with each other. The forecast
/// segment starts at `now` itself and runs through `now + 24h`.
pub fn timeline<R: Rng + ?Sized>(
    coords: &Coordinates,
    now: DateTime<Utc>,
    rng: &mut R,
) -> TimelineReport {
    // ---
    trace!(?coords, %now, "generating 48h timeline");

    let current = base_aqi(rng);

    let mut historical = Vec::with_capacity(HISTORICAL_HOURS as usize);
    for i in (1..=HISTORICAL_HOURS).rev() {
        historical.push(TimelinePoint {
            time: now - Duration::hours(i),
            aqi: scatter(current, rng),
            kind: SegmentKind::Historical,
        });
    }

    let mut forecast = Vec::with_capacity(FORECAST_HOURS as usize + 1);
    for i in 0..=FORECAST_HOURS {
        forecast.push(TimelinePoint {
            time: now + Duration::hours(i),
            aqi: scatter(current, rng),
            kind: SegmentKind::Forecast,
        });
    }

    TimelineReport {
        historical,
        forecast,
    }
}

fn scatter<R: Rng + ?Sized>(current: f64, rng: &mut R) -> Aqi {
    clamp_round(current + (unit(rng) - 0.5) * 40.0, 10.0, 500.0)
}
