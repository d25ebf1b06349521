use chrono::{Days, NaiveDate};
use rand::Rng;
use tracing::trace;

use super::{base_aqi, clamp_round, unit};
use crate::models::{Coordinates, ForecastPoint};

// ---

pub const DEFAULT_FORECAST_DAYS: u32 = 7;

/// Generate `days` forecast points starting at `today`.
///
/// The AQI follows a random walk with a mean step of -2 (the draw is shifted
/// by 0.4, not 0.5) clamped to `[10, 500]` after every step. Confidence starts
/// in `[95, 100]` and loses five points per day; it is never clamped.
///
/// The series stops early if a date would fall past [`NaiveDate::MAX`].
pub fn forecast<R: Rng + ?Sized>(
    coords: &Coordinates,
    days: u32,
    today: NaiveDate,
    rng: &mut R,
) -> Vec<ForecastPoint> {
    // ---
    trace!(?coords, days, %today, "generating forecast");

    let mut current = base_aqi(rng);
    let mut points = Vec::with_capacity(days.min(366) as usize);

    for i in 0..days {
        let Some(date) = today.checked_add_days(Days::new(u64::from(i))) else {
            break;
        };

        current += (unit(rng) - 0.4) * 20.0;
        current = current.clamp(10.0, 500.0);

        let confidence = (95.0 - f64::from(i) * 5.0 + unit(rng) * 5.0).round() as i64;

        points.push(ForecastPoint {
            date,
            aqi: clamp_round(current, 10.0, 500.0),
            confidence,
        });
    }

    points
}
