//! Synthetic air quality generators.
//!
//! Each generator takes the random source explicitly, and the clock where
//! timestamps are involved, so callers decide between `thread_rng()` in the
//! handlers and seeded or mock RNGs in tests. No generator keeps state
//! between calls.

use rand::Rng;

use crate::models::Aqi;

mod cities;
mod current;
mod forecast;
mod timeline;

pub use cities::{city_readings, rank};
pub use current::current_reading;
pub use forecast::{forecast, DEFAULT_FORECAST_DAYS};
pub use timeline::timeline;

// ---

/// A single `uniform[0, 1)` draw.
fn unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen::<f64>()
}

/// The baseline every generator starts from: `[50, 150)`.
fn base_aqi<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    50.0 + unit(rng) * 100.0
}

/// Round to the nearest integer AQI after clamping into `[min, max]`.
fn clamp_round(value: f64, min: f64, max: f64) -> Aqi {
    value.clamp(min, max).round() as Aqi
}

fn one_decimal(value: f64) -> String {
    format!("{:.1}", value)
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_clamp_round() {
        // ---
        assert_eq!(clamp_round(3.2, 10.0, 500.0), 10);
        assert_eq!(clamp_round(612.0, 10.0, 500.0), 500);
        assert_eq!(clamp_round(99.5, 10.0, 500.0), 100);
        assert_eq!(clamp_round(99.49, 10.0, 500.0), 99);
    }

    #[test]
    fn test_one_decimal() {
        // ---
        assert_eq!(one_decimal(40.0), "40.0");
        assert_eq!(one_decimal(2.5), "2.5");
        assert_eq!(one_decimal(27.46), "27.5");
    }
}
