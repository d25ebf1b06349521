use rand::Rng;
use tracing::trace;

use super::{base_aqi, one_decimal, unit};
use crate::models::{Aqi, Coordinates, Reading};

// ---

/// Generate one current reading.
///
/// Every pollutant is a fixed fraction of the same base draw so the numbers
/// describe one underlying air quality state. Temperature, humidity and wind
/// are independent draws. `coords` does not influence the output.
pub fn current_reading<R: Rng + ?Sized>(coords: &Coordinates, rng: &mut R) -> Reading {
    // ---
    let base = base_aqi(rng);
    let temp = 20.0 + unit(rng) * 15.0;
    let humidity = (40.0 + unit(rng) * 40.0).round() as u8;
    let wind = 5.0 + unit(rng) * 15.0;

    trace!(?coords, base, "generated current reading");

    Reading {
        aqi: base.round() as Aqi,
        pm25: one_decimal(base * 0.4),
        pm10: one_decimal(base * 0.6),
        no2: one_decimal(base * 0.2),
        so2: one_decimal(base * 0.1),
        co: one_decimal(base * 0.05),
        o3: one_decimal(base * 0.3),
        temp: one_decimal(temp),
        humidity,
        wind: one_decimal(wind),
    }
}
