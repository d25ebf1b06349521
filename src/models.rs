//! Data models for the air quality API.
//!
//! Every value here is built fresh for a single response; nothing is stored.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

// ---

/// AQI values as reported to clients.
pub type Aqi = u16;

/// Latitude/longitude pair taken from the query string.
///
/// The generators accept coordinates but do not read them. Values that do not
/// parse as numbers are kept as `NaN` rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    // ---
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Build coordinates from raw query values. Absent or empty values are an
    /// `InvalidRequest`; a whitespace-only value counts as present.
    pub fn from_query(lat: Option<&str>, lon: Option<&str>) -> Result<Self, ApiError> {
        // ---
        fn present(v: Option<&str>) -> Option<&str> {
            v.filter(|s| !s.is_empty())
        }

        match (present(lat), present(lon)) {
            (Some(lat), Some(lon)) => Ok(Coordinates {
                latitude: lat.trim().parse().unwrap_or(f64::NAN),
                longitude: lon.trim().parse().unwrap_or(f64::NAN),
            }),
            _ => Err(ApiError::missing_coordinates()),
        }
    }
}

/// One synthesized snapshot of current air quality and weather.
///
/// Decimal fields are pre-formatted strings with one fractional digit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    // ---
    pub aqi: Aqi,
    pub pm25: String,
    pub pm10: String,
    pub no2: String,
    pub so2: String,
    pub co: String,
    pub o3: String,
    pub temp: String,
    pub humidity: u8,
    pub wind: String,
}

/// One day of the multi-day forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    // ---
    pub date: NaiveDate,
    pub aqi: Aqi,
    /// Not clamped; drops by five per day ahead and can leave `[0, 100]`.
    pub confidence: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKind {
    Historical,
    Forecast,
}

/// One hour of the 48h report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    // ---
    pub time: DateTime<Utc>,
    pub aqi: Aqi,
    #[serde(rename = "type")]
    pub kind: SegmentKind,
}

/// The 48h report: 24 past hours followed by the current hour and 24 ahead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineReport {
    // ---
    pub historical: Vec<TimelinePoint>,
    pub forecast: Vec<TimelinePoint>,
}

/// Fixed severity band a reference city belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Severe,
    Poor,
    Moderate,
    Good,
}

impl Tier {
    /// Baseline AQI the per-refresh perturbation is centred on.
    pub fn base_aqi(self) -> f64 {
        match self {
            Tier::Severe => 280.0,
            Tier::Poor => 160.0,
            Tier::Moderate => 90.0,
            Tier::Good => 45.0,
        }
    }
}

/// A reference city annotated with a freshly sampled AQI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct City {
    // ---
    pub name: &'static str,
    /// `[latitude, longitude]`
    pub coordinates: (f64, f64),
    pub aqi: Aqi,
}

/// Display band for an AQI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AqiCategory {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiCategory {
    pub fn from_aqi(aqi: i64) -> Self {
        match aqi {
            i64::MIN..=50 => AqiCategory::Good,
            51..=100 => AqiCategory::Moderate,
            101..=150 => AqiCategory::UnhealthyForSensitiveGroups,
            151..=200 => AqiCategory::Unhealthy,
            201..=300 => AqiCategory::VeryUnhealthy,
            _ => AqiCategory::Hazardous,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::VeryUnhealthy => "Very Unhealthy",
            AqiCategory::Hazardous => "Hazardous",
        }
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Health condition chosen on the client-side profile form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HealthCondition {
    #[default]
    None,
    Asthma,
    Heart,
    Elderly,
    Child,
}

impl HealthCondition {
    pub fn describe(self) -> &'static str {
        match self {
            HealthCondition::None => "none",
            HealthCondition::Asthma => "asthma / respiratory issues",
            HealthCondition::Heart => "heart condition",
            HealthCondition::Elderly => "elderly (65+)",
            HealthCondition::Child => "child (under 12)",
        }
    }
}

impl FromStr for HealthCondition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(HealthCondition::None),
            "asthma" => Ok(HealthCondition::Asthma),
            "heart" => Ok(HealthCondition::Heart),
            "elderly" => Ok(HealthCondition::Elderly),
            "child" => Ok(HealthCondition::Child),
            other => Err(format!("unknown health condition '{}'", other)),
        }
    }
}

/// Structured health advisory shown under the current reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    // ---
    pub level: String,
    pub general: String,
    pub vulnerable: String,
    pub patients: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    // ---
    pub role: ChatRole,
    pub text: String,
}
