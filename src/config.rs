//! Configuration loader for the `bharatvayu-aqi` backend service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). Nothing else in the crate calls `env::var` for
//! application settings.
//!
use std::env;
use std::net::{IpAddr, SocketAddr};

use anyhow::{anyhow, Result};

/// Parse an optional integer environment variable with a default value.
macro_rules! parse_env_u32 {
    ($lookup:expr, $var_name:expr, $default:expr) => {
        $lookup($var_name)
            .map(|v| v.parse::<u32>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Read an optional string environment variable with a default value.
macro_rules! env_or {
    ($lookup:expr, $var_name:expr, $default:expr) => {
        $lookup($var_name).unwrap_or_else(|| $default.to_string())
    };
}

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";

/// Hard ceiling for `MAX_FORECAST_DAYS`, about ten years of daily points.
pub const FORECAST_DAYS_CEILING: u32 = 3660;

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Address the HTTP listener binds to.
    pub bind_addr: IpAddr,

    /// Port the HTTP listener binds to.
    pub port: u16,

    /// Largest `days` value accepted by the forecast endpoint.
    pub max_forecast_days: u32,

    /// API key for the generative language service. `None` disables it.
    pub gemini_api_key: Option<String>,

    /// Model id used for advisories and chat.
    pub gemini_model: String,

    /// Base URL of the generative language REST API.
    pub gemini_api_url: String,

    /// Timeout for a single outbound model request, in seconds.
    pub advisor_timeout_secs: u32,
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `BIND_ADDR` – listen address (default: `0.0.0.0`)
/// - `PORT` – listen port (default: 3000)
/// - `MAX_FORECAST_DAYS` – upper bound for the forecast `days` param (default: 366,
///   at most [`FORECAST_DAYS_CEILING`])
/// - `GEMINI_API_KEY` – enables the live advisor when set and non-empty
/// - `GEMINI_MODEL` – model id (default: `gemini-3-flash-preview`)
/// - `GEMINI_API_URL` – API base URL
/// - `ADVISOR_TIMEOUT_SECS` – outbound request timeout (default: 10)
///
/// Returns an error if any variable is present but invalid.
pub fn load_from_env() -> Result<Config> {
    load_from(|name| env::var(name).ok())
}

/// Build a [`Config`] from any variable lookup; `load_from_env` passes the
/// process environment.
fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
    // ---
    let bind_addr = env_or!(lookup, "BIND_ADDR", "0.0.0.0")
        .parse::<IpAddr>()
        .map_err(|e| anyhow!("Invalid BIND_ADDR: {}", e))?;
    let port = u16::try_from(parse_env_u32!(lookup, "PORT", 3000))
        .map_err(|e| anyhow!("Invalid PORT: {}", e))?;
    let max_forecast_days = parse_env_u32!(lookup, "MAX_FORECAST_DAYS", 366);
    if max_forecast_days > FORECAST_DAYS_CEILING {
        return Err(anyhow!(
            "Invalid MAX_FORECAST_DAYS: {} exceeds {}",
            max_forecast_days,
            FORECAST_DAYS_CEILING
        ));
    }
    let advisor_timeout_secs = parse_env_u32!(lookup, "ADVISOR_TIMEOUT_SECS", 10);

    let gemini_api_key = lookup("GEMINI_API_KEY").filter(|k| !k.trim().is_empty());
    let gemini_model = env_or!(lookup, "GEMINI_MODEL", DEFAULT_GEMINI_MODEL);
    let gemini_api_url = env_or!(lookup, "GEMINI_API_URL", DEFAULT_GEMINI_API_URL);

    Ok(Config {
        bind_addr,
        port,
        max_forecast_days,
        gemini_api_key,
        gemini_model,
        gemini_api_url,
        advisor_timeout_secs,
    })
}

impl Config {
    /// Socket address the server should listen on.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    /// Log the loaded configuration for debugging purposes.
    ///
    /// The API key is masked; only its last four characters are shown.
    pub fn log_config(&self) {
        // ---
        let masked_key = match &self.gemini_api_key {
            Some(key) => mask_secret(key),
            None => "<unset, using fallback advisories>".to_string(),
        };

        tracing::info!("Configuration loaded:");
        tracing::info!("  LISTEN_ADDR          : {}", self.listen_addr());
        tracing::info!("  MAX_FORECAST_DAYS    : {}", self.max_forecast_days);
        tracing::info!("  GEMINI_API_KEY       : {}", masked_key);
        tracing::info!("  GEMINI_MODEL         : {}", self.gemini_model);
        tracing::info!("  GEMINI_API_URL       : {}", self.gemini_api_url);
        tracing::info!("  ADVISOR_TIMEOUT_SECS : {}", self.advisor_timeout_secs);
    }
}

fn mask_secret(secret: &str) -> String {
    // ---
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}
