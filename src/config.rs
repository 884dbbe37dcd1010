//! Runtime configuration parsed from environment variables.
//!
//! `main` loads a `.env` file first (if present), so everything here reads
//! plain process env.

use mapview::consts::{DEFAULT_PITCH_3D_DEG, TRACK_LENGTH_PX};

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env var {0}")]
    Missing(&'static str),
    #[error("invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

/// Hosted backend (identity + row storage) connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub base_url: String,
    pub anon_key: String,
    pub timeouts: Timeouts,
}

impl BackendConfig {
    /// Build typed backend config from environment variables.
    ///
    /// Required:
    /// - `TRAILGUIDE_BACKEND_URL`: project base URL (trailing `/` is dropped)
    /// - `TRAILGUIDE_ANON_KEY`: public API key sent as `apikey`
    ///
    /// Optional:
    /// - `TRAILGUIDE_REQUEST_TIMEOUT_SECS`: default 30
    /// - `TRAILGUIDE_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required var is missing or a URL is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = required("TRAILGUIDE_BACKEND_URL")?.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid { var: "TRAILGUIDE_BACKEND_URL", value: base_url });
        }
        let anon_key = required("TRAILGUIDE_ANON_KEY")?;
        let timeouts = Timeouts {
            request_secs: env_parse("TRAILGUIDE_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            connect_secs: env_parse("TRAILGUIDE_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
        };
        Ok(Self { base_url, anon_key, timeouts })
    }
}

/// Map screen settings.
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    /// Renderer access token. The renderer refuses to start without one.
    pub access_token: Option<String>,
    pub track_length_px: f64,
    pub initial_pitch: f64,
}

impl MapConfig {
    /// Optional:
    /// - `TRAILGUIDE_MAPBOX_TOKEN`
    /// - `TRAILGUIDE_TRACK_LENGTH_PX`: default 220
    /// - `TRAILGUIDE_INITIAL_PITCH`: default 45
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a numeric var does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let access_token = std::env::var("TRAILGUIDE_MAPBOX_TOKEN").ok().filter(|t| !t.trim().is_empty());
        Ok(Self {
            access_token,
            track_length_px: env_parse("TRAILGUIDE_TRACK_LENGTH_PX", TRACK_LENGTH_PX)?,
            initial_pitch: env_parse("TRAILGUIDE_INITIAL_PITCH", DEFAULT_PITCH_3D_DEG)?,
        })
    }
}

fn required(var: &'static str) -> Result<String, ConfigError> {
    match std::env::var(var) {
        Ok(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(ConfigError::Missing(var)),
    }
}

fn env_parse<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|_| ConfigError::Invalid { var, value: raw }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
