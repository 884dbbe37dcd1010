//! Map display preferences shared between the preferences screen and the map.
//!
//! SYSTEM CONTEXT
//! ==============
//! The preferences screen writes these values; the map screen reads them on
//! every props snapshot. Lighting presets only apply to the standard style, so
//! preset changes are dropped while a satellite style is active.

#[cfg(test)]
#[path = "prefs_test.rs"]
mod prefs_test;

use serde::{Deserialize, Serialize};

pub const STANDARD_STYLE_URL: &str = "mapbox://styles/mapbox/standard";
pub const SATELLITE_STYLE_URL: &str = "mapbox://styles/mapbox/satellite-v9";
pub const HYBRID_STYLE_URL: &str = "mapbox://styles/mapbox/satellite-streets-v12";

/// Base map style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapStyle {
    #[default]
    Standard,
    Satellite,
    /// Satellite imagery with street labels.
    Hybrid,
}

impl MapStyle {
    #[must_use]
    pub fn style_url(self) -> &'static str {
        match self {
            Self::Standard => STANDARD_STYLE_URL,
            Self::Satellite => SATELLITE_STYLE_URL,
            Self::Hybrid => HYBRID_STYLE_URL,
        }
    }

    /// Recover the style from a style URL. Unknown URLs count as standard.
    #[must_use]
    pub fn from_style_url(url: &str) -> Self {
        if url.contains("satellite-streets") {
            Self::Hybrid
        } else if url.contains("satellite") {
            Self::Satellite
        } else {
            Self::Standard
        }
    }

    /// User-facing name, the inverse of [`MapStyle::parse`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Satellite => "satellite",
            Self::Hybrid => "hybrid",
        }
    }

    /// Parse a user-facing name (`standard`, `satellite`, `hybrid`).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "standard" => Some(Self::Standard),
            "satellite" => Some(Self::Satellite),
            "hybrid" => Some(Self::Hybrid),
            _ => None,
        }
    }
}

/// Time-of-day lighting for the standard style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightPreset {
    #[default]
    Day,
    Dawn,
    Dusk,
    Night,
}

impl LightPreset {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Dawn => "dawn",
            Self::Dusk => "dusk",
            Self::Night => "night",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "day" => Some(Self::Day),
            "dawn" => Some(Self::Dawn),
            "dusk" => Some(Self::Dusk),
            "night" => Some(Self::Night),
            _ => None,
        }
    }
}

/// Preferences snapshot read by the map screen.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Preferences {
    pub map_style: MapStyle,
    pub light_preset: LightPreset,
    pub is_3d_enabled: bool,
}

impl Preferences {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn change_map_style(&mut self, style: MapStyle) {
        self.map_style = style;
    }

    /// Apply a light preset. Returns `false` (and changes nothing) while the
    /// active style has no lighting.
    pub fn change_light_preset(&mut self, preset: LightPreset) -> bool {
        if !self.lighting_enabled() {
            tracing::debug!(?preset, style = ?self.map_style, "light preset ignored for non-standard style");
            return false;
        }
        self.light_preset = preset;
        true
    }

    pub fn set_3d_enabled(&mut self, enabled: bool) {
        self.is_3d_enabled = enabled;
    }

    #[must_use]
    pub fn lighting_enabled(&self) -> bool {
        self.map_style == MapStyle::Standard
    }

    #[must_use]
    pub fn style_url(&self) -> &'static str {
        self.map_style.style_url()
    }
}
