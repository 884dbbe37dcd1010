//! Domain range, track extent, and value quantization.
//!
//! A [`DomainRange`] is the numeric interval the controlled parameter lives in
//! (e.g. pitch degrees); a [`TrackExtent`] is the physical travel of the knob.
//! Both are validated once at construction so the mapping code in
//! [`crate::slider`] never has to deal with a zero-width interval.

#[cfg(test)]
#[path = "range_test.rs"]
mod range_test;

use crate::consts::{PITCH_MAX_DEG, PITCH_MIN_DEG, TRACK_LENGTH_PX};

/// Invalid bounds supplied when building a range or a track.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    /// `min` must be strictly less than `max`, and both finite.
    #[error("invalid domain range: min {min} must be finite and less than max {max}")]
    InvalidRange { min: f64, max: f64 },
    /// Track length must be finite and greater than zero.
    #[error("invalid track length: {0} (must be finite and > 0)")]
    InvalidTrackLength(f64),
}

/// Immutable `[min, max]` bounds of the controlled parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainRange {
    min: f64,
    max: f64,
}

impl DomainRange {
    /// Build a range, rejecting empty, inverted, or non-finite bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidRange`] unless `min < max`.
    pub fn new(min: f64, max: f64) -> Result<Self, ConfigurationError> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(ConfigurationError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// The standard camera pitch range, `[0, 90]` degrees.
    #[must_use]
    pub fn pitch() -> Self {
        Self { min: PITCH_MIN_DEG, max: PITCH_MAX_DEG }
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Clamp `value` into the range. NaN collapses to `min`.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }
}

/// Immutable travel distance of the knob along its track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackExtent {
    length: f64,
}

impl TrackExtent {
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidTrackLength`] unless `length > 0`.
    pub fn new(length: f64) -> Result<Self, ConfigurationError> {
        if !length.is_finite() || length <= 0.0 {
            return Err(ConfigurationError::InvalidTrackLength(length));
        }
        Ok(Self { length })
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Clamp a knob offset onto the track. NaN collapses to the bottom.
    #[must_use]
    pub fn clamp(&self, position: f64) -> f64 {
        if position.is_nan() {
            return self.length;
        }
        position.clamp(0.0, self.length)
    }
}

impl Default for TrackExtent {
    fn default() -> Self {
        Self { length: TRACK_LENGTH_PX }
    }
}

/// Steps per unit below which float noise is discarded before rounding.
const TIE_SNAP: f64 = 1e9;

/// Round `value` to the nearest multiple of `step`, halves away from zero.
///
/// The scaled value is snapped to `1 / TIE_SNAP` first, so a half step that
/// picked up float error (e.g. through the position mapping) still counts as
/// a tie.
#[must_use]
pub fn round_to_step(value: f64, step: f64) -> f64 {
    if step <= 0.0 || !step.is_finite() {
        return value;
    }
    let scale = 1.0 / step;
    let scaled = ((value * scale) * TIE_SNAP).round() / TIE_SNAP;
    scaled.round() / scale
}

/// Label shown next to the pitch knob, e.g. `"45.0°"`.
#[must_use]
pub fn format_pitch_label(pitch: f64) -> String {
    // `+ 0.0` folds negative zero so the label never reads "-0.0°".
    let pitch = pitch + 0.0;
    format!("{pitch:.1}°")
}
