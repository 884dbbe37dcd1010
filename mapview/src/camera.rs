#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::Serialize;

use crate::consts::PITCH_MIN_DEG;
use crate::prefs::{LightPreset, Preferences};

/// Declarative camera inputs handed to the map renderer on every update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapCameraProps {
    /// Camera tilt in degrees.
    pub pitch: f64,
    /// Whether the camera should keep recentering on the user.
    pub follow_user_location: bool,
    pub style_url: &'static str,
    /// Lighting preset; only present for the standard style.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light_preset: Option<LightPreset>,
    /// Whether the pitch knob is shown at all.
    pub slider_visible: bool,
}

impl MapCameraProps {
    /// Combine the live pitch and follow flag with the current preferences.
    /// With 3D off the camera is held flat and the slider is hidden.
    #[must_use]
    pub fn compose(pitch: f64, following: bool, prefs: &Preferences) -> Self {
        Self {
            pitch: if prefs.is_3d_enabled { pitch } else { PITCH_MIN_DEG },
            follow_user_location: following,
            style_url: prefs.style_url(),
            light_preset: prefs.lighting_enabled().then_some(prefs.light_preset),
            slider_visible: prefs.is_3d_enabled,
        }
    }
}

/// Imperative camera control exposed by the mapping SDK.
///
/// Only the pitch slider drives this handle (see
/// [`crate::screen::MapScreen::attach_camera`]); declarative props stay the
/// source of truth.
pub trait CameraHandle {
    fn set_pitch(&mut self, pitch: f64);
}
