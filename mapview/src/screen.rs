//! Map screen core: gesture routing and props snapshots.
//!
//! DESIGN
//! ======
//! `MapScreen` lives exactly as long as the map screen instance; remounting
//! the screen means building a new one, which is also the only way follow mode
//! comes back on its own. The pitch value has a single writer (the slider)
//! and the follow flag has a single owner (the coordinator). The host reads
//! both through [`MapScreen::props`].

#[cfg(test)]
#[path = "screen_test.rs"]
mod screen_test;

use serde::Serialize;

use crate::camera::{CameraHandle, MapCameraProps};
use crate::consts::{DEFAULT_PITCH_3D_DEG, PITCH_MAX_DEG, PITCH_MIN_DEG, TRACK_LENGTH_PX};
use crate::follow::{FollowCoordinator, FollowMode};
use crate::prefs::Preferences;
use crate::range::{ConfigurationError, DomainRange, TrackExtent};
use crate::slider::PitchSlider;

/// Result of a gesture callback, for the host to act on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    None,
    /// The slider emitted a new pitch.
    PitchChanged { pitch: f64 },
    /// Follow mode changed.
    FollowChanged { following: bool },
    /// An overlapping slider grant was refused.
    Rejected,
}

/// Slider geometry for a screen instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderConfig {
    pub min_pitch: f64,
    pub max_pitch: f64,
    pub track_length: f64,
    pub initial_pitch: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min_pitch: PITCH_MIN_DEG,
            max_pitch: PITCH_MAX_DEG,
            track_length: TRACK_LENGTH_PX,
            initial_pitch: DEFAULT_PITCH_3D_DEG,
        }
    }
}

/// Interactive state of one map screen instance.
#[derive(Debug)]
pub struct MapScreen {
    slider: PitchSlider,
    follow: FollowCoordinator,
}

impl Default for MapScreen {
    fn default() -> Self {
        Self {
            slider: PitchSlider::with_bounds(DomainRange::pitch(), TrackExtent::default(), DEFAULT_PITCH_3D_DEG),
            follow: FollowCoordinator::new(),
        }
    }
}

impl MapScreen {
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the slider bounds are invalid.
    pub fn new(config: SliderConfig) -> Result<Self, ConfigurationError> {
        let slider = PitchSlider::new(config.min_pitch, config.max_pitch, config.track_length, config.initial_pitch)?;
        Ok(Self { slider, follow: FollowCoordinator::new() })
    }

    /// Drive an imperative camera handle from slider moves.
    pub fn attach_camera(&mut self, mut handle: Box<dyn CameraHandle>) {
        self.slider.subscribe(Box::new(move |pitch| handle.set_pitch(pitch)));
    }

    // --- Slider gestures ---

    pub fn on_slider_grant(&mut self) -> Action {
        let was_following = self.follow.is_following();
        if !self.slider.on_gesture_grant(&mut self.follow) {
            return Action::Rejected;
        }
        if was_following && !self.follow.is_following() {
            Action::FollowChanged { following: false }
        } else {
            Action::None
        }
    }

    pub fn on_slider_move(&mut self, delta_y: f64) -> Action {
        match self.slider.on_gesture_move(delta_y) {
            Some(pitch) => Action::PitchChanged { pitch },
            None => Action::None,
        }
    }

    pub fn on_slider_release(&mut self) -> Action {
        self.slider.on_gesture_release();
        Action::None
    }

    pub fn on_slider_cancel(&mut self) -> Action {
        self.slider.on_gesture_cancel();
        Action::None
    }

    // --- Map surface ---

    /// The user pressed or panned the map itself.
    pub fn on_map_press(&mut self) -> Action {
        if self.follow.on_manual_map_interaction() {
            Action::FollowChanged { following: false }
        } else {
            Action::None
        }
    }

    /// The SDK changed pitch on its own; move the knob to match.
    pub fn on_external_pitch(&mut self, pitch: f64) -> Action {
        self.slider.reset(pitch);
        Action::None
    }

    /// Explicitly return to follow mode.
    pub fn resume_follow(&mut self) -> Action {
        if self.follow.resume() {
            Action::FollowChanged { following: true }
        } else {
            Action::None
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn props(&self, prefs: &Preferences) -> MapCameraProps {
        MapCameraProps::compose(self.slider.value(), self.follow.is_following(), prefs)
    }

    #[must_use]
    pub fn pitch(&self) -> f64 {
        self.slider.value()
    }

    #[must_use]
    pub fn follow_mode(&self) -> FollowMode {
        self.follow.mode()
    }

    #[must_use]
    pub fn slider(&self) -> &PitchSlider {
        &self.slider
    }
}
