//! Bounded drag control: a vertical knob mapped onto a numeric range.
//!
//! The knob offset `y` runs from `0` (top of the track) to `track_length`
//! (bottom). The mapping to the domain is inverted, so the domain maximum sits
//! at the top and dragging up raises the value. Every emitted value is
//! quantized to [`PITCH_STEP_DEG`].
//!
//! A drag is tracked by [`GestureState`] between grant and release. Deltas
//! are always relative to the offset captured at grant, so replaying the same
//! delta lands on the same position.

#[cfg(test)]
#[path = "slider_test.rs"]
mod slider_test;

use crate::consts::PITCH_STEP_DEG;
use crate::follow::{FollowCoordinator, ManualSource};
use crate::range::{ConfigurationError, DomainRange, TrackExtent, format_pitch_label, round_to_step};

/// Callback receiving every value emitted by a drag move.
pub type ValueListener = Box<dyn FnMut(f64)>;

/// Gesture session state for the slider.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A drag is in progress.
    Dragging {
        /// Knob offset captured at grant; deltas are applied to this.
        start_y: f64,
    },
}

/// A knob on a fixed-length track driving a value in a bounded domain.
pub struct PitchSlider {
    range: DomainRange,
    track: TrackExtent,
    position: f64,
    value: f64,
    gesture: GestureState,
    listeners: Vec<ValueListener>,
}

impl std::fmt::Debug for PitchSlider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PitchSlider")
            .field("range", &self.range)
            .field("track", &self.track)
            .field("position", &self.position)
            .field("value", &self.value)
            .field("gesture", &self.gesture)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl PitchSlider {
    /// Build a slider from raw bounds, placing the knob at `initial`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if `min >= max` or `track_length <= 0`.
    pub fn new(min: f64, max: f64, track_length: f64, initial: f64) -> Result<Self, ConfigurationError> {
        let range = DomainRange::new(min, max)?;
        let track = TrackExtent::new(track_length)?;
        Ok(Self::with_bounds(range, track, initial))
    }

    /// Build a slider from already-validated bounds.
    #[must_use]
    pub fn with_bounds(range: DomainRange, track: TrackExtent, initial: f64) -> Self {
        let mut slider = Self {
            range,
            track,
            position: track.length(),
            value: range.min(),
            gesture: GestureState::Idle,
            listeners: Vec::new(),
        };
        slider.sync_to(initial);
        slider
    }

    // --- Mapping ---

    /// Map a domain value to a knob offset. Out-of-range values are clamped.
    #[must_use]
    pub fn position_for_value(&self, value: f64) -> f64 {
        let clamped = self.range.clamp(value);
        let t = (clamped - self.range.min()) / self.range.span();
        (1.0 - t) * self.track.length()
    }

    /// Map a knob offset to a domain value, rounded to one decimal.
    #[must_use]
    pub fn value_for_position(&self, position: f64) -> f64 {
        let clamped = self.track.clamp(position);
        let t = 1.0 - clamped / self.track.length();
        let raw = self.range.min() + t * self.range.span();
        round_to_step(raw, PITCH_STEP_DEG).clamp(self.range.min(), self.range.max())
    }

    // --- Gesture callbacks ---

    /// Start a drag session and suppress follow mode.
    ///
    /// Returns `false` if a session is already active; the host must deliver
    /// release before the next grant, so an overlapping grant is rejected.
    pub fn on_gesture_grant(&mut self, follow: &mut FollowCoordinator) -> bool {
        if let GestureState::Dragging { start_y } = self.gesture {
            tracing::warn!(start_y, "slider grant rejected: drag session already active");
            return false;
        }
        self.gesture = GestureState::Dragging { start_y: self.position };
        follow.suppress(ManualSource::SliderDrag);
        tracing::trace!(start_y = self.position, "slider drag granted");
        true
    }

    /// Move the knob by `delta_y` from the grant offset and emit the new value.
    ///
    /// Returns the emitted value, or `None` when there is no active session or
    /// the delta is not finite.
    pub fn on_gesture_move(&mut self, delta_y: f64) -> Option<f64> {
        let GestureState::Dragging { start_y } = self.gesture else {
            tracing::trace!(delta_y, "slider move ignored: no active drag");
            return None;
        };
        if !delta_y.is_finite() {
            tracing::trace!(delta_y, "slider move ignored: non-finite delta");
            return None;
        }
        self.position = self.track.clamp(start_y + delta_y);
        self.value = self.value_for_position(self.position);
        for listener in &mut self.listeners {
            listener(self.value);
        }
        Some(self.value)
    }

    /// End the drag session. The value stays where the last move left it.
    pub fn on_gesture_release(&mut self) {
        self.gesture = GestureState::Idle;
    }

    /// Host-side interruption. Handled exactly like a release.
    pub fn on_gesture_cancel(&mut self) {
        self.on_gesture_release();
    }

    // --- External updates ---

    /// Re-sync the knob to a value set outside the slider. Does not touch
    /// follow state and does not notify listeners. Non-finite values are
    /// ignored.
    pub fn reset(&mut self, value: f64) {
        if !value.is_finite() {
            tracing::trace!(value, "slider reset ignored: non-finite value");
            return;
        }
        self.sync_to(value);
    }

    /// Register a listener for values emitted by drag moves.
    pub fn subscribe(&mut self, listener: ValueListener) {
        self.listeners.push(listener);
    }

    fn sync_to(&mut self, value: f64) {
        self.position = self.position_for_value(value);
        self.value = self.value_for_position(self.position);
    }

    // --- Queries ---

    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Knob offset as a fraction of the track, `0.0` at the top.
    #[must_use]
    pub fn normalized_position(&self) -> f64 {
        self.position / self.track.length()
    }

    #[must_use]
    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, GestureState::Dragging { .. })
    }

    #[must_use]
    pub fn track(&self) -> TrackExtent {
        self.track
    }

    #[must_use]
    pub fn label(&self) -> String {
        format_pitch_label(self.value)
    }
}

impl Default for PitchSlider {
    fn default() -> Self {
        Self::with_bounds(DomainRange::pitch(), TrackExtent::default(), DomainRange::pitch().min())
    }
}
