//! Shared numeric constants for the map view crate.

// ── Pitch ───────────────────────────────────────────────────────

/// Flat, top-down camera.
pub const PITCH_MIN_DEG: f64 = 0.0;

/// Fully tilted camera, looking at the horizon.
pub const PITCH_MAX_DEG: f64 = 90.0;

/// Pitch applied when 3D buildings are first switched on.
pub const DEFAULT_PITCH_3D_DEG: f64 = 45.0;

/// Quantization step for emitted pitch values.
pub const PITCH_STEP_DEG: f64 = 0.1;

// ── Slider ──────────────────────────────────────────────────────

/// Full travel of the pitch knob, in screen pixels.
pub const TRACK_LENGTH_PX: f64 = 220.0;
