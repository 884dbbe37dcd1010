//! Map screen core for the trail guide app.
//!
//! This crate owns the interactive logic of the map screen that is not
//! rendering: the pitch slider that turns a vertical drag into a camera tilt,
//! the follow-suppression state that stops auto-recentering once the user
//! takes manual control, and the map preferences that feed the renderer. The
//! host UI layer wires gesture callbacks into [`screen::MapScreen`] and hands
//! the resulting [`camera::MapCameraProps`] to the mapping SDK.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`screen`] | Top-level [`screen::MapScreen`] wiring slider, follow state and preferences |
//! | [`slider`] | Bounded drag control and its gesture session state machine |
//! | [`follow`] | Follow-suppression coordinator (`Following` / `Manual`) |
//! | [`range`] | Domain range, track extent, quantization and labels |
//! | [`prefs`] | Map style, light preset and 3D preferences |
//! | [`camera`] | Declarative camera props and the imperative camera handle |
//! | [`consts`] | Shared numeric constants (pitch limits, track length, step) |

pub mod camera;
pub mod consts;
pub mod follow;
pub mod prefs;
pub mod range;
pub mod screen;
pub mod slider;

pub use range::ConfigurationError;
