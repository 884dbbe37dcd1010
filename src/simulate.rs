//! Headless map-screen driver.
//!
//! A script is a comma-separated list of steps, e.g.
//! `grant,move:-110,release,tap`. Each step is applied to a [`MapScreen`]
//! and yields one [`Frame`]: the step, the resulting action, and the camera
//! props the renderer would receive afterwards.

use std::fmt;

use mapview::camera::MapCameraProps;
use mapview::prefs::{LightPreset, MapStyle, Preferences};
use mapview::screen::{Action, MapScreen};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("script is empty")]
    Empty,
    #[error("unknown step: {0}")]
    UnknownStep(String),
    #[error("invalid argument for {step}: {value}")]
    InvalidArgument { step: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Grant,
    Move(f64),
    Release,
    Cancel,
    /// Press on the map surface.
    Tap,
    /// Pitch changed by the SDK.
    ExternalPitch(f64),
    Resume,
    Style(MapStyle),
    Light(LightPreset),
    ThreeD(bool),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grant => f.write_str("grant"),
            Self::Move(dy) => write!(f, "move:{dy}"),
            Self::Release => f.write_str("release"),
            Self::Cancel => f.write_str("cancel"),
            Self::Tap => f.write_str("tap"),
            Self::ExternalPitch(p) => write!(f, "pitch:{p}"),
            Self::Resume => f.write_str("resume"),
            Self::Style(style) => write!(f, "style:{}", style.as_str()),
            Self::Light(preset) => write!(f, "light:{}", preset.as_str()),
            Self::ThreeD(on) => write!(f, "3d:{}", if *on { "on" } else { "off" }),
        }
    }
}

/// One line of simulation output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub step: String,
    pub action: Action,
    pub props: MapCameraProps,
    /// Knob label, e.g. `"45.0°"`.
    pub label: String,
}

/// Parse a comma-separated script. Blank entries are skipped.
///
/// # Errors
///
/// Returns a [`ScriptError`] for an empty script, an unknown step, or a bad
/// argument.
pub fn parse_script(script: &str) -> Result<Vec<Step>, ScriptError> {
    let steps = script
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_step)
        .collect::<Result<Vec<_>, _>>()?;
    if steps.is_empty() {
        return Err(ScriptError::Empty);
    }
    Ok(steps)
}

fn parse_step(raw: &str) -> Result<Step, ScriptError> {
    let (name, arg) = match raw.split_once(':') {
        Some((name, arg)) => (name.trim(), Some(arg.trim())),
        None => (raw, None),
    };
    let step = match (name.to_ascii_lowercase().as_str(), arg) {
        ("grant", None) => Step::Grant,
        ("release", None) => Step::Release,
        ("cancel", None) => Step::Cancel,
        ("tap", None) => Step::Tap,
        ("resume", None) => Step::Resume,
        ("move", Some(v)) => Step::Move(number("move", v)?),
        ("pitch", Some(v)) => Step::ExternalPitch(number("pitch", v)?),
        ("style", Some(v)) => Step::Style(MapStyle::parse(v).ok_or_else(|| invalid("style", v))?),
        ("light", Some(v)) => Step::Light(LightPreset::parse(v).ok_or_else(|| invalid("light", v))?),
        ("3d", Some(v)) => Step::ThreeD(toggle(v).ok_or_else(|| invalid("3d", v))?),
        _ => return Err(ScriptError::UnknownStep(raw.to_string())),
    };
    Ok(step)
}

fn number(step: &'static str, raw: &str) -> Result<f64, ScriptError> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite()).ok_or_else(|| invalid(step, raw))
}

fn toggle(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "on" | "true" | "1" => Some(true),
        "off" | "false" | "0" => Some(false),
        _ => None,
    }
}

fn invalid(step: &'static str, value: &str) -> ScriptError {
    ScriptError::InvalidArgument { step, value: value.to_string() }
}

/// Apply one step and snapshot the props.
pub fn apply(screen: &mut MapScreen, prefs: &mut Preferences, step: Step) -> Frame {
    let action = match step {
        Step::Grant => screen.on_slider_grant(),
        Step::Move(dy) => screen.on_slider_move(dy),
        Step::Release => screen.on_slider_release(),
        Step::Cancel => screen.on_slider_cancel(),
        Step::Tap => screen.on_map_press(),
        Step::ExternalPitch(pitch) => screen.on_external_pitch(pitch),
        Step::Resume => screen.resume_follow(),
        Step::Style(style) => {
            prefs.change_map_style(style);
            Action::None
        }
        Step::Light(preset) => {
            prefs.change_light_preset(preset);
            Action::None
        }
        Step::ThreeD(on) => {
            prefs.set_3d_enabled(on);
            Action::None
        }
    };
    tracing::trace!(%step, ?action, "applied");
    Frame { step: step.to_string(), action, props: screen.props(prefs), label: screen.slider().label() }
}

/// Run a whole script against a fresh screen state.
pub fn run(screen: &mut MapScreen, prefs: &mut Preferences, steps: &[Step]) -> Vec<Frame> {
    steps.iter().map(|&step| apply(screen, prefs, step)).collect()
}

#[cfg(test)]
#[path = "simulate_test.rs"]
mod tests;
