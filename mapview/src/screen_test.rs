#![allow(clippy::float_cmp)]

use std::cell::RefCell;
use std::rc::Rc;

use super::*;

// =============================================================
// Helpers
// =============================================================

struct RecordingCamera {
    pitches: Rc<RefCell<Vec<f64>>>,
}

impl CameraHandle for RecordingCamera {
    fn set_pitch(&mut self, pitch: f64) {
        self.pitches.borrow_mut().push(pitch);
    }
}

fn screen_at(pitch: f64) -> MapScreen {
    MapScreen::new(SliderConfig { initial_pitch: pitch, ..SliderConfig::default() }).unwrap()
}

fn prefs_3d() -> Preferences {
    Preferences { is_3d_enabled: true, ..Preferences::default() }
}

// =============================================================
// Construction
// =============================================================

#[test]
fn default_screen_starts_following_at_default_pitch() {
    let screen = MapScreen::default();
    assert_eq!(screen.pitch(), DEFAULT_PITCH_3D_DEG);
    assert_eq!(screen.follow_mode(), FollowMode::Following);
}

#[test]
fn new_rejects_bad_slider_config() {
    let err = MapScreen::new(SliderConfig { track_length: 0.0, ..SliderConfig::default() }).unwrap_err();
    assert_eq!(err, ConfigurationError::InvalidTrackLength(0.0));
    let err = MapScreen::new(SliderConfig { min_pitch: 90.0, max_pitch: 0.0, ..SliderConfig::default() });
    assert!(err.is_err());
}

// =============================================================
// Slider gestures
// =============================================================

#[test]
fn first_grant_reports_follow_change() {
    let mut screen = screen_at(45.0);
    assert_eq!(screen.on_slider_grant(), Action::FollowChanged { following: false });
    assert_eq!(screen.follow_mode(), FollowMode::Manual);
}

#[test]
fn later_grants_do_not_report_follow_change() {
    let mut screen = screen_at(45.0);
    screen.on_slider_grant();
    screen.on_slider_release();
    assert_eq!(screen.on_slider_grant(), Action::None);
    assert_eq!(screen.follow_mode(), FollowMode::Manual);
}

#[test]
fn overlapping_grant_is_rejected() {
    let mut screen = screen_at(45.0);
    screen.on_slider_grant();
    assert_eq!(screen.on_slider_grant(), Action::Rejected);
}

#[test]
fn drag_up_emits_max_pitch() {
    let mut screen = screen_at(45.0);
    screen.on_slider_grant();
    assert_eq!(screen.on_slider_move(-110.0), Action::PitchChanged { pitch: 90.0 });
    assert_eq!(screen.on_slider_release(), Action::None);
    assert_eq!(screen.pitch(), 90.0);
}

#[test]
fn drag_down_emits_min_pitch() {
    let mut screen = screen_at(45.0);
    screen.on_slider_grant();
    assert_eq!(screen.on_slider_move(110.0), Action::PitchChanged { pitch: 0.0 });
}

#[test]
fn move_without_grant_is_a_no_op() {
    let mut screen = screen_at(45.0);
    assert_eq!(screen.on_slider_move(-50.0), Action::None);
    assert_eq!(screen.pitch(), 45.0);
    assert_eq!(screen.follow_mode(), FollowMode::Following);
}

#[test]
fn cancel_ends_session_like_release() {
    let mut screen = screen_at(45.0);
    screen.on_slider_grant();
    screen.on_slider_move(-22.0);
    assert_eq!(screen.on_slider_cancel(), Action::None);
    assert!(!screen.slider().is_dragging());
    assert_eq!(screen.pitch(), 54.0);
}

// =============================================================
// Map surface and follow
// =============================================================

#[test]
fn map_press_before_drag_suppresses_follow() {
    let mut screen = screen_at(45.0);
    assert_eq!(screen.on_map_press(), Action::FollowChanged { following: false });
    assert_eq!(screen.on_map_press(), Action::None);
    assert_eq!(screen.on_slider_grant(), Action::None);
}

#[test]
fn external_pitch_keeps_manual_mode() {
    let mut screen = screen_at(45.0);
    screen.on_map_press();
    assert_eq!(screen.on_external_pitch(30.0), Action::None);
    assert_eq!(screen.pitch(), 30.0);
    assert_eq!(screen.follow_mode(), FollowMode::Manual);
}

#[test]
fn external_pitch_does_not_end_follow() {
    let mut screen = screen_at(45.0);
    screen.on_external_pitch(60.0);
    assert_eq!(screen.follow_mode(), FollowMode::Following);
}

#[test]
fn resume_follow_is_explicit() {
    let mut screen = screen_at(45.0);
    assert_eq!(screen.resume_follow(), Action::None);
    screen.on_map_press();
    assert_eq!(screen.resume_follow(), Action::FollowChanged { following: true });
    assert_eq!(screen.follow_mode(), FollowMode::Following);
}

// =============================================================
// Props and camera handle
// =============================================================

#[test]
fn props_reflect_pitch_and_follow() {
    let mut screen = screen_at(45.0);
    let prefs = prefs_3d();
    let before = screen.props(&prefs);
    assert_eq!(before.pitch, 45.0);
    assert!(before.follow_user_location);

    screen.on_slider_grant();
    screen.on_slider_move(-110.0);
    let after = screen.props(&prefs);
    assert_eq!(after.pitch, 90.0);
    assert!(!after.follow_user_location);
}

#[test]
fn props_follow_preference_changes() {
    let screen = screen_at(45.0);
    let mut prefs = prefs_3d();
    assert_eq!(screen.props(&prefs).pitch, 45.0);
    prefs.set_3d_enabled(false);
    assert_eq!(screen.props(&prefs).pitch, 0.0);
    assert_eq!(screen.pitch(), 45.0);
}

#[test]
fn attached_camera_sees_only_slider_moves() {
    let pitches = Rc::new(RefCell::new(Vec::new()));
    let mut screen = screen_at(45.0);
    screen.attach_camera(Box::new(RecordingCamera { pitches: Rc::clone(&pitches) }));

    screen.on_external_pitch(20.0);
    screen.on_slider_grant();
    screen.on_slider_move(-110.0);
    screen.on_slider_move(0.0);
    screen.on_slider_release();

    // 20deg sits at 171.1px; -110px lands on 61.1px -> 65.0deg
    let seen = pitches.borrow().clone();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[1], 20.0);
    assert!((seen[0] - 65.0).abs() < 1e-9);
}

#[test]
fn action_serializes_tagged() {
    let json = serde_json::to_string(&Action::PitchChanged { pitch: 65.0 }).unwrap();
    assert_eq!(json, r#"{"type":"pitch_changed","pitch":65.0}"#);
    assert_eq!(serde_json::to_string(&Action::Rejected).unwrap(), r#"{"type":"rejected"}"#);
}
