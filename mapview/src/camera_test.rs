#![allow(clippy::float_cmp)]

use super::*;
use crate::prefs::{HYBRID_STYLE_URL, MapStyle, STANDARD_STYLE_URL};

fn prefs_3d() -> Preferences {
    Preferences { is_3d_enabled: true, ..Preferences::default() }
}

#[test]
fn compose_passes_pitch_through_when_3d_enabled() {
    let props = MapCameraProps::compose(45.0, true, &prefs_3d());
    assert_eq!(props.pitch, 45.0);
    assert!(props.slider_visible);
    assert!(props.follow_user_location);
}

#[test]
fn compose_flattens_camera_when_3d_disabled() {
    let props = MapCameraProps::compose(45.0, true, &Preferences::default());
    assert_eq!(props.pitch, 0.0);
    assert!(!props.slider_visible);
}

#[test]
fn compose_carries_follow_flag() {
    let props = MapCameraProps::compose(10.0, false, &prefs_3d());
    assert!(!props.follow_user_location);
}

#[test]
fn compose_includes_light_preset_only_for_standard() {
    let mut prefs = prefs_3d();
    prefs.change_light_preset(LightPreset::Dusk);
    let props = MapCameraProps::compose(0.0, true, &prefs);
    assert_eq!(props.style_url, STANDARD_STYLE_URL);
    assert_eq!(props.light_preset, Some(LightPreset::Dusk));

    prefs.change_map_style(MapStyle::Hybrid);
    let props = MapCameraProps::compose(0.0, true, &prefs);
    assert_eq!(props.style_url, HYBRID_STYLE_URL);
    assert_eq!(props.light_preset, None);
}

#[test]
fn props_serialize_for_renderer() {
    let props = MapCameraProps::compose(30.5, false, &prefs_3d());
    let json = serde_json::to_value(&props).unwrap();
    assert_eq!(json["pitch"], 30.5);
    assert_eq!(json["follow_user_location"], false);
    assert_eq!(json["style_url"], STANDARD_STYLE_URL);
    assert_eq!(json["light_preset"], "day");
    assert_eq!(json["slider_visible"], true);
}

#[test]
fn props_omit_light_preset_when_absent() {
    let prefs = Preferences { map_style: MapStyle::Satellite, ..prefs_3d() };
    let json = serde_json::to_value(MapCameraProps::compose(0.0, true, &prefs)).unwrap();
    assert!(json.get("light_preset").is_none());
}
