#![allow(clippy::float_cmp)]

use std::sync::{Mutex, MutexGuard};

use super::*;

static ENV_LOCK: Mutex<()> = Mutex::new(());

const VARS: &[&str] = &[
    "TRAILGUIDE_BACKEND_URL",
    "TRAILGUIDE_ANON_KEY",
    "TRAILGUIDE_REQUEST_TIMEOUT_SECS",
    "TRAILGUIDE_CONNECT_TIMEOUT_SECS",
    "TRAILGUIDE_MAPBOX_TOKEN",
    "TRAILGUIDE_TRACK_LENGTH_PX",
    "TRAILGUIDE_INITIAL_PITCH",
];

/// Serialises env access across tests and starts from a clean slate.
fn env_guard() -> MutexGuard<'static, ()> {
    let guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    // SAFETY: every test touching these vars holds ENV_LOCK.
    unsafe {
        for var in VARS {
            std::env::remove_var(var);
        }
    }
    guard
}

fn set(var: &str, value: &str) {
    // SAFETY: callers hold ENV_LOCK.
    unsafe { std::env::set_var(var, value) };
}

// =========================================================================
// BackendConfig
// =========================================================================

#[test]
fn backend_from_env_applies_defaults() {
    let _guard = env_guard();
    set("TRAILGUIDE_BACKEND_URL", "https://demo.example.test/");
    set("TRAILGUIDE_ANON_KEY", "anon");

    let cfg = BackendConfig::from_env().unwrap();
    assert_eq!(cfg.base_url, "https://demo.example.test");
    assert_eq!(cfg.anon_key, "anon");
    assert_eq!(
        cfg.timeouts,
        Timeouts { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    );
}

#[test]
fn backend_from_env_parses_timeouts() {
    let _guard = env_guard();
    set("TRAILGUIDE_BACKEND_URL", "http://127.0.0.1:54321");
    set("TRAILGUIDE_ANON_KEY", "anon");
    set("TRAILGUIDE_REQUEST_TIMEOUT_SECS", "42");
    set("TRAILGUIDE_CONNECT_TIMEOUT_SECS", " 7 ");

    let cfg = BackendConfig::from_env().unwrap();
    assert_eq!(cfg.timeouts, Timeouts { request_secs: 42, connect_secs: 7 });
}

#[test]
fn backend_from_env_requires_url() {
    let _guard = env_guard();
    set("TRAILGUIDE_ANON_KEY", "anon");

    let err = BackendConfig::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::Missing("TRAILGUIDE_BACKEND_URL")));
}

#[test]
fn backend_from_env_requires_non_blank_key() {
    let _guard = env_guard();
    set("TRAILGUIDE_BACKEND_URL", "https://demo.example.test");
    set("TRAILGUIDE_ANON_KEY", "   ");

    let err = BackendConfig::from_env().unwrap_err().to_string();
    assert!(err.contains("TRAILGUIDE_ANON_KEY"));
}

#[test]
fn backend_from_env_rejects_non_http_url() {
    let _guard = env_guard();
    set("TRAILGUIDE_BACKEND_URL", "demo.example.test");
    set("TRAILGUIDE_ANON_KEY", "anon");

    let err = BackendConfig::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "TRAILGUIDE_BACKEND_URL", .. }));
}

#[test]
fn backend_from_env_rejects_bad_timeout() {
    let _guard = env_guard();
    set("TRAILGUIDE_BACKEND_URL", "https://demo.example.test");
    set("TRAILGUIDE_ANON_KEY", "anon");
    set("TRAILGUIDE_REQUEST_TIMEOUT_SECS", "soon");

    let err = BackendConfig::from_env().unwrap_err().to_string();
    assert!(err.contains("TRAILGUIDE_REQUEST_TIMEOUT_SECS"));
    assert!(err.contains("soon"));
}

// =========================================================================
// MapConfig
// =========================================================================

#[test]
fn map_from_env_defaults() {
    let _guard = env_guard();

    let cfg = MapConfig::from_env().unwrap();
    assert_eq!(cfg.access_token, None);
    assert_eq!(cfg.track_length_px, TRACK_LENGTH_PX);
    assert_eq!(cfg.initial_pitch, DEFAULT_PITCH_3D_DEG);
}

#[test]
fn map_from_env_overrides() {
    let _guard = env_guard();
    set("TRAILGUIDE_MAPBOX_TOKEN", "pk.test");
    set("TRAILGUIDE_TRACK_LENGTH_PX", "300");
    set("TRAILGUIDE_INITIAL_PITCH", "12.5");

    let cfg = MapConfig::from_env().unwrap();
    assert_eq!(cfg.access_token.as_deref(), Some("pk.test"));
    assert_eq!(cfg.track_length_px, 300.0);
    assert_eq!(cfg.initial_pitch, 12.5);
}

#[test]
fn map_from_env_blank_token_is_absent() {
    let _guard = env_guard();
    set("TRAILGUIDE_MAPBOX_TOKEN", "  ");

    assert_eq!(MapConfig::from_env().unwrap().access_token, None);
}

#[test]
fn map_from_env_rejects_bad_number() {
    let _guard = env_guard();
    set("TRAILGUIDE_TRACK_LENGTH_PX", "wide");

    assert!(matches!(MapConfig::from_env(), Err(ConfigError::Invalid { var: "TRAILGUIDE_TRACK_LENGTH_PX", .. })));
}
