use super::*;
use crate::config::{BackendConfig, Timeouts};

const USER_ID: &str = "6f1d2c4e-8a3b-4c5d-9e7f-0a1b2c3d4e5f";

fn user_id() -> Uuid {
    USER_ID.parse().unwrap()
}

fn test_store() -> PostgrestProfiles {
    let config = BackendConfig {
        base_url: "https://demo.example.test".into(),
        anon_key: "anon".into(),
        timeouts: Timeouts { request_secs: 5, connect_secs: 1 },
    };
    PostgrestProfiles::new(BackendHttp::new(&config).unwrap(), "jwt")
}

// =========================================================================
// ProfileRow
// =========================================================================

#[test]
fn display_name_joins_and_trims() {
    let mut row = ProfileRow { id: user_id(), first_name: Some("Ana".into()), last_name: Some("Lima".into()), application_status: None };
    assert_eq!(row.display_name(), "Ana Lima");

    row.last_name = None;
    assert_eq!(row.display_name(), "Ana");

    row.first_name = None;
    assert_eq!(row.display_name(), "");
}

#[test]
fn application_status_wire_format() {
    assert_eq!(serde_json::to_string(&ApplicationStatus::Pending).unwrap(), r#""pending""#);
    let parsed: ApplicationStatus = serde_json::from_str(r#""withdrawn""#).unwrap();
    assert_eq!(parsed, ApplicationStatus::Other);
}

#[test]
fn patch_serializes_only_set_fields() {
    let patch = ProfilePatch { application_status: Some(ApplicationStatus::Pending), ..ProfilePatch::default() };
    assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"application_status":"pending"}"#);
}

// =========================================================================
// parse_rows
// =========================================================================

#[test]
fn parse_rows_reads_array() {
    let body = format!(r#"[{{"id":"{USER_ID}","first_name":"Ana","last_name":"Lima","application_status":"approved"}}]"#);
    let rows = parse_rows(&body).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].application_status, Some(ApplicationStatus::Approved));
}

#[test]
fn parse_rows_handles_nulls_and_empty() {
    let body = format!(r#"[{{"id":"{USER_ID}","first_name":null,"last_name":null,"application_status":null}}]"#);
    let rows = parse_rows(&body).unwrap();
    assert_eq!(rows[0].first_name, None);
    assert_eq!(rows[0].application_status, None);

    assert!(parse_rows("[]").unwrap().is_empty());
    assert!(parse_rows("").unwrap().is_empty());
}

#[test]
fn parse_rows_rejects_object() {
    assert!(matches!(parse_rows(r#"{"id":"x"}"#), Err(BackendError::Parse(_))));
}

// =========================================================================
// request shape
// =========================================================================

#[test]
fn request_filters_by_id_with_session_token() {
    let store = test_store();
    let req = store.request(reqwest::Method::GET, Some(user_id())).build().unwrap();
    assert_eq!(req.url().path(), "/rest/v1/profiles");
    assert_eq!(req.url().query(), Some(format!("id=eq.{USER_ID}").as_str()));
    assert_eq!(req.headers()["authorization"], "Bearer jwt");
    assert_eq!(req.headers()["apikey"], "anon");
}

#[test]
fn request_without_id_has_no_filter() {
    let store = test_store();
    let req = store.request(reqwest::Method::POST, None).build().unwrap();
    assert_eq!(req.url().query(), None);
}
