use super::*;
use crate::net::types::UserRecord;

// =============================================================
// Endpoints
// =============================================================

#[test]
fn column_endpoints_format_ids() {
    assert_eq!(column_endpoint("c1"), "/columns/c1");
    assert_eq!(column_posts_endpoint("c1"), "/columns/c1/posts");
}

#[test]
fn endpoint_url_joins_without_double_slashes() {
    assert_eq!(endpoint_url("http://h/api", "/columns"), "http://h/api/columns");
    assert_eq!(endpoint_url("http://h/api/", "/columns"), "http://h/api/columns");
    assert_eq!(endpoint_url("http://h/api", "user/current"), "http://h/api/user/current");
}

// =============================================================
// Envelope parsing
// =============================================================

#[test]
fn parse_envelope_returns_data() {
    let body = r#"{"code":0,"msg":"ok","data":{"_id":"u1","nickName":"viking","email":"v@x.io"}}"#;
    let user: UserRecord = parse_envelope(200, body).unwrap();
    assert_eq!(user.id, "u1");
    assert_eq!(user.nickname, "viking");
}

#[test]
fn parse_envelope_non_success_status_is_error() {
    let err = parse_envelope::<UserRecord>(401, r#"{"code":401,"msg":"token expired"}"#).unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 401, .. }));
    assert!(err.is_unauthorized());
}

#[test]
fn parse_envelope_invalid_json_is_parse_error() {
    let err = parse_envelope::<UserRecord>(200, "<html>").unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)));
    assert!(!err.is_unauthorized());
}

#[test]
fn parse_envelope_missing_data_is_parse_error() {
    let err = parse_envelope::<UserRecord>(200, r#"{"code":0}"#).unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)));
}

// =============================================================
// Bearer credential
// =============================================================

#[test]
fn http_api_bearer_roundtrip() {
    let api = HttpApi::new("http://127.0.0.1:9/api/", HttpTimeouts::default()).unwrap();
    assert_eq!(api.base_url(), "http://127.0.0.1:9/api");
    assert!(api.authorization().is_none());

    api.set_bearer_token(Some("tok"));
    assert_eq!(api.authorization().as_deref(), Some("Bearer tok"));

    api.set_bearer_token(None);
    assert!(api.authorization().is_none());
}

#[test]
fn http_api_ignores_empty_token() {
    let api = HttpApi::new("http://127.0.0.1:9", HttpTimeouts::default()).unwrap();
    api.set_bearer_token(Some(""));
    assert!(api.authorization().is_none());
}

#[tokio::test]
async fn http_api_unreachable_host_is_request_error() {
    let timeouts = HttpTimeouts { request_secs: 2, connect_secs: 1 };
    let api = HttpApi::new("http://127.0.0.1:9", timeouts).unwrap();
    let err = api.fetch_columns().await.unwrap_err();
    assert!(matches!(err, ApiError::Request(_)));
}
