//! HTTP adapter helpers.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;

use aclgate_core::GateError;
use aclgate_gateway::transport::error::{error_json, ApiError};
use aclgate_gateway::transport::{call_info, CONSUMER_HEADER};

#[test]
fn consumer_header_becomes_call_identity() {
    let mut headers = HeaderMap::new();
    headers.insert(CONSUMER_HEADER, HeaderValue::from_static("alice"));
    let call = call_info(&headers, "/main.Biz/Check".into());
    assert_eq!(call.consumer(), Some("alice"));
    assert_eq!(call.method(), "/main.Biz/Check");
}

#[test]
fn repeated_or_missing_consumer_header_is_anonymous() {
    let mut headers = HeaderMap::new();
    assert_eq!(call_info(&headers, "/main.Biz/Check".into()).consumer(), None);

    headers.append(CONSUMER_HEADER, HeaderValue::from_static("alice"));
    headers.append(CONSUMER_HEADER, HeaderValue::from_static("bob"));
    assert_eq!(call_info(&headers, "/main.Biz/Check".into()).consumer(), None);
}

#[test]
fn errors_map_to_http_status() {
    let cases = [
        (GateError::Unauthenticated("x".into()), StatusCode::UNAUTHORIZED),
        (GateError::InvalidArgument("x".into()), StatusCode::BAD_REQUEST),
        (GateError::UnknownMethod("x".into()), StatusCode::NOT_FOUND),
        (GateError::Delivery("x".into()), StatusCode::SERVICE_UNAVAILABLE),
        (GateError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
    ];
    for (err, status) in cases {
        assert_eq!(ApiError(err).into_response().status(), status);
    }
}

#[test]
fn error_body_carries_code_and_reason() {
    let body = error_json(&GateError::Unauthenticated("unknown consumer".into()));
    assert_eq!(body["error"], "UNAUTHENTICATED");
    assert_eq!(body["message"], "unauthenticated: unknown consumer");
}
