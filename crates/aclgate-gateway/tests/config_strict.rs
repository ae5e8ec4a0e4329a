#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use aclgate_gateway::config;
use aclgate_gateway::policy::AccessControlTable;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
gateway:
  listen: "0.0.0.0:8082"
  hostt: "127.0.0.1:8083" # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "INVALID_ARGUMENT");
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.acl_file, "acl.json");
    assert_eq!(cfg.gateway.host, "127.0.0.1:8083");
    assert_eq!(cfg.gateway.subscriber_buffer, 64);
}

#[test]
fn rejects_unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert!(err.to_string().contains("version"));
}

#[test]
fn rejects_zero_subscriber_buffer() {
    let bad = r#"
version: 1
gateway:
  subscriber_buffer: 0
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn rejects_empty_host() {
    let bad = r#"
version: 1
gateway:
  host: "  "
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn malformed_acl_json_is_a_config_error() {
    let err = AccessControlTable::from_json(&common::load_vector("acl_malformed.json"))
        .expect_err("must fail");
    assert!(matches!(err, aclgate_core::GateError::Config(_)));
}

#[test]
fn acl_must_map_to_string_arrays() {
    assert!(AccessControlTable::from_json(r#"{"alice": "svc/*"}"#).is_err());
    assert!(AccessControlTable::from_json(r#"["alice"]"#).is_err());
    assert!(AccessControlTable::from_json(r#"{"alice": [1]}"#).is_err());
}

#[test]
fn acl_file_loader_reports_missing_file() {
    let err = config::load_acl_from_file("tests/vectors/does_not_exist.json")
        .expect_err("must fail");
    assert!(matches!(err, aclgate_core::GateError::Config(_)));

    let acl = config::load_acl_from_file("tests/vectors/acl_scenario.json").unwrap();
    assert_eq!(acl.len(), 2);
}
