//! Method path parsing.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use aclgate_core::protocol::method::{full_method, service_of, split_method};

#[test]
fn service_segment_ignores_one_leading_slash() {
    assert_eq!(service_of("/main.Biz/Check"), "main.Biz");
    assert_eq!(service_of("main.Biz/Check"), "main.Biz");
    assert_eq!(service_of("svc/*"), "svc");
    assert_eq!(service_of("/main.Admin/*"), "main.Admin");
}

#[test]
fn service_segment_without_separator_is_whole_path() {
    assert_eq!(service_of("svc"), "svc");
    assert_eq!(service_of("/svc"), "svc");
    assert_eq!(service_of(""), "");
}

#[test]
fn split_requires_both_halves() {
    assert_eq!(split_method("/main.Biz/Check"), Some(("main.Biz", "Check")));
    assert_eq!(split_method("svc/Add"), Some(("svc", "Add")));
    assert_eq!(split_method("/svc/"), None);
    assert_eq!(split_method("//Check"), None);
    assert_eq!(split_method("nosep"), None);
}

#[test]
fn full_method_is_canonical() {
    let m = full_method("main.Biz", "Test");
    assert_eq!(m, "/main.Biz/Test");
    assert_eq!(split_method(&m), Some(("main.Biz", "Test")));
}
