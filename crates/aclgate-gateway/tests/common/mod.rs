//! Shared fixtures for gateway integration tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::fs;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use aclgate_gateway::config::GatewaySection;
use aclgate_gateway::intercept::CallInfo;
use aclgate_gateway::Server;

pub const HOST: &str = "127.0.0.1:8083";

pub fn load_vector(name: &str) -> String {
    fs::read_to_string(format!("tests/vectors/{name}")).unwrap()
}

pub fn section(buffer: usize) -> GatewaySection {
    GatewaySection {
        listen: "127.0.0.1:0".into(),
        host: HOST.into(),
        subscriber_buffer: buffer,
    }
}

/// Start a server over a vector ACL. Needs a tokio runtime.
pub fn start(acl: &str, buffer: usize) -> Arc<Server> {
    let server = Server::start_with_json(
        &section(buffer),
        &load_vector(acl),
        CancellationToken::new(),
    )
    .expect("server must start");
    Arc::new(server)
}

pub fn call(consumer: &str, method: &str) -> CallInfo {
    CallInfo::new(Some(consumer.to_string()), method)
}
