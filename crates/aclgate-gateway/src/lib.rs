//! aclgate gateway library entry.
//!
//! This crate wires the ACL policy, call interceptor, telemetry bus, admin
//! streams, and built-in services into one server core, plus an HTTP/WS
//! transport adapter. It is consumed by the binary (`main.rs`) and by
//! integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod admin;
pub mod bus;
pub mod config;
pub mod dispatch;
pub mod intercept;
pub mod ops;
pub mod policy;
pub mod router;
pub mod server;
pub mod services;
pub mod transport;

pub use server::Server;
