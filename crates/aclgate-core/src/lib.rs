//! aclgate core: transport-agnostic telemetry records, method paths, and errors.
//!
//! This crate defines the data model and error surface shared by the gateway
//! and any transport adapter. It carries no transport or runtime dependencies
//! so the same types can be reused by clients and tests.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `GateError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{GateError, Result};
