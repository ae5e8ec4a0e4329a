//! Policy layer (per-consumer access control).
//!
//! Compiles the ACL document once at startup into an immutable lookup table
//! and exposes a pure allow/deny decision over it.

pub mod acl;
pub mod authorizer;

pub use acl::{AccessControlTable, MethodRule};
pub use authorizer::{AuthDecision, Authorizer};
