//! Shared error type across aclgate crates.

use thiserror::Error;

/// Client-facing status codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Caller identity missing, unknown, or not permitted.
    Unauthenticated,
    /// Invalid request parameters or configuration.
    InvalidArgument,
    /// No handler registered for the method.
    Unimplemented,
    /// Stream could not be delivered to.
    Unavailable,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::Unauthenticated => "UNAUTHENTICATED",
            ClientCode::InvalidArgument => "INVALID_ARGUMENT",
            ClientCode::Unimplemented => "UNIMPLEMENTED",
            ClientCode::Unavailable => "UNAVAILABLE",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, GateError>;

/// Unified error type used by core and gateway.
///
/// Cooperative shutdown is not represented here: streams observing the
/// shutdown signal return `Ok(())`.
#[derive(Debug, Error)]
pub enum GateError {
    /// Bad gateway config or ACL document. Fatal at startup.
    #[error("config: {0}")]
    Config(String),
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("unknown method: {0}")]
    UnknownMethod(String),
    /// Writing to an external stream failed (e.g. client went away).
    #[error("delivery failed: {0}")]
    Delivery(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl GateError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            GateError::Config(_) => ClientCode::InvalidArgument,
            GateError::Unauthenticated(_) => ClientCode::Unauthenticated,
            GateError::InvalidArgument(_) => ClientCode::InvalidArgument,
            GateError::UnknownMethod(_) => ClientCode::Unimplemented,
            GateError::Delivery(_) => ClientCode::Unavailable,
            GateError::Internal(_) => ClientCode::Internal,
        }
    }
}
