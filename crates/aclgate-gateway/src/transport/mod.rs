//! Transport layer (HTTP unary calls + WebSocket admin streams).
//!
//! Maps HTTP requests onto [`crate::server::Server`] entry points. The
//! caller identity travels in the `consumer` header.

pub mod error;
pub mod rpc;
pub mod ws;

use axum::http::HeaderMap;

use crate::intercept::CallInfo;

/// Metadata key carrying the caller identity.
pub const CONSUMER_HEADER: &str = "consumer";

/// Build call info from request headers. Non-UTF-8 values are ignored.
pub fn call_info(headers: &HeaderMap, method: String) -> CallInfo {
    let values = headers
        .get_all(CONSUMER_HEADER)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_owned);
    CallInfo::from_metadata(values, method)
}
