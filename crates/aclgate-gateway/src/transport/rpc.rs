//! Unary calls over HTTP: `POST /rpc/{service}/{method}`.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use serde_json::{json, Value};

use aclgate_core::error::GateError;
use aclgate_core::protocol::method::full_method;

use super::call_info;
use super::error::ApiError;
use crate::server::Server;

pub async fn unary(
    State(server): State<Arc<Server>>,
    Path((service, method)): Path<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let req = if body.is_empty() {
        json!({})
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| GateError::InvalidArgument(format!("invalid json body: {e}")))?
    };

    let call = call_info(&headers, full_method(&service, &method));
    let resp = server.unary(call, req).await?;
    Ok(Json(resp))
}
