//! HTTP mapping for gateway errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use aclgate_core::error::{ClientCode, GateError};

/// Response wrapper for [`GateError`].
#[derive(Debug)]
pub struct ApiError(pub GateError);

impl From<GateError> for ApiError {
    fn from(e: GateError) -> Self {
        Self(e)
    }
}

pub fn status_for(code: ClientCode) -> StatusCode {
    match code {
        ClientCode::Unauthenticated => StatusCode::UNAUTHORIZED,
        ClientCode::InvalidArgument => StatusCode::BAD_REQUEST,
        ClientCode::Unimplemented => StatusCode::NOT_FOUND,
        ClientCode::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn error_json(e: &GateError) -> serde_json::Value {
    json!({
        "error": e.client_code().as_str(),
        "message": e.to_string(),
    })
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(self.0.client_code());
        (status, Json(error_json(&self.0))).into_response()
    }
}
