//! Axum router wiring.
//!
//! - `POST /rpc/:service/:method` : intercepted unary call
//! - `GET /admin/logging`          : WS event tail
//! - `GET /admin/statistics`       : WS stat snapshots (`?interval_seconds=N`)
//! - `/healthz`, `/readyz`

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::{ops, server::Server, transport};

pub fn build_router(server: Arc<Server>) -> Router {
    Router::new()
        .route("/rpc/:service/:method", post(transport::rpc::unary))
        .route("/admin/logging", get(transport::ws::logging_upgrade))
        .route("/admin/statistics", get(transport::ws::statistics_upgrade))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .with_state(server)
}
