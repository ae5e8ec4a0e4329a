//! aclgate gateway binary.
//!
//! - Loads `aclgate.yaml` (or the path given as first argument) and its ACL
//! - Serves unary calls on `/rpc/...` and admin streams on `/admin/...`
//! - Ctrl-C / SIGTERM drains HTTP and stops every stream together

use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aclgate_core::error::{GateError, Result};
use aclgate_gateway::{config, router, server};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "aclgate-gateway failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "aclgate.yaml".into());
    let cfg = config::load_from_file(&path)?;
    let acl = config::load_acl_from_file(&cfg.acl_file)?;
    let listen: SocketAddr = cfg
        .gateway
        .listen
        .parse()
        .map_err(|e| GateError::Config(format!("gateway.listen must be a valid SocketAddr: {e}")))?;

    let shutdown = CancellationToken::new();
    let server = Arc::new(server::Server::start(&cfg.gateway, acl, shutdown.clone())?);
    let app = router::build_router(Arc::clone(&server));

    tracing::info!(%listen, "aclgate-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| GateError::Internal(format!("failed to bind {listen}: {e}")))?;

    {
        let token = shutdown.clone();
        tokio::spawn(async move {
            server::shutdown_signal().await;
            token.cancel();
        });
    }

    let drained = shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { drained.cancelled().await })
        .await
        .map_err(|e| GateError::Internal(format!("server failed: {e}")))?;

    server.shutdown().await
}
