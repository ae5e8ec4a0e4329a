//! Admin streams over WebSocket.
//!
//! Responsibilities:
//! - Upgrade HTTP -> WS
//! - Run the intercepted `Logging` / `Statistics` stream for the session
//! - Outbound writer queue, so stream tasks never touch the socket
//! - End the stream (and detach its subscription) when the client goes away

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{ws::Message, ws::WebSocket, ws::WebSocketUpgrade, Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use tokio::sync::mpsc;

use aclgate_core::error::{GateError, Result};
use aclgate_core::protocol::method::full_method;
use aclgate_core::protocol::StatInterval;

use super::call_info;
use super::error::{error_json, ApiError};
use crate::admin::{StreamSink, ADMIN_SERVICE};
use crate::server::Server;

const OUTBOUND_QUEUE: usize = 256;

/// Stream sink writing JSON text frames into the session's outbound queue.
pub struct WsSink {
    tx: mpsc::Sender<Message>,
}

#[async_trait]
impl<T: Serialize + Send + 'static> StreamSink<T> for WsSink {
    async fn send(&mut self, item: T) -> Result<()> {
        let text = serde_json::to_string(&item)
            .map_err(|e| GateError::Internal(format!("json encode failed: {e}")))?;
        self.tx
            .send(Message::Text(text))
            .await
            .map_err(|_| GateError::Delivery("websocket writer closed".into()))
    }
}

// --------------------
// Entry
// --------------------
pub async fn logging_upgrade(
    State(server): State<Arc<Server>>,
    headers: HeaderMap,
    ws: WebSocketUpgrade,
) -> Response {
    let call = call_info(&headers, full_method(ADMIN_SERVICE, "Logging"));
    ws.on_upgrade(move |socket| async move {
        run_session(socket, |sink| async move { server.logging(call, sink).await }).await;
    })
}

pub async fn statistics_upgrade(
    State(server): State<Arc<Server>>,
    headers: HeaderMap,
    Query(interval): Query<StatInterval>,
    ws: WebSocketUpgrade,
) -> Response {
    if let Err(e) = interval.period() {
        return ApiError(e).into_response();
    }
    let call = call_info(&headers, full_method(ADMIN_SERVICE, "Statistics"));
    ws.on_upgrade(move |socket| async move {
        run_session(socket, |sink| async move {
            server.statistics(call, interval, sink).await
        })
        .await;
    })
}

// --------------------
// Session loop
// --------------------
async fn run_session<F, Fut>(socket: WebSocket, stream: F)
where
    F: FnOnce(WsSink) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let (out_tx, mut out_rx) = mpsc::channel::<Message>(OUTBOUND_QUEUE);
    let (mut ws_tx, mut ws_rx) = socket.split();

    let stream = stream(WsSink { tx: out_tx });
    tokio::pin!(stream);

    let outcome = loop {
        tokio::select! {
            res = &mut stream => break Some(res),

            // outbound writer
            maybe_out = out_rx.recv() => {
                let Some(m) = maybe_out else { break None };
                if ws_tx.send(m).await.is_err() {
                    break None;
                }
            }

            // inbound: only lifecycle frames matter here
            incoming = ws_rx.next() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break None,
                    Some(Ok(_)) => {}
                }
            }
        }
    };

    match outcome {
        Some(Ok(())) => {
            // drain what the stream queued before it stopped
            while let Ok(m) = out_rx.try_recv() {
                if ws_tx.send(m).await.is_err() {
                    return;
                }
            }
            let _ = ws_tx.send(Message::Close(None)).await;
        }
        Some(Err(e)) => {
            tracing::debug!(
                error = %e,
                code = e.client_code().as_str(),
                "admin stream ended with error"
            );
            let _ = ws_tx.send(Message::Text(error_json(&e).to_string())).await;
            let _ = ws_tx.send(Message::Close(None)).await;
        }
        None => tracing::debug!("admin stream client went away"),
    }
}
