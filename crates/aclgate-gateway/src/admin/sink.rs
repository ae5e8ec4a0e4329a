use async_trait::async_trait;
use tokio::sync::mpsc;

use aclgate_core::error::{GateError, Result};

/// Outbound half of a server-streaming call.
///
/// Transports implement this over their connection; a failed send ends the
/// subscription that owns the sink.
#[async_trait]
pub trait StreamSink<T: Send + 'static>: Send {
    async fn send(&mut self, item: T) -> Result<()>;
}

/// In-process sink, handy for embedding and tests.
#[async_trait]
impl<T: Send + 'static> StreamSink<T> for mpsc::Sender<T> {
    async fn send(&mut self, item: T) -> Result<()> {
        mpsc::Sender::send(self, item)
            .await
            .map_err(|_| GateError::Delivery("stream receiver closed".into()))
    }
}

#[async_trait]
impl<T: Send + 'static> StreamSink<T> for mpsc::UnboundedSender<T> {
    async fn send(&mut self, item: T) -> Result<()> {
        mpsc::UnboundedSender::send(self, item)
            .map_err(|_| GateError::Delivery("stream receiver closed".into()))
    }
}
