use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use aclgate_core::error::Result;
use aclgate_core::protocol::Event;

use super::sink::StreamSink;
use crate::bus::SubscriptionGuard;

/// Live tail of raw events for one external client.
pub struct LogSubscription {
    guard: SubscriptionGuard,
    rx: mpsc::Receiver<Event>,
    shutdown: CancellationToken,
}

impl LogSubscription {
    pub(crate) fn new(
        guard: SubscriptionGuard,
        rx: mpsc::Receiver<Event>,
        shutdown: CancellationToken,
    ) -> Self {
        Self { guard, rx, shutdown }
    }

    pub fn id(&self) -> u64 {
        self.guard.id()
    }

    /// Forward events verbatim until shutdown (`Ok`) or a failed write (`Err`).
    pub async fn run<S: StreamSink<Event>>(mut self, mut sink: S) -> Result<()> {
        loop {
            tokio::select! {
                biased;

                _ = self.shutdown.cancelled() => return Ok(()),

                maybe = self.rx.recv() => {
                    // sender side lives in the registry until our guard drops
                    let Some(event) = maybe else { return Ok(()) };
                    if let Err(e) = sink.send(event).await {
                        tracing::warn!(
                            subscriber = self.guard.id(),
                            error = %e,
                            "log stream delivery failed"
                        );
                        return Err(e);
                    }
                }
            }
        }
    }
}
