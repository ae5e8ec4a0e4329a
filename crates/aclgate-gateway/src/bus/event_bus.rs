use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use aclgate_core::protocol::{Event, StatDelta};

use super::registry::{SubscriberId, SubscriberRegistry};

/// Publishing side held by interceptors. Cheap to clone; never blocks.
#[derive(Clone)]
pub struct BusHandle {
    events: mpsc::UnboundedSender<Event>,
    stats: mpsc::UnboundedSender<StatDelta>,
}

impl BusHandle {
    pub fn publish_event(&self, event: Event) {
        if self.events.send(event).is_err() {
            tracing::trace!("event dropped: dispatcher stopped");
        }
    }

    pub fn publish_stat(&self, delta: StatDelta) {
        if self.stats.send(delta).is_err() {
            tracing::trace!("stat dropped: dispatcher stopped");
        }
    }
}

/// Single dispatch loop owning both intake queues.
pub struct EventBus {
    events: mpsc::UnboundedReceiver<Event>,
    stats: mpsc::UnboundedReceiver<StatDelta>,
    registry: Arc<SubscriberRegistry>,
}

/// Create the intake queues for a registry.
pub fn channel(registry: Arc<SubscriberRegistry>) -> (BusHandle, EventBus) {
    let (ev_tx, ev_rx) = mpsc::unbounded_channel();
    let (st_tx, st_rx) = mpsc::unbounded_channel();
    (
        BusHandle { events: ev_tx, stats: st_tx },
        EventBus { events: ev_rx, stats: st_rx, registry },
    )
}

impl EventBus {
    /// Run until `shutdown` fires or every publisher is gone.
    ///
    /// Delivery is at-most-once and in submission order per queue. Each
    /// subscriber send is awaited in registration order, so a subscriber with
    /// a full buffer delays the ones registered after it.
    ///
    /// Shutdown is checked before every receive. The two intake queues are
    /// polled in random order so a busy queue cannot starve the other.
    pub async fn run(mut self, shutdown: CancellationToken) {
        tracing::info!("event bus started");
        while !shutdown.is_cancelled() {
            tokio::select! {
                _ = shutdown.cancelled() => break,

                Some(event) = self.events.recv() => {
                    let targets = self.registry.log_targets();
                    if !deliver(&targets, event, &shutdown).await {
                        break;
                    }
                }

                Some(delta) = self.stats.recv() => {
                    let targets = self.registry.stat_targets();
                    if !deliver(&targets, delta, &shutdown).await {
                        break;
                    }
                }

                else => break,
            }
        }
        tracing::info!("event bus stopped");
    }
}

/// Returns false when shutdown interrupted delivery.
async fn deliver<T: Clone>(
    targets: &[(SubscriberId, mpsc::Sender<T>)],
    item: T,
    shutdown: &CancellationToken,
) -> bool {
    for (id, tx) in targets {
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => return false,
            res = tx.send(item.clone()) => {
                // receiver dropped between snapshot and send; its guard detaches it
                if res.is_err() {
                    tracing::debug!(subscriber = *id, "subscriber gone during delivery");
                }
            }
        }
    }
    true
}
