use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;

use aclgate_core::protocol::{Event, StatDelta};

pub type SubscriberId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriberKind {
    Log,
    Stat,
}

impl SubscriberKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SubscriberKind::Log => "log",
            SubscriberKind::Stat => "stat",
        }
    }
}

#[derive(Default)]
struct Slots {
    logs: Vec<(SubscriberId, mpsc::Sender<Event>)>,
    stats: Vec<(SubscriberId, mpsc::Sender<StatDelta>)>,
}

/// Subscriber registry:
/// - log tailers (raw `Event`s)
/// - statistics aggregators (`StatDelta`s)
///
/// One lock covers both lists. It is held to append, remove, or snapshot
/// senders, never across a send.
pub struct SubscriberRegistry {
    slots: Mutex<Slots>,
    seq: AtomicU64,
    buffer: usize,
}

impl SubscriberRegistry {
    pub fn new(buffer: usize) -> Self {
        Self {
            slots: Mutex::new(Slots::default()),
            seq: AtomicU64::new(1),
            buffer: buffer.max(1),
        }
    }

    // poisoning cannot leave the lists half-updated
    fn lock(&self) -> MutexGuard<'_, Slots> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn register_log(self: &Arc<Self>) -> (SubscriptionGuard, mpsc::Receiver<Event>) {
        let (tx, rx) = mpsc::channel(self.buffer);
        let id = self.seq.fetch_add(1, Ordering::Relaxed);
        self.lock().logs.push((id, tx));
        (self.guard(SubscriberKind::Log, id), rx)
    }

    pub fn register_stat(self: &Arc<Self>) -> (SubscriptionGuard, mpsc::Receiver<StatDelta>) {
        let (tx, rx) = mpsc::channel(self.buffer);
        let id = self.seq.fetch_add(1, Ordering::Relaxed);
        self.lock().stats.push((id, tx));
        (self.guard(SubscriberKind::Stat, id), rx)
    }

    fn guard(self: &Arc<Self>, kind: SubscriberKind, id: SubscriberId) -> SubscriptionGuard {
        tracing::info!(subscriber = id, kind = kind.as_str(), "subscriber attached");
        SubscriptionGuard {
            registry: Arc::clone(self),
            kind,
            id,
        }
    }

    fn remove(&self, kind: SubscriberKind, id: SubscriberId) {
        let mut slots = self.lock();
        match kind {
            SubscriberKind::Log => slots.logs.retain(|(sid, _)| *sid != id),
            SubscriberKind::Stat => slots.stats.retain(|(sid, _)| *sid != id),
        }
    }

    /// Log senders in registration order.
    pub fn log_targets(&self) -> Vec<(SubscriberId, mpsc::Sender<Event>)> {
        self.lock().logs.clone()
    }

    /// Stat senders in registration order.
    pub fn stat_targets(&self) -> Vec<(SubscriberId, mpsc::Sender<StatDelta>)> {
        self.lock().stats.clone()
    }

    pub fn log_count(&self) -> usize {
        self.lock().logs.len()
    }

    pub fn stat_count(&self) -> usize {
        self.lock().stats.len()
    }
}

/// Keeps one delivery channel registered; dropping it detaches the channel.
pub struct SubscriptionGuard {
    registry: Arc<SubscriberRegistry>,
    kind: SubscriberKind,
    id: SubscriberId,
}

impl SubscriptionGuard {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    pub fn kind(&self) -> SubscriberKind {
        self.kind
    }
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        self.registry.remove(self.kind, self.id);
        tracing::info!(subscriber = self.id, kind = self.kind.as_str(), "subscriber detached");
    }
}
