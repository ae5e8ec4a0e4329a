use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use aclgate_core::error::Result;
use aclgate_core::protocol::StatInterval;

use super::{LogSubscription, StatAggregator};
use crate::bus::SubscriberRegistry;

/// Admin service name as it appears in method paths.
pub const ADMIN_SERVICE: &str = "main.Admin";

/// Factory for admin streams. Registration is synchronous, so a subscription
/// sees every call admitted after `subscribe_*` returns.
#[derive(Clone)]
pub struct AdminService {
    registry: Arc<SubscriberRegistry>,
    shutdown: CancellationToken,
}

impl AdminService {
    pub fn new(registry: Arc<SubscriberRegistry>, shutdown: CancellationToken) -> Self {
        Self { registry, shutdown }
    }

    pub fn subscribe_logs(&self) -> LogSubscription {
        let (guard, rx) = self.registry.register_log();
        LogSubscription::new(guard, rx, self.shutdown.clone())
    }

    /// Rejects a zero interval before anything is registered.
    pub fn subscribe_stats(&self, interval: StatInterval) -> Result<StatAggregator> {
        let period = interval.period()?;
        let (guard, rx) = self.registry.register_stat();
        tracing::debug!(
            subscriber = guard.id(),
            interval_secs = interval.interval_seconds,
            "stat window configured"
        );
        Ok(StatAggregator::new(guard, rx, period, self.shutdown.clone()))
    }

    pub fn registry(&self) -> &Arc<SubscriberRegistry> {
        &self.registry
    }
}
