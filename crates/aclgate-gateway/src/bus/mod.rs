//! Telemetry fan-out (egress engine) for the gateway.
//!
//! Interceptors publish into two unbounded intake queues; one dispatch task
//! copies every item to each subscriber channel registered at that instant.

mod event_bus;
mod registry;

pub use event_bus::{channel, BusHandle, EventBus};
pub use registry::{SubscriberId, SubscriberKind, SubscriberRegistry, SubscriptionGuard};
