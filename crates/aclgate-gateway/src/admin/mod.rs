//! Admin streams (live log tail + periodic statistics).
//!
//! Each stream owns one registry entry for its whole lifetime and ends on the
//! shared shutdown signal, or on the first failed write to its sink.

mod logging;
mod service;
mod sink;
mod statistics;

pub use logging::LogSubscription;
pub use service::{AdminService, ADMIN_SERVICE};
pub use sink::StreamSink;
pub use statistics::StatAggregator;
