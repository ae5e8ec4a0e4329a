//! Telemetry records produced by the call interceptor.
//!
//! `Event` goes to log tailers verbatim. `Stat` is used in two roles: a
//! single-call delta (one entry with count 1 in each map) and an accumulated
//! snapshot owned by one statistics subscriber.

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// One authorized call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unix seconds at emission.
    pub timestamp: u64,
    pub consumer: String,
    pub method: String,
    pub host: String,
}

impl Event {
    /// Stamp a new event with the current wall clock.
    pub fn new(
        consumer: impl Into<String>,
        method: impl Into<String>,
        host: impl Into<String>,
    ) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Self {
            timestamp,
            consumer: consumer.into(),
            method: method.into(),
            host: host.into(),
        }
    }
}

/// Per-consumer / per-method call counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    /// Unix seconds at which the snapshot was taken (0 for deltas).
    #[serde(default)]
    pub timestamp: u64,
    #[serde(default)]
    pub by_method: BTreeMap<String, u64>,
    #[serde(default)]
    pub by_consumer: BTreeMap<String, u64>,
}

/// One unit increment produced per authorized call.
pub type StatDelta = Stat;
/// Accumulated window emitted by a statistics subscriber.
pub type StatSnapshot = Stat;

impl Stat {
    /// Delta for exactly one call.
    pub fn delta(consumer: &str, method: &str) -> StatDelta {
        let mut s = Stat::default();
        s.by_consumer.insert(consumer.to_string(), 1);
        s.by_method.insert(method.to_string(), 1);
        s
    }

    /// Sum `other` into `self`; unseen keys are inserted with their count.
    pub fn merge(&mut self, other: &Stat) {
        for (k, v) in &other.by_method {
            *self.by_method.entry(k.clone()).or_insert(0) += v;
        }
        for (k, v) in &other.by_consumer {
            *self.by_consumer.entry(k.clone()).or_insert(0) += v;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.by_method.is_empty() && self.by_consumer.is_empty()
    }

    /// Move the accumulated counts out, leaving `self` empty.
    pub fn take_snapshot(&mut self) -> StatSnapshot {
        let mut snap = std::mem::take(self);
        snap.timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        snap
    }
}
