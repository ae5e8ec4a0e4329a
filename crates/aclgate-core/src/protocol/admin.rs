//! Admin / business request shapes.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{GateError, Result};

/// Empty request/response body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nothing {}

/// Statistics subscribe request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatInterval {
    pub interval_seconds: u64,
}

impl StatInterval {
    pub fn new(interval_seconds: u64) -> Self {
        Self { interval_seconds }
    }

    /// Tick period. Zero is rejected before any subscription exists.
    pub fn period(&self) -> Result<Duration> {
        if self.interval_seconds == 0 {
            return Err(GateError::InvalidArgument(
                "interval_seconds must be positive".into(),
            ));
        }
        Ok(Duration::from_secs(self.interval_seconds))
    }
}
