//! ACL compilation and matching utilities.
//!
//! Document shape: `{"consumer": ["/svc/Method", "/svc/*", ...]}`. A pattern
//! containing `*` is a service wildcard; anything else is an exact method.

use std::collections::HashMap;

use aclgate_core::error::{GateError, Result};
use aclgate_core::protocol::method::service_of;

/// Compiled ACL entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodRule {
    Exact(String),
    /// Service segment of a `"<service>/*"` pattern.
    Service(String),
}

impl MethodRule {
    pub fn compile(raw: &str) -> Self {
        if raw.contains('*') {
            MethodRule::Service(service_of(raw).to_string())
        } else {
            MethodRule::Exact(raw.to_string())
        }
    }
}

/// consumer -> ordered rules. Never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct AccessControlTable {
    rules: HashMap<String, Vec<MethodRule>>,
}

impl AccessControlTable {
    /// Parse and compile an ACL JSON document.
    pub fn from_json(s: &str) -> Result<Self> {
        let raw: HashMap<String, Vec<String>> = serde_json::from_str(s)
            .map_err(|e| GateError::Config(format!("invalid acl json: {e}")))?;
        Ok(Self::from_map(raw))
    }

    pub fn from_map(raw: HashMap<String, Vec<String>>) -> Self {
        let rules = raw
            .into_iter()
            .map(|(consumer, patterns)| {
                let compiled = patterns.iter().map(|p| MethodRule::compile(p)).collect();
                (consumer, compiled)
            })
            .collect();
        Self { rules }
    }

    pub fn rules_for(&self, consumer: &str) -> Option<&[MethodRule]> {
        self.rules.get(consumer).map(Vec::as_slice)
    }

    pub fn consumers(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Only the first rule is inspected for a wildcard: a wildcard consumer is
/// matched on its first pattern's service alone, everyone else by exact scan.
pub fn is_method_allowed(rules: &[MethodRule], method: &str) -> bool {
    match rules.first() {
        None => false,
        Some(MethodRule::Service(svc)) => service_of(method) == svc,
        Some(MethodRule::Exact(_)) => rules.iter().any(|r| match r {
            MethodRule::Exact(m) => m == method,
            MethodRule::Service(_) => false,
        }),
    }
}
