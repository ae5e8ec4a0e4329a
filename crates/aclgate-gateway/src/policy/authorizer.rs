use std::sync::Arc;

use super::acl::{is_method_allowed, AccessControlTable};

/// Decision from ACL evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDecision {
    Allow,
    Deny { reason: &'static str },
}

impl AuthDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AuthDecision::Allow)
    }
}

/// Pure allow/deny over an immutable table.
/// Construct once at startup, then share via Arc; no locking on lookup.
#[derive(Debug, Clone)]
pub struct Authorizer {
    acl: Arc<AccessControlTable>,
}

impl Authorizer {
    pub fn new(acl: AccessControlTable) -> Self {
        Self { acl: Arc::new(acl) }
    }

    pub fn acl(&self) -> &AccessControlTable {
        &self.acl
    }

    pub fn check(&self, consumer: Option<&str>, method: &str) -> AuthDecision {
        let Some(consumer) = consumer else {
            return AuthDecision::Deny { reason: "missing consumer metadata" };
        };

        let Some(rules) = self.acl.rules_for(consumer) else {
            return AuthDecision::Deny { reason: "unknown consumer" };
        };

        if rules.is_empty() {
            return AuthDecision::Deny { reason: "empty acl (strict deny)" };
        }

        if !is_method_allowed(rules, method) {
            return AuthDecision::Deny { reason: "method not allowed" };
        }

        AuthDecision::Allow
    }
}
