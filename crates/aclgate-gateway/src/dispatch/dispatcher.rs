use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use aclgate_core::error::{GateError, Result};
use aclgate_core::protocol::method::split_method;

use crate::intercept::CallCtx;

/// Unary services addressed as `/<service>/<method>`.
#[async_trait]
pub trait UnaryService: Send + Sync {
    fn service(&self) -> &'static str;
    async fn call(&self, ctx: CallCtx, method: &str, req: Value) -> Result<Value>;
}

/// Registry and dispatcher for unary services.
#[derive(Default)]
pub struct Dispatcher {
    unary: DashMap<&'static str, Arc<dyn UnaryService>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            unary: DashMap::new(),
        }
    }

    pub fn register(&self, svc: Arc<dyn UnaryService>) {
        self.unary.insert(svc.service(), svc);
    }

    pub fn registered_services(&self) -> Vec<&'static str> {
        self.unary.iter().map(|e| *e.key()).collect()
    }

    pub async fn dispatch_unary(&self, ctx: CallCtx, req: Value) -> Result<Value> {
        let full = ctx.method().to_string();
        let (svc, method) = split_method(&full)
            .ok_or_else(|| GateError::InvalidArgument(format!("malformed method path: {full}")))?;
        let handler = self
            .unary
            .get(svc)
            .ok_or_else(|| GateError::UnknownMethod(full.clone()))?
            .value()
            .clone();
        handler.call(ctx, method, req).await
    }
}
