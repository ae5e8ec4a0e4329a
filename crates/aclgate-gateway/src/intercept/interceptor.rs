use std::future::Future;
use std::sync::Arc;

use aclgate_core::error::{GateError, Result};
use aclgate_core::protocol::{Event, Stat};

use crate::bus::BusHandle;
use crate::policy::{AuthDecision, Authorizer};

/// Inbound call as seen by the interceptor.
#[derive(Debug, Clone)]
pub struct CallInfo {
    consumer: Option<String>,
    method: String,
}

impl CallInfo {
    pub fn new(consumer: Option<String>, method: impl Into<String>) -> Self {
        Self {
            consumer,
            method: method.into(),
        }
    }

    /// Build from every value the transport found under the `consumer` key.
    /// Anything but exactly one value leaves the call unidentified.
    pub fn from_metadata<I, S>(values: I, method: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut it = values.into_iter();
        let consumer = match (it.next(), it.next()) {
            (Some(only), None) => Some(only.into()),
            _ => None,
        };
        Self::new(consumer, method)
    }

    pub fn consumer(&self) -> Option<&str> {
        self.consumer.as_deref()
    }

    pub fn method(&self) -> &str {
        &self.method
    }
}

/// Identity of an admitted call, handed to the wrapped handler.
#[derive(Debug, Clone)]
pub struct CallCtx {
    consumer: Arc<str>,
    method: Arc<str>,
}

impl CallCtx {
    pub fn consumer(&self) -> &str {
        &self.consumer
    }

    pub fn method(&self) -> &str {
        &self.method
    }
}

pub struct CallInterceptor {
    authorizer: Arc<Authorizer>,
    bus: BusHandle,
    host: Arc<str>,
}

impl CallInterceptor {
    pub fn new(authorizer: Arc<Authorizer>, bus: BusHandle, host: impl Into<Arc<str>>) -> Self {
        Self {
            authorizer,
            bus,
            host: host.into(),
        }
    }

    /// Authorize, then publish exactly one Event and one StatDelta.
    /// Denied calls never reach the bus.
    pub fn admit(&self, call: &CallInfo) -> Result<CallCtx> {
        let decision = self.authorizer.check(call.consumer(), call.method());
        if let AuthDecision::Deny { reason } = decision {
            tracing::debug!(
                consumer = call.consumer().unwrap_or("-"),
                method = call.method(),
                reason,
                "call denied"
            );
            return Err(GateError::Unauthenticated(reason.into()));
        }

        let consumer: Arc<str> = call.consumer().unwrap_or_default().into();
        let method: Arc<str> = call.method().into();

        self.bus.publish_event(Event::new(&*consumer, &*method, &*self.host));
        self.bus.publish_stat(Stat::delta(&consumer, &method));

        Ok(CallCtx { consumer, method })
    }

    /// Single-response adapter.
    pub async fn unary<Req, Resp, F, Fut>(
        &self,
        call: CallInfo,
        req: Req,
        handler: F,
    ) -> Result<Resp>
    where
        F: FnOnce(CallCtx, Req) -> Fut,
        Fut: Future<Output = Result<Resp>>,
    {
        let ctx = self.admit(&call)?;
        handler(ctx, req).await
    }

    /// Streaming adapter. `stream` is the transport's outbound half.
    pub async fn streaming<S, F, Fut>(&self, call: CallInfo, stream: S, handler: F) -> Result<()>
    where
        F: FnOnce(CallCtx, S) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let ctx = self.admit(&call)?;
        handler(ctx, stream).await
    }
}
