use async_trait::async_trait;
use serde_json::Value;

use aclgate_core::error::{GateError, Result};
use aclgate_core::protocol::Nothing;

use crate::dispatch::UnaryService;
use crate::intercept::CallCtx;

pub const BIZ_SERVICE: &str = "main.Biz";

/// Business stubs. Every method accepts and returns `Nothing`; the point is
/// that calls to them are authorized and counted.
#[derive(Default)]
pub struct BizService;

impl BizService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UnaryService for BizService {
    fn service(&self) -> &'static str {
        BIZ_SERVICE
    }

    async fn call(&self, ctx: CallCtx, method: &str, req: Value) -> Result<Value> {
        match method {
            "Check" | "Add" | "Test" => {
                let _: Nothing = serde_json::from_value(req).map_err(|e| {
                    GateError::InvalidArgument(format!("{method} expects Nothing: {e}"))
                })?;
                serde_json::to_value(Nothing::default())
                    .map_err(|e| GateError::Internal(format!("json encode failed: {e}")))
            }
            _ => Err(GateError::UnknownMethod(ctx.method().to_string())),
        }
    }
}
