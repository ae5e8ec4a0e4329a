//! Call interception (authorization + telemetry).
//!
//! Every unary and streaming call passes through [`CallInterceptor`] before
//! its handler runs. Both call shapes share one admit routine.

mod interceptor;

pub use interceptor::{CallCtx, CallInfo, CallInterceptor};
