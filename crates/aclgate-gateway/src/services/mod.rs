//! Built-in unary services.

pub mod biz;

pub use biz::{BizService, BIZ_SERVICE};
