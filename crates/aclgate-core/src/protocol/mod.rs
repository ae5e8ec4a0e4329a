//! Protocol modules (method paths + telemetry records).
//!
//! - `method`: fully qualified `/<service>/<method>` names.
//! - `telemetry`: `Event` and `Stat` records broadcast to admin subscribers.
//! - `admin`: request/response shapes of the admin and business services.

pub mod admin;
pub mod method;
pub mod telemetry;

pub use admin::{Nothing, StatInterval};
pub use telemetry::{Event, Stat, StatDelta, StatSnapshot};
