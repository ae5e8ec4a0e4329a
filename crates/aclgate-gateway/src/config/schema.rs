use serde::Deserialize;
use aclgate_core::error::{GateError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default = "default_acl_file")]
    pub acl_file: String,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(GateError::Config(format!(
                "unsupported config version: {}",
                self.version
            )));
        }
        if self.acl_file.trim().is_empty() {
            return Err(GateError::Config("acl_file must not be empty".into()));
        }

        self.gateway.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Value stamped into every telemetry `Event.host`.
    #[serde(default = "default_host")]
    pub host: String,

    /// Capacity of each subscriber's delivery channel.
    #[serde(default = "default_subscriber_buffer")]
    pub subscriber_buffer: usize,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            host: default_host(),
            subscriber_buffer: default_subscriber_buffer(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(GateError::Config("gateway.host must not be empty".into()));
        }
        if !(1..=65536).contains(&self.subscriber_buffer) {
            return Err(GateError::Config(
                "gateway.subscriber_buffer must be between 1 and 65536".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "127.0.0.1:8082".into()
}
fn default_host() -> String {
    "127.0.0.1:8083".into()
}
fn default_subscriber_buffer() -> usize {
    64
}
fn default_acl_file() -> String {
    "acl.json".into()
}
