//! Gateway config loader (strict parsing).
//!
//! The gateway config is YAML; the ACL it points to is a JSON document
//! compiled by [`crate::policy::AccessControlTable`].

pub mod schema;

use std::fs;

use aclgate_core::error::{GateError, Result};

use crate::policy::AccessControlTable;

pub use schema::{GatewayConfig, GatewaySection};

pub fn load_from_file(path: &str) -> Result<GatewayConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| GateError::Config(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let cfg: GatewayConfig = serde_yaml::from_str(s)
        .map_err(|e| GateError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_acl_from_file(path: &str) -> Result<AccessControlTable> {
    let s = fs::read_to_string(path)
        .map_err(|e| GateError::Config(format!("read acl failed ({path}): {e}")))?;
    AccessControlTable::from_json(&s)
}
