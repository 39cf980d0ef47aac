// SPDX-License-Identifier: GPL-3.0-only

//! Arbitration configuration
//!
//! Parses the TOML configuration that fixes the administrative and unknown
//! identities, the default permission mode and the device node directory.
//! Every field has a default, so an empty document is a valid configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Identities and mode applied while resolving disk ownership
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityPolicy {
    /// Administrative owner (root)
    pub admin_uid: u32,

    /// Administrative group (admin)
    pub admin_gid: u32,

    /// Owner used when no exclusive real owner exists
    pub unknown_uid: u32,

    /// Group used when no exclusive real owner exists
    pub unknown_gid: u32,

    /// Permission mode when no explicit mode hint is present
    pub default_mode: u32,
}

impl Default for IdentityPolicy {
    fn default() -> Self {
        Self {
            admin_uid: 0,
            admin_gid: 80,
            unknown_uid: 99,
            unknown_gid: 99,
            default_mode: 0o755,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArbitrationConfig {
    pub identity: IdentityPolicy,

    /// Directory holding block device special files
    pub device_dir: String,
}

impl Default for ArbitrationConfig {
    fn default() -> Self {
        Self {
            identity: IdentityPolicy::default(),
            device_dir: "/dev".to_string(),
        }
    }
}

impl ArbitrationConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.device_dir.is_empty() || !self.device_dir.starts_with('/') {
            return Err(ConfigError::Invalid(format!(
                "device_dir must be an absolute path, got {:?}",
                self.device_dir
            )));
        }

        if self.identity.default_mode > 0o7777 {
            return Err(ConfigError::Invalid(format!(
                "default_mode {:o} has bits outside 07777",
                self.identity.default_mode
            )));
        }

        Ok(())
    }

    /// Block device node path for a BSD name, e.g. `/dev/disk2`
    pub fn device_path(&self, bsd_name: &str) -> String {
        format!("{}/{}", self.device_dir.trim_end_matches('/'), bsd_name)
    }

    /// Raw (character) device node path for a BSD name, e.g. `/dev/rdisk2`
    pub fn raw_device_path(&self, bsd_name: &str) -> String {
        format!("{}/r{}", self.device_dir.trim_end_matches('/'), bsd_name)
    }
}
