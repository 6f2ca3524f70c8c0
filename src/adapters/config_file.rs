//! JSON file configuration adapter.
//!
//! Implements [`ConfigPort`] for the instance configuration document the
//! host writes before starting the bridge.
//!
//! # Security
//!
//! - Every field is validated before the config is handed out.
//! - The user key never appears in logs (see `BridgeConfig`'s `Debug`).

use std::io::ErrorKind;
use std::path::PathBuf;

use log::info;

use super::utils::{is_hex, is_mac_address, is_printable_ascii};
use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::BridgeConfig;

/// Length of the hex-encoded 128-bit user key.
const USER_KEY_HEX_LEN: usize = 32;

pub struct FileConfigAdapter {
    path: PathBuf,
}

impl FileConfigAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse and validate a configuration document.
    pub fn parse(json: &str) -> Result<BridgeConfig, ConfigError> {
        let config: BridgeConfig = serde_json::from_str(json).map_err(|e| {
            log::warn!("Config parse error: {}", e);
            ConfigError::Corrupted
        })?;
        validate_config(&config)?;
        Ok(config)
    }
}

pub fn validate_config(cfg: &BridgeConfig) -> Result<(), ConfigError> {
    if !is_mac_address(&cfg.mac_address) {
        return Err(ConfigError::ValidationFailed(
            "mac_address must be six colon-separated hex octets",
        ));
    }
    if !is_hex(&cfg.user_key, USER_KEY_HEX_LEN) {
        return Err(ConfigError::ValidationFailed(
            "user_key must be 32 hex characters",
        ));
    }
    if cfg.namespace.is_empty() || !is_printable_ascii(&cfg.namespace) {
        return Err(ConfigError::ValidationFailed(
            "namespace must be non-empty printable ASCII",
        ));
    }
    if cfg.namespace.contains('*') || cfg.namespace.ends_with('.') {
        return Err(ConfigError::ValidationFailed(
            "namespace must not contain '*' or end with '.'",
        ));
    }
    Ok(())
}

impl ConfigPort for FileConfigAdapter {
    fn load(&self) -> Result<BridgeConfig, ConfigError> {
        let json = std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::NotFound,
            _ => ConfigError::IoError,
        })?;
        let config = Self::parse(&json)?;
        info!("Config loaded from {}", self.path.display());
        Ok(config)
    }
}
