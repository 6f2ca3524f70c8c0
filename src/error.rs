//! Unified error type for the bridge.
//!
//! Port-level errors ([`DeviceError`], [`StoreError`], [`ConfigError`])
//! are defined next to their traits in [`crate::app::ports`]; this module
//! funnels them into one enum so startup code has a single error path.

use core::fmt;

use crate::app::ports::{ConfigError, DeviceError, StoreError};

// ---------------------------------------------------------------------------
// Top-level bridge error
// ---------------------------------------------------------------------------

/// Every fallible bridge operation funnels into this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The lock could not be reached or refused a request.
    Device(DeviceError),
    /// The host state store rejected a request.
    Store(StoreError),
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Device(e) => write!(f, "device: {e}"),
            Self::Store(e) => write!(f, "store: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<DeviceError> for Error {
    fn from(e: DeviceError) -> Self {
        Self::Device(e)
    }
}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
