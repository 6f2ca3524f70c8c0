//! Port traits — the hexagonal boundary between the bridge core and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Bridge (domain)
//! ```
//!
//! Driven adapters (lock link, host state store, event sinks, config
//! source) implement these traits.  The [`Bridge`](super::service::Bridge)
//! consumes them via generics, so the core never touches BLE or the host
//! process directly.
//!
//! ## Delivery model
//!
//! Inbound traffic (status codes, store notifications) does not arrive
//! through these traits.  Adapters push it onto the
//! [`EventBus`](crate::events::EventBus); the bridge drains the bus one
//! event at a time.

use core::fmt;

use crate::config::{BridgeConfig, ConnectionParams};
use crate::lock::schema::{StateDef, StateValue};

// ───────────────────────────────────────────────────────────────
// Lock port (driven adapter: domain → device)
// ───────────────────────────────────────────────────────────────

/// Commands toward one connected lock.
///
/// `lock`, `unlock` and `open` are fire-and-forget.  Their outcome shows
/// up later as a status event; an adapter that cannot even queue the
/// command logs it and returns.
pub trait LockPort {
    fn lock(&mut self);

    fn unlock(&mut self);

    fn open(&mut self);

    /// Tear down the link.  Blocks until the adapter has accepted the
    /// request so shutdown can be sequenced after it.
    fn disconnect(&mut self) -> Result<(), DeviceError>;
}

/// Builds a [`LockPort`] from connection parameters.
pub trait LockConnector {
    type Lock: LockPort;

    fn connect(&mut self, params: &ConnectionParams) -> Result<Self::Lock, DeviceError>;
}

// ───────────────────────────────────────────────────────────────
// State store port (driven adapter: domain → host)
// ───────────────────────────────────────────────────────────────

/// Outcome of a create-if-absent registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Created,
    AlreadyExists,
    /// Declaration sent; the host does not say whether it was new.
    Requested,
}

/// Host key-value store.  State ids are namespace-relative (`unlocked`,
/// not `keyble.0.unlocked`); the host applies the instance prefix.
pub trait StateStorePort {
    /// Declare a state object.  MUST NOT overwrite an existing declaration.
    fn register_state(&mut self, def: &StateDef) -> Result<Registration, StoreError>;

    /// Start receiving change notifications for ids matching `pattern`
    /// (`*` = the whole namespace).
    fn subscribe(&mut self, pattern: &str) -> Result<(), StoreError>;

    /// Write a value.  The bridge only ever publishes with `ack = true`.
    fn publish(&mut self, id: &str, value: &StateValue, ack: bool) -> Result<(), StoreError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The bridge emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port
// ───────────────────────────────────────────────────────────────

/// Loads instance configuration.
///
/// Implementations MUST validate before returning; invalid values are
/// rejected with [`ConfigError::ValidationFailed`], not clamped.
pub trait ConfigPort {
    fn load(&self) -> Result<BridgeConfig, ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`LockPort`] / [`LockConnector`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// No live link (never connected, or already disconnected).
    NotConnected,
    /// Link setup failed.
    ConnectFailed(&'static str),
    /// The adapter's command queue is full.
    QueueFull,
}

/// Errors from [`StateStorePort`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The host is not reachable.
    Unavailable,
    /// The host refused the request.
    Rejected(&'static str),
    /// Generic I/O error on the host channel.
    IoError,
}

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No configuration document found.
    NotFound,
    /// Document is not valid JSON for [`BridgeConfig`].
    Corrupted,
    /// A field failed validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error reading the document.
    IoError,
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConnected => write!(f, "not connected"),
            Self::ConnectFailed(msg) => write!(f, "connect failed: {}", msg),
            Self::QueueFull => write!(f, "command queue full"),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "store unavailable"),
            Self::Rejected(msg) => write!(f, "rejected: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for DeviceError {}
impl std::error::Error for StoreError {}
impl std::error::Error for ConfigError {}
