//! Bridge configuration parameters
//!
//! Supplied by the host platform as a JSON document when the instance
//! starts.  Missing fields fall back to [`BridgeConfig::default`].

use core::fmt;
use core::time::Duration;

use serde::{Deserialize, Serialize};

/// Instance configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    // --- Device ---
    /// Bluetooth MAC address of the lock (`AA:BB:CC:DD:EE:FF`)
    pub mac_address: String,
    /// User slot registered on the lock
    pub user_id: u8,
    /// 128-bit user key as 32 hex characters
    pub user_key: String,

    // --- Timing ---
    /// Idle time before the BLE link is dropped (seconds, 0 = never)
    pub auto_disconnect_time: u32,
    /// Periodic status refresh interval (seconds, 0 = never)
    pub status_update_time: u32,

    // --- Host ---
    /// Id prefix of this instance's states in the host store
    pub namespace: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            mac_address: String::new(),
            user_id: 255,
            user_key: String::new(),

            auto_disconnect_time: 30,
            status_update_time: 600, // 10 min

            namespace: "keyble.0".into(),
        }
    }
}

impl BridgeConfig {
    /// Parameters handed to the device connector.
    pub fn connection_params(&self) -> ConnectionParams {
        ConnectionParams {
            address: self.mac_address.clone(),
            user_id: self.user_id,
            user_key: self.user_key.clone(),
            auto_disconnect: non_zero_secs(self.auto_disconnect_time),
            status_poll: non_zero_secs(self.status_update_time),
        }
    }
}

// The key is a credential; keep it out of startup logs.
impl fmt::Debug for BridgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeConfig")
            .field("mac_address", &self.mac_address)
            .field("user_id", &self.user_id)
            .field("user_key", &"<redacted>")
            .field("auto_disconnect_time", &self.auto_disconnect_time)
            .field("status_update_time", &self.status_update_time)
            .field("namespace", &self.namespace)
            .finish()
    }
}

/// Connection parameters consumed by a [`LockConnector`](crate::app::ports::LockConnector).
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    pub address: String,
    pub user_id: u8,
    pub user_key: String,
    /// `None` keeps the link up indefinitely.
    pub auto_disconnect: Option<Duration>,
    /// `None` disables periodic status refresh.
    pub status_poll: Option<Duration>,
}

impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("address", &self.address)
            .field("user_id", &self.user_id)
            .field("auto_disconnect", &self.auto_disconnect)
            .field("status_poll", &self.status_poll)
            .finish_non_exhaustive()
    }
}

fn non_zero_secs(secs: u32) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(u64::from(secs)))
}
