//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                 |
//! |----------------|--------------------|-----------------------------|
//! | `config_file`  | ConfigPort         | JSON config document        |
//! | `log_sink`     | EventSink          | `log` facade                |
//! | `memory_store` | StateStorePort     | in-memory object database   |
//! | `sim_lock`     | LockConnector      | simulated lock mechanism    |
//! |                | LockPort           |                             |
//! | `stdio_host`   | StateStorePort     | host process, JSON lines    |

pub mod config_file;
pub mod log_sink;
pub mod memory_store;
pub mod sim_lock;
pub mod stdio_host;
pub(super) mod utils;
