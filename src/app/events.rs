//! Outbound application events.
//!
//! The [`Bridge`](super::service::Bridge) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use crate::lock::LockStatus;
use crate::lock::dispatcher::{DeviceAction, IgnoreReason};
use crate::lock::schema::StateId;

use super::commands::Discard;

/// Structured events emitted by the bridge core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Startup finished.  `created` states were newly registered;
    /// `requested` were declared to a store that does not report which
    /// declarations were new.
    Started {
        namespace: String,
        created: usize,
        requested: usize,
    },

    /// A recognised status was translated and published.
    StatusApplied(LockStatus),

    /// The lock reported an unassigned status code.
    UnknownStatus(u8),

    /// A write intent was turned into a device action.
    CommandDispatched { state: StateId, action: DeviceAction },

    /// A write intent produced no device action.
    CommandIgnored { state: String, reason: IgnoreReason },

    /// A store notification was dropped before dispatch.
    NotificationDiscarded { id: String, reason: Discard },

    /// Shutdown finished; `clean` is false when disconnect failed.
    Stopped { clean: bool },
}
