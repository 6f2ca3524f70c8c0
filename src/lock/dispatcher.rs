//! Command dispatcher: external write intent → device action.
//!
//! | state      | value   | action     |
//! |------------|---------|------------|
//! | `unlocked` | `true`  | unlock     |
//! | `unlocked` | `false` | lock       |
//! | `opened`   | `true`  | open       |
//! | `opened`   | `false` | none       |
//!
//! Everything else is ignored.  Acknowledged writes never get here; the
//! [`Bridge`](crate::app::service::Bridge) discards them first.

use core::fmt;

use super::schema::{StateId, StateValue};

/// Actions the lock can perform.  There is no "close": the door is
/// closed by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceAction {
    Lock,
    Unlock,
    Open,
}

impl fmt::Display for DeviceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lock => write!(f, "lock"),
            Self::Unlock => write!(f, "unlock"),
            Self::Open => write!(f, "open"),
        }
    }
}

/// Why a write intent produced no action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Not one of the published states.
    UnknownState,
    /// Published, but only the bridge writes it.
    NotWritable,
    /// Requested value is not a boolean.
    NotBoolean,
    /// `opened = false`; the lock cannot close the door.
    NoCloseCapability,
    /// Valid command, but the lock link was already released.
    BridgeStopped,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownState => write!(f, "unknown state"),
            Self::NotWritable => write!(f, "state is read-only"),
            Self::NotBoolean => write!(f, "value is not a boolean"),
            Self::NoCloseCapability => write!(f, "lock cannot close the door"),
            Self::BridgeStopped => write!(f, "bridge is stopped"),
        }
    }
}

/// Outcome of dispatching one write intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Action(StateId, DeviceAction),
    Ignored(IgnoreReason),
}

/// Map a namespace-relative state name and requested value to an action.
pub fn on_write(state: &str, value: &StateValue) -> Dispatch {
    let Some(id) = StateId::from_name(state) else {
        return Dispatch::Ignored(IgnoreReason::UnknownState);
    };
    if !id.writable() {
        return Dispatch::Ignored(IgnoreReason::NotWritable);
    }
    let Some(requested) = value.as_bool() else {
        return Dispatch::Ignored(IgnoreReason::NotBoolean);
    };

    match (id, requested) {
        (StateId::Unlocked, true) => Dispatch::Action(id, DeviceAction::Unlock),
        (StateId::Unlocked, false) => Dispatch::Action(id, DeviceAction::Lock),
        (StateId::Opened, true) => Dispatch::Action(id, DeviceAction::Open),
        (StateId::Opened, false) => Dispatch::Ignored(IgnoreReason::NoCloseCapability),
        (StateId::Active | StateId::LockState, _) => Dispatch::Ignored(IgnoreReason::NotWritable),
    }
}
