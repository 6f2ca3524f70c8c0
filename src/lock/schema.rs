//! Published state schema.
//!
//! | state        | type    | role                | writable |
//! |--------------|---------|---------------------|----------|
//! | `active`     | boolean | `indicator.working` | no       |
//! | `unlocked`   | boolean | `switch.lock.door`  | yes      |
//! | `opened`     | boolean | `switch.lock.door`  | yes      |
//! | `lock_state` | number  | `value.lock`        | no       |

use core::fmt;

use serde::{Deserialize, Serialize};

use super::LockStatus;

// ───────────────────────────────────────────────────────────────
// State identity
// ───────────────────────────────────────────────────────────────

/// The four states this bridge publishes into the host store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateId {
    Active,
    Unlocked,
    Opened,
    LockState,
}

impl StateId {
    pub const ALL: [Self; 4] = [Self::Unlocked, Self::Active, Self::Opened, Self::LockState];

    /// Namespace-relative state name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Unlocked => "unlocked",
            Self::Opened => "opened",
            Self::LockState => "lock_state",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.name() == name)
    }

    /// Whether an external actor may write this state.
    pub const fn writable(self) -> bool {
        matches!(self, Self::Unlocked | Self::Opened)
    }

    pub fn definition(self) -> StateDef {
        match self {
            Self::Active => StateDef {
                id: self,
                value_type: ValueType::Boolean,
                role: "indicator.working",
                writable: false,
                labels: &[],
            },
            Self::Unlocked | Self::Opened => StateDef {
                id: self,
                value_type: ValueType::Boolean,
                role: "switch.lock.door",
                writable: true,
                labels: &[],
            },
            Self::LockState => StateDef {
                id: self,
                value_type: ValueType::Number,
                role: "value.lock",
                writable: false,
                labels: &LOCK_STATE_LABELS,
            },
        }
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

static LOCK_STATE_LABELS: [(u8, &str); 4] = [
    (LockStatus::Locked.code(), LockStatus::Locked.label()),
    (LockStatus::Active.code(), LockStatus::Active.label()),
    (LockStatus::Unlocked.code(), LockStatus::Unlocked.label()),
    (LockStatus::Open.code(), LockStatus::Open.label()),
];

// ───────────────────────────────────────────────────────────────
// Definitions
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Boolean,
    Number,
}

impl ValueType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Number => "number",
        }
    }
}

/// Object declaration registered with the host for one state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateDef {
    pub id: StateId,
    pub value_type: ValueType,
    pub role: &'static str,
    pub writable: bool,
    /// Value labels for enum-like numeric states (`code → name`).
    pub labels: &'static [(u8, &'static str)],
}

impl StateDef {
    pub const fn name(&self) -> &'static str {
        self.id.name()
    }
}

/// The complete schema, in registration order.
pub fn schema() -> [StateDef; 4] {
    StateId::ALL.map(StateId::definition)
}

// ───────────────────────────────────────────────────────────────
// Values
// ───────────────────────────────────────────────────────────────

/// A value as it travels through the host store.
///
/// Incoming writes are not validated by the host, so strings are
/// accepted here and rejected by the dispatcher instead of at parse time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateValue {
    Bool(bool),
    Number(i64),
    Text(String),
}

impl StateValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<bool> for StateValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<LockStatus> for StateValue {
    fn from(status: LockStatus) -> Self {
        Self::Number(i64::from(status.code()))
    }
}

impl fmt::Display for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}
