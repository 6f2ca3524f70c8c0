//! Lock domain — status codes, published state schema, and the two
//! translation directions between them.
//!
//! ```text
//!   device ── status code ──▶ translator ──▶ state writes (ack)
//!   store  ── write intent ──▶ dispatcher ──▶ device action
//! ```
//!
//! Nothing in here performs I/O.  The [`Bridge`](crate::app::service::Bridge)
//! feeds these functions and pushes their results through the port traits.

pub mod dispatcher;
pub mod schema;
pub mod translator;

use core::fmt;

// ---------------------------------------------------------------------------
// Status codes
// ---------------------------------------------------------------------------

/// Raw status reported by the lock.  Code 3 and everything above 4 are
/// unassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LockStatus {
    Locked = 0,
    /// An operation is in progress; latch and door position are unknown.
    Active = 1,
    Unlocked = 2,
    Open = 4,
}

impl LockStatus {
    /// Every recognised status, in code order.
    pub const ALL: [Self; 4] = [Self::Locked, Self::Active, Self::Unlocked, Self::Open];

    /// Decode a raw device code.  Returns `None` for unassigned codes.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Locked),
            1 => Some(Self::Active),
            2 => Some(Self::Unlocked),
            4 => Some(Self::Open),
            _ => None,
        }
    }

    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Label published alongside `lock_state` values.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Locked => "LOCKED",
            Self::Active => "ACTIVE",
            Self::Unlocked => "UNLOCKED",
            Self::Open => "OPEN",
        }
    }

    /// Classify the status for the partial-update policy.
    pub const fn category(self) -> StatusCategory {
        match self {
            Self::Active => StatusCategory::Transient,
            Self::Locked => StatusCategory::Settled {
                unlocked: false,
                opened: false,
            },
            Self::Unlocked => StatusCategory::Settled {
                unlocked: true,
                opened: false,
            },
            Self::Open => StatusCategory::Settled {
                unlocked: true,
                opened: true,
            },
        }
    }
}

impl fmt::Display for LockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.label(), self.code())
    }
}

/// A transient status says nothing about where the latch and door end up,
/// so only settled statuses carry latch/door observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    /// Mid-operation.  `unlocked` / `opened` keep their last values.
    Transient,
    /// Operation finished; latch and door position are known.
    Settled { unlocked: bool, opened: bool },
}
