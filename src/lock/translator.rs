//! Status translator: raw device status → published state writes.
//!
//! `active` and `lock_state` are written on every recognised status.
//! `unlocked` and `opened` are written only for settled statuses; while
//! the lock reports [`LockStatus::Active`] they keep whatever the last
//! settled status produced.

use core::fmt;

use heapless::Vec;

use super::schema::{StateId, StateValue};
use super::{LockStatus, StatusCategory};

/// Upper bound on writes produced by one status event.
pub const MAX_WRITES: usize = 4;

/// One acknowledged write into the host store.
#[derive(Debug, Clone, PartialEq)]
pub struct StateWrite {
    pub state: StateId,
    pub value: StateValue,
}

/// Derived observations for one status event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusUpdate {
    pub status: LockStatus,
    /// `(unlocked, opened)`, present only for settled statuses.
    pub latch: Option<(bool, bool)>,
}

impl StatusUpdate {
    pub fn active(&self) -> bool {
        self.status == LockStatus::Active
    }

    /// Writes in publication order: `active`, `lock_state`, then
    /// `opened` and `unlocked` when settled.
    pub fn writes(&self) -> Vec<StateWrite, MAX_WRITES> {
        let always = [
            StateWrite {
                state: StateId::Active,
                value: self.active().into(),
            },
            StateWrite {
                state: StateId::LockState,
                value: self.status.into(),
            },
        ];
        let settled = self.latch.into_iter().flat_map(|(unlocked, opened)| {
            [
                StateWrite {
                    state: StateId::Opened,
                    value: opened.into(),
                },
                StateWrite {
                    state: StateId::Unlocked,
                    value: unlocked.into(),
                },
            ]
        });
        always.into_iter().chain(settled).collect()
    }
}

/// A status code outside the assigned set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnrecognizedStatus(pub u8);

impl fmt::Display for UnrecognizedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized lock status code {}", self.0)
    }
}

impl std::error::Error for UnrecognizedStatus {}

/// Translate a decoded status.
pub fn translate(status: LockStatus) -> StatusUpdate {
    let latch = match status.category() {
        StatusCategory::Transient => None,
        StatusCategory::Settled { unlocked, opened } => Some((unlocked, opened)),
    };
    StatusUpdate { status, latch }
}

/// Translate a raw device code.  Unassigned codes produce no update.
pub fn on_status(code: u8) -> Result<StatusUpdate, UnrecognizedStatus> {
    LockStatus::from_code(code)
        .map(translate)
        .ok_or(UnrecognizedStatus(code))
}

// ───────────────────────────────────────────────────────────────
// Local mirror
// ───────────────────────────────────────────────────────────────

/// Last published value of every derived state, `None` until first written.
///
/// Mirrors what the host store holds after a sequence of updates, which
/// makes the retention rule checkable without a store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishedState {
    pub active: Option<bool>,
    pub unlocked: Option<bool>,
    pub opened: Option<bool>,
    pub lock_state: Option<LockStatus>,
}

impl PublishedState {
    pub fn apply(&mut self, update: &StatusUpdate) {
        self.active = Some(update.active());
        self.lock_state = Some(update.status);
        if let Some((unlocked, opened)) = update.latch {
            self.unlocked = Some(unlocked);
            self.opened = Some(opened);
        }
    }

    /// Apply a raw code, ignoring unassigned ones.
    pub fn observe(&mut self, code: u8) {
        if let Ok(update) = on_status(code) {
            self.apply(&update);
        }
    }
}
