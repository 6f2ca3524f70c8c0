//! Inbound traffic from the host store.
//!
//! The host reports every change in the subscribed namespace as a
//! [`Notification`], including the bridge's own acknowledged writes.
//! Only unacknowledged changes to a live state become a [`WriteIntent`].

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::lock::schema::StateValue;

/// A change reported by the host store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Fully-qualified id (`keyble.0.unlocked`).
    pub id: String,
    /// `None` when the state was deleted.
    #[serde(default)]
    pub val: Option<StateValue>,
    /// `true` for status updates, `false` for commands.
    #[serde(default)]
    pub ack: bool,
    /// Originating host component, if reported.
    #[serde(default)]
    pub from: Option<String>,
}

/// A genuine external command on one of this instance's states.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteIntent {
    /// Namespace-relative state name.
    pub state: String,
    pub value: StateValue,
    pub origin: Option<String>,
}

/// Why a notification did not become a write intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discard {
    /// Echo of an acknowledged status write.
    Acknowledged,
    /// State was deleted; there is no value to act on.
    Deleted,
    /// Id lies outside this instance's namespace.
    ForeignNamespace,
}

impl fmt::Display for Discard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Acknowledged => write!(f, "acknowledged"),
            Self::Deleted => write!(f, "state deleted"),
            Self::ForeignNamespace => write!(f, "foreign namespace"),
        }
    }
}

impl Notification {
    /// Convert into a write intent for `namespace`, stripping the
    /// `<namespace>.` prefix from the id.
    pub fn into_write_intent(self, namespace: &str) -> Result<WriteIntent, Discard> {
        if self.ack {
            return Err(Discard::Acknowledged);
        }
        let state = self
            .id
            .strip_prefix(namespace)
            .and_then(|rest| rest.strip_prefix('.'))
            .filter(|rest| !rest.is_empty())
            .ok_or(Discard::ForeignNamespace)?
            .to_owned();
        let value = self.val.ok_or(Discard::Deleted)?;
        Ok(WriteIntent {
            state,
            value,
            origin: self.from,
        })
    }
}
