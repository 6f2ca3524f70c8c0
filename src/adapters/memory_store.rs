//! In-memory state store adapter.
//!
//! Implements [`StateStorePort`] on a plain `HashMap`.  Used as the
//! simulation backend for host-side runs and tests; it behaves like the
//! host's object database for the subset the bridge uses.

use std::collections::HashMap;

use log::info;

use crate::app::ports::{Registration, StateStorePort, StoreError};
use crate::lock::schema::{StateDef, StateId, StateValue};

/// Last write to one state.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredValue {
    pub value: StateValue,
    pub ack: bool,
}

#[derive(Debug, Clone)]
struct Entry {
    def: StateDef,
    value: Option<StoredValue>,
}

#[derive(Debug, Default)]
pub struct MemoryStateStore {
    states: HashMap<String, Entry>,
    subscriptions: Vec<String>,
    publish_count: usize,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        info!("MemoryStateStore: simulation backend");
        Self::default()
    }

    /// Declaration registered under `id`, if any.
    pub fn definition(&self, id: &str) -> Option<&StateDef> {
        self.states.get(id).map(|e| &e.def)
    }

    /// Last stored value of `id`.
    pub fn get(&self, id: &str) -> Option<&StoredValue> {
        self.states.get(id).and_then(|e| e.value.as_ref())
    }

    pub fn bool_value(&self, state: StateId) -> Option<bool> {
        self.get(state.name()).and_then(|v| v.value.as_bool())
    }

    pub fn number_value(&self, state: StateId) -> Option<i64> {
        self.get(state.name()).and_then(|v| v.value.as_number())
    }

    pub fn subscriptions(&self) -> &[String] {
        &self.subscriptions
    }

    /// Number of successful publishes since creation.
    pub fn publish_count(&self) -> usize {
        self.publish_count
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl StateStorePort for MemoryStateStore {
    fn register_state(&mut self, def: &StateDef) -> Result<Registration, StoreError> {
        if self.states.contains_key(def.name()) {
            return Ok(Registration::AlreadyExists);
        }
        self.states.insert(
            def.name().to_owned(),
            Entry {
                def: *def,
                value: None,
            },
        );
        Ok(Registration::Created)
    }

    fn subscribe(&mut self, pattern: &str) -> Result<(), StoreError> {
        if !self.subscriptions.iter().any(|p| p == pattern) {
            self.subscriptions.push(pattern.to_owned());
        }
        Ok(())
    }

    fn publish(&mut self, id: &str, value: &StateValue, ack: bool) -> Result<(), StoreError> {
        let entry = self
            .states
            .get_mut(id)
            .ok_or(StoreError::Rejected("state object does not exist"))?;
        entry.value = Some(StoredValue {
            value: value.clone(),
            ack,
        });
        self.publish_count += 1;
        Ok(())
    }
}
