//! Mock adapters for integration tests.
//!
//! Record every port call so tests can assert on the full command and
//! publish history without a lock or host process.

use std::cell::RefCell;
use std::rc::Rc;

use lockbridge::adapters::memory_store::MemoryStateStore;
use lockbridge::app::events::AppEvent;
use lockbridge::app::ports::{
    DeviceError, EventSink, LockConnector, LockPort, Registration, StateStorePort, StoreError,
};
use lockbridge::config::{BridgeConfig, ConnectionParams};
use lockbridge::lock::dispatcher::DeviceAction;
use lockbridge::lock::schema::{StateDef, StateValue};

// ── Lock ──────────────────────────────────────────────────────

pub struct MockLock {
    pub actions: Vec<DeviceAction>,
    pub disconnect_calls: usize,
    pub fail_disconnect: bool,
}

impl MockLock {
    pub fn new(fail_disconnect: bool) -> Self {
        Self {
            actions: Vec::new(),
            disconnect_calls: 0,
            fail_disconnect,
        }
    }
}

impl LockPort for MockLock {
    fn lock(&mut self) {
        self.actions.push(DeviceAction::Lock);
    }

    fn unlock(&mut self) {
        self.actions.push(DeviceAction::Unlock);
    }

    fn open(&mut self) {
        self.actions.push(DeviceAction::Open);
    }

    fn disconnect(&mut self) -> Result<(), DeviceError> {
        self.disconnect_calls += 1;
        if self.fail_disconnect {
            Err(DeviceError::NotConnected)
        } else {
            Ok(())
        }
    }
}

/// Shares the lock's call log with the test after the bridge takes ownership.
pub struct SharedLock(pub Rc<RefCell<MockLock>>);

impl LockPort for SharedLock {
    fn lock(&mut self) {
        self.0.borrow_mut().lock();
    }

    fn unlock(&mut self) {
        self.0.borrow_mut().unlock();
    }

    fn open(&mut self) {
        self.0.borrow_mut().open();
    }

    fn disconnect(&mut self) -> Result<(), DeviceError> {
        self.0.borrow_mut().disconnect()
    }
}

#[derive(Default)]
pub struct MockConnector {
    pub shared: Option<Rc<RefCell<MockLock>>>,
    pub fail_connect: bool,
    pub fail_disconnect: bool,
    pub seen: Vec<ConnectionParams>,
}

impl LockConnector for MockConnector {
    type Lock = SharedLock;

    fn connect(&mut self, params: &ConnectionParams) -> Result<SharedLock, DeviceError> {
        self.seen.push(params.clone());
        if self.fail_connect {
            return Err(DeviceError::ConnectFailed("radio off"));
        }
        let lock = Rc::new(RefCell::new(MockLock::new(self.fail_disconnect)));
        self.shared = Some(lock.clone());
        Ok(SharedLock(lock))
    }
}

impl MockConnector {
    pub fn actions(&self) -> Vec<DeviceAction> {
        self.shared
            .as_ref()
            .map(|l| l.borrow().actions.clone())
            .unwrap_or_default()
    }

    pub fn disconnect_calls(&self) -> usize {
        self.shared
            .as_ref()
            .map_or(0, |l| l.borrow().disconnect_calls)
    }
}

// ── Store ─────────────────────────────────────────────────────

/// [`MemoryStateStore`] plus a publish log and injectable failures.
#[derive(Default)]
pub struct RecordingStore {
    pub inner: MemoryStateStore,
    pub published: Vec<(String, StateValue, bool)>,
    pub registrations: Vec<&'static str>,
    pub fail_register: Option<&'static str>,
    pub fail_publish: Option<&'static str>,
}

impl StateStorePort for RecordingStore {
    fn register_state(&mut self, def: &StateDef) -> Result<Registration, StoreError> {
        self.registrations.push(def.name());
        if self.fail_register == Some(def.name()) {
            return Err(StoreError::Unavailable);
        }
        self.inner.register_state(def)
    }

    fn subscribe(&mut self, pattern: &str) -> Result<(), StoreError> {
        self.inner.subscribe(pattern)
    }

    fn publish(&mut self, id: &str, value: &StateValue, ack: bool) -> Result<(), StoreError> {
        if self.fail_publish == Some(id) {
            return Err(StoreError::IoError);
        }
        self.published.push((id.to_owned(), value.clone(), ack));
        self.inner.publish(id, value, ack)
    }
}

// ── Sink ──────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Fixtures ──────────────────────────────────────────────────

pub fn config() -> BridgeConfig {
    BridgeConfig {
        mac_address: "00:1A:22:0A:91:CF".into(),
        user_id: 1,
        user_key: "ca78ad9b96131414359e5e7cecfd7f9e".into(),
        ..BridgeConfig::default()
    }
}
