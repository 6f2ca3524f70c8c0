//! Bridge service — the hexagonal core.
//!
//! [`Bridge`] owns the lock connection for the whole process lifetime
//! and routes inbound events to the two translation directions.  All I/O
//! flows through port traits injected at call sites, making the entire
//! service testable with mock adapters.
//!
//! ```text
//!   EventBus ──▶ ┌─────────────────────────┐ ──▶ StateStorePort
//!                │         Bridge          │
//!   LockPort ◀── │ translator · dispatcher │ ──▶ EventSink
//!                └─────────────────────────┘
//! ```

use core::ops::ControlFlow;

use log::{info, warn};

use crate::config::BridgeConfig;
use crate::error::Result;
use crate::events::{BridgeEvent, EventBus};
use crate::lock::dispatcher::{self, DeviceAction, Dispatch, IgnoreReason};
use crate::lock::schema::schema;
use crate::lock::translator;

use super::commands::Notification;
use super::events::AppEvent;
use super::ports::{EventSink, LockConnector, LockPort, Registration, StateStorePort};

// ───────────────────────────────────────────────────────────────
// Counters
// ───────────────────────────────────────────────────────────────

/// Running totals, logged at shutdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BridgeStats {
    pub statuses_applied: u32,
    pub unknown_statuses: u32,
    pub commands_dispatched: u32,
    pub notifications_ignored: u32,
}

// ───────────────────────────────────────────────────────────────
// Bridge
// ───────────────────────────────────────────────────────────────

/// Lifecycle manager: owns the lock link and runs both translation paths.
pub struct Bridge<L: LockPort> {
    namespace: String,
    /// `None` once stopped.
    lock: Option<L>,
    stats: BridgeStats,
}

impl<L: LockPort> Bridge<L> {
    // ── Lifecycle ─────────────────────────────────────────────

    /// Connect to the lock, declare the published states and subscribe
    /// to the instance namespace.
    ///
    /// Registration is create-if-absent and a failure on one state does
    /// not stop the others.  Only a connect failure aborts startup.
    pub fn start<C>(
        config: &BridgeConfig,
        connector: &mut C,
        store: &mut impl StateStorePort,
        sink: &mut impl EventSink,
    ) -> Result<Self>
    where
        C: LockConnector<Lock = L>,
    {
        let params = config.connection_params();
        info!("Connecting to lock {} as user {}", params.address, params.user_id);
        let lock = connector.connect(&params)?;

        let (mut created, mut requested) = (0, 0);
        for def in schema() {
            match store.register_state(&def) {
                Ok(Registration::Created) => created += 1,
                Ok(Registration::Requested) => requested += 1,
                Ok(Registration::AlreadyExists) => {}
                Err(e) => warn!("Registering state '{}' failed: {}", def.name(), e),
            }
        }

        if let Err(e) = store.subscribe("*") {
            warn!("Subscribing to '{}.*' failed: {}", config.namespace, e);
        }

        sink.emit(&AppEvent::Started {
            namespace: config.namespace.clone(),
            created,
            requested,
        });
        info!(
            "Bridge started in '{}' ({} new states, {} declared to host)",
            config.namespace, created, requested
        );

        Ok(Self {
            namespace: config.namespace.clone(),
            lock: Some(lock),
            stats: BridgeStats::default(),
        })
    }

    /// Disconnect from the lock and release it.
    ///
    /// `done` is invoked exactly once per call, also when disconnect fails
    /// or the bridge was already stopped.
    pub fn stop(&mut self, sink: &mut impl EventSink, done: impl FnOnce()) {
        info!("Terminating bridge, cleaning up...");
        let clean = match self.lock.take() {
            Some(mut lock) => match lock.disconnect() {
                Ok(()) => {
                    info!("Successfully cleaned up.");
                    true
                }
                Err(e) => {
                    warn!("Error cleaning up: disconnect failed: {}", e);
                    false
                }
            },
            None => {
                info!("Bridge already stopped");
                true
            }
        };
        let s = self.stats;
        info!(
            "Totals: {} statuses ({} unknown), {} commands, {} notifications ignored",
            s.statuses_applied, s.unknown_statuses, s.commands_dispatched, s.notifications_ignored
        );
        sink.emit(&AppEvent::Stopped { clean });
        done();
    }

    // ── Event loop ────────────────────────────────────────────

    /// Process bus events until [`BridgeEvent::Shutdown`].
    ///
    /// Does not stop the bridge; call [`stop`](Self::stop) afterwards.
    pub async fn run(
        &mut self,
        bus: &EventBus,
        store: &mut impl StateStorePort,
        sink: &mut impl EventSink,
    ) {
        loop {
            let event = bus.receive().await;
            if self.handle_event(event, store, sink).is_break() {
                info!("Shutdown requested, leaving event loop");
                return;
            }
        }
    }

    /// Process one bus event to completion.
    pub fn handle_event(
        &mut self,
        event: BridgeEvent,
        store: &mut impl StateStorePort,
        sink: &mut impl EventSink,
    ) -> ControlFlow<()> {
        match event {
            BridgeEvent::Status(code) => self.handle_status(code, store, sink),
            BridgeEvent::StateChange(n) => self.handle_notification(n, sink),
            BridgeEvent::Shutdown => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    // ── Status path ───────────────────────────────────────────

    /// Translate a device status code and publish the result acknowledged.
    pub fn handle_status(
        &mut self,
        code: u8,
        store: &mut impl StateStorePort,
        sink: &mut impl EventSink,
    ) {
        let update = match translator::on_status(code) {
            Ok(update) => update,
            Err(e) => {
                warn!("{}, ignoring", e);
                self.stats.unknown_statuses += 1;
                sink.emit(&AppEvent::UnknownStatus(code));
                return;
            }
        };

        let mut landed = 0;
        for write in update.writes() {
            match store.publish(write.state.name(), &write.value, true) {
                Ok(()) => landed += 1,
                Err(e) => warn!("Publishing {}={} failed: {}", write.state, write.value, e),
            }
        }
        if landed == 0 {
            warn!("Status {} not applied: every write failed", update.status);
            return;
        }
        self.stats.statuses_applied += 1;
        sink.emit(&AppEvent::StatusApplied(update.status));
    }

    // ── Command path ──────────────────────────────────────────

    /// Route a store notification to the dispatcher.
    pub fn handle_notification(&mut self, notification: Notification, sink: &mut impl EventSink) {
        let id = notification.id.clone();
        let intent = match notification.into_write_intent(&self.namespace) {
            Ok(intent) => intent,
            Err(reason) => {
                log::debug!("stateChange {}: {}", id, reason);
                self.stats.notifications_ignored += 1;
                sink.emit(&AppEvent::NotificationDiscarded { id, reason });
                return;
            }
        };
        info!(
            "Command {}={} from {}",
            intent.state,
            intent.value,
            intent.origin.as_deref().unwrap_or("unknown")
        );

        match dispatcher::on_write(&intent.state, &intent.value) {
            Dispatch::Action(state, action) => {
                let Some(lock) = self.lock.as_mut() else {
                    warn!("Dropping {} for '{}': bridge is stopped", action, state);
                    self.stats.notifications_ignored += 1;
                    sink.emit(&AppEvent::CommandIgnored {
                        state: intent.state,
                        reason: IgnoreReason::BridgeStopped,
                    });
                    return;
                };
                perform(lock, action);
                self.stats.commands_dispatched += 1;
                sink.emit(&AppEvent::CommandDispatched { state, action });
            }
            Dispatch::Ignored(reason) => {
                info!("Ignoring write to '{}': {}", intent.state, reason);
                self.stats.notifications_ignored += 1;
                sink.emit(&AppEvent::CommandIgnored {
                    state: intent.state,
                    reason,
                });
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Whether the bridge still holds a lock connection.
    pub fn is_connected(&self) -> bool {
        self.lock.is_some()
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn stats(&self) -> BridgeStats {
        self.stats
    }
}

/// Issue a device action.  Completion is not awaited; it surfaces as a
/// later status event.
fn perform(lock: &mut impl LockPort, action: DeviceAction) {
    match action {
        DeviceAction::Lock => lock.lock(),
        DeviceAction::Unlock => lock.unlock(),
        DeviceAction::Open => lock.open(),
    }
}
