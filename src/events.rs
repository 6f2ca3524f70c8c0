//! Inbound event bus.
//!
//! Events are produced by:
//! - the lock adapter (status changes)
//! - the host adapter (store change notifications, shutdown request)
//!
//! Events are consumed by the bridge, which processes them one at a time
//! in arrival order.  Each event runs to completion before the next one
//! is taken off the bus.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Lock link   │────▶│              │     │              │
//! │ Host reader │────▶│  Event Bus   │────▶│   Bridge     │
//! │             │     │  (bounded)   │     │  (consumer)  │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! Producers may run on other threads; the channel is guarded by a
//! critical-section mutex.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::warn;

use crate::app::commands::Notification;

/// Maximum number of pending events.
pub const EVENT_QUEUE_CAP: usize = 32;

/// Everything the bridge reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeEvent {
    /// The lock reported a raw status code.
    Status(u8),
    /// The host reported a change in the subscribed namespace.
    StateChange(Notification),
    /// Stop the event loop.
    Shutdown,
}

/// Single-consumer, in-order event queue.
pub type EventBus = Channel<CriticalSectionRawMutex, BridgeEvent, EVENT_QUEUE_CAP>;

/// Push an event without waiting.
/// Returns `false` if the bus is full (event dropped).
pub fn push_event(bus: &EventBus, event: BridgeEvent) -> bool {
    match bus.try_send(event) {
        Ok(()) => true,
        Err(_) => {
            warn!("Event bus full, dropping event");
            false
        }
    }
}

/// Push an event, blocking the calling thread until there is room.
///
/// For producer threads that sit outside the executor (stdin reader,
/// vendor BLE callbacks).
pub fn push_event_blocking(bus: &EventBus, event: BridgeEvent) {
    futures_lite::future::block_on(bus.send(event));
}

/// Drain all pending events into a callback, in FIFO order.
pub fn drain_events(bus: &EventBus, mut handler: impl FnMut(BridgeEvent)) {
    while let Ok(event) = bus.try_receive() {
        handler(event);
    }
}
