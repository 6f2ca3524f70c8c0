//! Simulated lock adapter.
//!
//! Implements [`LockConnector`] / [`LockPort`] without a radio.  The BLE
//! protocol itself is out of scope for this crate; this backend stands in
//! for it on host builds and in tests, with the same observable timing:
//!
//! - every command reports `ACTIVE`, then the settled status after the
//!   actuation time;
//! - the current status is re-reported every status poll interval;
//! - the link drops after the auto-disconnect idle time and comes back
//!   on the next command.
//!
//! ```text
//!   SimulatedLock ──LockCommand──▶ CommandQueue ──▶ run_device ──Status──▶ EventBus
//! ```

use core::time::Duration;
use std::time::Instant;

use async_io_mini::Timer;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use futures_lite::future;
use log::{info, warn};

use crate::app::ports::{DeviceError, LockConnector, LockPort};
use crate::config::ConnectionParams;
use crate::events::{BridgeEvent, EventBus, push_event};
use crate::lock::LockStatus;
use crate::lock::dispatcher::DeviceAction;

/// Channel depth for pending lock commands.
pub const COMMAND_QUEUE_CAP: usize = 8;

/// Commands travelling from the bridge to the device task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockCommand {
    Act(DeviceAction),
    Disconnect,
}

/// Bridge → device command queue.
pub type CommandQueue = Channel<CriticalSectionRawMutex, LockCommand, COMMAND_QUEUE_CAP>;

// ───────────────────────────────────────────────────────────────
// Connector + handle
// ───────────────────────────────────────────────────────────────

pub struct SimulatedConnector<'a> {
    commands: &'a CommandQueue,
}

impl<'a> SimulatedConnector<'a> {
    pub fn new(commands: &'a CommandQueue) -> Self {
        Self { commands }
    }
}

impl<'a> LockConnector for SimulatedConnector<'a> {
    type Lock = SimulatedLock<'a>;

    fn connect(&mut self, params: &ConnectionParams) -> Result<Self::Lock, DeviceError> {
        if params.address.is_empty() {
            return Err(DeviceError::ConnectFailed("no lock address configured"));
        }
        info!("SimulatedLock: attached to {}", params.address);
        Ok(SimulatedLock {
            commands: self.commands,
            connected: true,
        })
    }
}

/// Handle held by the bridge.  Enqueues commands for [`run_device`].
pub struct SimulatedLock<'a> {
    commands: &'a CommandQueue,
    connected: bool,
}

impl SimulatedLock<'_> {
    fn enqueue(&mut self, action: DeviceAction) {
        if !self.connected {
            warn!("SimulatedLock: {} requested after disconnect", action);
            return;
        }
        if self.commands.try_send(LockCommand::Act(action)).is_err() {
            warn!("SimulatedLock: command queue full, dropping {}", action);
        }
    }
}

impl LockPort for SimulatedLock<'_> {
    fn lock(&mut self) {
        self.enqueue(DeviceAction::Lock);
    }

    fn unlock(&mut self) {
        self.enqueue(DeviceAction::Unlock);
    }

    fn open(&mut self) {
        self.enqueue(DeviceAction::Open);
    }

    fn disconnect(&mut self) -> Result<(), DeviceError> {
        if !self.connected {
            return Err(DeviceError::NotConnected);
        }
        self.commands
            .try_send(LockCommand::Disconnect)
            .map_err(|_| DeviceError::QueueFull)?;
        self.connected = false;
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// Mechanism
// ───────────────────────────────────────────────────────────────

/// Where the simulated latch ends up after each action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mechanism {
    status: LockStatus,
}

impl Mechanism {
    pub fn new(initial: LockStatus) -> Self {
        Self { status: initial }
    }

    pub fn status(&self) -> LockStatus {
        self.status
    }

    /// Complete `action` and return the settled status.
    pub fn complete(&mut self, action: DeviceAction) -> LockStatus {
        self.status = match action {
            DeviceAction::Lock => LockStatus::Locked,
            DeviceAction::Unlock => LockStatus::Unlocked,
            DeviceAction::Open => LockStatus::Open,
        };
        self.status
    }
}

/// Knobs of the simulated device that are not connection parameters.
#[derive(Debug, Clone, Copy)]
pub struct Simulation {
    pub initial: LockStatus,
    /// Time between the `ACTIVE` report and the settled report.
    pub actuation_time: Duration,
}

impl Default for Simulation {
    fn default() -> Self {
        Self {
            initial: LockStatus::Locked,
            actuation_time: Duration::from_millis(1500),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Device task
// ───────────────────────────────────────────────────────────────

enum Wake {
    Command(LockCommand),
    Poll,
    Idle,
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => {
            Timer::after(at.saturating_duration_since(Instant::now())).await;
        }
        None => future::pending::<()>().await,
    }
}

/// Drive the simulated lock until a [`LockCommand::Disconnect`] arrives.
///
/// Reports the initial status first, the way a real lock answers the
/// status request sent after connecting.
pub async fn run_device(
    commands: &CommandQueue,
    bus: &EventBus,
    params: ConnectionParams,
    sim: Simulation,
) {
    let mut mechanism = Mechanism::new(sim.initial);
    let mut link_up = true;
    let mut last_activity = Instant::now();
    let mut next_poll = params.status_poll.map(|p| last_activity + p);

    push_event(bus, BridgeEvent::Status(mechanism.status().code()));

    loop {
        let idle_deadline = params
            .auto_disconnect
            .filter(|_| link_up)
            .map(|d| last_activity + d);

        let wake = future::or(
            async { Wake::Command(commands.receive().await) },
            future::or(
                async {
                    sleep_until(next_poll).await;
                    Wake::Poll
                },
                async {
                    sleep_until(idle_deadline).await;
                    Wake::Idle
                },
            ),
        )
        .await;

        match wake {
            Wake::Command(LockCommand::Disconnect) => {
                info!("SimulatedLock: disconnected");
                return;
            }
            Wake::Command(LockCommand::Act(action)) => {
                if !link_up {
                    info!("SimulatedLock: reconnecting for {}", action);
                    link_up = true;
                }
                push_event(bus, BridgeEvent::Status(LockStatus::Active.code()));
                Timer::after(sim.actuation_time).await;
                let settled = mechanism.complete(action);
                push_event(bus, BridgeEvent::Status(settled.code()));
                last_activity = Instant::now();
                // The settled report doubles as this poll period's report.
                next_poll = params.status_poll.map(|p| last_activity + p);
            }
            Wake::Poll => {
                push_event(bus, BridgeEvent::Status(mechanism.status().code()));
                next_poll = params.status_poll.map(|p| Instant::now() + p);
            }
            Wake::Idle => {
                info!("SimulatedLock: idle, dropping link");
                link_up = false;
            }
        }
    }
}
