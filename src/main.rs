//! Lockbridge — Main Entry Point
//!
//! Runs as a child process of the host platform: configuration comes
//! from a JSON file, state store traffic flows over stdin/stdout.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  StdioHost          SimulatedLock     LogEventSink             │
//! │  (StateStorePort)   (LockPort)        (EventSink)              │
//! │  FileConfigAdapter                                             │
//! │  (ConfigPort)                                                  │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │                 Bridge (pure logic)                    │    │
//! │  │  status translator · command dispatcher                │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  EventBus (lock status + host notifications, in order)         │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use core::time::Duration;
use std::io::BufReader;

use anyhow::Result;
use edge_executor::LocalExecutor;
use embassy_sync::channel::Channel;
use log::{info, warn};

use lockbridge::adapters::config_file::FileConfigAdapter;
use lockbridge::adapters::log_sink::LogEventSink;
use lockbridge::adapters::sim_lock::{self, CommandQueue, SimulatedConnector, Simulation};
use lockbridge::adapters::stdio_host::{self, StdioHost};
use lockbridge::app::ports::ConfigPort;
use lockbridge::app::service::Bridge;
use lockbridge::events::EventBus;
use lockbridge::logging;

const DEFAULT_CONFIG_PATH: &str = "lockbridge.json";

/// How long the device task may take to acknowledge the disconnect.
const DISCONNECT_GRACE: Duration = Duration::from_secs(2);

static BUS: EventBus = Channel::new();
static LOCK_COMMANDS: CommandQueue = Channel::new();

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    logging::init();
    info!("Lockbridge v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Config ─────────────────────────────────────────────
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_owned());
    let config = FileConfigAdapter::new(path).load()?;
    info!("Initializing instance using configuration: {:?}", config);

    // ── 3. Adapters ───────────────────────────────────────────
    let mut store = StdioHost::new(config.namespace.clone(), std::io::stdout());
    let mut sink = LogEventSink::new();
    let mut connector = SimulatedConnector::new(&LOCK_COMMANDS);

    // ── 4. Bridge ─────────────────────────────────────────────
    let mut bridge = Bridge::start(&config, &mut connector, &mut store, &mut sink)?;
    let _reader = stdio_host::spawn_reader(BufReader::new(std::io::stdin()), &BUS)?;

    // ── 5. Event loop ─────────────────────────────────────────
    let executor: LocalExecutor<'_, 4> = LocalExecutor::new();
    let device = executor.spawn(sim_lock::run_device(
        &LOCK_COMMANDS,
        &BUS,
        config.connection_params(),
        Simulation::default(),
    ));

    info!("System ready. Entering event loop.");
    futures_lite::future::block_on(executor.run(bridge.run(&BUS, &mut store, &mut sink)));

    // ── 6. Shutdown ───────────────────────────────────────────
    bridge.stop(&mut sink, || info!("Shutdown complete"));

    let drained = futures_lite::future::block_on(executor.run(futures_lite::future::or(
        async {
            device.await;
            true
        },
        async {
            async_io_mini::Timer::after(DISCONNECT_GRACE).await;
            false
        },
    )));
    if !drained {
        warn!("Lock task did not finish within {:?}", DISCONNECT_GRACE);
    }

    Ok(())
}
