//! JSON-lines host adapter.
//!
//! Connects the bridge to a host platform that runs it as a child
//! process.  One JSON object per line in each direction.
//!
//! ## Outbound (stdout)
//!
//! | `op`        | fields                                  |
//! |-------------|-----------------------------------------|
//! | `register`  | `id`, `common` (name/type/role/write/…) |
//! | `subscribe` | `pattern`                               |
//! | `publish`   | `id`, `val`, `ack`                      |
//!
//! `register` is create-if-absent on the host side.  The host sends no
//! reply, so registrations report [`Registration::Requested`].
//!
//! ## Inbound (stdin)
//!
//! `{"id":"keyble.0.unlocked","val":true,"ack":false,"from":"…"}` — one
//! [`Notification`] per line.  End of input requests shutdown.

use std::collections::HashSet;
use std::io::{BufRead, Write};
use std::thread::JoinHandle;

use log::{info, warn};
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::app::commands::Notification;
use crate::app::ports::{Registration, StateStorePort, StoreError};
use crate::events::{BridgeEvent, EventBus, push_event_blocking};
use crate::lock::schema::{StateDef, StateValue};

#[derive(Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum HostRecord<'a> {
    Register { id: String, common: Value },
    Subscribe { pattern: String },
    Publish { id: String, val: &'a StateValue, ack: bool },
}

/// Host store reached over a line-oriented writer (stdout in production).
pub struct StdioHost<W: Write> {
    namespace: String,
    out: W,
    /// States already requested this session.
    registered: HashSet<&'static str>,
}

impl<W: Write> StdioHost<W> {
    pub fn new(namespace: impl Into<String>, out: W) -> Self {
        Self {
            namespace: namespace.into(),
            out,
            registered: HashSet::new(),
        }
    }

    fn full_id(&self, id: &str) -> String {
        format!("{}.{}", self.namespace, id)
    }

    fn send(&mut self, record: &HostRecord<'_>) -> Result<(), StoreError> {
        serde_json::to_writer(&mut self.out, record).map_err(|_| StoreError::IoError)?;
        self.out
            .write_all(b"\n")
            .and_then(|()| self.out.flush())
            .map_err(|_| StoreError::Unavailable)
    }

    /// Consume the adapter, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// `common` block of a host object declaration.
fn common_block(def: &StateDef) -> Value {
    let mut common = json!({
        "name": def.name(),
        "type": def.value_type.as_str(),
        "role": def.role,
        "read": true,
        "write": def.writable,
    });
    if !def.labels.is_empty() {
        let labels: Map<String, Value> = def
            .labels
            .iter()
            .map(|(code, label)| (code.to_string(), Value::from(*label)))
            .collect();
        common["states"] = Value::Object(labels);
    }
    common
}

impl<W: Write> StateStorePort for StdioHost<W> {
    fn register_state(&mut self, def: &StateDef) -> Result<Registration, StoreError> {
        if self.registered.contains(def.name()) {
            return Ok(Registration::AlreadyExists);
        }
        let record = HostRecord::Register {
            id: self.full_id(def.name()),
            common: common_block(def),
        };
        self.send(&record)?;
        self.registered.insert(def.name());
        Ok(Registration::Requested)
    }

    fn subscribe(&mut self, pattern: &str) -> Result<(), StoreError> {
        let record = HostRecord::Subscribe {
            pattern: self.full_id(pattern),
        };
        self.send(&record)
    }

    fn publish(&mut self, id: &str, value: &StateValue, ack: bool) -> Result<(), StoreError> {
        let record = HostRecord::Publish {
            id: self.full_id(id),
            val: value,
            ack,
        };
        self.send(&record)
    }
}

// ───────────────────────────────────────────────────────────────
// Inbound reader
// ───────────────────────────────────────────────────────────────

/// Parse one inbound line.  Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Notification>, serde_json::Error> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(line).map(Some)
}

/// Forward every notification in `input` onto `bus`, then request shutdown.
///
/// Malformed lines are logged and skipped.  Blocks on a full bus, so the
/// host sees back-pressure instead of dropped commands.
pub fn pump_notifications(input: impl BufRead, bus: &EventBus) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Host input read failed: {}", e);
                break;
            }
        };
        match parse_line(&line) {
            Ok(Some(n)) => push_event_blocking(bus, BridgeEvent::StateChange(n)),
            Ok(None) => {}
            Err(e) => warn!("Skipping malformed host record: {}", e),
        }
    }
    info!("Host input closed, requesting shutdown");
    push_event_blocking(bus, BridgeEvent::Shutdown);
}

/// Run [`pump_notifications`] on a dedicated thread.
pub fn spawn_reader<R>(input: R, bus: &'static EventBus) -> std::io::Result<JoinHandle<()>>
where
    R: BufRead + Send + 'static,
{
    std::thread::Builder::new()
        .name("host-reader".into())
        .spawn(move || pump_notifications(input, bus))
}
