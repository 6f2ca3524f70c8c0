//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade.  A future adapter that mirrors events into host
//! diagnostic states would implement the same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started {
                namespace,
                created,
                requested,
            } => {
                info!(
                    "START | namespace={} | new_states={} | declared={}",
                    namespace, created, requested
                );
            }
            AppEvent::StatusApplied(status) => {
                info!("STATUS | {}", status);
            }
            AppEvent::UnknownStatus(code) => {
                warn!("STATUS | unknown code {}", code);
            }
            AppEvent::CommandDispatched { state, action } => {
                info!("CMD | {} -> {}", state, action);
            }
            AppEvent::CommandIgnored { state, reason } => {
                info!("CMD | {} ignored: {}", state, reason);
            }
            AppEvent::NotificationDiscarded { id, reason } => {
                log::debug!("NOTIFY | {} discarded: {}", id, reason);
            }
            AppEvent::Stopped { clean } => {
                info!("STOP | clean={}", clean);
            }
        }
    }
}
