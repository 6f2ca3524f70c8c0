//! Status and command paths through [`Bridge`] with recording adapters.

use lockbridge::app::commands::{Discard, Notification};
use lockbridge::app::events::AppEvent;
use lockbridge::app::service::Bridge;
use lockbridge::events::{BridgeEvent, EventBus, push_event};
use lockbridge::lock::LockStatus;
use lockbridge::lock::dispatcher::{DeviceAction, IgnoreReason};
use lockbridge::lock::schema::{StateId, StateValue};

use crate::mock_ports::{MockConnector, RecordingSink, RecordingStore, SharedLock, config};

fn started() -> (Bridge<SharedLock>, MockConnector, RecordingStore, RecordingSink) {
    let mut connector = MockConnector::default();
    let mut store = RecordingStore::default();
    let mut sink = RecordingSink::default();
    let bridge = Bridge::start(&config(), &mut connector, &mut store, &mut sink).unwrap();
    store.published.clear();
    sink.events.clear();
    (bridge, connector, store, sink)
}

fn command(state: &str, val: impl Into<StateValue>) -> Notification {
    Notification {
        id: format!("keyble.0.{state}"),
        val: Some(val.into()),
        ack: false,
        from: Some("system.adapter.admin.0".into()),
    }
}

fn feed(codes: &[u8]) -> (MockConnector, RecordingStore) {
    let (mut bridge, connector, mut store, mut sink) = started();
    for &code in codes {
        bridge.handle_status(code, &mut store, &mut sink);
    }
    (connector, store)
}

// ── Status path ───────────────────────────────────────────────

#[test]
fn locked_unlock_sequence_ends_unlocked() {
    let (_, store) = feed(&[0, 1, 2]);
    let s = &store.inner;

    assert_eq!(s.bool_value(StateId::Active), Some(false));
    assert_eq!(s.bool_value(StateId::Unlocked), Some(true));
    assert_eq!(s.bool_value(StateId::Opened), Some(false));
    assert_eq!(s.number_value(StateId::LockState), Some(2));
}

#[test]
fn active_after_open_keeps_opened_latched() {
    let (_, store) = feed(&[4, 1, 1]);
    let s = &store.inner;

    assert_eq!(s.bool_value(StateId::Active), Some(true));
    assert_eq!(s.bool_value(StateId::Unlocked), Some(true), "retained from OPEN");
    assert_eq!(s.bool_value(StateId::Opened), Some(true), "retained from OPEN");
    assert_eq!(s.number_value(StateId::LockState), Some(1));
}

#[test]
fn status_writes_are_acknowledged() {
    let (_, store) = feed(&[0, 1, 2, 4]);
    assert!(!store.published.is_empty());
    assert!(
        store.published.iter().all(|(_, _, ack)| *ack),
        "status writes must carry ack=true: {:?}",
        store.published
    );
    for id in ["active", "unlocked", "opened", "lock_state"] {
        assert!(store.inner.get(id).is_some_and(|v| v.ack));
    }
}

#[test]
fn active_status_writes_only_active_and_lock_state() {
    let (_, store) = feed(&[1]);
    let ids: Vec<&str> = store.published.iter().map(|(id, _, _)| id.as_str()).collect();
    assert_eq!(ids, ["active", "lock_state"]);
    assert_eq!(store.inner.get("unlocked"), None);
    assert_eq!(store.inner.get("opened"), None);
}

#[test]
fn repeated_status_is_idempotent() {
    let (_, once) = feed(&[2]);
    let (_, twice) = feed(&[2, 2]);
    for id in ["active", "unlocked", "opened", "lock_state"] {
        assert_eq!(once.inner.get(id), twice.inner.get(id), "state {id}");
    }
}

#[test]
fn unknown_status_changes_nothing() {
    let (mut bridge, _connector, mut store, mut sink) = started();
    bridge.handle_status(2, &mut store, &mut sink);
    let before = store.published.len();

    bridge.handle_status(3, &mut store, &mut sink);
    bridge.handle_status(200, &mut store, &mut sink);

    assert_eq!(store.published.len(), before);
    assert_eq!(store.inner.number_value(StateId::LockState), Some(2));
    assert_eq!(bridge.stats().unknown_statuses, 2);
    assert!(sink.events.contains(&AppEvent::UnknownStatus(3)));
}

#[test]
fn publish_failure_does_not_stop_remaining_writes() {
    let (mut bridge, _connector, mut store, mut sink) = started();
    store.fail_publish = Some("lock_state");

    bridge.handle_status(0, &mut store, &mut sink);

    let ids: Vec<&str> = store.published.iter().map(|(id, _, _)| id.as_str()).collect();
    assert_eq!(ids, ["active", "opened", "unlocked"]);
    assert_eq!(sink.events, [AppEvent::StatusApplied(LockStatus::Locked)]);
}

// ── Command path ──────────────────────────────────────────────

#[test]
fn unlocked_true_issues_one_unlock() {
    let (mut bridge, connector, _store, mut sink) = started();
    bridge.handle_notification(command("unlocked", true), &mut sink);

    assert_eq!(connector.actions(), [DeviceAction::Unlock]);
    assert_eq!(
        sink.events,
        [AppEvent::CommandDispatched {
            state: StateId::Unlocked,
            action: DeviceAction::Unlock,
        }]
    );
}

#[test]
fn unlocked_false_issues_one_lock() {
    let (mut bridge, connector, _store, mut sink) = started();
    bridge.handle_notification(command("unlocked", false), &mut sink);
    assert_eq!(connector.actions(), [DeviceAction::Lock]);
}

#[test]
fn opened_true_issues_one_open() {
    let (mut bridge, connector, _store, mut sink) = started();
    bridge.handle_notification(command("opened", true), &mut sink);
    assert_eq!(connector.actions(), [DeviceAction::Open]);
}

#[test]
fn opened_false_issues_nothing() {
    let (mut bridge, connector, _store, mut sink) = started();
    bridge.handle_notification(command("opened", false), &mut sink);

    assert!(connector.actions().is_empty());
    assert_eq!(
        sink.events,
        [AppEvent::CommandIgnored {
            state: "opened".into(),
            reason: IgnoreReason::NoCloseCapability,
        }]
    );
}

#[test]
fn acknowledged_change_issues_nothing() {
    let (mut bridge, connector, _store, mut sink) = started();
    let mut n = command("unlocked", true);
    n.ack = true;
    bridge.handle_notification(n, &mut sink);

    assert!(connector.actions().is_empty());
    assert_eq!(
        sink.events,
        [AppEvent::NotificationDiscarded {
            id: "keyble.0.unlocked".into(),
            reason: Discard::Acknowledged,
        }]
    );
}

#[test]
fn read_only_and_unknown_states_issue_nothing() {
    let (mut bridge, connector, _store, mut sink) = started();
    bridge.handle_notification(command("active", true), &mut sink);
    bridge.handle_notification(command("lock_state", StateValue::Number(2)), &mut sink);
    bridge.handle_notification(command("battery_low", true), &mut sink);

    assert!(connector.actions().is_empty());
    assert_eq!(bridge.stats().notifications_ignored, 3);
    assert!(sink.events.contains(&AppEvent::CommandIgnored {
        state: "battery_low".into(),
        reason: IgnoreReason::UnknownState,
    }));
}

#[test]
fn non_boolean_values_issue_nothing() {
    let (mut bridge, connector, _store, mut sink) = started();
    bridge.handle_notification(command("unlocked", StateValue::Number(1)), &mut sink);
    bridge.handle_notification(command("opened", StateValue::Text("true".into())), &mut sink);
    assert!(connector.actions().is_empty());
}

#[test]
fn foreign_and_deleted_notifications_issue_nothing() {
    let (mut bridge, connector, _store, mut sink) = started();
    let mut foreign = command("unlocked", true);
    foreign.id = "keyble.1.unlocked".into();
    let mut deleted = command("unlocked", true);
    deleted.val = None;

    bridge.handle_notification(foreign, &mut sink);
    bridge.handle_notification(deleted, &mut sink);

    assert!(connector.actions().is_empty());
    assert_eq!(bridge.stats().notifications_ignored, 2);
}

#[test]
fn status_echo_of_own_write_does_not_loop() {
    let (mut bridge, connector, mut store, mut sink) = started();
    bridge.handle_status(2, &mut store, &mut sink);

    // The host reports the bridge's own writes back as acknowledged changes.
    let echoes: Vec<Notification> = store
        .published
        .iter()
        .map(|(id, val, ack)| Notification {
            id: format!("keyble.0.{id}"),
            val: Some(val.clone()),
            ack: *ack,
            from: Some("system.adapter.keyble.0".into()),
        })
        .collect();
    for n in echoes {
        bridge.handle_notification(n, &mut sink);
    }
    assert!(connector.actions().is_empty());
}

// ── Event loop ────────────────────────────────────────────────

#[test]
fn run_processes_events_in_order_until_shutdown() {
    let (mut bridge, connector, mut store, mut sink) = started();
    let bus = EventBus::new();

    assert!(push_event(&bus, BridgeEvent::Status(0)));
    assert!(push_event(&bus, BridgeEvent::StateChange(command("unlocked", true))));
    assert!(push_event(&bus, BridgeEvent::Status(1)));
    assert!(push_event(&bus, BridgeEvent::Status(2)));
    assert!(push_event(&bus, BridgeEvent::Shutdown));
    assert!(push_event(&bus, BridgeEvent::Status(4)));

    futures_lite::future::block_on(bridge.run(&bus, &mut store, &mut sink));

    assert_eq!(connector.actions(), [DeviceAction::Unlock]);
    assert_eq!(store.inner.number_value(StateId::LockState), Some(2));
    assert_eq!(
        sink.events,
        [
            AppEvent::StatusApplied(LockStatus::Locked),
            AppEvent::CommandDispatched {
                state: StateId::Unlocked,
                action: DeviceAction::Unlock,
            },
            AppEvent::StatusApplied(LockStatus::Active),
            AppEvent::StatusApplied(LockStatus::Unlocked),
        ]
    );
    assert_eq!(
        bus.try_receive().ok(),
        Some(BridgeEvent::Status(4)),
        "events after shutdown stay queued"
    );
}
