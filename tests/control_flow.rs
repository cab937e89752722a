//! Integration test suite for the console's control and telemetry flow.
//!
//! Exercises the public crate surface end to end:
//! - Live frame to gauge scene (parse, store, geometry)
//! - Attack lifecycle over HTTP (mutual exclusion, stop, retry)
//! - Malformed frame resilience
//! - Authoritative status reconciliation
//! - Push channel feeding the snapshot store

use canids_console::control::{ConsoleController, ConsoleEvent, ControlState};
use canids_console::dispatcher::CommandDispatcher;
use canids_console::feed::{parse_frame, FeedClient};
use canids_console::gauge::{self, GaugeConfig, GaugeScene};
use canids_console::models::{ActionKey, AttackKind, Command};
use canids_console::store::TelemetryStore;
use futures::SinkExt;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::tungstenite::Message;

const CRUISING_FRAME: &str = r#"{
    "can": {"RPM": 7500, "Gear": 4, "Speed": 80, "Brake": 0},
    "vehicle_state": "Cruising",
    "alerts": [{"type": "Spoofing", "volume": 12, "details": "ID 0x0C9", "timestamp": "12:01:07"}],
    "status": {"Simulator": true, "IDS": true, "Attacker": true},
    "logs": ["sim started", "ids started"],
    "dos_active": false
}"#;

async fn finish_next_command(
    controller: &mut ConsoleController,
    events_rx: &mut mpsc::Receiver<ConsoleEvent>,
) -> bool {
    match events_rx.recv().await {
        Some(ConsoleEvent::CommandFinished { key, result, .. }) => {
            let success = result.is_ok();
            controller.apply_command_result(key, success);
            success
        }
        other => panic!("Expected a command event, got {other:?}"),
    }
}

// ============================================================================
// LIVE FRAME TO GAUGE SCENE
// ============================================================================

#[test]
fn test_cruising_frame_renders_expected_gauge_scenes() {
    let snapshot = parse_frame(CRUISING_FRAME).unwrap();

    let mut store = TelemetryStore::new();
    store.replace(snapshot);
    let current = store.current();

    // 7500 RPM sits 15 degrees past twelve o'clock, inside the red zone.
    let tach = GaugeScene::build(current.can.rpm, &GaugeConfig::rpm());
    assert!((tach.needle_angle_deg - 15.0).abs() < 1e-9);
    let red_zone = tach.zones.iter().find(|z| z.warning).unwrap();
    assert!(tach.needle_angle_deg >= red_zone.start_deg);
    assert_eq!(tach.readout, "7500");

    // 80 km/h on the 0-120 sweep lands at -50 degrees.
    let speedo = GaugeScene::build(current.can.speed, &GaugeConfig::speed())
        .with_secondary(gauge::gear_label(current.can.gear));
    assert!((speedo.needle_angle_deg + 50.0).abs() < 1e-9);
    assert_eq!(speedo.secondary.as_deref(), Some("4"));

    assert_eq!(current.alerts.len(), 1);
    assert_eq!(current.alerts[0].kind, "Spoofing");
    assert_eq!(current.logs.len(), 2);
}

// ============================================================================
// ATTACK LIFECYCLE OVER HTTP
// ============================================================================

#[tokio::test]
async fn test_attack_mutual_exclusion_end_to_end() {
    let mut server = mockito::Server::new_async().await;
    // Exactly one start request may reach the backend while spoof runs.
    let start_mock = server
        .mock("POST", "/start/attack")
        .match_body(mockito::Matcher::Json(serde_json::json!({"type": "spoof"})))
        .with_status(200)
        .with_body(r#"{"status": "started", "message": "Spoof attack started"}"#)
        .expect(1)
        .create_async()
        .await;
    let stop_mock = server
        .mock("POST", "/stop/attack")
        .with_status(200)
        .with_body(r#"{"status": "stopped"}"#)
        .expect(1)
        .create_async()
        .await;

    let (events_tx, mut events_rx) = mpsc::channel(16);
    let dispatcher = Arc::new(CommandDispatcher::new(server.url()));
    let mut controller = ConsoleController::new(dispatcher, events_tx);

    controller.issue(Command::StartAttack(AttackKind::Spoof));
    // Blocked while the spoof request is in flight.
    controller.issue(Command::StartAttack(AttackKind::Flood));

    assert!(finish_next_command(&mut controller, &mut events_rx).await);
    assert_eq!(
        controller.control().active_attack(),
        Some(AttackKind::Spoof)
    );

    // Blocked while spoof is believed active; only the stop is accepted.
    controller.issue(Command::StartAttack(AttackKind::Flood));
    assert!(controller.control().can_stop_attack());
    controller.issue(Command::StopAttack);

    assert!(finish_next_command(&mut controller, &mut events_rx).await);
    assert_eq!(controller.control().active_attack(), None);
    // With the attack gone, a new kind may start.
    assert!(controller.control().can_start_attack(AttackKind::Flood));

    start_mock.assert_async().await;
    stop_mock.assert_async().await;
}

#[tokio::test]
async fn test_rejected_attack_allows_retry() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/start/attack")
        .with_status(409)
        .with_body(r#"{"detail": "Attacker already running"}"#)
        .expect(2)
        .create_async()
        .await;

    let (events_tx, mut events_rx) = mpsc::channel(16);
    let dispatcher = Arc::new(CommandDispatcher::new(server.url()));
    let mut controller = ConsoleController::new(dispatcher, events_tx);

    controller.issue(Command::StartAttack(AttackKind::Replay));
    assert!(!finish_next_command(&mut controller, &mut events_rx).await);
    assert_eq!(controller.control().active_attack(), None);

    // The failure released the guard, so the operator may try again.
    assert!(controller.control().can_start_attack(AttackKind::Replay));
    controller.issue(Command::StartAttack(AttackKind::Replay));
    assert!(!finish_next_command(&mut controller, &mut events_rx).await);
}

// ============================================================================
// MALFORMED FRAME RESILIENCE
// ============================================================================

#[test]
fn test_malformed_frame_leaves_last_snapshot_intact() {
    let mut store = TelemetryStore::new();
    store.replace(parse_frame(CRUISING_FRAME).unwrap());

    for bad in ["", "{", "[1, 2, 3]", r#"{"can": "nope"}"#] {
        assert!(parse_frame(bad).is_err(), "frame {bad:?} must be rejected");
    }

    // Nothing was applied; the cruising snapshot is still current.
    let current = store.current();
    assert_eq!(current.can.rpm, 7500.0);
    assert_eq!(current.vehicle_state, "Cruising");
}

// ============================================================================
// AUTHORITATIVE STATUS RECONCILIATION
// ============================================================================

#[test]
fn test_pushed_status_overrides_optimistic_attack_belief() {
    let mut state = ControlState::new();
    state.try_begin(ActionKey::Attack(AttackKind::Flood));
    state.finish(ActionKey::Attack(AttackKind::Flood), true);
    state.try_begin(ActionKey::StopAttack);

    // The backend reports the attacker gone before the stop response lands.
    let snapshot = parse_frame(
        r#"{"status": {"Simulator": true, "IDS": true, "Attacker": false}}"#,
    )
    .unwrap();
    state.reconcile(snapshot.status.attacker);
    assert_eq!(state.active_attack(), None);

    // The late stop response retires the pending flag without resurrecting
    // the attack.
    state.finish(ActionKey::StopAttack, true);
    assert_eq!(state.active_attack(), None);
    assert!(!state.is_pending(ActionKey::StopAttack));
}

// ============================================================================
// PUSH CHANNEL FEEDING THE STORE
// ============================================================================

#[tokio::test]
async fn test_feed_frames_replace_store_in_arrival_order() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        ws.send(Message::Text(CRUISING_FRAME.to_string()))
            .await
            .unwrap();
        let idle = r#"{
            "can": {"RPM": 800, "Gear": 0, "Speed": 0, "Brake": 0},
            "vehicle_state": "Idle",
            "alerts": [],
            "status": {"Simulator": true, "IDS": true, "Attacker": false},
            "logs": ["attack stopped"],
            "dos_active": false
        }"#;
        ws.send(Message::Text(idle.to_string())).await.unwrap();
        ws.close(None).await.unwrap();
    });

    let (events_tx, mut events_rx) = mpsc::channel(16);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let handle = FeedClient::new(format!("ws://{}", addr), events_tx, shutdown_rx).spawn();

    let mut store = TelemetryStore::new();
    let mut control = ControlState::new();
    control.try_begin(ActionKey::Attack(AttackKind::Spoof));
    control.finish(ActionKey::Attack(AttackKind::Spoof), true);

    loop {
        match events_rx.recv().await {
            Some(ConsoleEvent::Snapshot(snapshot)) => {
                let attacker = snapshot.status.attacker;
                store.replace(snapshot);
                control.reconcile(attacker);
            }
            Some(ConsoleEvent::FeedDisconnected) => break,
            Some(_) => {}
            None => panic!("event channel closed before disconnect"),
        }
    }

    // The second frame won, and its "no attacker" status cleared the belief.
    let current = store.current();
    assert_eq!(current.vehicle_state, "Idle");
    assert_eq!(current.can.gear, 0);
    assert_eq!(gauge::gear_label(current.can.gear), "N");
    assert_eq!(control.active_attack(), None);

    shutdown_tx.send(true).unwrap();
    handle.await.unwrap();
    server.await.unwrap();
}
