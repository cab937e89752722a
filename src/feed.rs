//! Live feed client: owns the one push connection to the backend.
//!
//! A single background task runs a sequential connect / read / reconnect
//! loop, so at most one socket is ever open and a snapshot can never be
//! applied twice. Each well-formed frame is forwarded to the UI loop as a
//! [`ConsoleEvent::Snapshot`]; malformed frames are logged and dropped
//! without touching the last good snapshot. Connection loss never clears
//! anything: stale data stays visible behind a "disconnected" indicator.

use crate::control::ConsoleEvent;
use crate::error::FeedError;
use crate::models::TelemetrySnapshot;
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

/// Fixed backoff between reconnect attempts.
const RECONNECT_DELAY: Duration = Duration::from_secs(2);

/// Push-channel state as the UI presents it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Connected,
    Disconnected,
}

impl ConnectionState {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionState::Connecting => "CONNECTING",
            ConnectionState::Connected => "CONNECTED",
            ConnectionState::Disconnected => "DISCONNECTED",
        }
    }
}

/// Parse one inbound frame as a full telemetry snapshot.
pub fn parse_frame(text: &str) -> Result<TelemetrySnapshot, FeedError> {
    Ok(serde_json::from_str(text)?)
}

/// Maintains the long-lived WebSocket to the backend dashboard endpoint.
pub struct FeedClient {
    url: String,
    events_tx: mpsc::Sender<ConsoleEvent>,
    shutdown_rx: watch::Receiver<bool>,
}

impl FeedClient {
    pub fn new(
        url: impl Into<String>,
        events_tx: mpsc::Sender<ConsoleEvent>,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            url: url.into(),
            events_tx,
            shutdown_rx,
        }
    }

    /// Spawn the feed task. It runs until the shutdown signal flips.
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run())
    }

    async fn run(mut self) {
        loop {
            if *self.shutdown_rx.borrow() {
                break;
            }

            log::info!("[FEED] Connecting to {}", self.url);
            match connect_async(self.url.as_str()).await {
                Ok((stream, _)) => {
                    log::info!("[FEED] Connected");
                    let _ = self.events_tx.send(ConsoleEvent::FeedConnected).await;
                    self.read_frames(stream).await;
                    log::warn!("[FEED] Disconnected");
                    let _ = self.events_tx.send(ConsoleEvent::FeedDisconnected).await;
                }
                Err(e) => {
                    log::warn!("[FEED] Connect failed: {}", e);
                    let _ = self.events_tx.send(ConsoleEvent::FeedDisconnected).await;
                }
            }

            tokio::select! {
                _ = tokio::time::sleep(RECONNECT_DELAY) => {}
                _ = self.shutdown_rx.changed() => {}
            }
        }
        log::info!("[FEED] Feed task shut down");
    }

    async fn read_frames<S>(&mut self, mut stream: S)
    where
        S: futures::Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
    {
        loop {
            tokio::select! {
                _ = self.shutdown_rx.changed() => {
                    if *self.shutdown_rx.borrow() {
                        return;
                    }
                }
                item = stream.next() => {
                    match item {
                        Some(Ok(Message::Text(text))) => self.handle_frame(&text).await,
                        Some(Ok(Message::Close(_))) | None => return,
                        // Ping/pong and binary frames carry no telemetry.
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            log::warn!("[FEED] Read error: {}", e);
                            return;
                        }
                    }
                }
            }
        }
    }

    async fn handle_frame(&self, text: &str) {
        match parse_frame(text) {
            Ok(snapshot) => {
                let _ = self.events_tx.send(ConsoleEvent::Snapshot(snapshot)).await;
            }
            Err(e) => {
                log::warn!("[FEED] Dropping malformed frame: {}", e);
                let _ = self
                    .events_tx
                    .send(ConsoleEvent::FrameRejected(e.to_string()))
                    .await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::SinkExt;

    const FRAME: &str = r#"{
        "can": {"RPM": 7500, "Gear": 4, "Speed": 80, "Brake": 0},
        "vehicle_state": "Cruising",
        "alerts": [],
        "status": {"Simulator": true, "IDS": true, "Attacker": false},
        "logs": ["sim started"],
        "dos_active": false
    }"#;

    #[test]
    fn test_parse_frame_accepts_backend_payload() {
        let snapshot = parse_frame(FRAME).unwrap();
        assert_eq!(snapshot.can.rpm, 7500.0);
        assert_eq!(snapshot.logs.len(), 1);
    }

    #[test]
    fn test_parse_frame_rejects_invalid_json() {
        assert!(parse_frame("{").is_err());
        assert!(parse_frame("").is_err());
    }

    #[test]
    fn test_parse_frame_rejects_wrong_shape() {
        // Well-formed JSON, but `can` must be an object.
        assert!(parse_frame(r#"{"can": 12}"#).is_err());
    }

    #[tokio::test]
    async fn test_feed_client_forwards_frames_and_reports_disconnect() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
            ws.send(Message::Text(FRAME.to_string())).await.unwrap();
            ws.send(Message::Text("definitely not json".to_string()))
                .await
                .unwrap();
            ws.close(None).await.unwrap();
        });

        let (events_tx, mut events_rx) = mpsc::channel(16);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = FeedClient::new(format!("ws://{}", addr), events_tx, shutdown_rx).spawn();

        assert!(matches!(
            events_rx.recv().await,
            Some(ConsoleEvent::FeedConnected)
        ));
        match events_rx.recv().await {
            Some(ConsoleEvent::Snapshot(snapshot)) => {
                assert_eq!(snapshot.can.speed, 80.0);
                assert!(snapshot.status.simulator);
            }
            other => panic!("Expected a snapshot, got {other:?}"),
        }
        assert!(matches!(
            events_rx.recv().await,
            Some(ConsoleEvent::FrameRejected(_))
        ));
        assert!(matches!(
            events_rx.recv().await,
            Some(ConsoleEvent::FeedDisconnected)
        ));

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_feed_client_reports_failed_connect_and_stops_on_shutdown() {
        let (events_tx, mut events_rx) = mpsc::channel(16);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        // Nothing listens on port 9.
        let handle = FeedClient::new("ws://127.0.0.1:9", events_tx, shutdown_rx).spawn();

        assert!(matches!(
            events_rx.recv().await,
            Some(ConsoleEvent::FeedDisconnected)
        ));

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();
    }
}
