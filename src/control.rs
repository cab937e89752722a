//! Control-state machine and console controller.
//!
//! `ControlState` tracks in-flight and active operator actions: which action
//! keys are awaiting a backend response and which attack the console
//! believes is running. It enforces the re-entrancy and mutual-exclusion
//! guards before any command leaves the console, and it is corrected by the
//! authoritative status carried on every pushed snapshot.
//!
//! Commands are fire-and-forget HTTP requests with no correlation id tying
//! them to a future snapshot, so the only consistency anchor is "the next
//! authoritative status wins": local belief is optimistic and the
//! reconciliation step overrides it.

use crate::dispatcher::CommandDispatcher;
use crate::error::CommandError;
use crate::models::{ActionKey, AttackKind, Command, CommandResponse, TelemetrySnapshot};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Events delivered to the UI loop from background tasks.
///
/// Drained with `try_recv` inside `eframe::App::update`, so every state
/// transition runs on the UI thread and none spans an event boundary.
#[derive(Debug)]
pub enum ConsoleEvent {
    /// The push channel came up.
    FeedConnected,

    /// The push channel closed or errored. The last snapshot stays visible.
    FeedDisconnected,

    /// A well-formed telemetry frame arrived.
    Snapshot(TelemetrySnapshot),

    /// An inbound frame failed to parse and was dropped.
    FrameRejected(String),

    /// A command request finished, successfully or not.
    CommandFinished {
        key: Option<ActionKey>,
        label: String,
        result: Result<CommandResponse, CommandError>,
    },
}

/// Local belief about in-flight and active operator actions.
#[derive(Debug, Clone, Default)]
pub struct ControlState {
    pending: HashSet<ActionKey>,
    active_attack: Option<AttackKind>,
}

impl ControlState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self, key: ActionKey) -> bool {
        self.pending.contains(&key)
    }

    pub fn active_attack(&self) -> Option<AttackKind> {
        self.active_attack
    }

    /// Whether `startAttack(kind)` would currently be accepted.
    ///
    /// Rejected while the kind's own command is in flight, while any attack
    /// command is in flight, or while any attack (including `kind` itself)
    /// is believed active. At most one attack exists at a time.
    pub fn can_start_attack(&self, kind: AttackKind) -> bool {
        if self.is_pending(ActionKey::Attack(kind)) {
            return false;
        }
        if self.active_attack.is_some() {
            return false;
        }
        !self
            .pending
            .iter()
            .any(|key| matches!(key, ActionKey::Attack(_)))
    }

    /// Whether the stop-attack button should act.
    pub fn can_stop_attack(&self) -> bool {
        self.active_attack.is_some() && !self.is_pending(ActionKey::StopAttack)
    }

    /// Apply the guards for `key` and, if they pass, mark it pending.
    /// Returns false for a silent no-op (already pending, or an attack
    /// blocked by mutual exclusion).
    pub fn try_begin(&mut self, key: ActionKey) -> bool {
        let allowed = match key {
            ActionKey::Attack(kind) => self.can_start_attack(kind),
            _ => !self.is_pending(key),
        };
        if allowed {
            self.pending.insert(key);
        }
        allowed
    }

    /// Resolve a pending action. On success an attack start becomes the
    /// active attack and a stop clears it optimistically; a failure only
    /// clears the pending flag.
    pub fn finish(&mut self, key: ActionKey, success: bool) {
        self.pending.remove(&key);
        if !success {
            return;
        }
        match key {
            ActionKey::Attack(kind) => self.active_attack = Some(kind),
            ActionKey::StopAttack => self.active_attack = None,
            _ => {}
        }
    }

    /// Correct local belief against the authoritative attacker status from
    /// the latest snapshot. A "no attack" signal always wins, regardless of
    /// optimistic state or pending commands.
    pub fn reconcile(&mut self, attacker_running: bool) {
        if !attacker_running && self.active_attack.is_some() {
            log::debug!(
                "[CONTROL] Backend reports no attacker; dropping local belief {:?}",
                self.active_attack
            );
            self.active_attack = None;
        }
    }
}

/// Owns the control state and turns operator intent into backend commands.
///
/// `issue` applies the guards, marks the key pending, and hands the request
/// to a background task; the task reports back as a
/// [`ConsoleEvent::CommandFinished`] which the UI loop feeds into
/// [`ConsoleController::apply_command_result`].
pub struct ConsoleController {
    control: ControlState,
    dispatcher: Arc<CommandDispatcher>,
    events_tx: mpsc::Sender<ConsoleEvent>,
}

impl ConsoleController {
    pub fn new(dispatcher: Arc<CommandDispatcher>, events_tx: mpsc::Sender<ConsoleEvent>) -> Self {
        Self {
            control: ControlState::new(),
            dispatcher,
            events_tx,
        }
    }

    pub fn control(&self) -> &ControlState {
        &self.control
    }

    /// Issue a command unless its guard rejects it.
    ///
    /// Subsystem toggles are guarded only by their own pending flag; the
    /// backend is authoritative, so no pre-check against the last known
    /// `status` happens here. Must be called from within the tokio runtime.
    pub fn issue(&mut self, command: Command) {
        let key = command.action_key();
        if let Some(key) = key {
            if !self.control.try_begin(key) {
                log::debug!("[CONTROL] Guard rejected '{}' ({:?})", command.label(), key);
                return;
            }
        }

        log::info!("[CONTROL] Issuing command: {}", command.label());
        let dispatcher = Arc::clone(&self.dispatcher);
        let events_tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = dispatcher.send(&command).await;
            // Teardown may have dropped the receiver; a late result is a no-op.
            let _ = events_tx
                .send(ConsoleEvent::CommandFinished {
                    key,
                    label: command.label(),
                    result,
                })
                .await;
        });
    }

    /// Retire a pending action when its command response arrives.
    pub fn apply_command_result(&mut self, key: Option<ActionKey>, success: bool) {
        if let Some(key) = key {
            self.control.finish(key, success);
        }
    }

    /// Reconciliation hook, invoked for every applied snapshot.
    pub fn reconcile(&mut self, attacker_running: bool) {
        self.control.reconcile(attacker_running);
    }
}
