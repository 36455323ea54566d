//! Global hotkey registration and dispatch.
//!
//! Registers the configured playback/recording hotkeys plus a fixed
//! CTRL+ESC panic binding, then forwards presses to the main
//! application as [`AppCommand`]s over an async channel.

use crate::{AppCommand, AppError, AppResult, HotkeyBinding, config::HotkeyConfig};

use std::{collections::HashMap, panic::Location, time::Duration};

use error_location::ErrorLocation;
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState, hotkey::HotKey};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument, warn};

/// Fixed panic binding: always registered so a runaway click loop can
/// be stopped even if the configured hotkeys were hand-edited away.
const PANIC_BINDING: &str = "<ctrl>+<esc>";

/// What a registered hotkey does when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    /// Toggle playback between Idle and Running.
    StartStop,
    /// Toggle between Running and Paused.
    Pause,
    /// Append a step at the current cursor position.
    AddPoint,
    /// Finish the active recording session.
    Finish,
    /// Stop everything and exit the process.
    Exit,
}

impl HotkeyAction {
    fn command(self) -> AppCommand {
        match self {
            HotkeyAction::StartStop => AppCommand::TogglePlayback,
            HotkeyAction::Pause => AppCommand::TogglePause,
            HotkeyAction::AddPoint => AppCommand::AddPoint,
            HotkeyAction::Finish => AppCommand::FinishRecording,
            HotkeyAction::Exit => AppCommand::Shutdown,
        }
    }
}

/// Owner of the OS-level hotkey registrations.
///
/// Must live on a thread with a message pump (e.g. the main thread
/// running a `tao` event loop) so that `WM_HOTKEY` messages are
/// dispatched on Windows, and must stay alive there for the hotkeys to
/// remain registered.
pub struct HotkeyRegistry {
    manager: GlobalHotKeyManager,
    registered: Vec<HotKey>,
    actions: HashMap<u32, HotkeyAction>,
}

impl HotkeyRegistry {
    /// Connect to the OS hotkey facility. Registers nothing yet.
    #[track_caller]
    #[instrument]
    pub fn new() -> AppResult<Self> {
        let manager =
            GlobalHotKeyManager::new().map_err(|e| AppError::HotkeyRegistrationFailed {
                reason: format!("Failed to create manager: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(Self {
            manager,
            registered: Vec::new(),
            actions: HashMap::new(),
        })
    }

    /// Register the configured hotkeys plus the fixed panic binding,
    /// replacing whatever set was registered before. This is the
    /// re-registration path for binding changes as well as the initial
    /// registration.
    ///
    /// When `config.enabled` is false, only the panic binding is
    /// registered.
    #[track_caller]
    #[instrument(skip(self, config))]
    pub fn apply(&mut self, config: &HotkeyConfig) -> AppResult<()> {
        for hotkey in self.registered.drain(..) {
            if let Err(e) = self.manager.unregister(hotkey) {
                warn!(error = %e, "Failed to unregister previous hotkey");
            }
        }
        self.actions.clear();

        let mut bindings = vec![(PANIC_BINDING.to_string(), HotkeyAction::Exit)];
        if config.enabled {
            bindings.push((config.start_stop.clone(), HotkeyAction::StartStop));
            bindings.push((config.pause.clone(), HotkeyAction::Pause));
            bindings.push((config.add_point.clone(), HotkeyAction::AddPoint));
            bindings.push((config.finish.clone(), HotkeyAction::Finish));
        } else {
            info!("Hotkeys disabled in config, registering panic binding only");
        }

        for (canonical, action) in bindings {
            let hotkey = HotkeyBinding::parse(&canonical)?.hotkey();

            self.manager
                .register(hotkey)
                .map_err(|e| AppError::HotkeyRegistrationFailed {
                    reason: format!("Failed to register {}: {}", canonical, e),
                    location: ErrorLocation::from(Location::caller()),
                })?;

            info!(binding = %canonical, ?action, "Global hotkey registered");
            self.registered.push(hotkey);
            self.actions.insert(hotkey.id(), action);
        }

        Ok(())
    }

    /// Snapshot of the id-to-action map for the dispatch side.
    pub fn actions(&self) -> HashMap<u32, HotkeyAction> {
        self.actions.clone()
    }
}

/// Global hotkey handler.
pub struct HotkeyHandler {
    actions: HashMap<u32, HotkeyAction>,
    command_tx: mpsc::Sender<AppCommand>,
}

impl HotkeyHandler {
    /// Create a handler for previously registered hotkeys.
    ///
    /// The `actions` map should come from [`HotkeyRegistry::actions`].
    /// This struct is `Send` and can live on any thread; it only
    /// listens on the global [`GlobalHotKeyEvent`] channel.
    pub fn new(actions: HashMap<u32, HotkeyAction>, command_tx: mpsc::Sender<AppCommand>) -> Self {
        Self {
            actions,
            command_tx,
        }
    }

    /// Run the hotkey handler event loop.
    ///
    /// This method blocks until a shutdown signal is received.
    #[instrument(skip(self))]
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) -> AppResult<()> {
        let receiver = GlobalHotKeyEvent::receiver().clone();
        let (event_tx, mut event_rx) = mpsc::channel(32);

        // Single persistent blocking task that forwards hotkey events.
        // GlobalHotKeyEvent::receiver() returns a crossbeam_channel::Receiver
        // which has blocking recv() -- zero polling, instant response, one thread.
        //
        // Shutdown: when event_rx is dropped (loop breaks), the next
        // event_tx.blocking_send() fails, breaking the blocking loop.
        // The JoinHandle is awaited with a timeout after the main loop exits.
        let handle = tokio::task::spawn_blocking(move || {
            while let Ok(event) = receiver.recv() {
                if event_tx.blocking_send(event).is_err() {
                    break;
                }
            }
        });

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("Hotkey handler shutting down");
                    break;
                }
                Some(event) = event_rx.recv() => {
                    if event.state == HotKeyState::Pressed {
                        self.handle_hotkey_press(event.id).await?;
                    }
                }
            }
        }

        // Drop event_rx to unblock the blocking task's next blocking_send().
        drop(event_rx);

        // Best-effort join: the blocking task may be stuck in recv() if no
        // hotkey event arrives after shutdown. Use a timeout to avoid hanging.
        // The task is cleaned up by the runtime on process exit regardless.
        match tokio::time::timeout(Duration::from_secs(1), handle).await {
            Ok(Ok(())) => debug!("Hotkey event forwarder stopped cleanly"),
            Ok(Err(e)) => warn!(error = ?e, "Hotkey event forwarder task panicked"),
            Err(_) => debug!(
                "Hotkey event forwarder did not stop within timeout, \
                   will be cleaned up on exit"
            ),
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn handle_hotkey_press(&self, hotkey_id: u32) -> AppResult<()> {
        let Some(action) = self.actions.get(&hotkey_id).copied() else {
            debug!(hotkey_id, "Hotkey event for unknown id ignored");
            return Ok(());
        };

        info!(?action, "Hotkey pressed");

        self.command_tx
            .send(action.command())
            .await
            .map_err(|e| AppError::ChannelSendFailed {
                message: format!("Failed to send {:?}: {}", action, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(())
    }
}
