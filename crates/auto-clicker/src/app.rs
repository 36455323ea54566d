use crate::{
    AppCommand, AppResult, EnigoClicker, TrayCommand, TrayIconState, config::Config,
};

use std::{path::PathBuf, time::Duration};

use auto_clicker_core::{
    ClickPlan, Clicker, EngineState, PlaybackEngine, RecordingSession, Sequence, SequenceStore,
};
use rand::{SeedableRng, rngs::StdRng};
use tao::event_loop::EventLoopProxy;
use tokio::sync::{mpsc, watch};
use tracing::{error, info, instrument, warn};
use tray_icon::menu::MenuEvent;
use uuid::Uuid;

/// How often the tray icon is reconciled with the engine state. A
/// finite-repeat run ends on its own worker thread, so without this the
/// icon would stay on Running after the loop finished.
const TRAY_SYNC_INTERVAL: Duration = Duration::from_millis(500);

/// Main application state.
///
/// Runs on the async runtime thread and owns the playback engine, the
/// recording session and the working sequence. Tray icon updates go
/// back to the main thread via `tray_proxy` because `TrayIcon` is
/// `!Send` and must remain on the UI thread.
pub struct App {
    pub(crate) engine: PlaybackEngine,
    pub(crate) session: RecordingSession,
    pub(crate) sequence: Sequence,
    pub(crate) store: SequenceStore,
    pub(crate) config: Config,
    pub(crate) tray_proxy: EventLoopProxy<TrayCommand>,
    pub(crate) command_tx: mpsc::Sender<AppCommand>,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
    pub(crate) shutdown_tx: watch::Sender<bool>,
    pub(crate) start_stop_menu_id: tray_icon::menu::MenuId,
    pub(crate) pause_menu_id: tray_icon::menu::MenuId,
    pub(crate) record_menu_id: tray_icon::menu::MenuId,
    pub(crate) sequences_menu_id: tray_icon::menu::MenuId,
    pub(crate) exit_menu_id: tray_icon::menu::MenuId,
    pub(crate) last_tray_state: TrayIconState,
}

impl App {
    /// Run the main application event loop.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Auto-Clicker starting");

        if let Some(sequence) = self.store.load_snapshot() {
            info!(steps = sequence.steps.len(), "Restored last capture");
            self.sequence = sequence;
        }

        // Tray event forwarding via single persistent blocking task.
        //
        // MenuEvent::receiver() returns a crossbeam_channel::Receiver which
        // HAS blocking recv() -- zero polling, instant response, one thread.
        //
        // Shutdown: when tray_event_rx is dropped (main loop breaks),
        // tray_event_tx.blocking_send() fails, breaking the blocking loop.
        let (tray_event_tx, mut tray_event_rx) = mpsc::channel(32);
        let tray_handle = tokio::task::spawn_blocking(move || {
            let receiver = MenuEvent::receiver();
            while let Ok(event) = receiver.recv() {
                if tray_event_tx.blocking_send(event).is_err() {
                    break;
                }
            }
        });

        let mut tray_sync = tokio::time::interval(TRAY_SYNC_INTERVAL);

        loop {
            tokio::select! {
                Some(event) = tray_event_rx.recv() => {
                    if let Err(e) = self.handle_tray_event(event).await {
                        error!(error = ?e, "Failed to handle tray event");
                    }
                }

                Some(cmd) = self.command_rx.recv() => {
                    if !self.handle_command(cmd) {
                        break;
                    }
                }

                _ = tray_sync.tick() => {
                    self.sync_tray();
                }

                else => {
                    info!("All channels closed, shutting down");
                    break;
                }
            }
        }

        self.engine.stop();

        drop(tray_event_rx);

        match tokio::time::timeout(Duration::from_secs(1), tray_handle).await {
            Ok(Ok(())) => info!("Tray event forwarder stopped cleanly"),
            Ok(Err(e)) => error!(error = ?e, "Tray event forwarder task panicked"),
            Err(_) => info!(
                "Tray event forwarder did not stop within timeout, \
                     will be cleaned up on exit"
            ),
        }

        let _ = self.shutdown_tx.send(true);
        let _ = self.tray_proxy.send_event(TrayCommand::Shutdown);
        info!("Auto-Clicker shut down successfully");

        Ok(())
    }

    /// Dispatch one command. Returns false when the loop should exit.
    fn handle_command(&mut self, cmd: AppCommand) -> bool {
        match cmd {
            AppCommand::TogglePlayback => self.toggle_playback(),
            AppCommand::TogglePause => self.toggle_pause(),
            AppCommand::StartRecording => self.start_recording(),
            AppCommand::FinishRecording => {
                if let Some(sequence) = self.session.finish() {
                    self.capture_finished(sequence);
                }
            }
            AppCommand::AddPoint => self.add_point(),
            AppCommand::Capture(event) => {
                if let Some(sequence) = self.session.handle_event(event) {
                    self.capture_finished(sequence);
                }
            }
            AppCommand::Shutdown => {
                info!("Shutdown requested");
                return false;
            }
        }
        self.sync_tray();
        true
    }

    /// Start the click loop if idle, stop it if running or paused.
    #[instrument(skip(self))]
    fn toggle_playback(&mut self) {
        if self.session.is_active() {
            warn!("Playback refused: recording in progress");
            return;
        }

        match self.engine.state() {
            EngineState::Running | EngineState::Paused => {
                self.engine.stop();
            }
            EngineState::Idle => {
                let run_id = Uuid::new_v4();
                let plan = ClickPlan {
                    sequence: self.sequence.clone(),
                    timing: self.config.click.timing(),
                };
                info!(
                    run_id = %run_id,
                    steps = plan.sequence.steps.len(),
                    repeats = plan.sequence.meta.repeats,
                    "Starting playback"
                );
                // The clicker is built on the worker thread: enigo
                // handles are not Send.
                self.engine
                    .start(plan, EnigoClicker::new, StdRng::from_entropy());
            }
        }
    }

    #[instrument(skip(self))]
    fn toggle_pause(&mut self) {
        let state = self.engine.toggle_pause();
        info!(?state, "Pause toggled");
    }

    #[instrument(skip(self))]
    fn start_recording(&mut self) {
        if self.engine.state() != EngineState::Idle {
            warn!("Recording refused: playback in progress");
            return;
        }
        if self.session.start() {
            info!(session_id = %Uuid::new_v4(), "Recording session armed");
        }
    }

    /// A capture just ended: adopt it as the working sequence, snapshot
    /// it, and (per config) save it to the store.
    #[instrument(skip(self, sequence))]
    fn capture_finished(&mut self, sequence: Sequence) {
        if sequence.is_empty() {
            info!("Capture ended with no steps, keeping previous sequence");
            return;
        }

        self.sequence = sequence;

        if let Err(e) = self.store.save_snapshot(&self.sequence) {
            error!(error = %e, "Failed to write capture snapshot");
        }

        if self.config.behaviour.auto_save_after_record {
            match self.store.save(&self.sequence) {
                Ok(path) => info!(path = ?path, "Capture saved"),
                Err(e) => error!(error = %e, "Failed to save capture"),
            }
        }
    }

    /// Append a step at the current cursor position to the working
    /// sequence.
    #[instrument(skip(self))]
    fn add_point(&mut self) {
        let position = EnigoClicker::new().and_then(|mut clicker| clicker.position());
        match position {
            Ok((x, y)) => {
                self.sequence.push(auto_clicker_core::Step::at(x, y));
                info!(x, y, steps = self.sequence.steps.len(), "Point added");
                if let Err(e) = self.store.save_snapshot(&self.sequence) {
                    error!(error = %e, "Failed to write snapshot after add");
                }
            }
            Err(e) => error!(error = %e, "Could not read cursor position"),
        }
    }

    /// Reconcile the tray icon with the actual engine/session state.
    fn sync_tray(&mut self) {
        let state = if self.session.is_active() {
            TrayIconState::Recording
        } else {
            match self.engine.state() {
                EngineState::Idle => TrayIconState::Idle,
                EngineState::Running => TrayIconState::Running,
                EngineState::Paused => TrayIconState::Paused,
            }
        };

        if state != self.last_tray_state {
            self.last_tray_state = state;
            let _ = self.tray_proxy.send_event(TrayCommand::SetState(state));
        }
    }

    /// Handle tray menu events.
    #[instrument(skip(self))]
    async fn handle_tray_event(&mut self, event: MenuEvent) -> AppResult<()> {
        let event_id = &event.id;

        if *event_id == self.start_stop_menu_id {
            self.toggle_playback();
            self.sync_tray();
        } else if *event_id == self.pause_menu_id {
            self.toggle_pause();
            self.sync_tray();
        } else if *event_id == self.record_menu_id {
            self.start_recording();
            self.sync_tray();
        } else if *event_id == self.sequences_menu_id {
            let dir: PathBuf = self.store.dir().to_path_buf();
            let _ = open::that(dir);
            info!("Opened sequences folder");
        } else if *event_id == self.exit_menu_id {
            info!("Exit requested from tray menu");
            if let Err(e) = self.command_tx.send(AppCommand::Shutdown).await {
                error!(error = ?e, "Failed to send shutdown command");
            }
        }

        Ok(())
    }
}
