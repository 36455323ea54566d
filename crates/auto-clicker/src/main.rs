//! Auto-Clicker: hotkey-driven pointer automation with sequence recording.

mod app;
mod app_command;
mod capture_listener;
mod clicker;
mod config;
mod error;
mod hotkey_binding;
mod hotkey_handler;
#[cfg(test)]
mod tests;
mod tray_command;
mod tray_icon_state;
mod tray_manager;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    clicker::EnigoClicker,
    error::{AppError, Result as AppResult},
    hotkey_binding::HotkeyBinding,
    hotkey_handler::{HotkeyHandler, HotkeyRegistry},
    tray_command::TrayCommand,
    tray_icon_state::TrayIconState,
    tray_manager::TrayManager,
};

use crate::config::Config;

use auto_clicker_core::SequenceStore;
use tao::{
    event::Event,
    event_loop::{ControlFlow, EventLoopBuilder},
};
use tokio::sync::{mpsc, watch};
use tracing::error;

/// Application entry point.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("auto_clicker=debug")
        .init();

    let event_loop = EventLoopBuilder::<TrayCommand>::with_user_event().build();
    let tray_proxy = event_loop.create_proxy();

    // TrayManager lives on the main thread - TrayIcon is !Send on all platforms.
    let mut tray_manager = match TrayManager::new() {
        Ok(tm) => tm,
        Err(e) => {
            error!("Failed to create TrayManager: {:?}", e);
            std::process::exit(1);
        }
    };

    // Persists across event loop iterations -- dropping it unregisters the hotkeys.
    let mut hotkey_registry: Option<HotkeyRegistry> = None;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::UserEvent(cmd) => {
                match cmd {
                    TrayCommand::SetState(state) => {
                        if let Err(e) = tray_manager.update_state(state) {
                            error!(error = ?e, "Failed to update tray icon");
                        }
                    }
                    TrayCommand::Shutdown => {
                        *control_flow = ControlFlow::ExitWithCode(0);
                    }
                }
                return;
            }
            Event::NewEvents(tao::event::StartCause::Init) => {
                let config = match Config::load() {
                    Ok(c) => c,
                    Err(e) => {
                        error!("Failed to load config: {:?}", e);
                        std::process::exit(1);
                    }
                };

                let sequences_dir = match Config::sequences_dir() {
                    Ok(dir) => dir,
                    Err(e) => {
                        error!("Failed to resolve sequences directory: {:?}", e);
                        std::process::exit(1);
                    }
                };

                let store = match SequenceStore::new(&sequences_dir) {
                    Ok(store) => store,
                    Err(e) => {
                        error!("Failed to open sequence store: {:?}", e);
                        std::process::exit(1);
                    }
                };

                #[cfg(target_os = "macos")]
                unsafe {
                    use core_foundation::runloop::{CFRunLoopGetMain, CFRunLoopWakeUp};
                    CFRunLoopWakeUp(CFRunLoopGetMain());
                }

                let (command_tx, command_rx) = mpsc::channel(32);
                let (shutdown_tx, shutdown_rx) = watch::channel(false);

                // Register hotkeys on the main thread -- tao's event loop pumps
                // the Windows messages needed for WM_HOTKEY delivery.
                // hotkey_registry is stored in the closure's captured state so it
                // lives for the entire app lifetime.
                let registry = HotkeyRegistry::new().and_then(|mut registry| {
                    registry.apply(&config.hotkeys)?;
                    Ok(registry)
                });
                let registry = match registry {
                    Ok(registry) => registry,
                    Err(e) => {
                        error!("Failed to register hotkeys: {:?}", e);
                        std::process::exit(1);
                    }
                };
                let actions = registry.actions();
                hotkey_registry = Some(registry);

                // The OS input hook runs for the whole process; the
                // recording session ignores events while not armed.
                capture_listener::spawn(command_tx.clone());

                let tray_proxy = tray_proxy.clone();
                let start_stop_menu_id = tray_manager.start_stop_item_id().clone();
                let pause_menu_id = tray_manager.pause_item_id().clone();
                let record_menu_id = tray_manager.record_item_id().clone();
                let sequences_menu_id = tray_manager.sequences_item_id().clone();
                let exit_menu_id = tray_manager.exit_item_id().clone();

                // Spawn tokio runtime on separate thread.
                // TrayManager and hotkey_registry stay on the main thread.
                std::thread::spawn(move || {
                    let rt = match tokio::runtime::Runtime::new() {
                        Ok(rt) => rt,
                        Err(e) => {
                            error!("Failed to create tokio runtime: {:?}", e);
                            std::process::exit(1);
                        }
                    };

                    rt.block_on(async {
                        let hotkey_handler = HotkeyHandler::new(actions, command_tx.clone());

                        let app = App {
                            engine: auto_clicker_core::PlaybackEngine::new(),
                            session: auto_clicker_core::RecordingSession::new(),
                            sequence: auto_clicker_core::Sequence::default(),
                            store,
                            config,
                            tray_proxy,
                            command_tx,
                            command_rx,
                            shutdown_tx,
                            start_stop_menu_id,
                            pause_menu_id,
                            record_menu_id,
                            sequences_menu_id,
                            exit_menu_id,
                            last_tray_state: TrayIconState::Idle,
                        };

                        tokio::join!(
                            async {
                                if let Err(e) = hotkey_handler.run(shutdown_rx).await {
                                    error!(error = ?e, "Hotkey handler error");
                                }
                            },
                            async {
                                if let Err(e) = app.run().await {
                                    error!(error = ?e, "App error");
                                }
                            }
                        );
                    });
                });
            }
            _ => {}
        }

        // Keep hotkey_registry alive in the closure for the app's lifetime.
        let _ = &hotkey_registry;
    });
}
