//! System tray icon with state-based updates.
//!
//! Manages a system tray icon with four states (Idle, Running, Paused,
//! Recording) and a context menu for playback control, recording, the
//! sequences folder, and Exit.

use crate::{AppError, AppResult, TrayIconState};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::{info, instrument};
use tray_icon::menu::{Menu, MenuId, MenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

/// System tray icon manager.
pub struct TrayManager {
    tray_icon: TrayIcon,
    start_stop_item_id: MenuId,
    pause_item_id: MenuId,
    record_item_id: MenuId,
    sequences_item_id: MenuId,
    exit_item_id: MenuId,
}

impl TrayManager {
    /// Create a new tray manager with initial state.
    #[track_caller]
    #[instrument]
    pub fn new() -> AppResult<Self> {
        let menu = Menu::new();

        let start_stop_item = MenuItem::new("Start / Stop", true, None);
        let pause_item = MenuItem::new("Pause / Resume", true, None);
        let record_item = MenuItem::new("Record Sequence", true, None);
        let sequences_item = MenuItem::new("Open Sequences Folder", true, None);
        let exit_item = MenuItem::new("Exit", true, None);

        let start_stop_id = start_stop_item.id().clone();
        let pause_id = pause_item.id().clone();
        let record_id = record_item.id().clone();
        let sequences_id = sequences_item.id().clone();
        let exit_id = exit_item.id().clone();

        for item in [
            &start_stop_item,
            &pause_item,
            &record_item,
            &sequences_item,
            &exit_item,
        ] {
            menu.append(item).map_err(|e| AppError::ConfigError {
                reason: format!("Failed to add menu item: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;
        }

        let icon = Self::load_icon(TrayIconState::Idle)?;

        let tray_icon = TrayIconBuilder::new()
            .with_tooltip("Auto-Clicker - Ready")
            .with_menu(Box::new(menu))
            .with_icon(icon)
            .build()
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to create tray icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!("System tray icon initialized");

        Ok(Self {
            tray_icon,
            start_stop_item_id: start_stop_id,
            pause_item_id: pause_id,
            record_item_id: record_id,
            sequences_item_id: sequences_id,
            exit_item_id: exit_id,
        })
    }

    /// Update the tray icon state with new icon and tooltip.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn update_state(&mut self, state: TrayIconState) -> AppResult<()> {
        let (icon, tooltip) = match state {
            TrayIconState::Idle => (Self::load_icon(state)?, "Auto-Clicker - Ready"),
            TrayIconState::Running => (Self::load_icon(state)?, "Auto-Clicker - Clicking..."),
            TrayIconState::Paused => (Self::load_icon(state)?, "Auto-Clicker - Paused"),
            TrayIconState::Recording => (Self::load_icon(state)?, "Auto-Clicker - Recording..."),
        };

        self.tray_icon
            .set_icon(Some(icon))
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to update icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.tray_icon
            .set_tooltip(Some(tooltip))
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to update tooltip: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(())
    }

    /// Load icon from compile-time embedded PNG bytes.
    ///
    /// Icons are embedded via include_bytes! so they work regardless of
    /// install location -- no hardcoded filesystem paths.
    #[track_caller]
    fn load_icon(state: TrayIconState) -> AppResult<Icon> {
        let png_bytes: &[u8] = match state {
            TrayIconState::Idle => include_bytes!("../resources/icons/idle.png"),
            TrayIconState::Running => include_bytes!("../resources/icons/running.png"),
            TrayIconState::Paused => include_bytes!("../resources/icons/paused.png"),
            TrayIconState::Recording => include_bytes!("../resources/icons/recording.png"),
        };

        let img = image::load_from_memory(png_bytes).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to decode embedded icon: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let rgba = img.into_rgba8();
        let (width, height) = (rgba.width(), rgba.height());

        Icon::from_rgba(rgba.into_raw(), width, height).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to create icon from RGBA: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Get the start/stop menu item ID.
    pub fn start_stop_item_id(&self) -> &MenuId {
        &self.start_stop_item_id
    }

    /// Get the pause menu item ID.
    pub fn pause_item_id(&self) -> &MenuId {
        &self.pause_item_id
    }

    /// Get the record menu item ID.
    pub fn record_item_id(&self) -> &MenuId {
        &self.record_item_id
    }

    /// Get the sequences-folder menu item ID.
    pub fn sequences_item_id(&self) -> &MenuId {
        &self.sequences_item_id
    }

    /// Get the exit menu item ID.
    pub fn exit_item_id(&self) -> &MenuId {
        &self.exit_item_id
    }
}
