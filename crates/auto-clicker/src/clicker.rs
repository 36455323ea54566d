//! Pointer backend built on `enigo`.
//!
//! `Enigo` is `!Send`, so an [`EnigoClicker`] must be created on the
//! thread that uses it. The playback engine takes a factory closure for
//! exactly this reason; see [`App`](crate::App) for the wiring.

use std::panic::Location;

use auto_clicker_core::{Clicker, CoreError, CoreResult, MouseButton};
use enigo::{Button, Coordinate, Direction, Enigo, Mouse, Settings};
use error_location::ErrorLocation;

/// [`Clicker`] implementation that drives the real pointer.
pub struct EnigoClicker {
    enigo: Enigo,
}

impl EnigoClicker {
    /// Connect to the platform input backend.
    #[track_caller]
    pub fn new() -> CoreResult<Self> {
        let enigo = Enigo::new(&Settings::default()).map_err(|e| CoreError::PointerDevice {
            reason: format!("Failed to create Enigo: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(Self { enigo })
    }
}

fn enigo_button(button: MouseButton) -> Button {
    match button {
        MouseButton::Left => Button::Left,
        MouseButton::Right => Button::Right,
        MouseButton::Middle => Button::Middle,
    }
}

impl Clicker for EnigoClicker {
    #[track_caller]
    fn move_to(&mut self, x: i32, y: i32) -> CoreResult<()> {
        self.enigo
            .move_mouse(x, y, Coordinate::Abs)
            .map_err(|e| CoreError::PointerDevice {
                reason: format!("Failed to move pointer to ({}, {}): {}", x, y, e),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    #[track_caller]
    fn click(&mut self, button: MouseButton, count: u8) -> CoreResult<()> {
        for _ in 0..count {
            self.enigo
                .button(enigo_button(button), Direction::Click)
                .map_err(|e| CoreError::PointerDevice {
                    reason: format!("Failed to click {:?}: {}", button, e),
                    location: ErrorLocation::from(Location::caller()),
                })?;
        }
        Ok(())
    }

    #[track_caller]
    fn position(&mut self) -> CoreResult<(i32, i32)> {
        self.enigo.location().map_err(|e| CoreError::PointerDevice {
            reason: format!("Failed to read pointer position: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
