//! OS input hook feeding the recording session.
//!
//! Spawns a dedicated thread running `rdev::listen` for the lifetime of
//! the process (the hook cannot be stopped once installed) and forwards
//! the events the recorder cares about as [`AppCommand::Capture`]. The
//! recording session ignores everything while it is not armed, so a
//! permanently running listener is harmless.

use crate::AppCommand;

use auto_clicker_core::{CaptureEvent, MouseButton};
use rdev::{Button, EventType, Key};
use tokio::sync::mpsc;
use tracing::{info, trace, warn};

/// Install the global input hook on a background thread.
///
/// Uses `try_send` from inside the OS hook callback: the hook must
/// never block, or the whole desktop's input stalls. A full channel
/// drops the event, which the recorder tolerates.
pub fn spawn(command_tx: mpsc::Sender<AppCommand>) {
    std::thread::spawn(move || {
        info!("Input capture listener starting");

        // rdev reports clicks without coordinates, so track the last
        // pointer position from move events.
        let mut last_pos: (i32, i32) = (0, 0);

        let result = rdev::listen(move |event| match event.event_type {
            EventType::MouseMove { x, y } => {
                last_pos = (x as i32, y as i32);
            }
            EventType::KeyPress(Key::ControlLeft | Key::ControlRight) => {
                forward(&command_tx, CaptureEvent::ModifierPressed);
            }
            EventType::KeyRelease(Key::ControlLeft | Key::ControlRight) => {
                forward(&command_tx, CaptureEvent::ModifierReleased);
            }
            EventType::ButtonPress(button) => {
                let (x, y) = last_pos;
                forward(
                    &command_tx,
                    CaptureEvent::Click {
                        x,
                        y,
                        button: capture_button(button),
                    },
                );
            }
            _ => {}
        });

        if let Err(e) = result {
            warn!(error = ?e, "Input capture listener failed; recording unavailable");
        }
    });
}

fn forward(command_tx: &mpsc::Sender<AppCommand>, event: CaptureEvent) {
    if let Err(e) = command_tx.try_send(AppCommand::Capture(event)) {
        trace!(error = %e, "Dropped capture event");
    }
}

/// Map a hardware button to the sequence format. Extra buttons the
/// format has no name for are recorded as left clicks.
fn capture_button(button: Button) -> MouseButton {
    match button {
        Button::Left => MouseButton::Left,
        Button::Right => MouseButton::Right,
        Button::Middle => MouseButton::Middle,
        Button::Unknown(_) => MouseButton::Left,
    }
}
