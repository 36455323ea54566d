mod event;
mod session;

pub use {
    event::CaptureEvent,
    session::{RecordingSession, RecordingState},
};
