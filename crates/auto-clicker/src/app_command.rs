use auto_clicker_core::CaptureEvent;

/// Commands sent from hotkey/listener threads to the main application.
#[derive(Debug, Clone, Copy)]
pub enum AppCommand {
    /// Start playback if idle, stop it if running.
    TogglePlayback,
    /// Toggle between Running and Paused; no-op when idle.
    TogglePause,
    /// Arm the recording session.
    StartRecording,
    /// Finish the recording session manually.
    FinishRecording,
    /// Append a step at the current cursor position.
    AddPoint,
    /// Raw input event for the recording session.
    Capture(CaptureEvent),
    /// Request application shutdown.
    Shutdown,
}
