/// Tray icon states corresponding to application workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayIconState {
    /// Ready; nothing running.
    Idle,
    /// Click loop is issuing clicks.
    Running,
    /// Click loop alive but suspended.
    Paused,
    /// Recording session armed or capturing.
    Recording,
}
