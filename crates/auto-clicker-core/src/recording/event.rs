use crate::sequence::MouseButton;

/// Raw input event consumed by the recording session.
///
/// Produced on a listener thread and marshaled over the command channel
/// to the coordinating task before the session sees it, so the step
/// list is only ever mutated from one thread of control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureEvent {
    /// The capture modifier (Ctrl, either side) was pressed.
    ModifierPressed,
    /// The capture modifier was released.
    ModifierReleased,
    /// A pointer button was pressed at the given screen coordinates.
    Click {
        /// Horizontal screen coordinate.
        x: i32,
        /// Vertical screen coordinate.
        y: i32,
        /// Button identity; unrecognized buttons are reported as
        /// [`MouseButton::Left`] by the listener.
        button: MouseButton,
    },
}
