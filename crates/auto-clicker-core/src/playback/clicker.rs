use crate::{CoreResult, sequence::MouseButton};

/// Capability that performs the physical pointer actions.
///
/// Implemented outside the core (the binary backs it with enigo); tests
/// use a recording mock. The engine treats failures as transient: it
/// logs and keeps going rather than aborting playback.
pub trait Clicker {
    /// Move the pointer to absolute screen coordinates.
    fn move_to(&mut self, x: i32, y: i32) -> CoreResult<()>;

    /// Click `button` at the current pointer position, `count` times in
    /// rapid succession (1 = single click, 2 = double click).
    fn click(&mut self, button: MouseButton, count: u8) -> CoreResult<()>;

    /// Current pointer position.
    fn position(&mut self) -> CoreResult<(i32, i32)>;
}
