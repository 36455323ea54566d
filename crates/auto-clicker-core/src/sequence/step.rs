use serde::{Deserialize, Serialize};

/// Pointer button used for a click.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    /// Primary button.
    #[default]
    Left,
    /// Secondary button.
    Right,
    /// Middle/wheel button.
    Middle,
}

/// One planned click: screen coordinates, a per-step wait issued before
/// the click, and the button to press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Horizontal screen coordinate.
    pub x: i32,
    /// Vertical screen coordinate.
    pub y: i32,
    /// Wait before this click, in milliseconds. Overridden for every
    /// step when the sequence meta carries a positive inter-delay.
    #[serde(default)]
    pub delay_ms: u64,
    /// Button to click.
    #[serde(default)]
    pub button: MouseButton,
}

impl Step {
    /// A step at the given coordinates with no delay and the left button.
    pub fn at(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            delay_ms: 0,
            button: MouseButton::Left,
        }
    }
}
