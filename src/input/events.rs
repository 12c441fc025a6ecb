//! Generic pointer event types shared with the host UI.

use std::str::FromStr;

/// Mouse button identification.
///
/// The host UI maps its native button codes to these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button; starts every gesture
    Left,
    /// Secondary button; only the eraser reacts to it
    Right,
    /// Middle button; only the eraser reacts to it
    Middle,
}

impl FromStr for MouseButton {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(MouseButton::Left),
            "right" => Ok(MouseButton::Right),
            "middle" => Ok(MouseButton::Middle),
            other => Err(format!("unknown mouse button '{other}'")),
        }
    }
}
