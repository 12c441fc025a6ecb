//! Drawing tool selection.

use crate::draw::ShapeKind;
use std::fmt;
use std::str::FromStr;

/// Drawing tool selection.
///
/// Exactly one tool is active per session; it decides how a press/move/release
/// gesture is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Pick and drag existing shapes
    #[default]
    Select,
    /// Freehand drawing - follows the pointer path
    Pen,
    /// Removes every shape the pointer passes over while a button is held
    Eraser,
    /// Straight line from press point to pointer
    Line,
    /// Rectangle spanning press point and pointer
    Rect,
    /// Ellipse inscribed in the rectangle spanning press point and pointer
    Ellipse,
}

impl Tool {
    pub const ALL: [Tool; 6] = [
        Tool::Select,
        Tool::Pen,
        Tool::Eraser,
        Tool::Line,
        Tool::Rect,
        Tool::Ellipse,
    ];

    /// Lowercase name used in log records and replay scripts.
    pub fn name(self) -> &'static str {
        match self {
            Tool::Select => "select",
            Tool::Pen => "pen",
            Tool::Eraser => "eraser",
            Tool::Line => "line",
            Tool::Rect => "rect",
            Tool::Ellipse => "ellipse",
        }
    }

    /// Shape created by this tool, if it is a drawing tool.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            Tool::Pen => Some(ShapeKind::Freehand),
            Tool::Line => Some(ShapeKind::Line),
            Tool::Rect => Some(ShapeKind::Rect),
            Tool::Ellipse => Some(ShapeKind::Ellipse),
            Tool::Select | Tool::Eraser => None,
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_ascii_lowercase();
        Tool::ALL
            .into_iter()
            .find(|tool| tool.name() == wanted)
            .ok_or_else(|| format!("unknown tool '{s}'"))
    }
}
