//! Shape model for the drawing canvas.
//!
//! This module defines the core drawing types:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`Shape`]: the closed set of vector primitives (path, line, rect, ellipse)
//! - [`Frame`]: container for all shapes in the current drawing

pub mod color;
pub mod frame;
pub mod shape;

pub use color::Color;
pub use frame::{Frame, FrameItem, ShapeId, ShapeOrigin};
pub use shape::{Shape, ShapeKind, ShapeStyle};

pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, WHITE, YELLOW};
