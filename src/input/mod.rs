//! Input handling and tool state machine.
//!
//! This module translates pointer events from the host UI into shape-model
//! mutations. It owns the active tool, the shape collection, the selection set
//! and the per-gesture state, and buffers the semantic events that the editing
//! session forwards to the event log.

pub mod events;
pub mod state;
pub mod tool;

pub use events::MouseButton;
pub use state::{GestureState, InputState, MOVE_THRESHOLD, SemanticEvent};
pub use tool::Tool;
