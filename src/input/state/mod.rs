mod core;
mod mouse;
#[cfg(test)]
mod tests;

pub use core::{GestureState, InputState, MOVE_THRESHOLD, SemanticEvent};
