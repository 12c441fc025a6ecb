//! Gesture state machine and input state management.

use crate::draw::{Frame, ShapeId, ShapeKind, ShapeStyle};
use crate::eventlog::EventFields;
use crate::input::{events::MouseButton, tool::Tool};
use crate::util::Point;
use std::collections::{BTreeSet, HashSet};

/// Manhattan distance a select gesture must exceed to count as a move.
pub const MOVE_THRESHOLD: f64 = 2.0;

/// Per-gesture state, cleared on release.
///
/// Tracks whether the user is idle, dragging with the select tool, or
/// drawing a shape. State transitions occur on pointer events and tool
/// switches.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureState {
    /// Not in a gesture - waiting for a press
    Idle,
    /// Select tool pressed; waiting to see if the user drags
    Selecting {
        /// Topmost shape under the pointer at press time
        target: Option<ShapeId>,
        /// Where the press happened
        press: Point,
        /// Last pointer position, for incremental drag
        last: Point,
    },
    /// A drawing tool is growing its in-progress shape
    Drawing {
        /// Tool that started the gesture
        tool: Tool,
        /// In-progress shape, already part of the frame
        shape: ShapeId,
        /// Where the press happened
        anchor: Point,
        /// Points recorded so far (press counts as one)
        point_count: usize,
    },
}

/// A semantic action for the event log, buffered until the session drains it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticEvent {
    pub event_type: String,
    pub fields: EventFields,
}

impl SemanticEvent {
    pub fn new(event_type: impl Into<String>, fields: EventFields) -> Self {
        Self {
            event_type: event_type.into(),
            fields,
        }
    }
}

/// Main input state containing the drawing session's canvas and tool state.
///
/// Processes pointer events and tool switches. Every operation is total: it
/// never fails, and interrupted gestures leave their shape in the frame frozen
/// at its last geometry.
pub struct InputState {
    /// All shapes on the canvas
    pub frame: Frame,
    /// Shapes picked with the select tool
    pub selection: BTreeSet<ShapeId>,
    /// Current gesture state machine
    pub state: GestureState,
    /// Stroke/fill applied to newly drawn shapes
    pub style: ShapeStyle,
    /// Slack in scene units for hit testing
    pub hit_tolerance: f64,
    tool: Tool,
    buttons_held: HashSet<MouseButton>,
    pending_events: Vec<SemanticEvent>,
    last_committed: Option<ShapeKind>,
}

impl InputState {
    /// Creates an InputState with an empty canvas and the select tool active.
    pub fn with_defaults(style: ShapeStyle, hit_tolerance: f64) -> Self {
        Self {
            frame: Frame::new(),
            selection: BTreeSet::new(),
            state: GestureState::Idle,
            style,
            hit_tolerance,
            tool: Tool::default(),
            buttons_held: HashSet::new(),
            pending_events: Vec::new(),
            last_committed: None,
        }
    }

    /// Returns the active tool.
    pub fn active_tool(&self) -> Tool {
        self.tool
    }

    /// Switches tools immediately, abandoning any gesture in progress.
    ///
    /// An in-progress shape stays in the frame with its current geometry.
    pub fn set_tool(&mut self, tool: Tool) {
        self.abandon_gesture();
        if self.tool == tool {
            return;
        }
        log::info!("Switched tool from {} to {}", self.tool, tool);
        self.tool = tool;
        self.emit("tool_change", EventFields::new().tool(tool.name()));
    }

    /// Whether any pointer button is currently held.
    pub fn any_button_held(&self) -> bool {
        !self.buttons_held.is_empty()
    }

    /// Drains buffered semantic events in emission order.
    pub fn take_events(&mut self) -> Vec<SemanticEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Takes the kind of the shape committed by the latest release, if any.
    pub fn take_committed(&mut self) -> Option<ShapeKind> {
        self.last_committed.take()
    }

    pub(super) fn emit(&mut self, event_type: &str, fields: EventFields) {
        self.pending_events.push(SemanticEvent::new(event_type, fields));
    }

    pub(super) fn press_button(&mut self, button: MouseButton) {
        self.buttons_held.insert(button);
    }

    pub(super) fn release_button(&mut self, button: MouseButton) {
        self.buttons_held.remove(&button);
    }

    pub(super) fn set_committed(&mut self, kind: ShapeKind) {
        self.last_committed = Some(kind);
    }

    fn abandon_gesture(&mut self) {
        let previous = std::mem::replace(&mut self.state, GestureState::Idle);
        if let GestureState::Drawing { shape, tool, .. } = previous {
            log::debug!("Abandoning in-progress {tool} shape {shape:?}");
            if let Some(item) = self.frame.get_mut(shape) {
                item.shape.finalize();
            }
        }
    }
}
