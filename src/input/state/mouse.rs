use crate::draw::{Shape, ShapeOrigin};
use crate::eventlog::EventFields;
use crate::input::{events::MouseButton, tool::Tool};
use crate::util::Point;

use super::{GestureState, InputState, MOVE_THRESHOLD};

impl InputState {
    /// Processes a mouse button press event.
    ///
    /// # Behavior
    /// - Select: remembers the topmost shape under the pointer and selects it
    /// - Pen/Line/Rect/Ellipse: creates the shape and adds it to the frame at once
    /// - Eraser (any button): removes the topmost shape under the pointer
    ///
    /// Returns `false` when the tool did not accept the event, so the host can
    /// fall back to its default handling.
    pub fn on_mouse_press(&mut self, button: MouseButton, x: f64, y: f64) -> bool {
        self.press_button(button);
        let Some(point) = finite_point(x, y) else {
            return false;
        };

        if self.active_tool() == Tool::Eraser {
            return self.erase_at(point);
        }
        if button != MouseButton::Left {
            return false;
        }

        match self.active_tool() {
            Tool::Select => {
                let target = self.frame.hit_test(point, self.hit_tolerance);
                self.selection.clear();
                if let Some(id) = target {
                    self.selection.insert(id);
                }
                self.state = GestureState::Selecting {
                    target,
                    press: point,
                    last: point,
                };
                true
            }
            tool => {
                let Some(kind) = tool.shape_kind() else {
                    return false;
                };
                let shape = Shape::create(kind, point, self.style);
                let id = self.frame.add_shape(shape, ShapeOrigin::User);
                self.state = GestureState::Drawing {
                    tool,
                    shape: id,
                    anchor: point,
                    point_count: 1,
                };
                self.emit(
                    &format!("{}_start", tool.name()),
                    EventFields::new()
                        .tool(tool.name())
                        .item_type(kind.name())
                        .notes(format!("x={:.1};y={:.1}", point.x, point.y)),
                );
                true
            }
        }
    }

    /// Processes pointer motion events.
    ///
    /// # Behavior
    /// - Drawing: extends the in-progress shape toward the pointer
    /// - Select drag: moves the pressed shape along with the pointer
    /// - Eraser with a button held: keeps erasing under the pointer
    pub fn on_mouse_motion(&mut self, x: f64, y: f64) -> bool {
        let Some(point) = finite_point(x, y) else {
            return false;
        };

        if self.state == GestureState::Idle {
            return self.active_tool() == Tool::Eraser
                && self.any_button_held()
                && self.erase_at(point);
        }

        match &mut self.state {
            GestureState::Drawing {
                shape,
                anchor,
                point_count,
                ..
            } => {
                if let Some(item) = self.frame.get_mut(*shape) {
                    item.shape.extend(*anchor, point);
                    *point_count += 1;
                }
                true
            }
            GestureState::Selecting { target, last, .. } => {
                let (dx, dy) = (point.x - last.x, point.y - last.y);
                *last = point;
                if let Some(item) = target.and_then(|id| self.frame.get_mut(id)) {
                    if item.shape.style().movable {
                        item.shape.translate(dx, dy);
                    }
                }
                true
            }
            GestureState::Idle => false,
        }
    }

    /// Processes mouse button release events.
    ///
    /// # Behavior
    /// - Select: logs a move if the pointer travelled more than [`MOVE_THRESHOLD`]
    /// - Drawing tools: commits the shape and logs its final geometry
    ///
    /// Releasing the left button always clears the gesture state. Gestures
    /// only start on the left button, so releasing another button mid-drag
    /// leaves the gesture running. A non-finite release position counts as
    /// the last pointer position.
    pub fn on_mouse_release(&mut self, button: MouseButton, x: f64, y: f64) -> bool {
        self.release_button(button);
        if button != MouseButton::Left {
            return false;
        }
        let released = finite_point(x, y);

        match std::mem::replace(&mut self.state, GestureState::Idle) {
            GestureState::Idle => false,
            GestureState::Selecting { target, press, last } => {
                let point = released.unwrap_or(last);
                if press.manhattan_distance(point) > MOVE_THRESHOLD {
                    if let Some(item) = target.and_then(|id| self.frame.get(id)) {
                        let kind = item.shape.kind();
                        self.emit(
                            "moved",
                            EventFields::new()
                                .tool(Tool::Select.name())
                                .item_type(kind.name())
                                .notes(format!(
                                    "dx={:.1};dy={:.1}",
                                    point.x - press.x,
                                    point.y - press.y
                                )),
                        );
                    }
                }
                true
            }
            GestureState::Drawing {
                tool,
                shape,
                point_count,
                ..
            } => {
                let Some(item) = self.frame.get_mut(shape) else {
                    return true;
                };
                item.shape.finalize();
                let kind = item.shape.kind();
                let mut fields = EventFields::new().tool(tool.name()).item_type(kind.name());
                fields = match &item.shape {
                    Shape::Freehand { .. } => fields.point_count(point_count),
                    Shape::Line { start, end, .. } => fields.notes(format!(
                        "x1={:.1};y1={:.1};x2={:.1};y2={:.1}",
                        start.x, start.y, end.x, end.y
                    )),
                    Shape::Rect { bounds, .. } | Shape::Ellipse { bounds, .. } => {
                        fields.notes(format!(
                            "x={:.1};y={:.1};w={:.1};h={:.1}",
                            bounds.x, bounds.y, bounds.width, bounds.height
                        ))
                    }
                };
                self.emit(&format!("{}_end", tool.name()), fields);
                self.set_committed(kind);
                true
            }
        }
    }

    /// Removes the topmost shape under `point`; `false` if nothing was hit.
    fn erase_at(&mut self, point: Point) -> bool {
        let Some(id) = self.frame.hit_test(point, self.hit_tolerance) else {
            return false;
        };
        let Some(item) = self.frame.remove(id) else {
            return false;
        };
        self.selection.remove(&id);
        log::debug!("Erased {} {:?}", item.shape.kind(), id);
        self.emit(
            "erase",
            EventFields::new()
                .tool(Tool::Eraser.name())
                .item_type(item.shape.kind().name()),
        );
        true
    }
}

/// Pointer position, or `None` for NaN/infinite coordinates.
fn finite_point(x: f64, y: f64) -> Option<Point> {
    if x.is_finite() && y.is_finite() {
        Some(Point::new(x, y))
    } else {
        log::debug!("Ignoring non-finite pointer position ({x}, {y})");
        None
    }
}
