//! Frame container for managing the shapes on the canvas.

use super::shape::{Shape, ShapeKind};
use crate::assistant::TemplateId;
use crate::util::Point;

/// Stable handle for a shape in a [`Frame`]. Never reused within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub u64);

/// Who put a shape on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeOrigin {
    /// Drawn by the user with a tool
    User,
    /// Added by accepting a catalogue suggestion
    Template(TemplateId),
}

/// One shape plus its bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameItem {
    pub id: ShapeId,
    pub shape: Shape,
    pub origin: ShapeOrigin,
}

/// Container for all shapes in the current drawing session.
///
/// Items are kept in draw order (first = bottom layer, last = top layer), so
/// the topmost shape is always the most recently added one.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    items: Vec<FrameItem>,
    next_id: u64,
}

impl Frame {
    /// Creates a new empty frame with no shapes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a shape on top of existing shapes and returns its handle.
    pub fn add_shape(&mut self, shape: Shape, origin: ShapeOrigin) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        self.items.push(FrameItem { id, shape, origin });
        id
    }

    /// Removes a shape, returning it if it was present.
    pub fn remove(&mut self, id: ShapeId) -> Option<FrameItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn get(&self, id: ShapeId) -> Option<&FrameItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut FrameItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Topmost shape under `point`, or `None` when nothing intersects it.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> Option<ShapeId> {
        self.items
            .iter()
            .rev()
            .find(|item| item.shape.contains(point, tolerance))
            .map(|item| item.id)
    }

    /// Whether any user-drawn shape of `kind` is on the canvas.
    pub fn has_user_kind(&self, kind: ShapeKind) -> bool {
        self.items
            .iter()
            .any(|item| item.origin == ShapeOrigin::User && item.shape.kind() == kind)
    }

    /// Whether shapes from the given template have been applied.
    pub fn has_template(&self, template: TemplateId) -> bool {
        self.items
            .iter()
            .any(|item| item.origin == ShapeOrigin::Template(template))
    }

    /// Most recently added user shape of `kind`.
    pub fn latest_user_kind(&self, kind: ShapeKind) -> Option<&FrameItem> {
        self.items
            .iter()
            .rev()
            .find(|item| item.origin == ShapeOrigin::User && item.shape.kind() == kind)
    }

    /// Iterates shapes bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &FrameItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLACK, ShapeStyle};

    fn rect_at(x: f64, y: f64, size: f64) -> Shape {
        let anchor = Point::new(x, y);
        let mut shape = Shape::create(ShapeKind::Rect, anchor, ShapeStyle::new(BLACK, None));
        shape.extend(anchor, Point::new(x + size, y + size));
        shape
    }

    #[test]
    fn hit_test_prefers_most_recent_shape() {
        let mut frame = Frame::new();
        let bottom = frame.add_shape(rect_at(0.0, 0.0, 50.0), ShapeOrigin::User);
        let top = frame.add_shape(rect_at(20.0, 20.0, 50.0), ShapeOrigin::User);

        assert_eq!(frame.hit_test(Point::new(30.0, 30.0), 0.0), Some(top));
        assert_eq!(frame.hit_test(Point::new(5.0, 5.0), 0.0), Some(bottom));
        assert_eq!(frame.hit_test(Point::new(200.0, 200.0), 0.0), None);
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut frame = Frame::new();
        let first = frame.add_shape(rect_at(0.0, 0.0, 1.0), ShapeOrigin::User);
        assert!(frame.remove(first).is_some());
        assert!(frame.remove(first).is_none());
        let second = frame.add_shape(rect_at(0.0, 0.0, 1.0), ShapeOrigin::User);
        assert_ne!(first, second);
        assert_eq!(frame.len(), 1);
    }

    #[test]
    fn presence_queries_distinguish_origin() {
        let mut frame = Frame::new();
        frame.add_shape(rect_at(0.0, 0.0, 10.0), ShapeOrigin::Template(TemplateId::ROOF));
        assert!(!frame.has_user_kind(ShapeKind::Rect));
        assert!(frame.has_template(TemplateId::ROOF));
        assert!(!frame.has_template(TemplateId::CAT_EARS));

        let user = frame.add_shape(rect_at(5.0, 5.0, 10.0), ShapeOrigin::User);
        assert!(frame.has_user_kind(ShapeKind::Rect));
        assert_eq!(frame.latest_user_kind(ShapeKind::Rect).map(|i| i.id), Some(user));
    }
}
