//! Shape definitions for the drawing canvas.

use super::color::Color;
use crate::util::{self, Point, Rect};
use std::fmt;
use std::str::FromStr;

/// Discriminant of [`Shape`], used where only the kind matters (logging, suggestions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Freehand,
    Line,
    Rect,
    Ellipse,
}

impl ShapeKind {
    /// Lowercase name written to the `item_type` log column.
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Freehand => "path",
            ShapeKind::Line => "line",
            ShapeKind::Rect => "rect",
            ShapeKind::Ellipse => "ellipse",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "path" | "freehand" => Ok(ShapeKind::Freehand),
            "line" => Ok(ShapeKind::Line),
            "rect" | "rectangle" => Ok(ShapeKind::Rect),
            "ellipse" => Ok(ShapeKind::Ellipse),
            other => Err(format!("unknown shape kind '{other}'")),
        }
    }
}

/// Paint and interaction attributes shared by every shape variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeStyle {
    /// Outline color
    pub stroke: Color,
    /// Interior color; `None` means no fill
    pub fill: Option<Color>,
    /// Whether the select tool may pick up and drag this shape
    pub movable: bool,
}

impl ShapeStyle {
    pub fn new(stroke: Color, fill: Option<Color>) -> Self {
        Self {
            stroke,
            fill,
            movable: true,
        }
    }
}

/// A vector shape on the canvas.
///
/// Geometry is only changed through [`Shape::extend`] while the shape is the
/// in-progress shape of a gesture; after release the only mutation is a rigid
/// [`Shape::translate`] from the select tool.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Freehand stroke, points in drawing order
    Freehand { points: Vec<Point>, style: ShapeStyle },
    /// Straight segment from the press point to the far endpoint
    Line {
        start: Point,
        end: Point,
        style: ShapeStyle,
    },
    /// Axis-aligned rectangle
    Rect { bounds: Rect, style: ShapeStyle },
    /// Ellipse inscribed in `bounds`
    Ellipse { bounds: Rect, style: ShapeStyle },
}

impl Shape {
    /// Instantiates a zero-size shape of `kind` at `anchor`.
    pub fn create(kind: ShapeKind, anchor: Point, style: ShapeStyle) -> Self {
        match kind {
            ShapeKind::Freehand => Shape::Freehand {
                points: vec![anchor],
                style,
            },
            ShapeKind::Line => Shape::Line {
                start: anchor,
                end: anchor,
                style,
            },
            ShapeKind::Rect => Shape::Rect {
                bounds: Rect::at(anchor),
                style,
            },
            ShapeKind::Ellipse => Shape::Ellipse {
                bounds: Rect::at(anchor),
                style,
            },
        }
    }

    /// Grows the shape toward `point` during a drag started at `anchor`.
    ///
    /// Paths append the point, lines move their far endpoint, and boxed shapes
    /// take the normalized rectangle spanning `anchor` and `point`.
    pub fn extend(&mut self, anchor: Point, point: Point) {
        match self {
            Shape::Freehand { points, .. } => points.push(point),
            Shape::Line { end, .. } => *end = point,
            Shape::Rect { bounds, .. } | Shape::Ellipse { bounds, .. } => {
                *bounds = Rect::from_corners(anchor, point);
            }
        }
    }

    /// Marks the end of the creation gesture.
    pub fn finalize(&mut self) {
        if let Shape::Freehand { points, .. } = self {
            points.shrink_to_fit();
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Freehand { .. } => ShapeKind::Freehand,
            Shape::Line { .. } => ShapeKind::Line,
            Shape::Rect { .. } => ShapeKind::Rect,
            Shape::Ellipse { .. } => ShapeKind::Ellipse,
        }
    }

    pub fn style(&self) -> &ShapeStyle {
        match self {
            Shape::Freehand { style, .. }
            | Shape::Line { style, .. }
            | Shape::Rect { style, .. }
            | Shape::Ellipse { style, .. } => style,
        }
    }

    /// Number of recorded points (paths) or defining points (other kinds).
    pub fn point_count(&self) -> usize {
        match self {
            Shape::Freehand { points, .. } => points.len(),
            Shape::Line { .. } | Shape::Rect { .. } | Shape::Ellipse { .. } => 2,
        }
    }

    /// Normalized bounding box of the geometry (stroke width not included).
    pub fn bounding_box(&self) -> Rect {
        match self {
            Shape::Freehand { points, .. } => Rect::covering(points).unwrap_or_default(),
            Shape::Line { start, end, .. } => Rect::from_corners(*start, *end),
            Shape::Rect { bounds, .. } | Shape::Ellipse { bounds, .. } => *bounds,
        }
    }

    /// Hit test with `tolerance` scene units of slack around the geometry.
    pub fn contains(&self, point: Point, tolerance: f64) -> bool {
        match self {
            Shape::Freehand { points, .. } => match points.as_slice() {
                [] => false,
                [only] => only.distance_to(point) <= tolerance,
                _ => points
                    .windows(2)
                    .any(|seg| util::distance_to_segment(point, seg[0], seg[1]) <= tolerance),
            },
            Shape::Line { start, end, .. } => {
                util::distance_to_segment(point, *start, *end) <= tolerance
            }
            Shape::Rect { bounds, .. } => bounds.inflate(tolerance).contains(point),
            Shape::Ellipse { bounds, .. } => ellipse_contains(&bounds.inflate(tolerance), point),
        }
    }

    /// Moves the whole shape by (`dx`, `dy`).
    pub fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Shape::Freehand { points, .. } => {
                for p in points.iter_mut() {
                    *p = p.offset(dx, dy);
                }
            }
            Shape::Line { start, end, .. } => {
                *start = start.offset(dx, dy);
                *end = end.offset(dx, dy);
            }
            Shape::Rect { bounds, .. } | Shape::Ellipse { bounds, .. } => {
                bounds.x += dx;
                bounds.y += dy;
            }
        }
    }
}

fn ellipse_contains(bounds: &Rect, point: Point) -> bool {
    let rx = bounds.width / 2.0;
    let ry = bounds.height / 2.0;
    let center = bounds.center();
    if rx <= 0.0 || ry <= 0.0 {
        return point == center;
    }
    let nx = (point.x - center.x) / rx;
    let ny = (point.y - center.y) / ry;
    nx * nx + ny * ny <= 1.0
}
