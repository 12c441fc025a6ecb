//! Registry of shape templates a suggestion can instantiate.

use crate::draw::{Shape, ShapeKind, ShapeStyle};
use crate::util::{Point, Rect};
use std::fmt;

/// Key of a catalogue entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TemplateId(pub &'static str);

impl TemplateId {
    pub const CAT_EARS: TemplateId = TemplateId("cat_ears");
    pub const ROOF: TemplateId = TemplateId("roof");
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A named, parametrized bundle of shapes.
pub trait Template {
    fn id(&self) -> TemplateId;

    /// Human-readable name shown by the assistant panel.
    fn label(&self) -> &str;

    /// Panel grouping, e.g. "Head" or "Wall".
    fn category(&self) -> &str;

    /// Kind of existing shape the template attaches to.
    fn target_kind(&self) -> ShapeKind;

    /// Produces the template's shapes positioned relative to `target`.
    fn instantiate(&self, target: &Rect, style: ShapeStyle) -> Vec<Shape>;
}

/// Two triangular ears on the top edge of a head-like ellipse.
pub struct CatEars;

impl Template for CatEars {
    fn id(&self) -> TemplateId {
        TemplateId::CAT_EARS
    }

    fn label(&self) -> &str {
        "Cat ears"
    }

    fn category(&self) -> &str {
        "Head"
    }

    fn target_kind(&self) -> ShapeKind {
        ShapeKind::Ellipse
    }

    fn instantiate(&self, target: &Rect, style: ShapeStyle) -> Vec<Shape> {
        let at = |fx: f64, fy: f64| {
            Point::new(target.x + target.width * fx, target.y + target.height * fy)
        };
        vec![
            triangle(at(0.15, 0.15), at(0.20, -0.30), at(0.42, 0.03), style),
            triangle(at(0.58, 0.03), at(0.80, -0.30), at(0.85, 0.15), style),
        ]
    }
}

/// A triangle resting on the top edge of a wall-like rectangle.
pub struct Roof;

impl Template for Roof {
    fn id(&self) -> TemplateId {
        TemplateId::ROOF
    }

    fn label(&self) -> &str {
        "Roof"
    }

    fn category(&self) -> &str {
        "Wall"
    }

    fn target_kind(&self) -> ShapeKind {
        ShapeKind::Rect
    }

    fn instantiate(&self, target: &Rect, style: ShapeStyle) -> Vec<Shape> {
        let rise = target.height * 0.6;
        vec![triangle(
            Point::new(target.x, target.y),
            Point::new(target.x + target.width / 2.0, target.y - rise),
            Point::new(target.right(), target.y),
            style,
        )]
    }
}

/// Closed three-sided path.
fn triangle(a: Point, b: Point, c: Point, style: ShapeStyle) -> Shape {
    Shape::Freehand {
        points: vec![a, b, c, a],
        style,
    }
}

/// Lookup table from [`TemplateId`] to template implementations.
///
/// Registration order is preserved for listing.
pub struct Catalogue {
    templates: Vec<Box<dyn Template>>,
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalogue {
    pub fn empty() -> Self {
        Self {
            templates: Vec::new(),
        }
    }

    /// Catalogue with the cat ears and roof templates.
    pub fn builtin() -> Self {
        let mut catalogue = Self::empty();
        catalogue.register(Box::new(CatEars));
        catalogue.register(Box::new(Roof));
        catalogue
    }

    /// Adds a template, replacing any existing entry with the same id.
    pub fn register(&mut self, template: Box<dyn Template>) {
        let id = template.id();
        if let Some(slot) = self.templates.iter_mut().find(|t| t.id() == id) {
            log::debug!("Replacing catalogue template '{id}'");
            *slot = template;
        } else {
            self.templates.push(template);
        }
    }

    pub fn get(&self, id: TemplateId) -> Option<&dyn Template> {
        self.templates
            .iter()
            .find(|t| t.id() == id)
            .map(|t| t.as_ref())
    }

    /// Templates belonging to `category`, in registration order.
    pub fn list(&self, category: &str) -> Vec<&dyn Template> {
        self.templates
            .iter()
            .filter(|t| t.category() == category)
            .map(|t| t.as_ref())
            .collect()
    }

    /// Instantiates template `id` against `target`; `None` if unknown.
    pub fn instantiate(&self, id: TemplateId, target: &Rect, style: ShapeStyle) -> Option<Vec<Shape>> {
        self.get(id).map(|t| t.instantiate(target, style))
    }
}
