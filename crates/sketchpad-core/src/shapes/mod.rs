//! Element definitions for the drawing surface.

mod ellipse;
mod freehand;
mod patch;
mod rectangle;
mod text;

pub use ellipse::Ellipse;
pub use freehand::Freehand;
pub use patch::ElementPatch;
pub use rectangle::Rectangle;
pub use text::Text;

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// Use web-time on WASM, std::time otherwise
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};
#[cfg(target_arch = "wasm32")]
use web_time::{SystemTime, UNIX_EPOCH};

/// Length of the random part of a generated id.
const ID_SUFFIX_LEN: usize = 9;

/// Unique, opaque identifier for an element.
///
/// Generated once when the element enters a document and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Generate a fresh id of the form `element-<unix millis>-<random suffix>`.
    pub fn generate() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let random = Uuid::new_v4().simple().to_string();
        Self(format!("element-{millis}-{}", &random[..ID_SUFFIX_LEN]))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Discriminant of an element's variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Text,
    FreehandPath,
}

impl ShapeKind {
    /// Tag used for this kind in serialized documents.
    pub fn tag(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Text => "text",
            ShapeKind::FreehandPath => "freehand-path",
        }
    }

    /// Get display name for the layers list.
    pub fn display_name(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Ellipse => "circle",
            ShapeKind::Text => "text",
            ShapeKind::FreehandPath => "path",
        }
    }
}

/// Common behaviour of every variant payload.
pub trait ShapeTrait {
    /// The variant this payload belongs to.
    fn kind(&self) -> ShapeKind;

    /// Bounding box in canvas space, given the owning element's position.
    fn bounds(&self, position: Point) -> Rect;

    /// Merge the fields of `patch` that exist on this variant.
    fn apply(&mut self, patch: &ElementPatch);
}

/// Variant payload of an element, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Shape {
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Text(Text),
    #[serde(rename = "freehand-path")]
    Freehand(Freehand),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle(s) => s.kind(),
            Shape::Ellipse(s) => s.kind(),
            Shape::Text(s) => s.kind(),
            Shape::Freehand(s) => s.kind(),
        }
    }

    pub fn bounds(&self, position: Point) -> Rect {
        match self {
            Shape::Rectangle(s) => s.bounds(position),
            Shape::Ellipse(s) => s.bounds(position),
            Shape::Text(s) => s.bounds(position),
            Shape::Freehand(s) => s.bounds(position),
        }
    }

    pub fn apply(&mut self, patch: &ElementPatch) {
        match self {
            Shape::Rectangle(s) => s.apply(patch),
            Shape::Ellipse(s) => s.apply(patch),
            Shape::Text(s) => s.apply(patch),
            Shape::Freehand(s) => s.apply(patch),
        }
    }
}

impl From<Rectangle> for Shape {
    fn from(shape: Rectangle) -> Self {
        Shape::Rectangle(shape)
    }
}

impl From<Ellipse> for Shape {
    fn from(shape: Ellipse) -> Self {
        Shape::Ellipse(shape)
    }
}

impl From<Text> for Shape {
    fn from(shape: Text) -> Self {
        Shape::Text(shape)
    }
}

impl From<Freehand> for Shape {
    fn from(shape: Freehand) -> Self {
        Shape::Freehand(shape)
    }
}

fn default_visible() -> bool {
    true
}

/// Everything needed to create an element except its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSpec {
    /// Position in canvas space.
    pub position: Point,
    /// Whether the element is rendered and exported.
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Variant payload.
    pub shape: Shape,
}

impl ElementSpec {
    /// Create a visible element spec.
    pub fn new(position: Point, shape: impl Into<Shape>) -> Self {
        Self {
            position,
            visible: true,
            shape: shape.into(),
        }
    }

    /// Mark the spec as hidden.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Move the spec by `delta`. Freehand paths keep their position at the
    /// origin and shift their points instead.
    pub fn translate(&mut self, delta: Vec2) {
        match &mut self.shape {
            Shape::Freehand(path) => path.translate(delta),
            _ => self.position += delta,
        }
    }
}

/// The atomic drawable unit of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub(crate) id: ElementId,
    /// Position in canvas space. Top-left of the bounding box for rectangles,
    /// ellipses and text; the origin for freehand paths.
    pub position: Point,
    /// Whether the element is rendered and exported.
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Variant payload.
    pub shape: Shape,
}

impl Element {
    /// Attach an id to a spec.
    ///
    /// A freehand path created away from the origin has its offset folded
    /// into its points.
    pub(crate) fn from_spec(id: ElementId, mut spec: ElementSpec) -> Self {
        if let Shape::Freehand(path) = &mut spec.shape {
            path.translate(spec.position.to_vec2());
            spec.position = Point::ORIGIN;
        }
        Self {
            id,
            position: spec.position,
            visible: spec.visible,
            shape: spec.shape,
        }
    }

    pub fn id(&self) -> &ElementId {
        &self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// Bounding box in canvas space.
    pub fn bounds(&self) -> Rect {
        self.shape.bounds(self.position)
    }

    /// Merge a partial update into this element, leaving unspecified fields untouched.
    ///
    /// Fields that do not exist on this element's variant are ignored.
    /// A new `x`/`y` on a freehand path shifts its points by the distance
    /// moved; the path's position stays at the origin.
    pub fn apply(&mut self, patch: &ElementPatch) {
        let target = Point::new(
            patch.x.unwrap_or(self.position.x),
            patch.y.unwrap_or(self.position.y),
        );
        if let Some(visible) = patch.visible {
            self.visible = visible;
        }

        let foreign = patch.fields_outside(self.kind());
        if !foreign.is_empty() {
            log::debug!(
                "Ignoring {:?} on {} element {}",
                foreign,
                self.kind().tag(),
                self.id
            );
        }
        self.shape.apply(patch);
        self.move_to(target);
    }

    fn move_to(&mut self, target: Point) {
        match &mut self.shape {
            Shape::Freehand(path) => {
                if target != self.position {
                    path.translate(target - self.position);
                }
            }
            _ => self.position = target,
        }
    }

    pub fn as_rectangle(&self) -> Option<&Rectangle> {
        match &self.shape {
            Shape::Rectangle(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_ellipse(&self) -> Option<&Ellipse> {
        match &self.shape {
            Shape::Ellipse(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match &self.shape {
            Shape::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_freehand(&self) -> Option<&Freehand> {
        match &self.shape {
            Shape::Freehand(f) => Some(f),
            _ => None,
        }
    }
}
