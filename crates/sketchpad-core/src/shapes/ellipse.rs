//! Circle shape.

use super::{ElementPatch, ShapeKind, ShapeTrait};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A circle described by a single radius.
///
/// The owning element's position is the top-left corner of the bounding box,
/// so the center sits at `position + (radius, radius)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Ellipse {
    /// Radius of the circle.
    pub radius: f64,
    /// Fill color, emitted verbatim.
    pub fill: String,
    /// Stroke color, emitted verbatim.
    pub stroke: String,
    /// Stroke width.
    pub stroke_width: f64,
}

impl Ellipse {
    /// Smallest radius a resize gesture may produce.
    pub const MIN_RADIUS: f64 = 5.0;

    /// Create a new circle.
    pub fn circle(
        radius: f64,
        fill: impl Into<String>,
        stroke: impl Into<String>,
        stroke_width: f64,
    ) -> Self {
        Self {
            radius,
            fill: fill.into(),
            stroke: stroke.into(),
            stroke_width,
        }
    }

    /// Center of the circle for an element at `position`.
    pub fn center(&self, position: Point) -> Point {
        position + Vec2::new(self.radius, self.radius)
    }
}

impl ShapeTrait for Ellipse {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Ellipse
    }

    fn bounds(&self, position: Point) -> Rect {
        let diameter = self.radius * 2.0;
        Rect::new(
            position.x,
            position.y,
            position.x + diameter,
            position.y + diameter,
        )
    }

    fn apply(&mut self, patch: &ElementPatch) {
        if let Some(radius) = patch.radius {
            self.radius = radius;
        }
        if let Some(fill) = &patch.fill {
            self.fill.clone_from(fill);
        }
        if let Some(stroke) = &patch.stroke {
            self.stroke.clone_from(stroke);
        }
        if let Some(stroke_width) = patch.stroke_width {
            self.stroke_width = stroke_width;
        }
    }
}
