//! Rectangle shape.

use super::{ElementPatch, ShapeKind, ShapeTrait};
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle whose position is its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rectangle {
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
    /// Fill color, emitted verbatim.
    pub fill: String,
    /// Stroke color, emitted verbatim.
    pub stroke: String,
    /// Stroke width.
    pub stroke_width: f64,
}

impl Rectangle {
    /// Smallest width or height a resize gesture may produce.
    pub const MIN_SIZE: f64 = 5.0;

    /// Create a new rectangle.
    pub fn new(
        width: f64,
        height: f64,
        fill: impl Into<String>,
        stroke: impl Into<String>,
        stroke_width: f64,
    ) -> Self {
        Self {
            width,
            height,
            fill: fill.into(),
            stroke: stroke.into(),
            stroke_width,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl ShapeTrait for Rectangle {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Rectangle
    }

    fn bounds(&self, position: Point) -> Rect {
        Rect::from_origin_size(position, self.size())
    }

    fn apply(&mut self, patch: &ElementPatch) {
        if let Some(width) = patch.width {
            self.width = width;
        }
        if let Some(height) = patch.height {
            self.height = height;
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
