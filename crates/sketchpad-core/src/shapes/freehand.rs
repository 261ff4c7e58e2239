//! Freehand drawing shape.

use super::{ElementPatch, ShapeKind, ShapeTrait};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A freehand stroke (series of absolute points).
///
/// Points are in canvas space and are not relative to the owning
/// element's position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Freehand {
    /// Points in the stroke, in drawing order.
    pub points: Vec<Point>,
    /// Stroke color, emitted verbatim.
    pub stroke: String,
    /// Stroke width.
    pub stroke_width: f64,
}

impl Freehand {
    /// Create from existing points.
    pub fn from_points(points: Vec<Point>, stroke: impl Into<String>, stroke_width: f64) -> Self {
        Self {
            points,
            stroke: stroke.into(),
            stroke_width,
        }
    }

    /// Create from alternating x,y scalars. A trailing odd scalar is dropped.
    pub fn from_coords(coords: &[f64], stroke: impl Into<String>, stroke_width: f64) -> Self {
        let points = coords
            .chunks_exact(2)
            .map(|pair| Point::new(pair[0], pair[1]))
            .collect();
        Self::from_points(points, stroke, stroke_width)
    }

    /// The points flattened as alternating x,y scalars.
    pub fn coords(&self) -> Vec<f64> {
        self.points.iter().flat_map(|p| [p.x, p.y]).collect()
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Shift every point by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
    }
}

impl ShapeTrait for Freehand {
    fn kind(&self) -> ShapeKind {
        ShapeKind::FreehandPath
    }

    fn bounds(&self, _position: Point) -> Rect {
        let Some(first) = self.points.first() else {
            return Rect::ZERO;
        };
        self.points
            .iter()
            .skip(1)
            .fold(Rect::from_points(*first, *first), |acc, p| {
                acc.union_pt(*p)
            })
    }

    fn apply(&mut self, patch: &ElementPatch) {
        if let Some(points) = &patch.points {
            self.points.clone_from(points);
        }
        if let Some(stroke) = &patch.stroke {
            self.stroke.clone_from(stroke);
        }
        if let Some(stroke_width) = patch.stroke_width {
            self.stroke_width = stroke_width;
        }
    }
}
