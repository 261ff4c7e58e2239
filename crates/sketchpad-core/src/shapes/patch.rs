//! Partial element updates.

use super::ShapeKind;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A partial update: every `Some` field is merged into the target element,
/// every `None` field is left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ElementPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub visible: Option<bool>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub radius: Option<f64>,
    pub text: Option<String>,
    pub font_size: Option<f64>,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub points: Option<Vec<Point>>,
}

impl ElementPatch {
    /// A patch that only moves the element.
    pub fn position(position: Point) -> Self {
        Self {
            x: Some(position.x),
            y: Some(position.y),
            ..Default::default()
        }
    }

    /// A patch that only changes visibility.
    pub fn visibility(visible: bool) -> Self {
        Self {
            visible: Some(visible),
            ..Default::default()
        }
    }

    /// Names of the set fields that do not exist on `kind`.
    pub fn fields_outside(&self, kind: ShapeKind) -> Vec<&'static str> {
        let allowed: &[&str] = match kind {
            ShapeKind::Rectangle => &["width", "height", "fill", "stroke", "stroke_width"],
            ShapeKind::Ellipse => &["radius", "fill", "stroke", "stroke_width"],
            ShapeKind::Text => &["text", "font_size", "fill"],
            ShapeKind::FreehandPath => &["points", "stroke", "stroke_width"],
        };
        self.variant_fields()
            .into_iter()
            .filter(|name| !allowed.contains(name))
            .collect()
    }

    /// Names of the set variant-specific fields.
    fn variant_fields(&self) -> Vec<&'static str> {
        [
            ("width", self.width.is_some()),
            ("height", self.height.is_some()),
            ("radius", self.radius.is_some()),
            ("text", self.text.is_some()),
            ("font_size", self.font_size.is_some()),
            ("fill", self.fill.is_some()),
            ("stroke", self.stroke.is_some()),
            ("stroke_width", self.stroke_width.is_some()),
            ("points", self.points.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect()
    }
}
