//! Normalization of resize/scale gestures into semantic element properties.
//!
//! The rendering surface reports a finished transform as raw scale factors on
//! the element's visual node plus the node's new position. Storing those
//! factors would compound on every later gesture, so they are folded into the
//! element's own geometry here and the caller resets the node's scale to 1.

use crate::shapes::{Element, ElementPatch, Ellipse, Rectangle, Shape, Text};
use kurbo::Point;

/// Turn a completed transform on `element` into the patch that stores it.
///
/// Always moves the element to `position`. Sizes are clamped to each
/// variant's minimum. Freehand paths only move; their points are left as is.
pub fn normalize(element: &Element, scale_x: f64, scale_y: f64, position: Point) -> ElementPatch {
    let mut patch = ElementPatch::position(position);
    match &element.shape {
        Shape::Rectangle(rect) => {
            patch.width = Some((rect.width * scale_x).max(Rectangle::MIN_SIZE));
            patch.height = Some((rect.height * scale_y).max(Rectangle::MIN_SIZE));
        }
        Shape::Ellipse(circle) => {
            // A single radius cannot hold anisotropic scale; the larger axis wins.
            let scale = scale_x.max(scale_y);
            patch.radius = Some((circle.radius * scale).max(Ellipse::MIN_RADIUS));
        }
        Shape::Text(text) => {
            patch.font_size =
                Some((text.effective_font_size() * scale_x).max(Text::MIN_FONT_SIZE));
        }
        Shape::Freehand(_) => {}
    }
    patch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{ElementId, ElementSpec, Freehand};

    fn element(shape: impl Into<Shape>) -> Element {
        Element::from_spec(ElementId::generate(), ElementSpec::new(Point::ORIGIN, shape))
    }

    #[test]
    fn test_rectangle_scales_each_axis() {
        let rect = element(Rectangle::new(100.0, 50.0, "#fff", "#000", 2.0));
        let patch = normalize(&rect, 2.0, 0.5, Point::new(3.0, 4.0));
        assert_eq!(patch.x, Some(3.0));
        assert_eq!(patch.y, Some(4.0));
        assert_eq!(patch.width, Some(200.0));
        assert_eq!(patch.height, Some(25.0));
    }

    #[test]
    fn test_rectangle_clamped() {
        let rect = element(Rectangle::new(100.0, 100.0, "#fff", "#000", 2.0));
        let patch = normalize(&rect, 0.01, -3.0, Point::ORIGIN);
        assert_eq!(patch.width, Some(5.0));
        assert_eq!(patch.height, Some(5.0));
    }

    #[test]
    fn test_circle_uses_larger_scale() {
        let circle = element(Ellipse::circle(50.0, "#fff", "#000", 2.0));
        let patch = normalize(&circle, 0.5, 1.5, Point::ORIGIN);
        assert_eq!(patch.radius, Some(75.0));

        let patch = normalize(&circle, 0.01, 0.02, Point::ORIGIN);
        assert_eq!(patch.radius, Some(5.0));
    }

    #[test]
    fn test_text_uses_horizontal_scale() {
        let text = element(Text::new("hi", 20.0, "#000"));
        let patch = normalize(&text, 2.0, 10.0, Point::ORIGIN);
        assert_eq!(patch.font_size, Some(40.0));

        let patch = normalize(&text, 0.1, 1.0, Point::ORIGIN);
        assert_eq!(patch.font_size, Some(8.0));
    }

    #[test]
    fn test_text_without_font_size_uses_default() {
        let text = element(Text::new("hi", 0.0, "#000"));
        let patch = normalize(&text, 1.5, 1.0, Point::ORIGIN);
        assert_eq!(patch.font_size, Some(24.0));
    }

    #[test]
    fn test_freehand_only_moves() {
        let path = element(Freehand::from_coords(&[0.0, 0.0, 10.0, 10.0], "#000", 3.0));
        let patch = normalize(&path, 3.0, 3.0, Point::new(7.0, 8.0));
        assert_eq!(patch, ElementPatch::position(Point::new(7.0, 8.0)));
    }
}
