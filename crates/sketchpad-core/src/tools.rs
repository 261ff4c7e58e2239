//! Tool system: interprets pointer gestures as document mutations.

use crate::document::DocumentStore;
use crate::shapes::{Ellipse, ElementId, ElementSpec, Freehand, Rectangle, Text};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Minimum number of points a pen stroke needs to be kept.
pub const MIN_STROKE_POINTS: usize = 3;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Select,
    Move,
    Rectangle,
    Circle,
    Text,
    Pen,
}

impl ToolKind {
    /// Whether existing elements can be dragged and transformed under this tool.
    pub fn allows_drag(&self) -> bool {
        matches!(self, ToolKind::Select | ToolKind::Move)
    }
}

/// Geometry and styling given to elements created by tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolDefaults {
    pub rect_width: f64,
    pub rect_height: f64,
    pub rect_fill: String,
    pub rect_stroke: String,
    pub rect_stroke_width: f64,
    pub circle_radius: f64,
    pub circle_fill: String,
    pub circle_stroke: String,
    pub circle_stroke_width: f64,
    pub text_content: String,
    pub text_font_size: f64,
    pub text_fill: String,
    pub pen_stroke: String,
    pub pen_stroke_width: f64,
}

impl Default for ToolDefaults {
    fn default() -> Self {
        Self {
            rect_width: 100.0,
            rect_height: 100.0,
            rect_fill: "#3b82f6".to_string(),
            rect_stroke: "#1e40af".to_string(),
            rect_stroke_width: 2.0,
            circle_radius: 50.0,
            circle_fill: "#8b5cf6".to_string(),
            circle_stroke: "#7c3aed".to_string(),
            circle_stroke_width: 2.0,
            text_content: "Double click to edit".to_string(),
            text_font_size: 24.0,
            text_fill: "#1f2937".to_string(),
            pen_stroke: "#1f2937".to_string(),
            pen_stroke_width: 3.0,
        }
    }
}

/// State of a tool interaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) enum ToolState {
    /// Waiting for a press.
    #[default]
    Idle,
    /// A pen stroke is in progress.
    Drawing {
        /// Points accumulated since the press.
        points: Vec<Point>,
    },
}

/// Turns press / move / release gestures into [`DocumentStore`] mutations.
#[derive(Debug, Clone, Default)]
pub struct ToolController {
    state: ToolState,
    /// Styling for newly created elements.
    pub defaults: ToolDefaults,
}

impl ToolController {
    /// Create a controller with the stock defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a controller with custom defaults.
    pub fn with_defaults(defaults: ToolDefaults) -> Self {
        Self {
            state: ToolState::Idle,
            defaults,
        }
    }

    /// Check if a pen stroke is in progress.
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, ToolState::Drawing { .. })
    }

    /// The in-flight stroke flattened as x,y scalars, for live preview.
    pub fn preview(&self) -> Option<Vec<f64>> {
        match &self.state {
            ToolState::Drawing { points } if points.len() > 1 => {
                Some(points.iter().flat_map(|p| [p.x, p.y]).collect())
            }
            _ => None,
        }
    }

    /// Switch tools, discarding any in-flight stroke.
    pub fn set_tool(&mut self, store: &mut DocumentStore, tool: ToolKind) {
        if tool != ToolKind::Pen && self.is_drawing() {
            log::debug!("Tool switched to {:?} mid-stroke, discarding stroke", tool);
            self.cancel();
        }
        store.set_active_tool(tool);
    }

    /// Discard any in-flight stroke without creating an element.
    pub fn cancel(&mut self) {
        self.state = ToolState::Idle;
    }

    /// Handle a pointer press. Returns the id of an element created by the press.
    pub fn press(&mut self, store: &mut DocumentStore, point: Point) -> Option<ElementId> {
        let tool = store.active_tool();
        let spec = match tool {
            ToolKind::Select | ToolKind::Move => return None,
            ToolKind::Rectangle => {
                let d = &self.defaults;
                let half = Vec2::new(d.rect_width / 2.0, d.rect_height / 2.0);
                ElementSpec::new(
                    point - half,
                    Rectangle::new(
                        d.rect_width,
                        d.rect_height,
                        d.rect_fill.as_str(),
                        d.rect_stroke.as_str(),
                        d.rect_stroke_width,
                    ),
                )
            }
            ToolKind::Circle => {
                let d = &self.defaults;
                let r = d.circle_radius;
                ElementSpec::new(
                    point - Vec2::new(r, r),
                    Ellipse::circle(
                        r,
                        d.circle_fill.as_str(),
                        d.circle_stroke.as_str(),
                        d.circle_stroke_width,
                    ),
                )
            }
            ToolKind::Text => {
                let d = &self.defaults;
                ElementSpec::new(
                    point,
                    Text::new(d.text_content.as_str(), d.text_font_size, d.text_fill.as_str()),
                )
            }
            ToolKind::Pen => {
                self.state = ToolState::Drawing {
                    points: vec![point],
                };
                return None;
            }
        };
        Some(store.add_element(spec))
    }

    /// Handle pointer movement. Only extends an in-flight pen stroke.
    pub fn move_to(&mut self, store: &DocumentStore, point: Point) {
        if store.active_tool() != ToolKind::Pen {
            self.discard_stale();
            return;
        }
        if let ToolState::Drawing { points } = &mut self.state {
            log::trace!("Stroke point ({}, {})", point.x, point.y);
            points.push(point);
        }
    }

    /// Handle a pointer release. Commits the pen stroke if it has enough points.
    pub fn release(&mut self, store: &mut DocumentStore) -> Option<ElementId> {
        let ToolState::Drawing { points } = std::mem::take(&mut self.state) else {
            return None;
        };
        if store.active_tool() != ToolKind::Pen {
            log::debug!("Stroke ended under {:?}, discarded", store.active_tool());
            return None;
        }
        if points.len() < MIN_STROKE_POINTS {
            log::debug!("Stroke with {} point(s) discarded", points.len());
            return None;
        }
        let d = &self.defaults;
        let stroke = Freehand::from_points(points, d.pen_stroke.as_str(), d.pen_stroke_width);
        Some(store.add_element(ElementSpec::new(Point::ORIGIN, stroke)))
    }

    /// Drop a stroke left over from a tool switch that bypassed [`Self::set_tool`].
    fn discard_stale(&mut self) {
        if self.is_drawing() {
            log::debug!("Discarding stroke left over from a tool switch");
            self.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ShapeKind;

    fn store_with(tool: ToolKind) -> DocumentStore {
        let mut store = DocumentStore::new();
        store.set_active_tool(tool);
        store
    }

    #[test]
    fn test_tool_selection() {
        let mut store = DocumentStore::new();
        let mut tc = ToolController::new();
        assert_eq!(store.active_tool(), ToolKind::Select);

        tc.set_tool(&mut store, ToolKind::Rectangle);
        assert_eq!(store.active_tool(), ToolKind::Rectangle);
    }

    #[test]
    fn test_select_tool_no_shape() {
        let mut store = store_with(ToolKind::Select);
        let mut tc = ToolController::new();

        assert!(tc.press(&mut store, Point::new(0.0, 0.0)).is_none());
        tc.move_to(&store, Point::new(10.0, 10.0));
        assert!(tc.release(&mut store).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_rectangle_centered_on_press() {
        let mut store = store_with(ToolKind::Rectangle);
        let mut tc = ToolController::new();

        let id = tc.press(&mut store, Point::new(200.0, 150.0)).unwrap();

        let element = store.get(&id).unwrap();
        assert_eq!(element.kind(), ShapeKind::Rectangle);
        assert_eq!(element.bounds().center(), Point::new(200.0, 150.0));
        let rect = element.as_rectangle().unwrap();
        assert_eq!(rect.fill, "#3b82f6");
        assert_eq!(store.selected_id(), Some(&id));
    }

    #[test]
    fn test_circle_centered_on_press() {
        let mut store = store_with(ToolKind::Circle);
        let mut tc = ToolController::new();

        let id = tc.press(&mut store, Point::new(100.0, 100.0)).unwrap();

        let element = store.get(&id).unwrap();
        let circle = element.as_ellipse().unwrap();
        assert!((circle.radius - 50.0).abs() < f64::EPSILON);
        assert_eq!(circle.center(element.position), Point::new(100.0, 100.0));
    }

    #[test]
    fn test_text_at_press() {
        let mut store = store_with(ToolKind::Text);
        let mut tc = ToolController::new();

        let id = tc.press(&mut store, Point::new(7.0, 8.0)).unwrap();

        let element = store.get(&id).unwrap();
        assert_eq!(element.position, Point::new(7.0, 8.0));
        let text = element.as_text().unwrap();
        assert_eq!(text.content, "Double click to edit");
        assert!((text.font_size - 24.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pen_stroke_committed() {
        let mut store = store_with(ToolKind::Pen);
        let mut tc = ToolController::new();

        assert!(tc.press(&mut store, Point::new(0.0, 0.0)).is_none());
        assert!(tc.is_drawing());
        tc.move_to(&store, Point::new(1.0, 1.0));
        tc.move_to(&store, Point::new(2.0, 2.0));
        let id = tc.release(&mut store).unwrap();

        assert!(!tc.is_drawing());
        assert_eq!(store.len(), 1);
        let element = store.get(&id).unwrap();
        assert_eq!(element.position, Point::ORIGIN);
        let path = element.as_freehand().unwrap();
        assert_eq!(path.coords(), vec![0.0, 0.0, 1.0, 1.0, 2.0, 2.0]);
        assert_eq!(path.stroke, "#1f2937");
        assert!((path.stroke_width - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pen_click_creates_nothing() {
        let mut store = store_with(ToolKind::Pen);
        let mut tc = ToolController::new();

        tc.press(&mut store, Point::new(5.0, 5.0));
        assert!(tc.release(&mut store).is_none());
        assert!(store.is_empty());
        assert!(!tc.is_drawing());

        tc.press(&mut store, Point::new(5.0, 5.0));
        tc.move_to(&store, Point::new(6.0, 6.0));
        assert!(tc.release(&mut store).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_move_without_press_is_noop() {
        let mut store = store_with(ToolKind::Pen);
        let mut tc = ToolController::new();

        tc.move_to(&store, Point::new(1.0, 1.0));
        assert!(!tc.is_drawing());
        assert!(tc.release(&mut store).is_none());
    }

    #[test]
    fn test_tool_switch_discards_stroke() {
        let mut store = store_with(ToolKind::Pen);
        let mut tc = ToolController::new();

        tc.press(&mut store, Point::new(0.0, 0.0));
        tc.move_to(&store, Point::new(1.0, 1.0));
        tc.move_to(&store, Point::new(2.0, 2.0));
        tc.set_tool(&mut store, ToolKind::Select);
        assert!(!tc.is_drawing());

        tc.set_tool(&mut store, ToolKind::Pen);
        tc.move_to(&store, Point::new(3.0, 3.0));
        assert!(tc.release(&mut store).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_direct_tool_switch_discards_stroke() {
        let mut store = store_with(ToolKind::Pen);
        let mut tc = ToolController::new();

        tc.press(&mut store, Point::new(0.0, 0.0));
        tc.move_to(&store, Point::new(1.0, 1.0));
        tc.move_to(&store, Point::new(2.0, 2.0));
        store.set_active_tool(ToolKind::Rectangle);

        assert!(tc.release(&mut store).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_preview() {
        let mut store = store_with(ToolKind::Pen);
        let mut tc = ToolController::new();

        tc.press(&mut store, Point::new(0.0, 0.0));
        assert!(tc.preview().is_none());
        tc.move_to(&store, Point::new(4.0, 5.0));
        assert_eq!(tc.preview(), Some(vec![0.0, 0.0, 4.0, 5.0]));
    }

    #[test]
    fn test_custom_defaults() {
        let mut store = store_with(ToolKind::Rectangle);
        let defaults = ToolDefaults {
            rect_width: 10.0,
            rect_height: 20.0,
            ..Default::default()
        };
        let mut tc = ToolController::with_defaults(defaults);

        let id = tc.press(&mut store, Point::new(0.0, 0.0)).unwrap();
        let element = store.get(&id).unwrap();
        assert_eq!(element.position, Point::new(-5.0, -10.0));
    }
}
