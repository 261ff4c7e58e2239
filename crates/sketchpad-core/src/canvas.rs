//! Canvas: the single-threaded editing loop tying the core together.

use crate::document::DocumentStore;
use crate::export;
use crate::shapes::{Element, ElementId, ElementPatch, ElementSpec};
use crate::tools::{ToolController, ToolDefaults, ToolKind};
use crate::transform;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// The rendering surface the canvas reports to.
///
/// Hit-testing, painting and the visual transform handles live behind this
/// trait; the canvas only tells the surface when to repaint and when a
/// handle's scale must be reset.
pub trait Surface {
    /// The document, selection or in-flight stroke changed and should be
    /// repainted. `preview` holds the stroke being drawn as x,y scalars.
    fn invalidate(&mut self, document: &DocumentStore, preview: Option<&[f64]>);

    /// Reset the visual node of `id` to identity scale after a transform
    /// has been folded into the element's geometry.
    fn reset_transform(&mut self, _id: &ElementId) {}
}

/// A surface that paints nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn invalidate(&mut self, _document: &DocumentStore, _preview: Option<&[f64]>) {}
}

/// Events delivered by the rendering surface, in canvas-space coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CanvasEvent {
    /// Pointer pressed on empty canvas.
    Press { position: Point },
    /// Pointer moved.
    Move { position: Point },
    /// Pointer released.
    Release { position: Point },
    /// An element was clicked.
    ClickElement { id: ElementId },
    /// Empty canvas was clicked.
    ClickEmpty,
    /// A drag of an element finished at `position`.
    DragEnd { id: ElementId, position: Point },
    /// A resize/scale of an element finished.
    TransformEnd {
        id: ElementId,
        scale_x: f64,
        scale_y: f64,
        position: Point,
    },
}

/// Runtime canvas state.
#[derive(Debug, Clone)]
pub struct Canvas<S: Surface = NullSurface> {
    /// The document being edited.
    pub document: DocumentStore,
    /// Tool gesture interpreter.
    pub tools: ToolController,
    /// Rendering surface.
    pub surface: S,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a canvas with an empty document and no rendering surface.
    pub fn new() -> Self {
        Self::with_surface(NullSurface)
    }
}

impl<S: Surface> Canvas<S> {
    /// Create a canvas reporting to `surface`.
    pub fn with_surface(surface: S) -> Self {
        Self {
            document: DocumentStore::new(),
            tools: ToolController::new(),
            surface,
        }
    }

    /// Replace the styling used for newly created elements.
    pub fn set_defaults(&mut self, defaults: ToolDefaults) {
        self.tools.defaults = defaults;
    }

    /// Set the current tool, discarding any in-flight pen stroke.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tools.set_tool(&mut self.document, tool);
        self.repaint();
    }

    /// Whether elements may currently be dragged or transformed.
    pub fn is_draggable(&self) -> bool {
        self.document.active_tool().allows_drag()
    }

    /// Dispatch one surface event.
    pub fn handle(&mut self, event: CanvasEvent) {
        match event {
            CanvasEvent::Press { position } => {
                let was_drawing = self.tools.is_drawing();
                let created = self.tools.press(&mut self.document, position);
                if created.is_some() || was_drawing != self.tools.is_drawing() {
                    self.repaint();
                }
            }
            CanvasEvent::Move { position } => {
                self.tools.move_to(&self.document, position);
                if self.tools.is_drawing() {
                    self.repaint();
                }
            }
            CanvasEvent::Release { .. } => {
                let was_drawing = self.tools.is_drawing();
                self.tools.release(&mut self.document);
                if was_drawing {
                    self.repaint();
                }
            }
            CanvasEvent::ClickElement { id } => self.select(Some(&id)),
            CanvasEvent::ClickEmpty => self.select(None),
            CanvasEvent::DragEnd { id, position } => self.drag_end(&id, position),
            CanvasEvent::TransformEnd {
                id,
                scale_x,
                scale_y,
                position,
            } => self.transform_end(&id, scale_x, scale_y, position),
        }
    }

    /// Select an element, or clear the selection.
    pub fn select(&mut self, id: Option<&ElementId>) {
        self.document.select(id);
        self.repaint();
    }

    /// Store the final position of a drag.
    pub fn drag_end(&mut self, id: &ElementId, position: Point) {
        if !self.is_draggable() {
            log::debug!(
                "Drag of {} ignored under {:?}",
                id,
                self.document.active_tool()
            );
            return;
        }
        self.update(id, &ElementPatch::position(position));
    }

    /// Fold a finished transform into the element's geometry.
    pub fn transform_end(&mut self, id: &ElementId, scale_x: f64, scale_y: f64, position: Point) {
        if !self.is_draggable() {
            log::debug!(
                "Transform of {} ignored under {:?}",
                id,
                self.document.active_tool()
            );
            return;
        }
        self.surface.reset_transform(id);
        let Some(element) = self.document.get(id) else {
            log::debug!("Transform of unknown element {} ignored", id);
            return;
        };
        let patch = transform::normalize(element, scale_x, scale_y, position);
        self.update(id, &patch);
    }

    /// Merge a partial update into an element.
    pub fn update(&mut self, id: &ElementId, patch: &ElementPatch) {
        self.document.update_element(id, patch);
        self.repaint();
    }

    /// Delete an element.
    pub fn delete(&mut self, id: &ElementId) {
        self.document.delete_element(id);
        self.repaint();
    }

    /// Add an element and select it.
    pub fn add(&mut self, spec: ElementSpec) -> ElementId {
        let id = self.document.add_element(spec);
        self.repaint();
        id
    }

    /// Duplicate an element, returning the copy's id.
    pub fn duplicate(&mut self, id: &ElementId) -> Option<ElementId> {
        let copy = self.document.duplicate_element(id);
        if copy.is_some() {
            self.repaint();
        }
        copy
    }

    /// Flip an element's visibility.
    pub fn toggle_visibility(&mut self, id: &ElementId) {
        self.document.toggle_visibility(id);
        self.repaint();
    }

    /// The selected element, if any.
    pub fn selection(&self) -> Option<&Element> {
        self.document.selection()
    }

    /// Export the document as SVG markup.
    pub fn export_svg(&self) -> String {
        let svg = export::to_svg(self.document.elements());
        log::info!(
            "Exported {} element(s) to {} bytes of SVG",
            self.document.len(),
            svg.len()
        );
        svg
    }

    fn repaint(&mut self) {
        let preview = self.tools.preview();
        self.surface.invalidate(&self.document, preview.as_deref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts repaints and remembers previews and transform resets.
    #[derive(Debug, Default)]
    struct RecordingSurface {
        repaints: usize,
        previews: Vec<Vec<f64>>,
        resets: Vec<ElementId>,
    }

    impl Surface for RecordingSurface {
        fn invalidate(&mut self, _document: &DocumentStore, preview: Option<&[f64]>) {
            self.repaints += 1;
            if let Some(points) = preview {
                self.previews.push(points.to_vec());
            }
        }

        fn reset_transform(&mut self, id: &ElementId) {
            self.resets.push(id.clone());
        }
    }

    fn press(canvas: &mut Canvas<impl Surface>, x: f64, y: f64) {
        canvas.handle(CanvasEvent::Press {
            position: Point::new(x, y),
        });
    }

    #[test]
    fn test_rectangle_tool_creates_and_selects() {
        let mut canvas = Canvas::new();
        canvas.set_tool(ToolKind::Rectangle);
        press(&mut canvas, 100.0, 100.0);

        assert_eq!(canvas.document.len(), 1);
        assert!(canvas.selection().is_some());
    }

    #[test]
    fn test_pen_gesture() {
        let mut canvas = Canvas::with_surface(RecordingSurface::default());
        canvas.set_tool(ToolKind::Pen);
        press(&mut canvas, 0.0, 0.0);
        canvas.handle(CanvasEvent::Move { position: Point::new(1.0, 1.0) });
        canvas.handle(CanvasEvent::Move { position: Point::new(2.0, 2.0) });
        canvas.handle(CanvasEvent::Release { position: Point::new(2.0, 2.0) });

        assert_eq!(canvas.document.len(), 1);
        let path = canvas.document.elements()[0].as_freehand().unwrap();
        assert_eq!(path.coords(), vec![0.0, 0.0, 1.0, 1.0, 2.0, 2.0]);
        assert!(canvas.surface.repaints >= 4);
        assert_eq!(
            canvas.surface.previews,
            vec![vec![0.0, 0.0, 1.0, 1.0], vec![0.0, 0.0, 1.0, 1.0, 2.0, 2.0]]
        );
    }

    #[test]
    fn test_add_repaints_and_selects() {
        let mut canvas = Canvas::with_surface(RecordingSurface::default());
        let id = canvas.add(ElementSpec::new(
            Point::new(1.0, 2.0),
            crate::shapes::Rectangle::new(3.0, 4.0, "#fff", "#000", 1.0),
        ));

        assert!(canvas.document.is_selected(&id));
        assert_eq!(canvas.surface.repaints, 1);
    }

    fn drawn_stroke(canvas: &mut Canvas) -> ElementId {
        canvas.set_tool(ToolKind::Pen);
        press(canvas, 0.0, 0.0);
        canvas.handle(CanvasEvent::Move { position: Point::new(10.0, 10.0) });
        canvas.handle(CanvasEvent::Move { position: Point::new(20.0, 0.0) });
        canvas.handle(CanvasEvent::Release { position: Point::new(20.0, 0.0) });
        canvas.set_tool(ToolKind::Select);
        canvas.document.selected_id().unwrap().clone()
    }

    #[test]
    fn test_drag_freehand_moves_exported_path() {
        let mut canvas = Canvas::new();
        let id = drawn_stroke(&mut canvas);

        canvas.handle(CanvasEvent::DragEnd { id: id.clone(), position: Point::new(300.0, 300.0) });

        let element = canvas.document.get(&id).unwrap();
        assert_eq!(element.position, Point::ORIGIN);
        assert_eq!(
            element.as_freehand().unwrap().coords(),
            vec![300.0, 300.0, 310.0, 310.0, 320.0, 300.0]
        );
        assert!(canvas.export_svg().contains("d=\"M 300 300 L 310 310 L 320 300\""));
    }

    #[test]
    fn test_duplicate_freehand_exports_offset_copy() {
        let mut canvas = Canvas::new();
        let id = drawn_stroke(&mut canvas);
        canvas.handle(CanvasEvent::DragEnd { id: id.clone(), position: Point::new(300.0, 300.0) });

        canvas.duplicate(&id).unwrap();

        let svg = canvas.export_svg();
        assert_eq!(svg.matches("<path").count(), 2);
        assert!(svg.contains("d=\"M 300 300 L 310 310 L 320 300\""));
        assert!(svg.contains("d=\"M 320 320 L 330 330 L 340 320\""));
    }

    #[test]
    fn test_transform_freehand_keeps_origin() {
        let mut canvas = Canvas::new();
        let id = drawn_stroke(&mut canvas);

        canvas.handle(CanvasEvent::TransformEnd {
            id: id.clone(),
            scale_x: 2.0,
            scale_y: 2.0,
            position: Point::new(5.0, 5.0),
        });

        let element = canvas.document.get(&id).unwrap();
        assert_eq!(element.position, Point::ORIGIN);
        assert_eq!(
            element.as_freehand().unwrap().coords(),
            vec![5.0, 5.0, 15.0, 15.0, 25.0, 5.0]
        );
    }

    #[test]
    fn test_drag_only_with_select_or_move() {
        let mut canvas = Canvas::new();
        canvas.set_tool(ToolKind::Circle);
        press(&mut canvas, 100.0, 100.0);
        let id = canvas.document.selected_id().unwrap().clone();

        canvas.handle(CanvasEvent::DragEnd { id: id.clone(), position: Point::new(1.0, 2.0) });
        assert_eq!(canvas.selection().unwrap().position, Point::new(50.0, 50.0));

        canvas.set_tool(ToolKind::Move);
        canvas.handle(CanvasEvent::DragEnd { id, position: Point::new(1.0, 2.0) });
        assert_eq!(canvas.selection().unwrap().position, Point::new(1.0, 2.0));
    }

    #[test]
    fn test_transform_normalizes_and_resets() {
        let mut canvas = Canvas::with_surface(RecordingSurface::default());
        canvas.set_tool(ToolKind::Rectangle);
        press(&mut canvas, 50.0, 50.0);
        let id = canvas.document.selected_id().unwrap().clone();
        canvas.set_tool(ToolKind::Select);

        canvas.handle(CanvasEvent::TransformEnd {
            id: id.clone(),
            scale_x: 0.01,
            scale_y: 2.0,
            position: Point::new(3.0, 4.0),
        });

        let element = canvas.selection().unwrap();
        let rect = element.as_rectangle().unwrap();
        assert!((rect.width - 5.0).abs() < f64::EPSILON);
        assert!((rect.height - 200.0).abs() < f64::EPSILON);
        assert_eq!(element.position, Point::new(3.0, 4.0));
        assert_eq!(canvas.surface.resets, vec![id]);
    }

    #[test]
    fn test_click_selection() {
        let mut canvas = Canvas::new();
        canvas.set_tool(ToolKind::Text);
        press(&mut canvas, 0.0, 0.0);
        let first = canvas.document.selected_id().unwrap().clone();
        press(&mut canvas, 10.0, 10.0);

        canvas.handle(CanvasEvent::ClickElement { id: first.clone() });
        assert!(canvas.document.is_selected(&first));

        canvas.handle(CanvasEvent::ClickEmpty);
        assert!(canvas.selection().is_none());
    }

    #[test]
    fn test_export_order() {
        let mut canvas = Canvas::new();
        canvas.set_tool(ToolKind::Rectangle);
        press(&mut canvas, 0.0, 0.0);
        canvas.set_tool(ToolKind::Circle);
        press(&mut canvas, 0.0, 0.0);
        canvas.set_tool(ToolKind::Text);
        press(&mut canvas, 0.0, 0.0);

        let svg = canvas.export_svg();
        let rect = svg.find("<rect").unwrap();
        let circle = svg.find("<circle").unwrap();
        let text = svg.find("<text").unwrap();
        assert!(rect < circle && circle < text);
    }

    #[test]
    fn test_event_json() {
        let json = r#"{"type":"drag_end","id":"element-1-abc","position":{"x":1.0,"y":2.0}}"#;
        let event: CanvasEvent = serde_json::from_str(json).unwrap();
        assert!(matches!(event, CanvasEvent::DragEnd { .. }));
    }
}
