//! Recorded editing scripts.

use crate::ReplayResult;
use crate::surface::LogSurface;
use kurbo::Point;
use serde::Deserialize;
use sketchpad_core::{
    Canvas, CanvasEvent, ElementId, ElementPatch, ElementSpec, ToolDefaults, ToolKind,
};

/// A recorded editing session.
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    /// Styling for elements created by tools.
    #[serde(default)]
    pub defaults: ToolDefaults,
    /// Steps, in order.
    pub events: Vec<Step>,
}

impl Script {
    /// Parse a script from JSON.
    pub fn from_json(json: &str) -> ReplayResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// How a step refers to an existing element. Ids are generated at runtime,
/// so scripts address elements by position in the document instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// Zero-based index in document order.
    Index(usize),
    /// The current selection.
    Selected,
    /// The top-most element.
    Last,
}

impl Target {
    fn resolve(self, canvas: &Canvas<LogSurface>) -> Option<ElementId> {
        let document = &canvas.document;
        match self {
            Target::Index(i) => document.elements().get(i).map(|e| e.id().clone()),
            Target::Selected => document.selected_id().cloned(),
            Target::Last => document.elements().last().map(|e| e.id().clone()),
        }
    }
}

/// One scripted step: a surface event or a panel command.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    SetTool {
        tool: ToolKind,
    },
    Press {
        x: f64,
        y: f64,
    },
    Move {
        x: f64,
        y: f64,
    },
    Release {
        x: f64,
        y: f64,
    },
    Click {
        target: Target,
    },
    ClickEmpty,
    DragEnd {
        target: Target,
        x: f64,
        y: f64,
    },
    TransformEnd {
        target: Target,
        scale_x: f64,
        scale_y: f64,
        x: f64,
        y: f64,
    },
    Add {
        element: ElementSpec,
    },
    Update {
        target: Target,
        patch: ElementPatch,
    },
    Delete {
        target: Target,
    },
    Duplicate {
        target: Target,
    },
    ToggleVisibility {
        target: Target,
    },
}

impl Step {
    /// Run this step against `canvas`. Steps whose target does not resolve are skipped.
    pub fn apply(&self, canvas: &mut Canvas<LogSurface>) {
        match self {
            Step::SetTool { tool } => canvas.set_tool(*tool),
            Step::Press { x, y } => canvas.handle(CanvasEvent::Press {
                position: Point::new(*x, *y),
            }),
            Step::Move { x, y } => canvas.handle(CanvasEvent::Move {
                position: Point::new(*x, *y),
            }),
            Step::Release { x, y } => canvas.handle(CanvasEvent::Release {
                position: Point::new(*x, *y),
            }),
            Step::ClickEmpty => canvas.handle(CanvasEvent::ClickEmpty),
            Step::Add { element } => {
                canvas.add(element.clone());
            }
            Step::Click { target } => {
                if let Some(id) = self.resolve(*target, canvas) {
                    canvas.handle(CanvasEvent::ClickElement { id });
                }
            }
            Step::DragEnd { target, x, y } => {
                if let Some(id) = self.resolve(*target, canvas) {
                    canvas.handle(CanvasEvent::DragEnd {
                        id,
                        position: Point::new(*x, *y),
                    });
                }
            }
            Step::TransformEnd {
                target,
                scale_x,
                scale_y,
                x,
                y,
            } => {
                if let Some(id) = self.resolve(*target, canvas) {
                    canvas.handle(CanvasEvent::TransformEnd {
                        id,
                        scale_x: *scale_x,
                        scale_y: *scale_y,
                        position: Point::new(*x, *y),
                    });
                }
            }
            Step::Update { target, patch } => {
                if let Some(id) = self.resolve(*target, canvas) {
                    canvas.update(&id, patch);
                }
            }
            Step::Delete { target } => {
                if let Some(id) = self.resolve(*target, canvas) {
                    canvas.delete(&id);
                }
            }
            Step::Duplicate { target } => {
                if let Some(id) = self.resolve(*target, canvas) {
                    canvas.duplicate(&id);
                }
            }
            Step::ToggleVisibility { target } => {
                if let Some(id) = self.resolve(*target, canvas) {
                    canvas.toggle_visibility(&id);
                }
            }
        }
    }

    fn resolve(&self, target: Target, canvas: &Canvas<LogSurface>) -> Option<ElementId> {
        let id = target.resolve(canvas);
        if id.is_none() {
            log::warn!("Target {:?} does not resolve, skipping {:?}", target, self);
        }
        id
    }
}
