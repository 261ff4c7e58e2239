//! Sketchpad Core Library
//!
//! Document model, tool state machine, transform normalization and SVG export
//! for the Sketchpad vector editor. Rendering and hit-testing are left to a
//! [`Surface`] implementation supplied by the embedding UI.

pub mod canvas;
pub mod document;
pub mod export;
pub mod shapes;
pub mod tools;
pub mod transform;

pub use canvas::{Canvas, CanvasEvent, NullSurface, Surface};
pub use document::{DocumentStore, Layer};
pub use export::{EXPORT_FILE_NAME, EXPORT_MIME_TYPE, to_svg};
pub use shapes::{Element, ElementId, ElementPatch, ElementSpec, Shape, ShapeKind};
pub use tools::{ToolController, ToolDefaults, ToolKind};
