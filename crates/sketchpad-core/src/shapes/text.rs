//! Text shape.

use super::{ElementPatch, ShapeKind, ShapeTrait};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A single run of text. Position is the top-left of the text box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Text {
    /// The text content (may be empty).
    pub content: String,
    /// Font size in canvas units.
    pub font_size: f64,
    /// Fill color, emitted verbatim.
    pub fill: String,
}

impl Text {
    /// Smallest font size a resize gesture may produce.
    pub const MIN_FONT_SIZE: f64 = 8.0;

    /// Font size assumed when the stored one is unusable.
    pub const DEFAULT_FONT_SIZE: f64 = 16.0;

    /// Average glyph advance relative to the font size.
    const CHAR_WIDTH_FACTOR: f64 = 0.55;

    /// Create a new text run.
    pub fn new(content: impl Into<String>, font_size: f64, fill: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            font_size,
            fill: fill.into(),
        }
    }

    /// The stored font size, or the default when it is zero, negative or NaN.
    pub fn effective_font_size(&self) -> f64 {
        if self.font_size > 0.0 {
            self.font_size
        } else {
            Self::DEFAULT_FONT_SIZE
        }
    }

    /// Approximate width based on character count and font size.
    fn approximate_width(&self) -> f64 {
        let max_line_len = self
            .content
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        max_line_len as f64 * self.effective_font_size() * Self::CHAR_WIDTH_FACTOR
    }

    /// Approximate height based on font size and number of lines.
    fn approximate_height(&self) -> f64 {
        let line_count = self.content.lines().count().max(1);
        line_count as f64 * self.effective_font_size() * 1.2
    }
}

impl ShapeTrait for Text {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Text
    }

    fn bounds(&self, position: Point) -> Rect {
        Rect::new(
            position.x,
            position.y,
            position.x + self.approximate_width().max(20.0),
            position.y + self.approximate_height(),
        )
    }

    fn apply(&mut self, patch: &ElementPatch) {
        if let Some(content) = &patch.text {
            self.content.clone_from(content);
        }
        if let Some(font_size) = patch.font_size {
            self.font_size = font_size;
        }
        if let Some(fill) = &patch.fill {
            self.fill.clone_from(fill);
        }
    }
}
