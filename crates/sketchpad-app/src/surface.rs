//! Headless rendering surface.

use sketchpad_core::{DocumentStore, ElementId, Surface};

/// A surface that logs repaints instead of painting.
#[derive(Debug, Default)]
pub struct LogSurface {
    /// Number of repaint requests received.
    pub frames: usize,
    /// Points in the most recent stroke preview, zero once the stroke ends.
    pub preview_points: usize,
}

impl Surface for LogSurface {
    fn invalidate(&mut self, document: &DocumentStore, preview: Option<&[f64]>) {
        self.frames += 1;
        self.preview_points = preview.map_or(0, |coords| coords.len() / 2);
        log::trace!(
            "Frame {}: {} element(s), selection {:?}, preview {} point(s)",
            self.frames,
            document.len(),
            document.selected_id().map(ElementId::as_str),
            self.preview_points
        );
        for layer in document.layers() {
            log::trace!(
                "  {} {} visible={} selected={}",
                layer.id,
                layer.label,
                layer.visible,
                layer.selected
            );
        }
    }

    fn reset_transform(&mut self, id: &ElementId) {
        log::trace!("Reset transform handle of {}", id);
    }
}
