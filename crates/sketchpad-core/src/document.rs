//! Document store: the authoritative element sequence, selection and active tool.

use crate::shapes::{Element, ElementId, ElementPatch, ElementSpec, ShapeKind};
use crate::tools::ToolKind;
use kurbo::Vec2;

/// Offset applied to a duplicate so it does not sit exactly on its source.
pub const DUPLICATE_OFFSET: Vec2 = Vec2::new(20.0, 20.0);

/// One row of the layers list.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub id: ElementId,
    pub kind: ShapeKind,
    /// Display label, e.g. `"circle 2"`.
    pub label: String,
    pub visible: bool,
    pub selected: bool,
}

/// Owns the ordered element sequence (back to front), the selection and the active tool.
///
/// Every mutation of the document goes through this type.
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    /// Elements in painter's order; later entries render on top.
    elements: Vec<Element>,
    /// Id of the selected element. Always resolves to a live entry.
    selected: Option<ElementId>,
    /// Currently active tool.
    active_tool: ToolKind,
}

impl DocumentStore {
    /// Create an empty document with the select tool active.
    pub fn new() -> Self {
        Self::default()
    }

    /// Elements in painter's order (back to front).
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Get an element by id.
    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| &e.id == id)
    }

    fn get_mut(&mut self, id: &ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| &e.id == id)
    }

    fn contains(&self, id: &ElementId) -> bool {
        self.get(id).is_some()
    }

    /// Get the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Draw an id that no live element uses.
    fn fresh_id(&self) -> ElementId {
        loop {
            let id = ElementId::generate();
            if !self.contains(&id) {
                return id;
            }
            log::debug!("Generated id {} collides, drawing again", id);
        }
    }

    /// Append a new element built from `spec` and select it.
    pub fn add_element(&mut self, spec: ElementSpec) -> ElementId {
        let id = self.fresh_id();
        log::debug!("Adding {} element {}", spec.shape.kind().tag(), id);
        self.elements.push(Element::from_spec(id.clone(), spec));
        self.selected = Some(id.clone());
        id
    }

    /// Merge `patch` into the element with `id`. No-op if absent.
    pub fn update_element(&mut self, id: &ElementId, patch: &ElementPatch) {
        match self.get_mut(id) {
            Some(element) => element.apply(patch),
            None => log::debug!("Update of unknown element {} ignored", id),
        }
    }

    /// Remove the element with `id`, clearing the selection if it pointed there.
    pub fn delete_element(&mut self, id: &ElementId) {
        let before = self.elements.len();
        self.elements.retain(|e| &e.id != id);
        if self.elements.len() == before {
            log::debug!("Delete of unknown element {} ignored", id);
            return;
        }
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
    }

    /// Copy the element with `id` under a fresh id, offset by [`DUPLICATE_OFFSET`],
    /// on top of the stack, and select the copy.
    pub fn duplicate_element(&mut self, id: &ElementId) -> Option<ElementId> {
        let Some(source) = self.get(id) else {
            log::debug!("Duplicate of unknown element {} ignored", id);
            return None;
        };
        let mut spec = ElementSpec {
            position: source.position,
            visible: source.visible,
            shape: source.shape.clone(),
        };
        spec.translate(DUPLICATE_OFFSET);
        Some(self.add_element(spec))
    }

    /// Select the element with `id`, or clear the selection for `None` or an unknown id.
    pub fn select(&mut self, id: Option<&ElementId>) {
        self.selected = id.filter(|id| self.contains(id)).cloned();
    }

    /// Id of the selected element.
    pub fn selected_id(&self) -> Option<&ElementId> {
        self.selected.as_ref()
    }

    /// The selected element, looked up in the live document.
    pub fn selection(&self) -> Option<&Element> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    /// Check if an element is selected.
    pub fn is_selected(&self, id: &ElementId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    /// Currently active tool.
    pub fn active_tool(&self) -> ToolKind {
        self.active_tool
    }

    /// Set the active tool.
    ///
    /// Callers with a [`ToolController`](crate::tools::ToolController) should go through
    /// [`ToolController::set_tool`](crate::tools::ToolController::set_tool) so that an
    /// in-flight pen stroke is discarded.
    pub fn set_active_tool(&mut self, tool: ToolKind) {
        self.active_tool = tool;
    }

    /// Flip the visibility flag of the element with `id`. No-op if absent.
    pub fn toggle_visibility(&mut self, id: &ElementId) {
        if let Some(element) = self.get_mut(id) {
            element.visible = !element.visible;
        }
    }

    /// Layers list rows, in document order.
    pub fn layers(&self) -> Vec<Layer> {
        self.elements
            .iter()
            .enumerate()
            .map(|(index, element)| Layer {
                id: element.id.clone(),
                kind: element.kind(),
                label: format!("{} {}", element.kind().display_name(), index + 1),
                visible: element.visible,
                selected: self.is_selected(&element.id),
            })
            .collect()
    }
}
