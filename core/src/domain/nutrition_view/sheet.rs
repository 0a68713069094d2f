use serde::Serialize;

/// Height of the handle left visible when the sheet is collapsed.
pub const COLLAPSED_HANDLE_HEIGHT: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DragBounds {
    pub top: f64,
    pub bottom: f64,
}

/// Vertical position of the draggable result sheet, measured as the
/// offset of its top edge from the top of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResultSheet {
    viewport_height: f64,
    offset: f64,
    drag_enabled: bool,
}

impl ResultSheet {
    /// Opens half way up the viewport.
    pub fn new(viewport_height: f64) -> Self {
        let viewport_height = viewport_height.max(0.0);
        Self {
            viewport_height,
            offset: viewport_height / 2.0,
            drag_enabled: true,
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn drag_enabled(&self) -> bool {
        self.drag_enabled
    }

    pub fn bounds(&self) -> DragBounds {
        DragBounds {
            top: 0.0,
            bottom: (self.viewport_height - COLLAPSED_HANDLE_HEIGHT).max(0.0),
        }
    }

    /// Follows the pointer while dragging, within bounds.
    pub fn drag_to(&mut self, offset: f64) {
        if !self.drag_enabled {
            return;
        }
        let bounds = self.bounds();
        self.offset = offset.clamp(bounds.top, bounds.bottom);
    }

    /// Snaps open when released in the top third, collapsed otherwise.
    pub fn end_drag(&mut self, release_y: f64) {
        let bounds = self.bounds();
        self.offset = if release_y > self.viewport_height / 3.0 {
            bounds.bottom
        } else {
            bounds.top
        };
    }

    /// Dragging only competes with scrolling at either end of the content.
    pub fn on_scroll(&mut self, scroll_top: f64, client_height: f64, scroll_height: f64) {
        let at_top = scroll_top <= 0.0;
        let at_bottom = scroll_top + client_height >= scroll_height;
        self.drag_enabled = at_top || at_bottom;
    }

    pub fn resize(&mut self, viewport_height: f64) {
        self.viewport_height = viewport_height.max(0.0);
        let bounds = self.bounds();
        self.offset = self.offset.clamp(bounds.top, bounds.bottom);
    }

    pub fn is_expanded(&self) -> bool {
        self.offset <= 0.0
    }

    pub fn is_collapsed(&self) -> bool {
        self.offset >= self.bounds().bottom
    }
}
