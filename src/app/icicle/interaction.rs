use eframe::egui::{Pos2, Rect, Response, Vec2};

use crate::layout::Viewport;
use crate::zoom::ClickTarget;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn sync_viewport(&mut self, size: Vec2) {
        let viewport = Viewport::new(size.x, size.y);
        if viewport == self.session.viewport() {
            return;
        }
        if let Err(error) = self.session.resize(viewport) {
            // Collapsed window; keep the previous geometry until it recovers.
            log::debug!("skipping resize: {error}");
        }
    }

    pub(in crate::app) fn handle_canvas_input(&mut self, canvas: Rect, response: &Response) {
        if let Some(pointer) = response.hover_pos()
            && let Some(index) = self.node_at(canvas, pointer)
        {
            self.inspected = Some(index);
        }

        if response.clicked()
            && let Some(pointer) = response.interact_pointer_pos()
            && let Some(target) = self.click_target_at(canvas, pointer)
        {
            self.session.click(&target);
        }

        // Right click anywhere on the canvas reads as a background click.
        if response.secondary_clicked() {
            self.session.click(&ClickTarget::Background);
        }
    }

    /// First hierarchy depth rendered under the current focus; its
    /// rectangles are the clickable zoom targets.
    pub(in crate::app) fn first_visible_depth(&self) -> u8 {
        match self.session.current_focus().kind() {
            None => 1,
            Some(kind) => kind.depth() + 1,
        }
    }

    /// Deepest node rectangle under the pointer, for the details panel.
    fn node_at(&self, canvas: Rect, pointer: Pos2) -> Option<usize> {
        let local = pointer - canvas.min;
        self.session
            .current_layout()
            .iter()
            .filter(|item| item.contains(local.x, local.y))
            .max_by_key(|item| item.depth)
            .and_then(|item| item.node)
    }

    /// Maps a primary click to a zoom event. The merged "other" rectangle is
    /// inert; a miss against an empty layout counts as background.
    fn click_target_at(&self, canvas: Rect, pointer: Pos2) -> Option<ClickTarget> {
        let local = pointer - canvas.min;
        let first_level = self.first_visible_depth();

        for item in self.session.current_layout() {
            if item.depth == first_level && item.contains(local.x, local.y) {
                let index = item.node?;
                return Some(ClickTarget::Node(
                    self.session.tree().node(index).id.clone(),
                ));
            }
        }

        Some(ClickTarget::Background)
    }
}
