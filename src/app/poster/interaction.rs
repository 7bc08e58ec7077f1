use eframe::egui::{self, Rect, Ui};

use crate::projection::ProjectedNode;

use super::super::PosterSession;

impl PosterSession {
    pub(in crate::app) fn handle_poster_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.camera
            .zoom_about(pointer - rect.min, rect.size(), zoom_factor);
    }

    pub(in crate::app) fn handle_poster_pan(&mut self, response: &egui::Response) {
        if response.double_clicked() {
            self.camera.reset();
            return;
        }

        if response.dragged() {
            self.camera.pan_by(response.drag_delta());
        }
    }

    /// Topmost disc under the pointer, searching nearest first.
    pub(in crate::app) fn hovered_index(
        ui: &Ui,
        draw_order: &[usize],
        visible: &[bool],
        projected: &[ProjectedNode],
    ) -> Option<usize> {
        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        draw_order.iter().rev().copied().find(|&index| {
            visible[index] && projected[index].screen.distance(pointer) <= projected[index].radius
        })
    }
}
