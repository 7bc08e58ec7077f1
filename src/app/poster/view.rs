use eframe::egui::{self, Align2, Color32, FontId, Sense, Shape, Stroke, Ui, vec2};

use crate::palette::{DepthPalette, depth_to_color, shimmering_depth_color};
use crate::projection::Projector;
use crate::tree::NodeKind;
use crate::util::truncate_label;

use super::super::render_utils::{
    circle_visible, depth_sorted_into, draw_background, edge_visible, shade_color, sphere_mesh,
    with_alpha,
};
use super::super::{LoadStatus, PosterSession};

const EDGE_ALPHA: u8 = 110;
const LABEL_MIN_RADIUS: f32 = 14.0;
const LABEL_MAX_CHARS: usize = 28;
const MIN_DISC_RADIUS: f32 = 0.75;
const OVERLAY_FONT_SIZE: f32 = 14.0;
const OVERLAY_INSET: f32 = 12.0;

impl PosterSession {
    pub(in crate::app) fn projector(&self, rect: egui::Rect) -> Projector {
        Projector {
            rect,
            camera: self.camera,
            bounds: self.scene.bounds,
            focal_length: self.scene.focal_length,
            rotation: if self.scene.strategy.is_three_dimensional() {
                self.rotation
            } else {
                0.0
            },
        }
    }

    /// Truncation notice for the bottom-left corner. Shown even when the
    /// node cap left nothing to draw.
    pub(in crate::app) fn truncation_notice(&self) -> Option<String> {
        self.scene.tree.truncation_message()
    }

    fn draw_truncation_notice(&self, painter: &egui::Painter, rect: egui::Rect) {
        // Painter coordinates are already screen space, so a fixed size stays
        // constant under zoom.
        if let Some(message) = self.truncation_notice() {
            painter.text(
                rect.left_bottom() + vec2(OVERLAY_INSET, -OVERLAY_INSET),
                Align2::LEFT_BOTTOM,
                message,
                FontId::proportional(OVERLAY_FONT_SIZE),
                Color32::from_rgb(246, 206, 104),
            );
        }
    }

    fn draw_status(&self, painter: &egui::Painter, rect: egui::Rect) {
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            self.status.message(),
            FontId::proportional(20.0),
            Color32::from_gray(225),
        );
        if let LoadStatus::Error(detail) = &self.status {
            painter.text(
                rect.center() + vec2(0.0, 28.0),
                Align2::CENTER_TOP,
                detail,
                FontId::proportional(13.0),
                Color32::from_rgb(239, 120, 110),
            );
        }
    }

    fn advance_rotation(&mut self, ui: &Ui) {
        if !self.settings.rotate || !self.scene.strategy.is_three_dimensional() {
            return;
        }

        let dt = ui.ctx().input(|input| input.stable_dt).min(0.1);
        self.rotation = (self.rotation + dt * self.settings.rotation_speed)
            .rem_euclid(std::f32::consts::TAU);
        ui.ctx().request_repaint();
    }

    pub(in crate::app) fn draw_poster(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        if self.scene.is_empty() {
            painter.rect_filled(rect, 0.0, Color32::from_rgb(14, 17, 24));
            self.draw_status(&painter, rect);
            self.draw_truncation_notice(&painter, rect);
            return;
        }

        self.handle_poster_zoom(ui, rect, &response);
        self.handle_poster_pan(&response);
        self.advance_rotation(ui);

        draw_background(&painter, rect, self.camera);

        let projector = self.projector(rect);
        let scratch = &mut self.view_scratch;
        projector.project_all(&self.scene.placements, &mut scratch.projected);
        depth_sorted_into(&scratch.projected, &mut scratch.draw_order);
        scratch.visible.clear();
        scratch.visible.extend(
            scratch
                .projected
                .iter()
                .map(|node| node.in_front && circle_visible(rect, node.screen, node.radius)),
        );

        let max_depth = self.scene.max_depth;
        let palette = self.settings.palette;
        let shimmer = self.settings.shimmer && palette == DepthPalette::Spectrum;
        let mut rng = rand::thread_rng();
        if shimmer {
            ui.ctx().request_repaint();
        }

        if self.settings.show_edges {
            let line_width = (projector.radius_scale() * self.scene.bounds.width() * 0.0012)
                .clamp(0.6, 2.4);
            for edge in &self.scene.tree.edges {
                let start = scratch.projected[edge.from].screen;
                let end = scratch.projected[edge.to].screen;
                if !scratch.projected[edge.from].in_front || !scratch.projected[edge.to].in_front {
                    continue;
                }
                if !scratch.visible[edge.from]
                    && !scratch.visible[edge.to]
                    && !edge_visible(rect, start, end, 2.0)
                {
                    continue;
                }

                let child_depth = self.scene.tree.nodes[edge.to].depth;
                let color = with_alpha(depth_to_color(child_depth, max_depth, palette), EDGE_ALPHA);
                painter.line_segment([start, end], Stroke::new(line_width, color));
            }
        }

        for &index in &scratch.draw_order {
            if !scratch.visible[index] {
                continue;
            }

            let node = &self.scene.tree.nodes[index];
            let projected = scratch.projected[index];
            let radius = projected.radius.max(MIN_DISC_RADIUS);
            let color = if shimmer {
                shimmering_depth_color(node.depth, max_depth, palette, &mut rng)
            } else {
                depth_to_color(node.depth, max_depth, palette)
            };

            if self.settings.sphere_shading && radius > 2.0 {
                painter.add(Shape::mesh(sphere_mesh(projected.screen, radius, color)));
            } else {
                painter.circle_filled(projected.screen, radius, color);
            }
            painter.circle_stroke(
                projected.screen,
                radius,
                Stroke::new(0.8, with_alpha(shade_color(color, 0.35), 160)),
            );

            if self.settings.show_labels && radius >= LABEL_MIN_RADIUS {
                painter.text(
                    projected.screen + vec2(radius + 4.0, 0.0),
                    Align2::LEFT_CENTER,
                    truncate_label(&node.name, LABEL_MAX_CHARS),
                    FontId::proportional(12.0),
                    Color32::from_gray(235),
                );
            }
        }

        let hovered = Self::hovered_index(
            ui,
            &scratch.draw_order,
            &scratch.visible,
            &scratch.projected,
        );
        if let Some(index) = hovered {
            let tree = &self.scene.tree;
            let node = &tree.nodes[index];
            let kind = if node.kind == NodeKind::Directory && tree.is_leaf(index) {
                "empty directory"
            } else {
                node.kind.label()
            };
            let readout = format!(
                "{}  |  {kind}  |  depth {}  |  entry {} of {}  |  {} children  |  {} leaves",
                node.id,
                node.depth,
                node.index_in_parent + 1,
                node.sibling_count,
                node.children.len(),
                self.scene.placements[index].leaf_count
            );
            painter.text(
                rect.left_top() + vec2(OVERLAY_INSET, OVERLAY_INSET),
                Align2::LEFT_TOP,
                readout,
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        if let Some(pointer) = response.hover_pos() {
            let world = projector.screen_to_world(pointer);
            painter.text(
                rect.right_bottom() + vec2(-OVERLAY_INSET, -OVERLAY_INSET),
                Align2::RIGHT_BOTTOM,
                format!("layout {:.3}, {:.3}", world.x, world.y),
                FontId::monospace(11.0),
                Color32::from_gray(150),
            );
        }

        self.draw_truncation_notice(&painter, rect);
    }
}
