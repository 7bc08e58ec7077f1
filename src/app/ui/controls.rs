use eframe::egui::{self, Ui};

use crate::layout::{
    BASE_RADIUS_RANGE, DISTANCE_SCALE_RANGE, FOCAL_LENGTH_RANGE, LayoutStrategy, MARGIN_RANGE,
    MAX_RADIUS_RANGE, MIN_SPACING_RANGE, PADDING_RANGE, RADIUS_SCALE_RANGE, Z_STEP_RANGE,
};
use crate::palette::DepthPalette;

use super::super::PosterSession;

const MAX_NODE_CAP: usize = 50_000;
const MAX_DEPTH_CAP: usize = 64;

impl PosterSession {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Poster Controls");
        ui.separator();
        ui.add_space(4.0);

        let mut changed = false;

        ui.label("Layout");
        ui.horizontal_wrapped(|ui| {
            for strategy in LayoutStrategy::ALL {
                changed |= ui
                    .selectable_value(&mut self.settings.strategy, strategy, strategy.label())
                    .changed();
            }
        });

        ui.label("Colors");
        ui.horizontal_wrapped(|ui| {
            for palette in [DepthPalette::Gradient, DepthPalette::Spectrum] {
                ui.selectable_value(&mut self.settings.palette, palette, palette.label());
            }
        });
        ui.add_enabled_ui(self.settings.palette == DepthPalette::Spectrum, |ui| {
            ui.checkbox(&mut self.settings.shimmer, "Shimmer")
                .on_hover_text("Jitter the spectrum phase every frame.");
        });

        ui.separator();

        ui.checkbox(&mut self.settings.show_edges, "Draw edges")
            .on_hover_text("Connect every entry to its parent directory.");
        ui.checkbox(&mut self.settings.sphere_shading, "Sphere shading")
            .on_hover_text("Shade discs as lit spheres instead of flat circles.");
        ui.checkbox(&mut self.settings.show_labels, "Labels")
            .on_hover_text("Name entries whose disc is large enough on screen.");
        ui.checkbox(&mut self.settings.rotate, "Rotate")
            .on_hover_text("Spin the orbital and scatter layouts about the vertical axis.");
        ui.add_enabled_ui(self.settings.rotate, |ui| {
            ui.add(
                egui::Slider::new(&mut self.settings.rotation_speed, 0.05..=2.0)
                    .text("Rotation speed (rad/s)"),
            );
        });

        ui.separator();

        changed |= ui
            .add(
                egui::Slider::new(&mut self.settings.limits.max_nodes, 1..=MAX_NODE_CAP)
                    .logarithmic(true)
                    .text("Max nodes"),
            )
            .on_hover_text("Entries past this count are dropped and the poster says so.")
            .changed();
        changed |= ui
            .add(
                egui::Slider::new(&mut self.settings.limits.max_depth, 1..=MAX_DEPTH_CAP)
                    .text("Max depth"),
            )
            .on_hover_text("Entries nested deeper than this are dropped.")
            .changed();

        ui.collapsing("Layout tuning", |ui| {
            let params = &mut self.settings.layout;
            changed |= ui
                .add(
                    egui::Slider::new(&mut params.base_radius, BASE_RADIUS_RANGE)
                        .logarithmic(true)
                        .text("Base radius"),
                )
                .changed();
            changed |= ui
                .add(
                    egui::Slider::new(&mut params.radius_scale, RADIUS_SCALE_RANGE)
                        .text("Radius scale"),
                )
                .on_hover_text("Child disc size relative to its parent.")
                .changed();
            changed |= ui
                .checkbox(&mut params.shrink_with_depth, "Shrink radial discs with depth")
                .changed();
            changed |= ui
                .add(
                    egui::Slider::new(&mut params.min_spacing, MIN_SPACING_RANGE)
                        .logarithmic(true)
                        .text("Leaf spacing"),
                )
                .changed();
            changed |= ui
                .add(
                    egui::Slider::new(&mut params.max_radius, MAX_RADIUS_RANGE)
                        .text("Radial extent"),
                )
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut params.padding, PADDING_RANGE).text("Orbit padding"))
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut params.z_step, Z_STEP_RANGE).text("Depth z step"))
                .changed();
            changed |= ui
                .add(
                    egui::Slider::new(&mut params.distance_scale, DISTANCE_SCALE_RANGE)
                        .text("Scatter distance"),
                )
                .changed();
            changed |= ui
                .add(
                    egui::Slider::new(&mut params.focal_length, FOCAL_LENGTH_RANGE)
                        .text("Focal length"),
                )
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut params.margin, MARGIN_RANGE).text("Margin"))
                .changed();

            let mut seeded = params.seed.is_some();
            if ui
                .checkbox(&mut seeded, "Fixed scatter seed")
                .on_hover_text("Keep scatter positions stable across rebuilds.")
                .changed()
            {
                params.seed = seeded.then_some(0);
                changed = true;
            }
            if let Some(seed) = params.seed.as_mut() {
                changed |= ui
                    .add(egui::DragValue::new(seed).prefix("seed "))
                    .changed();
            }
        });

        if changed {
            self.poster_dirty = true;
        }
    }
}
