use std::path::Path;

use eframe::egui::{self, Align, Context, Layout};

use crate::util::format_count;

use super::super::{LoadStatus, PosterSession};

impl PosterSession {
    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        input_path: &Path,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        if self.poster_dirty && self.status == LoadStatus::Ready {
            self.make_poster();
        }

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("dir-poster");
                    ui.separator();
                    ui.label(format!("input: {}", input_path.display()));
                    let tree = &self.scene.tree;
                    ui.label(format!("nodes: {}", format_count(tree.node_count())));
                    ui.label(format!("directories: {}", format_count(tree.directory_count())));
                    ui.label(format!("files: {}", format_count(tree.file_count())));
                    ui.label(format!("depth: {}", self.scene.max_depth));

                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload input"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    if ui.button("Rebuild poster").clicked() {
                        self.poster_dirty = true;
                    }
                    if ui.button("Reset view").clicked() {
                        self.camera.reset();
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(format!("layout: {}", self.scene.strategy.label()));
                        if is_loading {
                            ui.spinner();
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_poster(ui));
    }
}
