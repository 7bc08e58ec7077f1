mod app;
mod layout;
mod palette;
mod projection;
mod settings;
mod tree;
mod util;

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;

use crate::layout::LayoutStrategy;
use crate::palette::DepthPalette;
use crate::settings::{PosterSettings, load_settings};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON file describing the directory hierarchy
    input: PathBuf,
    /// JSON file with poster settings; flags below override it
    #[arg(long)]
    settings: Option<PathBuf>,
    #[arg(long, value_enum)]
    strategy: Option<LayoutStrategy>,
    #[arg(long, value_enum)]
    palette: Option<DepthPalette>,
    /// Jitter spectrum colors every frame
    #[arg(long)]
    shimmer: bool,
    #[arg(long)]
    max_nodes: Option<usize>,
    #[arg(long)]
    max_depth: Option<usize>,
    #[arg(long)]
    no_edges: bool,
    /// Draw plain discs instead of shaded spheres
    #[arg(long)]
    flat: bool,
    /// Spin the orbital and scatter layouts about their vertical axis
    #[arg(long)]
    rotate: bool,
    /// Shrink radial discs by the radius scale per level
    #[arg(long)]
    shrink_with_depth: bool,
    #[arg(long)]
    focal_length: Option<f32>,
    #[arg(long)]
    base_radius: Option<f32>,
    #[arg(long)]
    radius_scale: Option<f32>,
    #[arg(long)]
    min_spacing: Option<f32>,
    /// Fix the scatter layout so reruns match
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn poster_settings(&self) -> Result<PosterSettings> {
        let mut settings = match &self.settings {
            Some(path) => load_settings(path)?,
            None => PosterSettings::default(),
        };

        if let Some(strategy) = self.strategy {
            settings.strategy = strategy;
        }
        if let Some(palette) = self.palette {
            settings.palette = palette;
        }
        if let Some(max_nodes) = self.max_nodes {
            settings.limits.max_nodes = max_nodes;
        }
        if let Some(max_depth) = self.max_depth {
            settings.limits.max_depth = max_depth;
        }
        if let Some(focal_length) = self.focal_length {
            settings.layout.focal_length = focal_length;
        }
        if let Some(base_radius) = self.base_radius {
            settings.layout.base_radius = base_radius;
        }
        if let Some(radius_scale) = self.radius_scale {
            settings.layout.radius_scale = radius_scale;
        }
        if let Some(min_spacing) = self.min_spacing {
            settings.layout.min_spacing = min_spacing;
        }
        if self.seed.is_some() {
            settings.layout.seed = self.seed;
        }
        settings.shimmer |= self.shimmer;
        settings.rotate |= self.rotate;
        settings.layout.shrink_with_depth |= self.shrink_with_depth;
        if self.no_edges {
            settings.show_edges = false;
        }
        if self.flat {
            settings.sphere_shading = false;
        }
        settings.layout = settings.layout.clamped();

        Ok(settings)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let settings = args.poster_settings()?;
    log::info!(
        "rendering {} with {} layout",
        args.input.display(),
        settings.strategy.label()
    );

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "dir-poster",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::PosterApp::new(
                cc,
                args.input.clone(),
                settings,
            )))
        }),
    )
    .map_err(|error| anyhow!("poster window failed: {error}"))
}
