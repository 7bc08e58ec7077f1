use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::layout::{LayoutParams, LayoutStrategy};
use crate::palette::DepthPalette;
use crate::tree::TreeLimits;

/// Everything that shapes a poster, editable live from the controls panel.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PosterSettings {
    pub limits: TreeLimits,
    pub strategy: LayoutStrategy,
    pub layout: LayoutParams,
    pub palette: DepthPalette,
    pub shimmer: bool,
    pub show_edges: bool,
    pub sphere_shading: bool,
    pub show_labels: bool,
    pub rotate: bool,
    /// Radians per second while rotation is enabled.
    pub rotation_speed: f32,
}

impl Default for PosterSettings {
    fn default() -> Self {
        Self {
            limits: TreeLimits::default(),
            strategy: LayoutStrategy::default(),
            layout: LayoutParams::default(),
            palette: DepthPalette::default(),
            shimmer: false,
            show_edges: true,
            sphere_shading: true,
            show_labels: true,
            rotate: false,
            rotation_speed: 0.35,
        }
    }
}

pub fn load_settings(path: &Path) -> Result<PosterSettings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file {}", path.display()))?;
    parse_settings(&raw).with_context(|| format!("invalid settings in {}", path.display()))
}

fn parse_settings(raw: &str) -> Result<PosterSettings> {
    serde_json::from_str(raw).context("settings must be a JSON object")
}
