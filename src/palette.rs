use std::f32::consts::TAU;

use clap::ValueEnum;
use eframe::egui::Color32;
use rand::Rng;
use serde::Deserialize;

pub const DEFAULT_NODE_COLOR: Color32 = Color32::from_rgb(100, 149, 237);

const GRADIENT_START: [f32; 3] = [59.0, 130.0, 246.0];
const GRADIENT_MIDDLE: [f32; 3] = [139.0, 92.0, 246.0];
const GRADIENT_END: [f32; 3] = [239.0, 68.0, 68.0];
const SPECTRUM_PHASES: [f32; 3] = [0.0, 0.25, 0.5];
const SHIMMER_AMPLITUDE: f32 = 0.02;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DepthPalette {
    /// Blue through purple to red.
    #[default]
    Gradient,
    /// Three phase-shifted sine waves.
    Spectrum,
}

impl DepthPalette {
    pub fn label(self) -> &'static str {
        match self {
            Self::Gradient => "Gradient",
            Self::Spectrum => "Spectrum",
        }
    }
}

fn lerp_rgb(from: [f32; 3], to: [f32; 3], t: f32) -> Color32 {
    let channel = |index: usize| (from[index] + (to[index] - from[index]) * t).round() as u8;
    Color32::from_rgb(channel(0), channel(1), channel(2))
}

fn gradient_color(t: f32) -> Color32 {
    if t < 0.5 {
        lerp_rgb(GRADIENT_START, GRADIENT_MIDDLE, t * 2.0)
    } else {
        lerp_rgb(GRADIENT_MIDDLE, GRADIENT_END, (t - 0.5) * 2.0)
    }
}

fn spectrum_color(t: f32) -> Color32 {
    let channel = |phase: f32| (255.0 * (0.5 + 0.5 * (TAU * (t + phase)).sin())).round() as u8;
    Color32::from_rgb(
        channel(SPECTRUM_PHASES[0]),
        channel(SPECTRUM_PHASES[1]),
        channel(SPECTRUM_PHASES[2]),
    )
}

/// Color for a node at `depth` in a tree whose deepest node is `max_depth`.
pub fn depth_to_color(depth: usize, max_depth: usize, palette: DepthPalette) -> Color32 {
    if max_depth == 0 {
        return DEFAULT_NODE_COLOR;
    }

    let t = (depth as f32 / max_depth as f32).clamp(0.0, 1.0);
    match palette {
        DepthPalette::Gradient => gradient_color(t),
        DepthPalette::Spectrum => spectrum_color(t),
    }
}

/// Like [`depth_to_color`] but nudges the spectrum phase by a small random
/// offset so repeated frames shimmer.
pub fn shimmering_depth_color(
    depth: usize,
    max_depth: usize,
    palette: DepthPalette,
    rng: &mut impl Rng,
) -> Color32 {
    if max_depth == 0 || palette != DepthPalette::Spectrum {
        return depth_to_color(depth, max_depth, palette);
    }

    let t = depth as f32 / max_depth as f32;
    spectrum_color(t + rng.gen_range(-SHIMMER_AMPLITUDE..=SHIMMER_AMPLITUDE))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn zero_max_depth_uses_default_color() {
        for palette in [DepthPalette::Gradient, DepthPalette::Spectrum] {
            assert_eq!(depth_to_color(0, 0, palette), DEFAULT_NODE_COLOR);
        }
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            shimmering_depth_color(0, 0, DepthPalette::Spectrum, &mut rng),
            DEFAULT_NODE_COLOR
        );
    }

    #[test]
    fn gradient_runs_blue_to_purple_to_red() {
        assert_eq!(
            depth_to_color(0, 4, DepthPalette::Gradient),
            Color32::from_rgb(59, 130, 246)
        );
        assert_eq!(
            depth_to_color(2, 4, DepthPalette::Gradient),
            Color32::from_rgb(139, 92, 246)
        );
        assert_eq!(
            depth_to_color(4, 4, DepthPalette::Gradient),
            Color32::from_rgb(239, 68, 68)
        );
    }

    #[test]
    fn spectrum_channels_are_phase_shifted() {
        // t = 0: sin(0), sin(π/2), sin(π) lands a hair below zero
        assert_eq!(
            depth_to_color(0, 3, DepthPalette::Spectrum),
            Color32::from_rgb(128, 255, 127)
        );
    }

    #[test]
    fn depth_past_max_is_clamped() {
        assert_eq!(
            depth_to_color(9, 4, DepthPalette::Gradient),
            depth_to_color(4, 4, DepthPalette::Gradient)
        );
    }

    #[test]
    fn shimmer_stays_near_base_color() {
        let mut rng = StdRng::seed_from_u64(21);
        let base = depth_to_color(1, 4, DepthPalette::Spectrum);
        for _ in 0..50 {
            let shimmer = shimmering_depth_color(1, 4, DepthPalette::Spectrum, &mut rng);
            assert!((i32::from(shimmer.r()) - i32::from(base.r())).abs() <= 17);
            assert!((i32::from(shimmer.g()) - i32::from(base.g())).abs() <= 17);
            assert!((i32::from(shimmer.b()) - i32::from(base.b())).abs() <= 17);
        }
    }
}
