mod bounds;
mod orbital;
mod radial;
mod scatter;
mod tiled;

use std::ops::RangeInclusive;

use clap::ValueEnum;
use eframe::egui::{Vec2, vec2};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;

use crate::tree::DirectoryTree;

pub use bounds::LayoutBounds;

/// Center of the normalized layout space used by the polar strategies.
pub const LAYOUT_CENTER: Vec2 = vec2(0.5, 0.5);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LayoutStrategy {
    #[default]
    Tiled,
    Radial,
    Orbital,
    Scatter,
}

impl LayoutStrategy {
    pub const ALL: [Self; 4] = [Self::Tiled, Self::Radial, Self::Orbital, Self::Scatter];

    pub fn label(self) -> &'static str {
        match self {
            Self::Tiled => "Tiled",
            Self::Radial => "Radial",
            Self::Orbital => "Orbital 3D",
            Self::Scatter => "Scatter 3D",
        }
    }

    /// Layouts with real depth; only these spin when rotation is on.
    pub fn is_three_dimensional(self) -> bool {
        matches!(self, Self::Orbital | Self::Scatter)
    }
}

pub const BASE_RADIUS_RANGE: RangeInclusive<f32> = 0.002..=0.1;
pub const RADIUS_SCALE_RANGE: RangeInclusive<f32> = 0.3..=1.0;
pub const MIN_SPACING_RANGE: RangeInclusive<f32> = 0.002..=0.1;
pub const MAX_RADIUS_RANGE: RangeInclusive<f32> = 0.1..=1.0;
pub const PADDING_RANGE: RangeInclusive<f32> = 0.0..=0.05;
pub const Z_STEP_RANGE: RangeInclusive<f32> = 0.0..=0.5;
pub const DISTANCE_SCALE_RANGE: RangeInclusive<f32> = 1.0..=4.0;
pub const FOCAL_LENGTH_RANGE: RangeInclusive<f32> = 0.5..=10.0;
pub const MARGIN_RANGE: RangeInclusive<f32> = 0.0..=0.2;

fn clamp_to(value: f32, range: RangeInclusive<f32>) -> f32 {
    value.clamp(*range.start(), *range.end())
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutParams {
    pub base_radius: f32,
    pub radius_scale: f32,
    pub min_spacing: f32,
    pub max_radius: f32,
    pub shrink_with_depth: bool,
    pub padding: f32,
    pub z_step: f32,
    pub distance_scale: f32,
    pub focal_length: f32,
    pub margin: f32,
    pub seed: Option<u64>,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            base_radius: 0.02,
            radius_scale: 0.66,
            min_spacing: 0.02,
            max_radius: 0.45,
            shrink_with_depth: false,
            padding: 0.01,
            z_step: 0.15,
            distance_scale: 1.6,
            focal_length: 2.0,
            margin: 0.05,
            seed: None,
        }
    }
}

impl LayoutParams {
    /// Pulls every numeric knob into the range the controls panel offers.
    pub fn clamped(self) -> Self {
        Self {
            base_radius: clamp_to(self.base_radius, BASE_RADIUS_RANGE),
            radius_scale: clamp_to(self.radius_scale, RADIUS_SCALE_RANGE),
            min_spacing: clamp_to(self.min_spacing, MIN_SPACING_RANGE),
            max_radius: clamp_to(self.max_radius, MAX_RADIUS_RANGE),
            padding: clamp_to(self.padding, PADDING_RANGE),
            z_step: clamp_to(self.z_step, Z_STEP_RANGE),
            distance_scale: clamp_to(self.distance_scale, DISTANCE_SCALE_RANGE),
            focal_length: clamp_to(self.focal_length, FOCAL_LENGTH_RANGE),
            margin: clamp_to(self.margin, MARGIN_RANGE),
            ..self
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Placement {
    pub position: Vec2,
    pub z: f32,
    pub radius: f32,
    pub angle: f32,
    pub leaf_count: usize,
}

/// A laid out tree, ready to be projected every frame.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub tree: DirectoryTree,
    pub placements: Vec<Placement>,
    pub bounds: LayoutBounds,
    pub strategy: LayoutStrategy,
    pub focal_length: f32,
    pub max_depth: usize,
}

impl Scene {
    pub fn node_count(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Places every node of `tree` with the chosen strategy and measures the
/// result. An empty tree yields an empty scene with default bounds.
pub fn layout(tree: DirectoryTree, strategy: LayoutStrategy, params: &LayoutParams) -> Scene {
    let max_depth = tree.max_depth();
    if tree.is_empty() {
        return Scene {
            tree,
            strategy,
            focal_length: params.focal_length,
            max_depth,
            ..Scene::default()
        };
    }

    let leaf_counts = tree.leaf_counts();
    let mut placements = match strategy {
        LayoutStrategy::Tiled => tiled::place(&tree, params),
        LayoutStrategy::Radial => radial::place(&tree, params),
        LayoutStrategy::Orbital => orbital::place(&tree, &leaf_counts, params),
        LayoutStrategy::Scatter => {
            let mut rng = match params.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            scatter::place(&tree, params, &mut rng)
        }
    };

    for (placement, leaf_count) in placements.iter_mut().zip(leaf_counts) {
        placement.leaf_count = leaf_count;
    }

    let bounds = LayoutBounds::enclosing(&placements, params.focal_length, params.margin)
        .unwrap_or_default();
    log::debug!(
        "{} layout of {} nodes spans x {:.3}..{:.3}, y {:.3}..{:.3}",
        strategy.label(),
        placements.len(),
        bounds.x_min,
        bounds.x_max,
        bounds.y_min,
        bounds.y_max
    );

    Scene {
        tree,
        placements,
        bounds,
        strategy,
        focal_length: params.focal_length,
        max_depth,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use serde_json::json;

    use super::*;
    use crate::projection::perspective;
    use crate::tree::{TreeLimits, build_tree};

    fn sample_tree() -> DirectoryTree {
        build_tree(
            &json!({
                "src": {
                    "main.rs": null,
                    "app": {"mod.rs": null, "view.rs": null, "ui": {"panels.rs": null}},
                    "tree": {"build.rs": null},
                },
                "Cargo.toml": null,
                "docs": {"guide.md": null, "empty": {}},
            }),
            TreeLimits::default(),
        )
    }

    fn seeded_params() -> LayoutParams {
        LayoutParams {
            seed: Some(7),
            ..LayoutParams::default()
        }
    }

    #[test]
    fn every_strategy_places_every_node_inside_bounds() {
        for strategy in LayoutStrategy::ALL {
            let tree = sample_tree();
            let node_count = tree.node_count();
            let params = seeded_params();
            let scene = layout(tree, strategy, &params);

            assert_eq!(scene.node_count(), node_count, "{strategy:?}");
            let ids = scene
                .tree
                .nodes
                .iter()
                .map(|node| node.id.as_str())
                .collect::<HashSet<_>>();
            assert_eq!(ids.len(), node_count);

            for placement in &scene.placements {
                let (position, radius) = perspective(
                    placement.position,
                    placement.z,
                    placement.radius,
                    params.focal_length,
                );
                assert!(position.x.is_finite() && position.y.is_finite(), "{strategy:?}");
                assert!(radius > 0.0, "{strategy:?}");
                assert!(position.x - radius >= scene.bounds.x_min, "{strategy:?}");
                assert!(position.x + radius <= scene.bounds.x_max, "{strategy:?}");
                assert!(position.y - radius >= scene.bounds.y_min, "{strategy:?}");
                assert!(position.y + radius <= scene.bounds.y_max, "{strategy:?}");
            }
        }
    }

    #[test]
    fn deterministic_strategies_repeat_exactly() {
        for strategy in [
            LayoutStrategy::Tiled,
            LayoutStrategy::Radial,
            LayoutStrategy::Orbital,
        ] {
            let first = layout(sample_tree(), strategy, &LayoutParams::default());
            let second = layout(sample_tree(), strategy, &LayoutParams::default());
            assert_eq!(first.placements, second.placements, "{strategy:?}");
            assert_eq!(first.bounds, second.bounds, "{strategy:?}");
        }
    }

    #[test]
    fn unseeded_scatter_keeps_node_count() {
        let first = layout(sample_tree(), LayoutStrategy::Scatter, &LayoutParams::default());
        let second = layout(sample_tree(), LayoutStrategy::Scatter, &LayoutParams::default());
        assert_eq!(first.node_count(), second.node_count());
    }

    #[test]
    fn clamped_params_stay_in_control_ranges() {
        let wild = LayoutParams {
            base_radius: -1.0,
            radius_scale: 7.0,
            min_spacing: 0.0,
            focal_length: -3.0,
            margin: 5.0,
            seed: Some(9),
            ..LayoutParams::default()
        }
        .clamped();

        assert_eq!(wild.base_radius, 0.002);
        assert_eq!(wild.radius_scale, 1.0);
        assert_eq!(wild.min_spacing, 0.002);
        assert_eq!(wild.focal_length, 0.5);
        assert_eq!(wild.margin, 0.2);
        assert_eq!(wild.seed, Some(9));
        assert_eq!(LayoutParams::default().clamped(), LayoutParams::default());
    }

    #[test]
    fn only_depth_layouts_rotate() {
        let spinning = LayoutStrategy::ALL
            .into_iter()
            .filter(|strategy| strategy.is_three_dimensional())
            .collect::<Vec<_>>();
        assert_eq!(spinning, vec![LayoutStrategy::Orbital, LayoutStrategy::Scatter]);
    }

    #[test]
    fn empty_tree_gives_empty_scene() {
        for strategy in LayoutStrategy::ALL {
            let scene = layout(DirectoryTree::default(), strategy, &LayoutParams::default());
            assert!(scene.is_empty());
            assert_eq!(scene.bounds, LayoutBounds::default());
        }
    }

    #[test]
    fn single_node_has_no_degenerate_geometry() {
        for strategy in LayoutStrategy::ALL {
            let tree = build_tree(&json!({"lonely.txt": null}), TreeLimits::default());
            let scene = layout(tree, strategy, &seeded_params());
            let placement = scene.placements[0];

            assert!(placement.position.x.is_finite() && placement.position.y.is_finite());
            assert!(placement.radius.is_finite() && placement.radius > 0.0);
            assert!(scene.bounds.width() > 0.0 && scene.bounds.height() > 0.0);
            assert_eq!(placement.leaf_count, 1);
        }
    }
}
