use std::f32::consts::TAU;

use eframe::egui::vec2;

use crate::tree::DirectoryTree;

use super::{LAYOUT_CENTER, LayoutParams, Placement};

/// Mean direction of a set of angles, `atan2(Σ sin, Σ cos)`.
///
/// Averaging on the unit circle keeps 350° and 10° from collapsing to 180°.
pub fn circular_mean(angles: impl IntoIterator<Item = f32>) -> f32 {
    let (sin_sum, cos_sum) = angles
        .into_iter()
        .fold((0.0f32, 0.0f32), |(sin_sum, cos_sum), angle| {
            (sin_sum + angle.sin(), cos_sum + angle.cos())
        });
    sin_sum.atan2(cos_sum)
}

pub(super) fn place(tree: &DirectoryTree, params: &LayoutParams) -> Vec<Placement> {
    let leaf_count = tree.total_leaf_count();
    let angle_step = if leaf_count == 0 {
        TAU
    } else {
        TAU / leaf_count as f32
    };

    let mut angles = vec![0.0f32; tree.node_count()];
    let mut next_leaf = 0usize;
    for &root in &tree.roots {
        assign_angles(tree, root, angle_step, &mut next_leaf, &mut angles);
    }

    let max_depth = tree.max_depth();
    let ring_step = if max_depth == 0 {
        0.0
    } else {
        params.max_radius / max_depth as f32
    };

    tree.nodes
        .iter()
        .zip(angles)
        .map(|(node, angle)| {
            let distance = node.depth as f32 * ring_step;
            let radius = if params.shrink_with_depth {
                params.base_radius * params.radius_scale.powi(node.depth as i32)
            } else {
                params.base_radius
            };
            Placement {
                position: LAYOUT_CENTER + vec2(angle.cos(), angle.sin()) * distance,
                radius,
                angle,
                ..Placement::default()
            }
        })
        .collect()
}

fn assign_angles(
    tree: &DirectoryTree,
    index: usize,
    angle_step: f32,
    next_leaf: &mut usize,
    angles: &mut [f32],
) {
    let children = &tree.nodes[index].children;
    if children.is_empty() {
        angles[index] = *next_leaf as f32 * angle_step;
        *next_leaf += 1;
        return;
    }

    for &child in children {
        assign_angles(tree, child, angle_step, next_leaf, angles);
    }
    angles[index] = circular_mean(children.iter().map(|&child| angles[child]));
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    use serde_json::json;

    use super::*;
    use crate::tree::{TreeLimits, build_tree};

    #[test]
    fn circular_mean_of_right_angle_pair() {
        assert!((circular_mean([0.0, FRAC_PI_2]) - FRAC_PI_4).abs() < 1e-6);
    }

    #[test]
    fn circular_mean_wraps_around_zero() {
        let mean = circular_mean([TAU - 0.2, 0.2]);
        assert!(mean.abs() < 1e-5);
    }

    #[test]
    fn parent_angle_is_mean_of_children() {
        // Four leaves land on 0, π/2, π and 3π/2; "a" owns the first two.
        let tree = build_tree(
            &json!({"a": {"b": null, "c": null}, "d": null, "e": null}),
            TreeLimits::default(),
        );
        let placements = place(&tree, &LayoutParams::default());

        assert!((placements[1].angle - 0.0).abs() < 1e-6);
        assert!((placements[2].angle - FRAC_PI_2).abs() < 1e-6);
        assert!((placements[3].angle - PI).abs() < 1e-6);
        assert!((placements[0].angle - FRAC_PI_4).abs() < 1e-6);
    }

    #[test]
    fn distance_grows_with_depth() {
        let tree = build_tree(&json!({"a": {"b": {"c": null}}}), TreeLimits::default());
        let params = LayoutParams::default();
        let placements = place(&tree, &params);

        let distances = placements
            .iter()
            .map(|placement| (placement.position - LAYOUT_CENTER).length())
            .collect::<Vec<_>>();
        assert!(distances[0].abs() < 1e-6);
        assert!((distances[1] - params.max_radius / 2.0).abs() < 1e-5);
        assert!((distances[2] - params.max_radius).abs() < 1e-5);
    }

    #[test]
    fn shrinking_radii_follow_scale() {
        let tree = build_tree(&json!({"a": {"b": null}}), TreeLimits::default());
        let params = LayoutParams {
            shrink_with_depth: true,
            ..LayoutParams::default()
        };
        let placements = place(&tree, &params);

        assert_eq!(placements[0].radius, params.base_radius);
        assert!((placements[1].radius - params.base_radius * params.radius_scale).abs() < 1e-6);
    }
}
