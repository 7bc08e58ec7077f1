use std::f32::consts::TAU;

use eframe::egui::vec2;
use rand::Rng;

use crate::tree::DirectoryTree;

use super::{LAYOUT_CENTER, LayoutParams, Placement};

/// Uniform point on the unit sphere as `(x, y, z)`.
///
/// The polar angle comes from `acos(1 - 2u)` so points do not bunch up at
/// the poles.
fn random_direction(rng: &mut impl Rng) -> (f32, f32, f32) {
    let polar = (1.0 - 2.0 * rng.gen_range(0.0f32..1.0)).clamp(-1.0, 1.0).acos();
    let azimuth = TAU * rng.gen_range(0.0f32..1.0);
    (
        polar.sin() * azimuth.cos(),
        polar.sin() * azimuth.sin(),
        polar.cos(),
    )
}

/// Drops every child somewhere on a sphere around its parent. Positions
/// change on every run unless the params carry a seed.
pub(super) fn place(
    tree: &DirectoryTree,
    params: &LayoutParams,
    rng: &mut impl Rng,
) -> Vec<Placement> {
    let mut placements: Vec<Placement> = Vec::with_capacity(tree.node_count());
    let lone_root = tree.roots.len() == 1;

    // Arena order visits every parent before its children.
    for node in &tree.nodes {
        let (origin, origin_z, parent_radius, radius) = match node.parent {
            Some(parent) => {
                let parent = placements[parent];
                (
                    parent.position,
                    parent.z,
                    parent.radius,
                    parent.radius * params.radius_scale,
                )
            }
            None if lone_root => {
                placements.push(Placement {
                    position: LAYOUT_CENTER,
                    radius: params.base_radius,
                    ..Placement::default()
                });
                continue;
            }
            None => (LAYOUT_CENTER, 0.0, params.base_radius, params.base_radius),
        };

        let (dx, dy, dz) = random_direction(rng);
        let distance = (parent_radius + radius) * params.distance_scale;
        placements.push(Placement {
            position: origin + vec2(dx, dy) * distance,
            z: origin_z + dz * distance,
            radius,
            ..Placement::default()
        });
    }

    placements
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::json;

    use super::*;
    use crate::tree::{TreeLimits, build_tree};

    #[test]
    fn directions_are_unit_length() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let (x, y, z) = random_direction(&mut rng);
            let length = (x * x + y * y + z * z).sqrt();
            assert!((length - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn directions_cover_both_hemispheres() {
        let mut rng = StdRng::seed_from_u64(5);
        let upper = (0..1000)
            .filter(|_| random_direction(&mut rng).2 > 0.0)
            .count();
        assert!((350..650).contains(&upper), "upper hemisphere hits: {upper}");
    }

    #[test]
    fn children_sit_on_sphere_around_parent() {
        let tree = build_tree(
            &json!({"root": {"a": {"b": null}, "c": null, "d": null}}),
            TreeLimits::default(),
        );
        let params = LayoutParams::default();
        let mut rng = StdRng::seed_from_u64(3);
        let placements = place(&tree, &params, &mut rng);

        assert_eq!(placements.len(), tree.node_count());
        assert_eq!(placements[0].position, LAYOUT_CENTER);
        for edge in &tree.edges {
            let parent = placements[edge.from];
            let child = placements[edge.to];
            let planar = child.position - parent.position;
            let dz = child.z - parent.z;
            let separation = (planar.length_sq() + dz * dz).sqrt();
            let expected = (parent.radius + child.radius) * params.distance_scale;
            assert!((separation - expected).abs() < 1e-4);
            assert!(child.position.x.is_finite() && child.z.is_finite());
        }
    }

    #[test]
    fn same_seed_repeats_positions() {
        let tree = build_tree(&json!({"a": {"b": null, "c": null}}), TreeLimits::default());
        let params = LayoutParams::default();
        let first = place(&tree, &params, &mut StdRng::seed_from_u64(9));
        let second = place(&tree, &params, &mut StdRng::seed_from_u64(9));
        assert_eq!(first, second);
    }
}
