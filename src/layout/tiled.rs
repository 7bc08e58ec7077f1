use eframe::egui::vec2;

use crate::tree::DirectoryTree;

use super::{LayoutParams, Placement};

const CROWDING_NODE_COUNT: f32 = 500.0;

struct TiledCursor {
    next_x: f32,
    spacing: f32,
}

pub(super) fn leaf_spacing(node_count: usize, min_spacing: f32) -> f32 {
    min_spacing * (node_count as f32 / CROWDING_NODE_COUNT).sqrt().max(1.0)
}

/// Depth rows top to bottom, leaves left to right, parents centered over
/// their children.
pub(super) fn place(tree: &DirectoryTree, params: &LayoutParams) -> Vec<Placement> {
    let spacing = leaf_spacing(tree.node_count(), params.min_spacing.max(f32::EPSILON));
    let mut cursor = TiledCursor {
        next_x: 0.0,
        spacing,
    };
    let mut xs = vec![0.0f32; tree.node_count()];

    for &root in &tree.roots {
        place_subtree(tree, root, &mut cursor, &mut xs);
    }
    separate_siblings(tree, &tree.roots, &mut cursor, &mut xs);

    let max_depth = tree.max_depth();
    let radius = params.base_radius.min(spacing * 0.45);
    tree.nodes
        .iter()
        .zip(xs)
        .map(|(node, x)| {
            let y = if max_depth == 0 {
                0.0
            } else {
                node.depth as f32 / max_depth as f32
            };
            Placement {
                position: vec2(x, y),
                radius,
                ..Placement::default()
            }
        })
        .collect()
}

fn place_subtree(tree: &DirectoryTree, index: usize, cursor: &mut TiledCursor, xs: &mut [f32]) {
    let children = &tree.nodes[index].children;
    let (Some(&first), Some(&last)) = (children.first(), children.last()) else {
        xs[index] = cursor.next_x;
        cursor.next_x += cursor.spacing;
        return;
    };

    for &child in children {
        place_subtree(tree, child, cursor, xs);
    }
    separate_siblings(tree, children, cursor, xs);

    xs[index] = (xs[first] + xs[last]) * 0.5;
}

/// Pushes each sibling subtree, and everything right of it, far enough
/// right to keep consecutive siblings at least one spacing apart.
fn separate_siblings(
    tree: &DirectoryTree,
    siblings: &[usize],
    cursor: &mut TiledCursor,
    xs: &mut [f32],
) {
    for pair_start in 0..siblings.len().saturating_sub(1) {
        let gap = xs[siblings[pair_start + 1]] - xs[siblings[pair_start]];
        let deficit = cursor.spacing - gap;
        if deficit <= cursor.spacing * 1e-4 {
            continue;
        }

        for &sibling in &siblings[pair_start + 1..] {
            shift_subtree(tree, sibling, deficit, xs);
        }
        cursor.next_x += deficit;
    }
}

fn shift_subtree(tree: &DirectoryTree, index: usize, delta: f32, xs: &mut [f32]) {
    xs[index] += delta;
    for &child in &tree.nodes[index].children {
        shift_subtree(tree, child, delta, xs);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::tree::{TreeLimits, build_tree};

    fn assert_siblings_spaced(tree: &DirectoryTree, siblings: &[usize], xs: &[f32], spacing: f32) {
        for pair in siblings.windows(2) {
            let gap = xs[pair[1]] - xs[pair[0]];
            assert!(gap >= spacing - 1e-4, "gap {gap} below spacing {spacing}");
        }
        for &sibling in siblings {
            assert_siblings_spaced(tree, &tree.nodes[sibling].children, xs, spacing);
        }
    }

    #[test]
    fn spacing_grows_only_for_large_trees() {
        assert_eq!(leaf_spacing(10, 0.02), 0.02);
        assert_eq!(leaf_spacing(500, 0.02), 0.02);
        assert!((leaf_spacing(2000, 0.02) - 0.04).abs() < 1e-6);
    }

    #[test]
    fn parents_center_over_children_and_rows_follow_depth() {
        let tree = build_tree(&json!({"a": {"b": null, "c": null}}), TreeLimits::default());
        let placements = place(&tree, &LayoutParams::default());

        assert!((placements[1].position.x - 0.0).abs() < 1e-6);
        assert!((placements[2].position.x - 0.02).abs() < 1e-6);
        assert!((placements[0].position.x - 0.01).abs() < 1e-6);
        assert_eq!(placements[0].position.y, 0.0);
        assert_eq!(placements[1].position.y, 1.0);
    }

    #[test]
    fn adjacent_siblings_keep_minimum_spacing() {
        let tree = build_tree(
            &json!({
                "a": {"b": {"c": null}, "d": null, "e": {"f": null, "g": {"h": null, "i": null}}},
                "j": null,
                "k": {"l": null},
            }),
            TreeLimits::default(),
        );
        let params = LayoutParams::default();
        let placements = place(&tree, &params);
        let xs = placements.iter().map(|placement| placement.position.x).collect::<Vec<_>>();

        assert_siblings_spaced(&tree, &tree.roots, &xs, params.min_spacing);
    }

    #[test]
    fn repair_shifts_crowded_subtrees_to_the_right() {
        let tree = build_tree(
            &json!({"a": {"b": null}, "c": {"d": null}, "e": null}),
            TreeLimits::default(),
        );
        let mut cursor = TiledCursor {
            next_x: 0.5,
            spacing: 0.1,
        };
        // a=0, a/b=1, c=2, c/d=3, e=4
        let mut xs = vec![0.0, 0.0, 0.02, 0.02, 0.3];

        separate_siblings(&tree, &tree.roots, &mut cursor, &mut xs);

        assert!((xs[2] - 0.1).abs() < 1e-6);
        assert!((xs[3] - 0.1).abs() < 1e-6);
        assert!((xs[4] - 0.38).abs() < 1e-6);
        assert!((cursor.next_x - 0.58).abs() < 1e-6);
    }

    #[test]
    fn spaced_siblings_are_not_moved() {
        let tree = build_tree(&json!({"a": null, "b": null}), TreeLimits::default());
        let mut cursor = TiledCursor {
            next_x: 0.4,
            spacing: 0.1,
        };
        let mut xs = vec![0.0, 0.3];

        separate_siblings(&tree, &tree.roots, &mut cursor, &mut xs);

        assert_eq!(xs, vec![0.0, 0.3]);
        assert_eq!(cursor.next_x, 0.4);
    }
}
