use std::f32::consts::TAU;

use eframe::egui::vec2;

use crate::tree::DirectoryTree;

use super::{LAYOUT_CENTER, LayoutParams, Placement};

#[derive(Clone, Copy)]
struct Orbit {
    distance: f32,
    radius: f32,
}

struct Span {
    start: f32,
    width: f32,
}

/// Leaf-weighted radial placement with geometrically shrinking discs and a
/// fixed z offset per depth.
pub(super) fn place(
    tree: &DirectoryTree,
    leaf_counts: &[usize],
    params: &LayoutParams,
) -> Vec<Placement> {
    let mut placements = vec![Placement::default(); tree.node_count()];

    // A lone root sits at the center; a forest orbits an empty origin.
    let origin = (tree.roots.len() > 1).then_some(Orbit {
        distance: 0.0,
        radius: 0.0,
    });
    let total_leaves = tree
        .roots
        .iter()
        .map(|&root| leaf_counts[root])
        .sum::<usize>()
        .max(1);

    let mut start = 0.0f32;
    for &root in &tree.roots {
        let width = TAU * leaf_counts[root] as f32 / total_leaves as f32;
        place_subtree(
            tree,
            root,
            Span { start, width },
            origin,
            leaf_counts,
            params,
            &mut placements,
        );
        start += width;
    }

    placements
}

fn place_subtree(
    tree: &DirectoryTree,
    index: usize,
    span: Span,
    parent: Option<Orbit>,
    leaf_counts: &[usize],
    params: &LayoutParams,
    placements: &mut [Placement],
) {
    let node = &tree.nodes[index];
    let radius = match parent {
        Some(parent) if parent.radius > 0.0 => parent.radius * params.radius_scale,
        _ => params.base_radius,
    };
    let distance = match parent {
        Some(parent) => parent.distance + parent.radius + radius + params.padding,
        None => 0.0,
    };
    let angle = span.start + span.width * 0.5;

    placements[index] = Placement {
        position: LAYOUT_CENTER + vec2(angle.cos(), angle.sin()) * distance,
        z: node.depth as f32 * params.z_step,
        radius,
        angle,
        ..Placement::default()
    };

    let subtree_leaves = leaf_counts[index].max(1) as f32;
    let orbit = Orbit { distance, radius };
    let mut start = span.start;
    for &child in &node.children {
        let width = span.width * leaf_counts[child] as f32 / subtree_leaves;
        place_subtree(
            tree,
            child,
            Span { start, width },
            Some(orbit),
            leaf_counts,
            params,
            placements,
        );
        start += width;
    }
}
