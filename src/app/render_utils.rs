use std::f32::consts::TAU;

use eframe::egui::{Color32, Mesh, Painter, Pos2, Rect, Stroke, Vec2, vec2};

use crate::projection::{Camera, ProjectedNode};

/// Offset of the specular highlight, as a fraction of the disc radius.
const LIGHT_OFFSET: Vec2 = vec2(-0.35, -0.4);

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn shade_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        color.a(),
    )
}

pub(super) fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, camera: Camera) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(14, 17, 24));

    let step = (64.0 / camera.z.clamp(0.5, 2.0)).max(20.0);
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 90, 50));

    let mut x = rect.left() + (-camera.x).rem_euclid(step);
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        x += step;
    }

    let mut y = rect.top() + (-camera.y).rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        y += step;
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

pub(super) fn edge_visible(rect: Rect, start: Pos2, end: Pos2, padding: f32) -> bool {
    let min_x = start.x.min(end.x) - padding;
    let max_x = start.x.max(end.x) + padding;
    let min_y = start.y.min(end.y) - padding;
    let max_y = start.y.max(end.y) + padding;

    if max_x < rect.left() || min_x > rect.right() || max_y < rect.top() || min_y > rect.bottom() {
        return false;
    }

    if rect.contains(start) || rect.contains(end) {
        return true;
    }

    let top_left = rect.left_top();
    let top_right = rect.right_top();
    let bottom_left = rect.left_bottom();
    let bottom_right = rect.right_bottom();

    segments_intersect(start, end, top_left, top_right)
        || segments_intersect(start, end, top_right, bottom_right)
        || segments_intersect(start, end, bottom_right, bottom_left)
        || segments_intersect(start, end, bottom_left, top_left)
}

fn segments_intersect(a1: Pos2, a2: Pos2, b1: Pos2, b2: Pos2) -> bool {
    fn cross(o: Pos2, a: Pos2, b: Pos2) -> f32 {
        let oa = a - o;
        let ob = b - o;
        (oa.x * ob.y) - (oa.y * ob.x)
    }

    let c1 = cross(a1, a2, b1);
    let c2 = cross(a1, a2, b2);
    let c3 = cross(b1, b2, a1);
    let c4 = cross(b1, b2, a2);

    (c1 <= 0.0 && c2 >= 0.0 || c1 >= 0.0 && c2 <= 0.0)
        && (c3 <= 0.0 && c4 >= 0.0 || c3 >= 0.0 && c4 <= 0.0)
}

/// Indices ordered farthest first so nearer discs paint over farther ones.
/// Equal depths keep arena order, parents before children.
pub(super) fn depth_sorted_into(projected: &[ProjectedNode], order: &mut Vec<usize>) {
    order.clear();
    order.extend(0..projected.len());
    order.sort_by(|&a, &b| projected[b].depth.total_cmp(&projected[a].depth));
}

/// Disc shaded like a lit sphere: a bright spot toward the light, the base
/// color through the body and a darker rim.
pub(super) fn sphere_mesh(center: Pos2, radius: f32, base: Color32) -> Mesh {
    let segments = ((radius * 0.75) as u32).clamp(12, 64);
    let highlight_center = center + LIGHT_OFFSET * radius;
    let highlight = blend_color(base, Color32::WHITE, 0.45);
    let rim = shade_color(base, 0.45);

    let mut mesh = Mesh::default();
    mesh.colored_vertex(highlight_center, highlight);
    for step in 0..=segments {
        let angle = TAU * step as f32 / segments as f32;
        let edge = center + vec2(angle.cos(), angle.sin()) * radius;
        mesh.colored_vertex(highlight_center + (edge - highlight_center) * 0.6, base);
        mesh.colored_vertex(edge, rim);
    }

    for step in 0..segments {
        let inner = 1 + step * 2;
        let outer = inner + 1;
        let next_inner = inner + 2;
        let next_outer = inner + 3;
        mesh.add_triangle(0, inner, next_inner);
        mesh.add_triangle(inner, outer, next_outer);
        mesh.add_triangle(inner, next_outer, next_inner);
    }

    mesh
}
