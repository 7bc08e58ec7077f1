use eframe::egui::{Pos2, Rect, Vec2, pos2, vec2};

use crate::layout::{LAYOUT_CENTER, LayoutBounds, Placement};

const MIN_ZOOM: f32 = 0.05;
const MAX_ZOOM: f32 = 20.0;
/// Fraction of the focal length the perspective divisor may shrink to.
const MIN_DEPTH_FRACTION: f32 = 0.05;

/// Pan offset in pixels plus a zoom divisor; smaller `z` shows a smaller
/// slice of the layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 1.0,
        }
    }
}

impl Camera {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Drags the poster along with the pointer.
    pub fn pan_by(&mut self, drag: Vec2) {
        self.x -= drag.x;
        self.y -= drag.y;
    }

    /// Changes zoom while keeping the point under `anchor` (relative to the
    /// canvas origin) fixed on screen.
    pub fn zoom_about(&mut self, anchor: Vec2, canvas: Vec2, factor: f32) {
        if factor <= 0.0 || canvas.x <= 0.0 || canvas.y <= 0.0 {
            return;
        }

        let next_z = (self.z / factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let u = (anchor.x + self.x) * self.z / canvas.x;
        let v = (anchor.y + self.y) * self.z / canvas.y;
        self.x = u * canvas.x / next_z - anchor.x;
        self.y = v * canvas.y / next_z - anchor.y;
        self.z = next_z;
    }
}

pub fn perspective_scale(z: f32, focal_length: f32) -> f32 {
    if focal_length <= 0.0 {
        return 1.0;
    }
    focal_length / (focal_length + z).max(focal_length * MIN_DEPTH_FRACTION)
}

/// Foreshortens a layout disc toward the layout center.
pub fn perspective(position: Vec2, z: f32, radius: f32, focal_length: f32) -> (Vec2, f32) {
    let scale = perspective_scale(z, focal_length);
    (
        LAYOUT_CENTER + (position - LAYOUT_CENTER) * scale,
        radius * scale,
    )
}

/// Turns `(x, z)` about the vertical axis through `pivot_x`.
pub fn rotate_about_vertical(position: Vec2, z: f32, angle: f32, pivot_x: f32) -> (Vec2, f32) {
    if angle == 0.0 {
        return (position, z);
    }

    let (sin, cos) = angle.sin_cos();
    let dx = position.x - pivot_x;
    (
        vec2(pivot_x + dx * cos - z * sin, position.y),
        dx * sin + z * cos,
    )
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedNode {
    pub screen: Pos2,
    pub radius: f32,
    /// View depth after rotation; larger is farther away.
    pub depth: f32,
    /// False once rotation carries the node behind the camera plane.
    pub in_front: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct Projector {
    pub rect: Rect,
    pub camera: Camera,
    pub bounds: LayoutBounds,
    pub focal_length: f32,
    pub rotation: f32,
}

impl Projector {
    fn scale(&self) -> Vec2 {
        let zoom = self.camera.z.max(MIN_ZOOM);
        vec2(
            self.rect.width() / zoom / self.bounds.width().max(f32::EPSILON),
            self.rect.height() / zoom / self.bounds.height().max(f32::EPSILON),
        )
    }

    pub fn world_to_screen(&self, world: Vec2) -> Pos2 {
        let scale = self.scale();
        pos2(
            self.rect.left() - self.camera.x + (world.x - self.bounds.x_min) * scale.x,
            self.rect.top() - self.camera.y + (world.y - self.bounds.y_min) * scale.y,
        )
    }

    pub fn screen_to_world(&self, screen: Pos2) -> Vec2 {
        let scale = self.scale();
        vec2(
            self.bounds.x_min + (screen.x - self.rect.left() + self.camera.x) / scale.x,
            self.bounds.y_min + (screen.y - self.rect.top() + self.camera.y) / scale.y,
        )
    }

    /// Pixels per layout unit for disc radii; the tighter axis wins so
    /// discs never spill past their cell.
    pub fn radius_scale(&self) -> f32 {
        let scale = self.scale();
        scale.x.min(scale.y)
    }

    pub fn project(&self, placement: &Placement) -> ProjectedNode {
        let (rotated, depth) = rotate_about_vertical(
            placement.position,
            placement.z,
            self.rotation,
            self.bounds.center_x(),
        );
        let (position, radius) = perspective(rotated, depth, placement.radius, self.focal_length);
        ProjectedNode {
            screen: self.world_to_screen(position),
            radius: radius * self.radius_scale(),
            depth,
            in_front: self.focal_length <= 0.0 || self.focal_length + depth > 0.0,
        }
    }

    pub fn project_all(&self, placements: &[Placement], out: &mut Vec<ProjectedNode>) {
        out.clear();
        out.extend(placements.iter().map(|placement| self.project(placement)));
    }
}
