use crate::projection::perspective;

use super::Placement;

const MIN_SPAN: f32 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutBounds {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl Default for LayoutBounds {
    fn default() -> Self {
        Self {
            x_min: 0.0,
            x_max: 1.0,
            y_min: 0.0,
            y_max: 1.0,
        }
    }
}

impl LayoutBounds {
    /// Smallest box covering every projected disc, inflated on each axis by
    /// `margin` times that axis' span.
    pub fn enclosing(placements: &[Placement], focal_length: f32, margin: f32) -> Option<Self> {
        let mut discs = placements.iter().map(|placement| {
            perspective(
                placement.position,
                placement.z,
                placement.radius,
                focal_length,
            )
        });

        let (first, first_radius) = discs.next()?;
        let mut bounds = Self {
            x_min: first.x - first_radius,
            x_max: first.x + first_radius,
            y_min: first.y - first_radius,
            y_max: first.y + first_radius,
        };

        for (position, radius) in discs {
            bounds.x_min = bounds.x_min.min(position.x - radius);
            bounds.x_max = bounds.x_max.max(position.x + radius);
            bounds.y_min = bounds.y_min.min(position.y - radius);
            bounds.y_max = bounds.y_max.max(position.y + radius);
        }

        let margin = margin.max(0.0);
        let (x_min, x_max) = inflate(bounds.x_min, bounds.x_max, margin);
        let (y_min, y_max) = inflate(bounds.y_min, bounds.y_max, margin);
        Some(Self {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }

    pub fn center_x(&self) -> f32 {
        (self.x_min + self.x_max) * 0.5
    }
}

fn inflate(min: f32, max: f32, margin: f32) -> (f32, f32) {
    let span = max - min;
    if span < MIN_SPAN {
        let center = (min + max) * 0.5;
        let half = MIN_SPAN * 0.5 * (1.0 + margin);
        return (center - half, center + half);
    }

    let pad = span * margin;
    (min - pad, max + pad)
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;

    fn disc(x: f32, y: f32, radius: f32) -> Placement {
        Placement {
            position: vec2(x, y),
            radius,
            ..Placement::default()
        }
    }

    #[test]
    fn empty_input_has_no_bounds() {
        assert_eq!(LayoutBounds::enclosing(&[], 2.0, 0.05), None);
    }

    #[test]
    fn covers_discs_and_margin() {
        let bounds = LayoutBounds::enclosing(&[disc(0.0, 0.0, 0.1), disc(1.0, 2.0, 0.2)], 2.0, 0.1)
            .expect("non-empty");

        assert!((bounds.x_min - (-0.1 - 0.13)).abs() < 1e-5);
        assert!((bounds.x_max - (1.2 + 0.13)).abs() < 1e-5);
        assert!((bounds.y_min - (-0.1 - 0.23)).abs() < 1e-5);
        assert!((bounds.y_max - (2.2 + 0.23)).abs() < 1e-5);
    }

    #[test]
    fn degenerate_span_falls_back_to_minimum() {
        let bounds = LayoutBounds::enclosing(&[disc(0.3, 0.3, 0.0)], 2.0, 0.0).expect("non-empty");
        assert!((bounds.width() - MIN_SPAN).abs() < 1e-6);
        assert!((bounds.height() - MIN_SPAN).abs() < 1e-6);
        assert!(bounds.x_min < 0.3 && bounds.x_max > 0.3);
    }

    #[test]
    fn far_discs_shrink_under_perspective() {
        let mut near = disc(0.9, 0.5, 0.05);
        let mut far = near;
        far.z = 2.0;
        near.z = 0.0;

        let near_bounds = LayoutBounds::enclosing(&[near], 2.0, 0.0).expect("non-empty");
        let far_bounds = LayoutBounds::enclosing(&[far], 2.0, 0.0).expect("non-empty");
        assert!(far_bounds.width() < near_bounds.width());
        assert!(far_bounds.x_max < near_bounds.x_max);
    }
}
