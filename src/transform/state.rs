use crate::foundation::core::{Affine, Point, Size, Vec2};
use crate::foundation::math::{clamp_axis, normalize_angle};

/// Placement of the overlay over the background.
///
/// `(x, y)` is the top-left of the scaled, unrotated box in background
/// pixels. Rotation and flips are applied about the box center.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransformState {
    pub x: f64,
    pub y: f64,
    pub scale: f64, // > 0
    pub angle_degrees: f64,
    pub flip_h: bool,
    pub flip_v: bool,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            angle_degrees: 0.0,
            flip_h: false,
            flip_v: false,
        }
    }
}

impl TransformState {
    /// Initial placement for a freshly loaded overlay: shrunk (never enlarged)
    /// to fit inside the background minus `margin` on each side, offset by
    /// `margin`, then clamped.
    pub fn fit(overlay: Size, background: Size, margin: f64, min_scale: f64) -> Self {
        let fit_w = (background.width - 2.0 * margin) / overlay.width;
        let fit_h = (background.height - 2.0 * margin) / overlay.height;
        let scale = fit_w.min(fit_h).min(1.0).max(min_scale);
        Self {
            x: margin,
            y: margin,
            scale,
            ..Self::default()
        }
        .clamped(overlay, background)
    }

    /// Scaled box extents for an overlay of intrinsic `size`.
    pub fn scaled_size(&self, size: Size) -> Size {
        Size::new(size.width * self.scale, size.height * self.scale)
    }

    pub fn center(&self, size: Size) -> Point {
        let s = self.scaled_size(size);
        Point::new(self.x + s.width / 2.0, self.y + s.height / 2.0)
    }

    /// Move the box so its center lands on `center`.
    pub fn with_center(self, center: Point, size: Size) -> Self {
        let s = self.scaled_size(size);
        Self {
            x: center.x - s.width / 2.0,
            y: center.y - s.height / 2.0,
            ..self
        }
    }

    /// Origin clamped so the scaled box lies within `background`, per axis.
    pub fn clamped(self, size: Size, background: Size) -> Self {
        let s = self.scaled_size(size);
        Self {
            x: clamp_axis(self.x, s.width, background.width),
            y: clamp_axis(self.y, s.height, background.height),
            ..self
        }
    }

    pub fn with_angle(self, degrees: f64) -> Self {
        Self {
            angle_degrees: normalize_angle(degrees),
            ..self
        }
    }

    /// Largest scale at which the unrotated box still fits the background.
    pub fn max_scale(size: Size, background: Size) -> f64 {
        (background.width / size.width).min(background.height / size.height)
    }

    /// Map overlay storage pixels (`[0,w] x [0,h]`) into background pixels.
    ///
    /// Order: center the raster, flip, scale, rotate, move to the box center.
    pub fn to_affine(&self, size: Size) -> Affine {
        let center = self.center(size);
        let sx = if self.flip_h { -self.scale } else { self.scale };
        let sy = if self.flip_v { -self.scale } else { self.scale };

        Affine::translate(center.to_vec2())
            * Affine::rotate(self.angle_degrees.to_radians())
            * Affine::scale_non_uniform(sx, sy)
            * Affine::translate(Vec2::new(-size.width / 2.0, -size.height / 2.0))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/state.rs"]
mod tests;
