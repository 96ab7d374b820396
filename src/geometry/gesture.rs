use crate::foundation::core::{Point, Size, Vec2};
use crate::foundation::math::rotate_vec;
use crate::transform::state::TransformState;

/// Drag update.
///
/// `anchor` is the pointer's local scaled offset from the box center taken at
/// pointer-down; keeping it fixed stops the box from jumping under the pointer.
pub fn drag(
    pointer: Point,
    anchor: Vec2,
    transform: &TransformState,
    size: Size,
    background: Size,
) -> TransformState {
    let center = pointer - rotate_vec(anchor, transform.angle_degrees);
    transform
        .with_center(center, size)
        .clamped(size, background)
}

/// Aspect-preserving corner resize about a fixed `center`.
///
/// The pointer's distance from the center (in unrotated axes) spans half the
/// requested box; the smaller of the two axis scales wins so the overlay never
/// exceeds the dragged rectangle.
pub fn resize(
    pointer: Point,
    center: Point,
    transform: &TransformState,
    size: Size,
    background: Size,
    min_scale: f64,
) -> TransformState {
    let local = rotate_vec(pointer - center, -transform.angle_degrees);
    let scale_x = 2.0 * local.x.abs() / size.width;
    let scale_y = 2.0 * local.y.abs() / size.height;
    let scale = bound_scale(scale_x.min(scale_y), size, background, min_scale);

    TransformState { scale, ..*transform }
        .with_center(center, size)
        .clamped(size, background)
}

/// Multiply the scale by `factor`, keeping the box center in place.
pub fn scale_about_center(
    factor: f64,
    transform: &TransformState,
    size: Size,
    background: Size,
    min_scale: f64,
) -> TransformState {
    let center = transform.center(size);
    let scale = bound_scale(transform.scale * factor, size, background, min_scale);
    TransformState { scale, ..*transform }
        .with_center(center, size)
        .clamped(size, background)
}

/// `[min_scale, fit]`; `min_scale` wins if the background is smaller than that.
fn bound_scale(scale: f64, size: Size, background: Size, min_scale: f64) -> f64 {
    scale
        .min(TransformState::max_scale(size, background))
        .max(min_scale)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/gesture.rs"]
mod tests;
