use crate::foundation::core::Vec2;

/// Wrap an angle in degrees into `[-180, 180]`.
///
/// Values already in range are returned unchanged, so the function is
/// idempotent. `180` and `-180` are both kept as given.
pub fn normalize_angle(degrees: f64) -> f64 {
    let a = degrees % 360.0;
    if a > 180.0 {
        a - 360.0
    } else if a < -180.0 {
        a + 360.0
    } else {
        a
    }
}

/// Rotate `v` by `degrees`, clockwise-positive on a y-down raster.
pub fn rotate_vec(v: Vec2, degrees: f64) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Clamp a box origin on one axis into `[0, bound - extent]`.
///
/// When `extent > bound` the range is empty and the origin collapses to 0.
pub fn clamp_axis(origin: f64, extent: f64, bound: f64) -> f64 {
    origin.min(bound - extent).max(0.0)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
