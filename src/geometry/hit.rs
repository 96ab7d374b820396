use crate::foundation::core::{Point, Size, Vec2};
use crate::foundation::math::rotate_vec;
use crate::transform::state::TransformState;

/// Box corner. Discriminants are the handle indices used for hit-testing
/// and handle rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    TopLeft = 0,
    TopRight = 1,
    BottomRight = 2,
    BottomLeft = 3,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Corner position in local scaled space for a `w x h` box centered on the origin.
    pub fn local_position(self, scaled: Size) -> Vec2 {
        let hw = scaled.width / 2.0;
        let hh = scaled.height / 2.0;
        match self {
            Corner::TopLeft => Vec2::new(-hw, -hh),
            Corner::TopRight => Vec2::new(hw, -hh),
            Corner::BottomRight => Vec2::new(hw, hh),
            Corner::BottomLeft => Vec2::new(-hw, hh),
        }
    }
}

/// What a pointer-down lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTarget {
    Handle(Corner),
    Body,
    Outside,
}

/// Pointer in local scaled space: relative to the box center with the
/// rotation removed. Scale and flips are left in place.
pub fn to_local(pointer: Point, transform: &TransformState, size: Size) -> Vec2 {
    let offset = pointer - transform.center(size);
    rotate_vec(offset, -transform.angle_degrees)
}

/// Inverse of [`to_local`].
pub fn from_local(local: Vec2, transform: &TransformState, size: Size) -> Point {
    transform.center(size) + rotate_vec(local, transform.angle_degrees)
}

/// Classify a local scaled point against a `scaled` box.
///
/// Handles are squares of fixed `handle_half_size` around each corner and
/// win over the body; corners are tested in index order.
pub fn classify(local: Vec2, scaled: Size, handle_half_size: f64) -> HitTarget {
    for corner in Corner::ALL {
        let c = corner.local_position(scaled);
        if (local.x - c.x).abs() <= handle_half_size && (local.y - c.y).abs() <= handle_half_size {
            return HitTarget::Handle(corner);
        }
    }
    if local.x.abs() <= scaled.width / 2.0 && local.y.abs() <= scaled.height / 2.0 {
        HitTarget::Body
    } else {
        HitTarget::Outside
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/hit.rs"]
mod tests;
