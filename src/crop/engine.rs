//! Crop selections live in the overlay's unscaled, unrotated local space,
//! centered on the box, in display orientation (flips not removed). The crop
//! converts them to storage pixels, extracts the block and recomputes the
//! transform so the kept pixels stay where they were on screen.

use crate::foundation::core::{Point, RasterImage, Size, Vec2};
use crate::foundation::math::rotate_vec;
use crate::geometry::hit::to_local;
use crate::transform::state::TransformState;

/// Two opposite corners of a crop selection, in crop space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CropSelection {
    pub start: Point,
    pub end: Point,
}

impl CropSelection {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Normalized `(x1, y1, x2, y2)` with `x1 <= x2` and `y1 <= y2`.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        (
            self.start.x.min(self.end.x),
            self.start.y.min(self.end.y),
            self.start.x.max(self.end.x),
            self.start.y.max(self.end.y),
        )
    }

    pub fn is_empty(&self) -> bool {
        let (x1, y1, x2, y2) = self.bounds();
        !(x2 - x1 > 0.0 && y2 - y1 > 0.0)
    }
}

/// Half-open storage pixel block `[x0, x1) x [y0, y1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl PixelRect {
    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }

    /// Block center relative to the raster center, in storage pixels.
    fn center_offset(&self, size: Size) -> Vec2 {
        Vec2::new(
            f64::from(self.x0 + self.x1) / 2.0 - size.width / 2.0,
            f64::from(self.y0 + self.y1) / 2.0 - size.height / 2.0,
        )
    }
}

/// New canonical raster and the transform that keeps it visually anchored.
#[derive(Clone, Debug, PartialEq)]
pub struct CropOutcome {
    pub raster: RasterImage,
    pub transform: TransformState,
    pub rect: PixelRect,
}

/// Background pointer to crop space: rotation removed, then scale divided out.
pub fn to_crop_space(pointer: Point, transform: &TransformState, size: Size) -> Point {
    (to_local(pointer, transform, size) / transform.scale).to_point()
}

/// Storage pixel block covered by `selection`, or `None` when it is empty
/// or misses the raster entirely.
pub fn selection_pixels(
    selection: &CropSelection,
    transform: &TransformState,
    size: Size,
) -> Option<PixelRect> {
    if selection.is_empty() {
        return None;
    }
    let (mut x1, mut y1, mut x2, mut y2) = selection.bounds();

    // Display space mirrors storage space under flips.
    if transform.flip_h {
        (x1, x2) = (-x2, -x1);
    }
    if transform.flip_v {
        (y1, y2) = (-y2, -y1);
    }

    let u1 = (x1 + size.width / 2.0).floor().max(0.0);
    let u2 = (x2 + size.width / 2.0).ceil().min(size.width);
    let v1 = (y1 + size.height / 2.0).floor().max(0.0);
    let v2 = (y2 + size.height / 2.0).ceil().min(size.height);
    if u2 - u1 <= 0.0 || v2 - v1 <= 0.0 {
        return None;
    }

    Some(PixelRect {
        x0: u1 as u32,
        y0: v1 as u32,
        x1: u2 as u32,
        y1: v2 as u32,
    })
}

/// Crop `overlay` to `selection`.
///
/// Returns `None` (nothing to change) for empty or off-raster selections.
#[tracing::instrument(skip(overlay), fields(width = overlay.width(), height = overlay.height()))]
pub fn perform_crop(
    selection: &CropSelection,
    transform: &TransformState,
    overlay: &RasterImage,
    background: Size,
) -> Option<CropOutcome> {
    let size = overlay.size();
    let rect = selection_pixels(selection, transform, size)?;
    let raster = overlay
        .sub_rect(rect.x0, rect.y0, rect.width(), rect.height())
        .ok()?;

    // Anchor on the kept block. Re-apply the flips so the shift follows the
    // block on screen, then scale and rotate into background space.
    let mut offset = rect.center_offset(size);
    if transform.flip_h {
        offset.x = -offset.x;
    }
    if transform.flip_v {
        offset.y = -offset.y;
    }
    let shift = rotate_vec(offset * transform.scale, transform.angle_degrees);
    let new_center = transform.center(size) + shift;

    let new_size = raster.size();
    let transform = transform
        .with_center(new_center, new_size)
        .clamped(new_size, background);

    tracing::debug!(?rect, "crop extracted");
    Some(CropOutcome {
        raster,
        transform,
        rect,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/crop/engine.rs"]
mod tests;
