//! CPU compositing of the transformed overlay onto the background.

use rayon::prelude::*;

use crate::foundation::core::{Point, RasterImage, Rgba8};
use crate::transform::state::TransformState;

/// Premultiplied RGBA in `[0, 1]`.
pub type PremulRgbaF32 = [f32; 4];

/// Source-over of a premultiplied sample onto a straight-alpha pixel.
pub fn over(dst: Rgba8, src: PremulRgbaF32) -> Rgba8 {
    let sa = src[3].clamp(0.0, 1.0);
    if sa <= 0.0 {
        return dst;
    }
    let da = f32::from(dst[3]) / 255.0;
    let inv = 1.0 - sa;
    let out_a = sa + da * inv;
    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    for i in 0..3 {
        let dc = f32::from(dst[i]) / 255.0 * da;
        out[i] = to_u8((src[i] + dc * inv) / out_a);
    }
    out[3] = to_u8(out_a);
    out
}

/// Bilinear sample at continuous pixel coordinates (pixel centers on
/// integers); texels outside the raster are transparent.
pub fn sample_bilinear(img: &RasterImage, fx: f64, fy: f64) -> PremulRgbaF32 {
    let x0 = fx.floor();
    let y0 = fy.floor();
    let tx = (fx - x0) as f32;
    let ty = (fy - y0) as f32;

    let mut acc = [0f32; 4];
    for (dy, wy) in [(0.0, 1.0 - ty), (1.0, ty)] {
        for (dx, wx) in [(0.0, 1.0 - tx), (1.0, tx)] {
            let w = wx * wy;
            if w <= 0.0 {
                continue;
            }
            let px = x0 + dx;
            let py = y0 + dy;
            if px < 0.0 || py < 0.0 || px >= f64::from(img.width()) || py >= f64::from(img.height())
            {
                continue;
            }
            let p = img.pixel(px as u32, py as u32);
            let a = f32::from(p[3]) / 255.0;
            for c in 0..3 {
                acc[c] += f32::from(p[c]) / 255.0 * a * w;
            }
            acc[3] += a * w;
        }
    }
    acc
}

/// Background with the overlay drawn through `transform`.
#[tracing::instrument(skip_all, fields(
    bg_width = background.width(),
    bg_height = background.height(),
    scale = transform.scale,
    angle = transform.angle_degrees,
))]
pub fn composite(
    background: &RasterImage,
    overlay: &RasterImage,
    transform: &TransformState,
) -> RasterImage {
    let size = overlay.size();
    let forward = transform.to_affine(size);
    let inverse = forward.inverse();

    let corners = [
        Point::ZERO,
        Point::new(size.width, 0.0),
        Point::new(size.width, size.height),
        Point::new(0.0, size.height),
    ]
    .map(|p| forward * p);
    let min_x = corners.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let max_x = corners.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let min_y = corners.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_y = corners.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

    let bw = background.width() as usize;
    let bh = f64::from(background.height());
    let x_start = min_x.floor().max(0.0) as usize;
    let x_end = max_x.ceil().clamp(0.0, bw as f64) as usize;
    let y_start = min_y.floor().max(0.0) as usize;
    let y_end = max_y.ceil().clamp(0.0, bh) as usize;

    let mut out = background.as_bytes().to_vec();
    out.par_chunks_exact_mut(bw * 4)
        .enumerate()
        .filter(|(y, _)| (y_start..y_end).contains(y))
        .for_each(|(y, row)| {
            for x in x_start..x_end {
                let local = inverse * Point::new(x as f64 + 0.5, y as f64 + 0.5);
                let src = sample_bilinear(overlay, local.x - 0.5, local.y - 0.5);
                if src[3] <= 0.0 {
                    continue;
                }
                let i = x * 4;
                let dst = [row[i], row[i + 1], row[i + 2], row[i + 3]];
                row[i..i + 4].copy_from_slice(&over(dst, src));
            }
        });

    background.with_pixels(out)
}

fn to_u8(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
