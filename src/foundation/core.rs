use std::sync::Arc;

use crate::foundation::error::{KeystageError, KeystageResult};

pub use kurbo::{Affine, Point, Size, Vec2};

/// Straight-alpha RGBA8 pixel.
pub type Rgba8 = [u8; 4];

/// Immutable straight-alpha RGBA8 pixel buffer.
///
/// Clones share storage. Every operation that changes pixels (keying,
/// cropping, compositing) produces a new instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    rgba8: Arc<Vec<u8>>,
}

impl RasterImage {
    /// Wrap a tightly packed RGBA8 buffer of `width * height * 4` bytes.
    pub fn new(width: u32, height: u32, rgba8: Vec<u8>) -> KeystageResult<Self> {
        if width == 0 || height == 0 {
            return Err(KeystageError::validation(format!(
                "raster dimensions must be non-zero, got {width}x{height}"
            )));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| KeystageError::validation("raster buffer size overflow"))?;
        if rgba8.len() != expected {
            return Err(KeystageError::validation(format!(
                "raster buffer holds {} bytes, expected {expected} for {width}x{height}",
                rgba8.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8: Arc::new(rgba8),
        })
    }

    /// A raster where every pixel is `rgba`.
    pub fn filled(width: u32, height: u32, rgba: Rgba8) -> KeystageResult<Self> {
        let len = (width as usize).saturating_mul(height as usize);
        Self::new(width, height, rgba.repeat(len))
    }

    pub fn from_rgba_image(img: image::RgbaImage) -> KeystageResult<Self> {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }

    pub fn to_rgba_image(&self) -> image::RgbaImage {
        // Dimensions and length were validated on construction.
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            image::Rgba(self.pixel(x, y))
        })
    }

    /// A raster of the same dimensions holding `rgba8` instead.
    pub(crate) fn with_pixels(&self, rgba8: Vec<u8>) -> Self {
        debug_assert_eq!(rgba8.len(), self.rgba8.len());
        Self {
            width: self.width,
            height: self.height,
            rgba8: Arc::new(rgba8),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Intrinsic (unscaled) size in pixels.
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.rgba8.as_slice()
    }

    /// Pixel at `(x, y)`; callers keep coordinates in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.rgba8[idx..idx + 4];
        [px[0], px[1], px[2], px[3]]
    }

    /// True when both handles point at the same pixel storage.
    pub fn shares_storage(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.rgba8, &other.rgba8)
    }

    /// Copy the `[x, x+width) x [y, y+height)` block into a new raster.
    pub fn sub_rect(&self, x: u32, y: u32, width: u32, height: u32) -> KeystageResult<Self> {
        let x_end = x.checked_add(width);
        let y_end = y.checked_add(height);
        match (x_end, y_end) {
            (Some(xe), Some(ye)) if xe <= self.width && ye <= self.height => {}
            _ => {
                return Err(KeystageError::validation(format!(
                    "sub-rect {width}x{height}+{x}+{y} exceeds {}x{}",
                    self.width, self.height
                )));
            }
        }

        let src_stride = (self.width as usize) * 4;
        let row_len = (width as usize) * 4;
        let mut out = Vec::with_capacity(row_len * height as usize);
        for row in y..y + height {
            let start = (row as usize) * src_stride + (x as usize) * 4;
            out.extend_from_slice(&self.rgba8[start..start + row_len]);
        }
        Self::new(width, height, out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
