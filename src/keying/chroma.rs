//! Chroma-key alpha extraction.
//!
//! Alpha is derived from the Chebyshev distance between a pixel's RGB and the
//! key color: fully transparent inside `tolerance`, fully opaque from
//! `tolerance + ramp_width` on, linear in between.

use rayon::prelude::*;

use crate::foundation::core::RasterImage;

/// Keying parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChromaKey {
    pub key: [u8; 3],
    pub tolerance: u8,
    pub ramp_width: u8,
}

impl Default for ChromaKey {
    fn default() -> Self {
        Self {
            key: [128, 128, 128],
            tolerance: 22,
            ramp_width: 2,
        }
    }
}

impl ChromaKey {
    /// Alpha for every possible channel distance `d` in `0..=255`.
    pub fn alpha_lut(&self) -> [u8; 256] {
        let tol = u32::from(self.tolerance);
        let ramp = u32::from(self.ramp_width);
        let mut lut = [0u8; 256];
        for (d, slot) in (0u32..).zip(lut.iter_mut()) {
            *slot = if d <= tol {
                0
            } else if d >= tol + ramp {
                255
            } else {
                // ramp > 0 here, otherwise one of the branches above matched.
                ((255 * (d - tol) + ramp / 2) / ramp) as u8
            };
        }
        lut
    }

    /// Max per-channel distance from the key color.
    #[inline]
    pub fn distance(&self, rgb: [u8; 3]) -> u8 {
        let [kr, kg, kb] = self.key;
        rgb[0]
            .abs_diff(kr)
            .max(rgb[1].abs_diff(kg))
            .max(rgb[2].abs_diff(kb))
    }

    /// Rewrite the alpha of every pixel from its distance to the key color.
    ///
    /// RGB passes through unchanged; any incoming alpha is replaced.
    #[tracing::instrument(skip(raster), fields(width = raster.width(), height = raster.height()))]
    pub fn extract(&self, raster: &RasterImage) -> RasterImage {
        let lut = self.alpha_lut();
        let mut out = raster.as_bytes().to_vec();
        out.par_chunks_exact_mut(4).for_each(|px| {
            px[3] = lut[usize::from(self.distance([px[0], px[1], px[2]]))];
        });
        raster.with_pixels(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/keying/chroma.rs"]
mod tests;
