use std::future::Future;

use anyhow::Context;

use crate::foundation::core::RasterImage;
use crate::foundation::error::{KeystageError, KeystageResult};

/// Decode encoded image bytes (PNG, JPEG) into a straight-alpha RGBA8 raster.
pub fn decode_raster(bytes: &[u8]) -> KeystageResult<RasterImage> {
    let dyn_img = image::load_from_memory(bytes)
        .context("decode image from memory")
        .map_err(|e| KeystageError::decode(format!("{e:#}")))?;
    RasterImage::from_rgba_image(dyn_img.to_rgba8())
}

/// Source of decoded rasters for the async load operations.
///
/// Decoding may suspend; the editor installs the result in one step once the
/// future resolves.
pub trait RasterDecoder {
    fn decode(&self, bytes: &[u8]) -> impl Future<Output = KeystageResult<RasterImage>>;
}

/// [`RasterDecoder`] backed by the `image` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageDecoder;

impl RasterDecoder for ImageDecoder {
    fn decode(&self, bytes: &[u8]) -> impl Future<Output = KeystageResult<RasterImage>> {
        let decoded = decode_raster(bytes);
        async move { decoded }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
