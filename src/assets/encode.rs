use std::io::Cursor;

use crate::foundation::core::RasterImage;
use crate::foundation::error::{KeystageError, KeystageResult};

/// Encode a raster as PNG bytes.
pub fn encode_png(raster: &RasterImage) -> KeystageResult<Vec<u8>> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(raster.to_rgba_image())
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| KeystageError::encode(format!("png: {e}")))?;
    Ok(buf)
}
