use super::*;
use crate::assets::encode::encode_png;

#[test]
fn png_round_trip_is_lossless() {
    let src = RasterImage::new(
        2,
        1,
        vec![100u8, 50, 200, 128, 128, 128, 128, 0],
    )
    .unwrap();

    let bytes = encode_png(&src).unwrap();
    let back = decode_raster(&bytes).unwrap();
    assert_eq!(back, src);
}

#[test]
fn garbage_bytes_are_a_decode_error() {
    let err = decode_raster(b"not an image").unwrap_err();
    assert!(matches!(err, KeystageError::Decode(_)));
}

#[test]
fn image_decoder_resolves_to_raster() {
    let src = RasterImage::filled(3, 2, [1, 2, 3, 255]).unwrap();
    let bytes = encode_png(&src).unwrap();
    let decoded = pollster::block_on(ImageDecoder.decode(&bytes)).unwrap();
    assert_eq!(decoded, src);
}
