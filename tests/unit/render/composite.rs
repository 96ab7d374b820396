use super::*;

fn premul(px: Rgba8) -> PremulRgbaF32 {
    let a = f32::from(px[3]) / 255.0;
    [
        f32::from(px[0]) / 255.0 * a,
        f32::from(px[1]) / 255.0 * a,
        f32::from(px[2]) / 255.0 * a,
        a,
    ]
}

#[test]
fn over_transparent_src_is_noop() {
    let dst = [10, 20, 30, 255];
    assert_eq!(over(dst, premul([255, 255, 255, 0])), dst);
}

#[test]
fn over_opaque_src_replaces_dst() {
    let dst = [0, 0, 0, 255];
    assert_eq!(over(dst, premul([200, 10, 40, 255])), [200, 10, 40, 255]);
}

#[test]
fn over_half_alpha_blends_towards_src() {
    let out = over([0, 0, 0, 255], premul([255, 255, 255, 128]));
    assert_eq!(out[3], 255);
    assert!(out[0] > 120 && out[0] < 136);
}

#[test]
fn sample_on_pixel_center_is_exact() {
    let img = RasterImage::new(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 255]).unwrap();
    assert_eq!(sample_bilinear(&img, 1.0, 0.0), [0.0, 0.0, 1.0, 1.0]);
    let mid = sample_bilinear(&img, 0.5, 0.0);
    assert!((mid[0] - 0.5).abs() < 1e-6 && (mid[2] - 0.5).abs() < 1e-6);
    assert_eq!(sample_bilinear(&img, 5.0, 5.0), [0.0; 4]);
}

#[test]
fn unit_scale_composite_copies_overlay_pixels() {
    let bg = RasterImage::filled(8, 6, [0, 0, 0, 255]).unwrap();
    let overlay = RasterImage::new(
        2,
        2,
        vec![
            255, 0, 0, 255, 0, 255, 0, 255, //
            0, 0, 255, 255, 9, 9, 9, 0,
        ],
    )
    .unwrap();
    let t = TransformState {
        x: 3.0,
        y: 2.0,
        ..TransformState::default()
    };

    let out = composite(&bg, &overlay, &t);
    assert_eq!(out.pixel(3, 2), [255, 0, 0, 255]);
    assert_eq!(out.pixel(4, 2), [0, 255, 0, 255]);
    assert_eq!(out.pixel(3, 3), [0, 0, 255, 255]);
    // keyed-out texel leaves the background visible
    assert_eq!(out.pixel(4, 3), [0, 0, 0, 255]);
    assert_eq!(out.pixel(0, 0), [0, 0, 0, 255]);
    assert_eq!(out.pixel(5, 2), [0, 0, 0, 255]);
}

#[test]
fn horizontal_flip_mirrors_columns() {
    let bg = RasterImage::filled(4, 1, [0, 0, 0, 255]).unwrap();
    let overlay = RasterImage::new(2, 1, vec![255, 0, 0, 255, 0, 255, 0, 255]).unwrap();
    let t = TransformState {
        x: 1.0,
        flip_h: true,
        ..TransformState::default()
    };
    let out = composite(&bg, &overlay, &t);
    assert_eq!(out.pixel(1, 0), [0, 255, 0, 255]);
    assert_eq!(out.pixel(2, 0), [255, 0, 0, 255]);
}

#[test]
fn overlay_fully_outside_leaves_background() {
    let bg = RasterImage::filled(4, 4, [5, 6, 7, 255]).unwrap();
    let overlay = RasterImage::filled(2, 2, [255, 255, 255, 255]).unwrap();
    let t = TransformState {
        x: 40.0,
        y: 40.0,
        ..TransformState::default()
    };
    assert_eq!(composite(&bg, &overlay, &t), bg);
}
