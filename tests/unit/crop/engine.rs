use super::*;

const BG: Size = Size::new(100.0, 100.0);

fn columns(width: u32, height: u32) -> RasterImage {
    // Each pixel's red channel encodes its column, green its row.
    let mut bytes = Vec::new();
    for y in 0..height {
        for x in 0..width {
            bytes.extend_from_slice(&[x as u8, y as u8, 0, 255]);
        }
    }
    RasterImage::new(width, height, bytes).unwrap()
}

fn at(x: f64, y: f64) -> TransformState {
    TransformState {
        x,
        y,
        ..TransformState::default()
    }
}

fn sel(x1: f64, y1: f64, x2: f64, y2: f64) -> CropSelection {
    CropSelection::new(Point::new(x1, y1), Point::new(x2, y2))
}

#[test]
fn full_box_selection_keeps_pixels_and_transform() {
    let img = columns(4, 2);
    let t = at(10.0, 10.0);
    let out = perform_crop(&sel(2.0, 1.0, -2.0, -1.0), &t, &img, BG).unwrap();
    assert_eq!(out.raster, img);
    assert_eq!(out.transform, t);
    assert_eq!(
        out.rect,
        PixelRect {
            x0: 0,
            y0: 0,
            x1: 4,
            y1: 2
        }
    );
}

#[test]
fn left_half_stays_where_it_was() {
    let img = columns(4, 2);
    let t = at(10.0, 10.0);
    let out = perform_crop(&sel(-2.0, -1.0, 0.0, 1.0), &t, &img, BG).unwrap();
    assert_eq!((out.raster.width(), out.raster.height()), (2, 2));
    assert_eq!(out.raster.pixel(1, 0), [1, 0, 0, 255]);
    assert_eq!((out.transform.x, out.transform.y), (10.0, 10.0));
}

#[test]
fn flipped_selection_maps_back_to_storage_columns() {
    let img = columns(4, 2);
    let t = TransformState {
        flip_h: true,
        ..at(10.0, 10.0)
    };
    // Left half on screen is the right half of the stored raster.
    let out = perform_crop(&sel(-2.0, -1.0, 0.0, 1.0), &t, &img, BG).unwrap();
    assert_eq!(out.rect.x0, 2);
    assert_eq!(out.raster.pixel(0, 0), [2, 0, 0, 255]);
    assert_eq!((out.transform.x, out.transform.y), (10.0, 10.0));
    assert!(out.transform.flip_h);
}

#[test]
fn rotated_and_scaled_crop_shifts_along_rotated_axis() {
    let img = columns(4, 2);
    let t = TransformState {
        scale: 2.0,
        ..at(10.0, 10.0)
    }
    .with_angle(90.0);
    let out = perform_crop(&sel(-2.0, -1.0, 0.0, 1.0), &t, &img, BG).unwrap();
    // Old center (14, 12); local left points up the screen after a quarter turn.
    let c = out.transform.center(out.raster.size());
    assert!((c.x - 14.0).abs() < 1e-9);
    assert!((c.y - 10.0).abs() < 1e-9);
}

#[test]
fn selection_past_the_edge_is_clipped() {
    let img = columns(4, 2);
    let rect = selection_pixels(&sel(-10.0, -10.0, 0.5, 10.0), &at(0.0, 0.0), img.size()).unwrap();
    assert_eq!(
        rect,
        PixelRect {
            x0: 0,
            y0: 0,
            x1: 3,
            y1: 2
        }
    );
}

#[test]
fn clipped_selection_anchors_on_kept_block() {
    // 100-wide raster centered at x = 150; the selection runs 20px past the
    // left edge, so only columns [0, 80) survive.
    let img = columns(100, 2);
    let t = at(100.0, 10.0);
    let out = perform_crop(
        &sel(-70.0, -1.0, 30.0, 1.0),
        &t,
        &img,
        Size::new(400.0, 100.0),
    )
    .unwrap();
    assert_eq!(out.raster.width(), 80);
    assert_eq!(out.raster.pixel(0, 0), [0, 0, 0, 255]);
    // Kept block center: 150 - 10 = 140, not the selection center 130.
    assert_eq!(out.transform.center(out.raster.size()).x, 140.0);
    assert_eq!((out.transform.x, out.transform.y), (100.0, 10.0));
}

#[test]
fn empty_or_disjoint_selection_aborts() {
    let img = columns(4, 2);
    let t = at(0.0, 0.0);
    assert!(perform_crop(&sel(0.5, 0.5, 0.5, 0.9), &t, &img, BG).is_none());
    assert!(perform_crop(&sel(10.0, 10.0, 20.0, 20.0), &t, &img, BG).is_none());
}

#[test]
fn crop_space_divides_out_scale() {
    let t = TransformState {
        scale: 2.0,
        ..at(0.0, 0.0)
    };
    let size = Size::new(4.0, 2.0); // scaled box 8x4, center (4, 2)
    assert_eq!(
        to_crop_space(Point::new(8.0, 4.0), &t, size),
        Point::new(2.0, 1.0)
    );
}
