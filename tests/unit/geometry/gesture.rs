use super::*;
use crate::geometry::hit::to_local;

const BG: Size = Size::new(400.0, 300.0);
const SIZE: Size = Size::new(100.0, 50.0);

fn at(x: f64, y: f64) -> TransformState {
    TransformState {
        x,
        y,
        ..TransformState::default()
    }
}

#[test]
fn drag_keeps_anchor_offset_under_pointer() {
    // Box centered at (60, 55); pointer grabs it at (70, 60): anchor (10, 5).
    let t = at(10.0, 30.0);
    let anchor = to_local(Point::new(70.0, 60.0), &t, SIZE);
    assert_eq!(anchor, Vec2::new(10.0, 5.0));

    let moved = drag(Point::new(80.0, 70.0), anchor, &t, SIZE, BG);
    assert_eq!(moved.center(SIZE), Point::new(70.0, 65.0));
    assert_eq!((moved.x, moved.y), (20.0, 40.0));
}

#[test]
fn drag_without_motion_is_identity() {
    let t = at(33.0, 44.0).with_angle(37.0);
    let grab = Point::new(90.0, 60.0);
    let anchor = to_local(grab, &t, SIZE);
    let moved = drag(grab, anchor, &t, SIZE, BG);
    assert!((moved.x - t.x).abs() < 1e-9);
    assert!((moved.y - t.y).abs() < 1e-9);
}

#[test]
fn drag_clamps_into_background() {
    let t = at(10.0, 10.0);
    let anchor = Vec2::ZERO;
    let moved = drag(Point::new(-500.0, 1000.0), anchor, &t, SIZE, BG);
    assert_eq!((moved.x, moved.y), (0.0, 250.0));
}

#[test]
fn resize_preserves_aspect_ratio_for_any_pointer() {
    let t = at(150.0, 125.0).with_angle(30.0);
    let center = t.center(SIZE);
    let mut px = 0.0;
    while px < 400.0 {
        let mut py = 0.0;
        while py < 300.0 {
            let r = resize(Point::new(px, py), center, &t, SIZE, BG, 0.05);
            let s = r.scaled_size(SIZE);
            assert!((s.width / s.height - 2.0).abs() < 1e-9);
            assert!(r.scale >= 0.05 && r.scale <= 4.0);
            py += 17.0;
        }
        px += 23.0;
    }
}

#[test]
fn resize_picks_smaller_axis_and_keeps_center() {
    let t = at(150.0, 125.0);
    let center = t.center(SIZE); // (200, 150)
    // half extents requested: 80 x 60 -> scales 1.6 and 2.4
    let r = resize(Point::new(280.0, 210.0), center, &t, SIZE, BG, 0.05);
    assert_eq!(r.scale, 1.6);
    assert_eq!(r.center(SIZE), center);
}

#[test]
fn resize_clamps_scale_range() {
    let t = at(150.0, 125.0);
    let center = t.center(SIZE);
    let tiny = resize(center, center, &t, SIZE, BG, 0.05);
    assert_eq!(tiny.scale, 0.05);

    let huge = resize(Point::new(5000.0, 5000.0), center, &t, SIZE, BG, 0.05);
    assert_eq!(huge.scale, 4.0); // min(400/100, 300/50)
    assert_eq!((huge.x, huge.y), (0.0, 50.0));
}

#[test]
fn scale_about_center_bounds_and_anchors() {
    let t = at(150.0, 125.0);
    let half = scale_about_center(0.5, &t, SIZE, BG, 0.05);
    assert_eq!(half.scale, 0.5);
    assert_eq!(half.center(SIZE), t.center(SIZE));

    let capped = scale_about_center(100.0, &t, SIZE, BG, 0.05);
    assert_eq!(capped.scale, 4.0);
}
