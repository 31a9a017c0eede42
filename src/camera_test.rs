#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn layout(cam: &Camera, rows: usize, columns: usize) -> Layout {
    cam.layout(200.0, rows, columns, 1000.0, 800.0)
}

// --- Point / Rect ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn rect_contains_is_half_open() {
    let r = Rect { x: 10.0, y: 20.0, width: 5.0, height: 5.0 };
    assert!(r.contains(Point::new(10.0, 20.0)));
    assert!(r.contains(Point::new(14.9, 24.9)));
    assert!(!r.contains(Point::new(15.0, 22.0)));
    assert!(!r.contains(Point::new(12.0, 25.0)));
}

#[test]
fn rect_intersects_viewport() {
    let inside = Rect { x: 0.0, y: 0.0, width: 10.0, height: 10.0 };
    let left = Rect { x: -10.0, y: 0.0, width: 10.0, height: 10.0 };
    let partial = Rect { x: -5.0, y: -5.0, width: 10.0, height: 10.0 };
    let below = Rect { x: 0.0, y: 100.0, width: 10.0, height: 10.0 };
    assert!(inside.intersects_viewport(100.0, 100.0));
    assert!(!left.intersects_viewport(100.0, 100.0));
    assert!(partial.intersects_viewport(100.0, 100.0));
    assert!(!below.intersects_viewport(100.0, 100.0));
}

// --- floor_px ---

#[test]
fn floor_px_floors_negative_values() {
    assert_eq!(floor_px(2.7), 2.0);
    assert_eq!(floor_px(-0.5), -1.0);
    assert_eq!(floor_px(-3.0), -3.0);
}

#[test]
fn rect_inflate_grows_every_side() {
    let r = Rect { x: 10.0, y: 20.0, width: 30.0, height: 40.0 }.inflate(1.5);
    assert_eq!(r, Rect { x: 8.5, y: 18.5, width: 33.0, height: 43.0 });
    assert!(Rect { x: -20.0, y: 0.0, width: 20.0, height: 20.0 }.inflate(1.0).intersects_viewport(100.0, 100.0));
}

// --- Camera defaults ---

#[test]
fn camera_default_is_unscrolled_initial_zoom() {
    let cam = Camera::default();
    assert_eq!(cam.zoom, INITIAL_ZOOM);
    assert_eq!(cam.scroll_x, 0.0);
    assert_eq!(cam.scroll_y, 0.0);
}

// --- cell_size ---

#[test]
fn cell_size_floors_scaled_base() {
    assert_eq!(Camera::with_zoom(1.0).cell_size(200.0), 200.0);
    assert_eq!(Camera::with_zoom(0.5).cell_size(200.0), 100.0);
    assert_eq!(Camera::with_zoom(0.123).cell_size(200.0), 24.0);
    assert_eq!(Camera::with_zoom(0.05).cell_size(200.0), 10.0);
}

// --- layout ---

#[test]
fn layout_virtual_extents_follow_axis_convention() {
    let cam = Camera::with_zoom(0.1);
    let l = layout(&cam, 5, 8);
    assert_eq!(l.cell_size, 20.0);
    assert_eq!(l.virtual_width, 160.0);
    assert_eq!(l.virtual_height, 100.0);
}

#[test]
fn layout_centers_grid() {
    let cam = Camera::with_zoom(0.1);
    let l = layout(&cam, 5, 8);
    assert_eq!(l.centering_offset(), Point::new(420.0, 350.0));
}

#[test]
fn layout_offset_includes_scroll() {
    let cam = Camera { zoom: 0.1, scroll_x: 30.0, scroll_y: -40.0 };
    let l = layout(&cam, 5, 8);
    assert_eq!(l.centering_offset(), Point::new(450.0, 310.0));
}

#[test]
fn layout_offset_is_floored() {
    let cam = Camera { zoom: 0.1, scroll_x: 0.75, scroll_y: -0.25 };
    let l = cam.layout(200.0, 5, 5, 101.0, 101.0);
    // 50.5 - 50 + 0.75 = 1.25 -> 1; 50.5 - 50 - 0.25 = 0.25 -> 0
    assert_eq!(l.offset, Point::new(1.0, 0.0));
}

#[test]
fn layout_cell_rect_position() {
    let cam = Camera::with_zoom(0.1);
    let l = layout(&cam, 5, 8);
    let r = l.cell_rect(2, 3);
    assert_eq!(r, Rect { x: 480.0, y: 390.0, width: 20.0, height: 20.0 });
}

#[test]
fn layout_adjacent_cells_are_flush() {
    let cam = Camera { zoom: 0.37, scroll_x: -13.3, scroll_y: 7.9 };
    let l = layout(&cam, 6, 6);
    for row in 0..6 {
        for col in 0..5 {
            let a = l.cell_rect(row, col);
            let b = l.cell_rect(row, col + 1);
            assert!(approx_eq(a.x + a.width, b.x));
        }
    }
}

#[test]
fn layout_grid_rect_spans_all_cells() {
    let cam = Camera::with_zoom(0.2);
    let l = layout(&cam, 4, 7);
    let g = l.grid_rect();
    let last = l.cell_rect(3, 6);
    assert_eq!(g.x, l.offset.x);
    assert!(approx_eq(g.x + g.width, last.x + last.width));
    assert!(approx_eq(g.y + g.height, last.y + last.height));
}

// --- scroll ---

#[test]
fn scroll_limit_keeps_one_cell_visible() {
    let cam = Camera::with_zoom(0.1);
    let l = layout(&cam, 5, 8);
    let limit = l.scroll_limit();
    assert_eq!(limit, Point::new((1000.0 + 160.0) / 2.0 - 20.0, (800.0 + 100.0) / 2.0 - 20.0));

    let right = Camera { zoom: 0.1, scroll_x: limit.x, scroll_y: 0.0 };
    let r = layout(&right, 5, 8).cell_rect(0, 0);
    assert!(r.intersects_viewport(1000.0, 800.0));

    let left = Camera { zoom: 0.1, scroll_x: -limit.x, scroll_y: 0.0 };
    let r = layout(&left, 5, 8).cell_rect(0, 7);
    assert!(r.intersects_viewport(1000.0, 800.0));
}

#[test]
fn scroll_by_applies_delta_within_limit() {
    let mut cam = Camera::default();
    assert!(cam.scroll_by(15.0, -7.0, Point::new(100.0, 100.0)));
    assert_eq!((cam.scroll_x, cam.scroll_y), (15.0, -7.0));
}

#[test]
fn scroll_by_clamps_to_limit() {
    let mut cam = Camera::default();
    cam.scroll_by(500.0, -500.0, Point::new(100.0, 50.0));
    assert_eq!((cam.scroll_x, cam.scroll_y), (100.0, -50.0));
}

#[test]
fn scroll_by_at_limit_reports_no_change() {
    let mut cam = Camera { zoom: 1.0, scroll_x: 100.0, scroll_y: 0.0 };
    assert!(!cam.scroll_by(10.0, 0.0, Point::new(100.0, 0.0)));
}

#[test]
fn clamp_scroll_pulls_back_after_limit_shrinks() {
    let mut cam = Camera { zoom: 1.0, scroll_x: -300.0, scroll_y: 300.0 };
    cam.clamp_scroll(Point::new(120.0, 80.0));
    assert_eq!((cam.scroll_x, cam.scroll_y), (-120.0, 80.0));
}
