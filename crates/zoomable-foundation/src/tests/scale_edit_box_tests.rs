use zoomable_geometry::{Point, Rect};

use super::{assert_close, TouchScript};
use crate::config::HandleBoxConfig;
use crate::scale_edit_box::{ScaleEditBox, TouchRegion};

fn edit_box() -> ScaleEditBox {
    ScaleEditBox::new(Rect::new(100.0, 100.0, 200.0, 200.0), HandleBoxConfig::default())
}

fn ltrb(rect: Rect) -> (f32, f32, f32, f32) {
    (rect.left(), rect.top(), rect.right(), rect.bottom())
}

#[test]
fn default_config_derives_threshold_and_minimum() {
    let config = HandleBoxConfig::default();
    assert_eq!(config.touch_threshold_px(), 30.0);
    assert_eq!(config.min_dimension_px(), 78.0);

    let dense = config.with_density(2.0);
    assert_eq!(dense.touch_threshold_px(), 60.0);
    assert_eq!(dense.min_dimension_px(), 156.0);
}

#[test]
fn hit_test_prefers_corners_then_interior() {
    let edit_box = edit_box();
    assert_eq!(edit_box.hit_test(Point::new(95.0, 95.0)), TouchRegion::TopLeft);
    assert_eq!(edit_box.hit_test(Point::new(310.0, 90.0)), TouchRegion::TopRight);
    assert_eq!(edit_box.hit_test(Point::new(110.0, 290.0)), TouchRegion::BottomLeft);
    assert_eq!(edit_box.hit_test(Point::new(300.0, 300.0)), TouchRegion::BottomRight);
    assert_eq!(edit_box.hit_test(Point::new(200.0, 200.0)), TouchRegion::Inside);
    assert_eq!(edit_box.hit_test(Point::new(400.0, 200.0)), TouchRegion::None);
    // Just outside the handle radius along one axis.
    assert_eq!(edit_box.hit_test(Point::new(130.0, 100.0)), TouchRegion::Inside);
}

#[test]
fn top_left_dragged_past_bottom_right_clamps_to_minimum() {
    let mut script = TouchScript::new();
    let mut edit_box = edit_box();

    assert!(edit_box
        .on_pointer_event(&script.frame(&[(1, 102.0, 103.0, true)]))
        .is_none());
    assert_eq!(edit_box.touch_region(), TouchRegion::TopLeft);

    let layer = edit_box
        .on_pointer_event(&script.frame(&[(1, 400.0, 400.0, true)]))
        .expect("box changed");

    let rect = edit_box.rect();
    assert_eq!(ltrb(rect), (222.0, 222.0, 300.0, 300.0));
    assert!(rect.width >= 78.0 && rect.height >= 78.0);

    assert_close(layer.scale_x, 0.39, 1e-5);
    assert_close(layer.scale_y, 0.39, 1e-5);
    // New center (261, 261) minus original center (200, 200).
    assert_close(layer.translation_x, 61.0, 1e-4);
    assert_close(layer.translation_y, 61.0, 1e-4);
}

#[test]
fn each_corner_keeps_its_opposite_fixed() {
    let mut edit_box = edit_box();
    edit_box.on_down(Point::new(300.0, 100.0));
    assert_eq!(edit_box.touch_region(), TouchRegion::TopRight);
    assert!(edit_box.on_move(Point::new(250.0, 150.0)));
    assert_eq!(ltrb(edit_box.rect()), (100.0, 150.0, 250.0, 300.0));
    edit_box.on_up();

    let mut edit_box = self::edit_box();
    edit_box.on_down(Point::new(100.0, 300.0));
    assert_eq!(edit_box.touch_region(), TouchRegion::BottomLeft);
    assert!(edit_box.on_move(Point::new(-50.0, 350.0)));
    assert_eq!(ltrb(edit_box.rect()), (-50.0, 100.0, 300.0, 350.0));

    let mut edit_box = self::edit_box();
    edit_box.on_down(Point::new(300.0, 300.0));
    assert!(edit_box.on_move(Point::new(350.0, 320.0)));
    assert_eq!(ltrb(edit_box.rect()), (100.0, 100.0, 350.0, 320.0));
    let layer = edit_box.layer();
    assert_close(layer.scale_x, 1.25, 1e-6);
    assert_close(layer.scale_y, 1.1, 1e-6);
    assert_close(layer.translation_x, 25.0, 1e-4);
    assert_close(layer.translation_y, 10.0, 1e-4);
}

#[test]
fn interior_drag_translates_at_the_applied_scale() {
    let mut edit_box = edit_box();
    edit_box.on_down(Point::new(200.0, 200.0));
    assert_eq!(edit_box.touch_region(), TouchRegion::Inside);
    assert!(edit_box.on_move(Point::new(210.0, 205.0)));
    assert_eq!(ltrb(edit_box.rect()), (110.0, 105.0, 310.0, 305.0));
    edit_box.on_up();

    // Double the width, then drag inside again: x moves twice as fast.
    edit_box.on_down(Point::new(310.0, 305.0));
    assert_eq!(edit_box.touch_region(), TouchRegion::BottomRight);
    edit_box.on_move(Point::new(510.0, 305.0));
    edit_box.on_up();

    edit_box.on_down(Point::new(300.0, 200.0));
    assert_eq!(edit_box.touch_region(), TouchRegion::Inside);
    edit_box.on_move(Point::new(310.0, 210.0));
    assert_eq!(ltrb(edit_box.rect()), (130.0, 115.0, 530.0, 315.0));
}

#[test]
fn release_rebaselines_and_clears_region() {
    let mut script = TouchScript::new();
    let mut edit_box = edit_box();

    edit_box.on_pointer_event(&script.frame(&[(1, 300.0, 300.0, true)]));
    edit_box.on_pointer_event(&script.frame(&[(1, 320.0, 330.0, true)]));
    edit_box.on_pointer_event(&script.frame(&[(1, 320.0, 330.0, false)]));

    assert_eq!(edit_box.touch_region(), TouchRegion::None);
    let handles = edit_box.handles();
    assert_eq!(handles.temp, handles.rect);
    assert_eq!(ltrb(handles.rect), (100.0, 100.0, 320.0, 330.0));
}

#[test]
fn touch_outside_changes_nothing() {
    let mut script = TouchScript::new();
    let mut edit_box = edit_box();

    edit_box.on_pointer_event(&script.frame(&[(1, 500.0, 500.0, true)]));
    assert_eq!(edit_box.touch_region(), TouchRegion::None);
    assert!(edit_box
        .on_pointer_event(&script.frame(&[(1, 520.0, 500.0, true)]))
        .is_none());
    assert_eq!(edit_box.rect(), Rect::new(100.0, 100.0, 200.0, 200.0));
}

#[test]
fn handle_follows_the_second_finger_after_hand_off() {
    let mut script = TouchScript::new();
    let mut edit_box = edit_box();

    edit_box.on_pointer_event(&script.frame(&[(1, 300.0, 300.0, true)]));
    assert_eq!(edit_box.touch_region(), TouchRegion::BottomRight);
    edit_box.on_pointer_event(&script.frame(&[(1, 310.0, 310.0, true)]));
    assert_eq!(ltrb(edit_box.rect()), (100.0, 100.0, 310.0, 310.0));

    // Second finger lands far from the handle, then the first one lifts.
    assert!(edit_box
        .on_pointer_event(&script.frame(&[(1, 310.0, 310.0, true), (2, 150.0, 150.0, true)]))
        .is_none());
    assert!(edit_box
        .on_pointer_event(&script.frame(&[(1, 310.0, 310.0, false), (2, 150.0, 150.0, true)]))
        .is_none());
    assert_eq!(ltrb(edit_box.rect()), (100.0, 100.0, 310.0, 310.0));

    edit_box
        .on_pointer_event(&script.frame(&[(2, 152.0, 150.0, true)]))
        .expect("box changed");
    assert_eq!(ltrb(edit_box.rect()), (100.0, 100.0, 312.0, 310.0));
}

#[test]
fn drag_by_accumulates_deltas_from_the_down() {
    let mut edit_box = edit_box();
    edit_box.on_down(Point::new(300.0, 300.0));

    assert!(edit_box.drag_by(Point::new(10.0, 0.0)));
    assert!(edit_box.drag_by(Point::new(5.0, 20.0)));
    assert_eq!(ltrb(edit_box.rect()), (100.0, 100.0, 315.0, 320.0));

    // An absolute move replaces the accumulated offset.
    assert!(edit_box.on_move(Point::new(301.0, 300.0)));
    assert_eq!(ltrb(edit_box.rect()), (100.0, 100.0, 301.0, 300.0));
}
