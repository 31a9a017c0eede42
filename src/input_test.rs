#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Button
// =============================================================

#[test]
fn button_from_dom_primary_and_secondary() {
    assert_eq!(Button::from_dom(0), Some(Button::Primary));
    assert_eq!(Button::from_dom(2), Some(Button::Secondary));
}

#[test]
fn button_from_dom_ignores_other_buttons() {
    for code in [1, 3, 4, -1, 99] {
        assert_eq!(Button::from_dom(code), None, "code {code}");
    }
}

// =============================================================
// WheelDelta
// =============================================================

#[test]
fn wheel_up_zooms_in() {
    assert_eq!(WheelDelta { dx: 0.0, dy: -100.0 }.zoom_direction(), Some(1.0));
}

#[test]
fn wheel_down_zooms_out() {
    assert_eq!(WheelDelta { dx: 0.0, dy: 3.0 }.zoom_direction(), Some(-1.0));
}

#[test]
fn horizontal_only_wheel_does_not_zoom() {
    assert_eq!(WheelDelta { dx: 40.0, dy: 0.0 }.zoom_direction(), None);
}

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    let s = InputState::default();
    assert!(s.is_idle());
    assert_eq!(s.active_button(), None);
}

#[test]
fn painting_is_primary_gesture() {
    assert_eq!(InputState::Painting.active_button(), Some(Button::Primary));
    assert!(!InputState::Painting.is_idle());
}

#[test]
fn panning_is_secondary_gesture() {
    let s = InputState::Panning { anchor: Point::new(4.0, 5.0) };
    assert_eq!(s.active_button(), Some(Button::Secondary));
}
