//! Input model: mouse buttons, wheel deltas, and the gesture state machine.
//!
//! `InputState` is the active gesture tracked between pointer-down and
//! pointer-up. The button that started a gesture is encoded in the variant,
//! so there is no separate "active button" field to fall out of sync.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button. Paints cells.
    Primary,
    /// Right mouse button. Pans the grid.
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code. Buttons the engine doesn't use map to `None`.
    #[must_use]
    pub fn from_dom(code: i16) -> Option<Self> {
        match code {
            0 => Some(Self::Primary),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

impl WheelDelta {
    /// Zoom direction for this tick: `1.0` in (wheel up), `-1.0` out, `None` for
    /// purely horizontal scrolling.
    #[must_use]
    pub fn zoom_direction(self) -> Option<f64> {
        if self.dy < 0.0 {
            Some(1.0)
        } else if self.dy > 0.0 {
            Some(-1.0)
        } else {
            None
        }
    }
}

/// Gesture state between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Primary button held; moves paint the cell under the pointer.
    Painting,
    /// Secondary button held; moves drag the grid.
    Panning {
        /// Pointer position relative to the grid's top-left corner at pointer-down.
        anchor: Point,
    },
}

impl InputState {
    /// The button that started the current gesture, if any.
    #[must_use]
    pub fn active_button(&self) -> Option<Button> {
        match self {
            Self::Idle => None,
            Self::Painting => Some(Button::Primary),
            Self::Panning { .. } => Some(Button::Secondary),
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
