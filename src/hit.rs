//! Coordinate mapper: which cell lies under a screen point.
//!
//! Screen points are page coordinates (e.g. `MouseEvent.clientX/Y`). They are
//! made canvas-local by subtracting the canvas origin, then grid-local by
//! subtracting the layout's centering offset.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Layout, Point};

/// Logical grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellCoord {
    pub row: usize,
    pub col: usize,
}

impl CellCoord {
    #[must_use]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Position of `screen` relative to the grid's top-left corner.
#[must_use]
pub fn grid_local(layout: &Layout, origin: Point, screen: Point) -> Point {
    let offset = layout.centering_offset();
    Point::new(screen.x - origin.x - offset.x, screen.y - origin.y - offset.y)
}

/// Whether `screen` falls on the virtual grid: `[0, vw] × [0, vh]` in grid-local space.
#[must_use]
pub fn in_virtual_bounds(layout: &Layout, origin: Point, screen: Point) -> bool {
    let local = grid_local(layout, origin, screen);
    (0.0..=layout.virtual_width).contains(&local.x) && (0.0..=layout.virtual_height).contains(&local.y)
}

/// Map a screen point to the cell under it, clamped into the grid.
///
/// Points off the grid resolve to the nearest edge cell. Callers that must
/// ignore such points check [`in_virtual_bounds`] first.
#[must_use]
pub fn screen_to_logical(layout: &Layout, origin: Point, screen: Point) -> CellCoord {
    let local = grid_local(layout, origin, screen);
    CellCoord {
        row: clamp_index(local.y / layout.cell_size, layout.rows),
        col: clamp_index(local.x / layout.cell_size, layout.columns),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn clamp_index(cells: f64, count: usize) -> usize {
    let last = count.saturating_sub(1) as f64;
    // NaN casts to 0.
    cells.floor().clamp(0.0, last) as usize
}
