//! Viewport transform: zoom, scroll, and the pixel geometry derived from them.
//!
//! [`Camera`] holds the only mutable transform state. Everything else (cell
//! size, virtual grid extents, the centering offset, cell rectangles) lives on
//! [`Layout`], which is recomputed from the camera, grid dimensions, and
//! viewport size whenever it is needed. Nothing derived is cached.
//!
//! All pixel alignment goes through [`floor_px`]. The renderer and the
//! coordinate mapper both read positions from the same `Layout`, so a click
//! always resolves to the cell drawn under it.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::consts::INITIAL_ZOOM;

/// A point in screen (CSS pixel) space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Whether `p` lies inside the half-open rectangle `[x, x+w) × [y, y+h)`.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }

    /// Grow by `pad` on every side.
    #[must_use]
    pub fn inflate(&self, pad: f64) -> Rect {
        Rect { x: self.x - pad, y: self.y - pad, width: self.width + 2.0 * pad, height: self.height + 2.0 * pad }
    }

    /// Whether any part of this rectangle overlaps `[0, w) × [0, h)`.
    #[must_use]
    pub fn intersects_viewport(&self, w: f64, h: f64) -> bool {
        self.x < w && self.y < h && self.x + self.width > 0.0 && self.y + self.height > 0.0
    }
}

/// Integer floor used for every pixel-aligned quantity.
///
/// Floor (not round, not truncation toward zero) keeps adjacent cells flush
/// for negative offsets too.
#[must_use]
pub fn floor_px(v: f64) -> f64 {
    v.floor()
}

/// Zoom and scroll state.
///
/// `scroll_x` / `scroll_y` are CSS pixels added to the centering offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub zoom: f64,
    pub scroll_x: f64,
    pub scroll_y: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { zoom: INITIAL_ZOOM, scroll_x: 0.0, scroll_y: 0.0 }
    }
}

impl Camera {
    #[must_use]
    pub fn with_zoom(zoom: f64) -> Self {
        Self { zoom, ..Self::default() }
    }

    /// Cell edge in pixels: `floor(base_cell_size * zoom)`.
    #[must_use]
    pub fn cell_size(&self, base_cell_size: f64) -> f64 {
        floor_px(base_cell_size * self.zoom)
    }

    /// Derive the pixel layout for a `rows × columns` grid in a `viewport_w × viewport_h` canvas.
    #[must_use]
    pub fn layout(&self, base_cell_size: f64, rows: usize, columns: usize, viewport_w: f64, viewport_h: f64) -> Layout {
        let cell_size = self.cell_size(base_cell_size);
        #[allow(clippy::cast_precision_loss)]
        let (virtual_width, virtual_height) = (columns as f64 * cell_size, rows as f64 * cell_size);
        let offset = Point::new(
            floor_px(viewport_w / 2.0 - virtual_width / 2.0 + self.scroll_x),
            floor_px(viewport_h / 2.0 - virtual_height / 2.0 + self.scroll_y),
        );
        Layout { rows, columns, cell_size, virtual_width, virtual_height, viewport_w, viewport_h, offset }
    }

    /// Add a pixel delta to the scroll offsets, clamped to `limit`.
    ///
    /// Returns `true` if either offset changed.
    pub fn scroll_by(&mut self, dx: f64, dy: f64, limit: Point) -> bool {
        let before = (self.scroll_x, self.scroll_y);
        self.scroll_x += dx;
        self.scroll_y += dy;
        self.clamp_scroll(limit);
        before != (self.scroll_x, self.scroll_y)
    }

    /// Clamp scroll offsets into `[-limit, limit]` on each axis.
    pub fn clamp_scroll(&mut self, limit: Point) {
        self.scroll_x = self.scroll_x.clamp(-limit.x, limit.x);
        self.scroll_y = self.scroll_y.clamp(-limit.y, limit.y);
    }
}

/// Pixel geometry for one camera/grid/viewport combination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub rows: usize,
    pub columns: usize,
    pub cell_size: f64,
    pub virtual_width: f64,
    pub virtual_height: f64,
    pub viewport_w: f64,
    pub viewport_h: f64,
    /// Canvas-local position of the grid's top-left corner.
    pub offset: Point,
}

impl Layout {
    /// Offset that centers the virtual grid in the canvas, plus scroll.
    #[must_use]
    pub fn centering_offset(&self) -> Point {
        self.offset
    }

    /// On-canvas square of cell `(row, col)`.
    #[must_use]
    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        #[allow(clippy::cast_precision_loss)]
        let (x, y) = (col as f64 * self.cell_size, row as f64 * self.cell_size);
        Rect { x: x + self.offset.x, y: y + self.offset.y, width: self.cell_size, height: self.cell_size }
    }

    /// Bounds of the whole virtual grid on the canvas.
    #[must_use]
    pub fn grid_rect(&self) -> Rect {
        Rect { x: self.offset.x, y: self.offset.y, width: self.virtual_width, height: self.virtual_height }
    }

    /// Largest allowed absolute scroll per axis.
    ///
    /// At the limit one row/column of cells is still on the canvas.
    #[must_use]
    pub fn scroll_limit(&self) -> Point {
        Point::new(
            ((self.viewport_w + self.virtual_width) / 2.0 - self.cell_size).max(0.0),
            ((self.viewport_h + self.virtual_height) / 2.0 - self.cell_size).max(0.0),
        )
    }
}
