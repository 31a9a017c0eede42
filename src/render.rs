//! Rendering: draws the grid onto a 2D surface.
//!
//! [`draw`] is the only place that issues drawing commands. It reads the grid
//! and a [`Layout`] and produces pixels; it does not mutate engine state.
//! Drawing goes through the [`Surface`] trait so the same code paints the
//! browser's `CanvasRenderingContext2d` and the recording surface used in tests.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::Layout;
use crate::config::EngineConfig;
use crate::grid::Grid;

/// The 2D primitives the renderer needs.
pub trait Surface {
    type Error;

    /// Reset the transform to a plain device-pixel-ratio scale.
    ///
    /// # Errors
    ///
    /// Propagates failures from the underlying context.
    fn begin(&mut self, dpr: f64) -> Result<(), Self::Error>;

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    fn set_fill(&mut self, color: &str);

    fn set_stroke(&mut self, color: &str, width: f64);

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
}

impl Surface for CanvasRenderingContext2d {
    type Error = JsValue;

    fn begin(&mut self, dpr: f64) -> Result<(), JsValue> {
        self.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        CanvasRenderingContext2d::clear_rect(self, x, y, w, h);
    }

    fn set_fill(&mut self, color: &str) {
        self.set_fill_style_str(color);
    }

    fn set_stroke(&mut self, color: &str, width: f64) {
        self.set_stroke_style_str(color);
        self.set_line_width(width);
        self.set_line_join("round");
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        CanvasRenderingContext2d::fill_rect(self, x, y, w, h);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        CanvasRenderingContext2d::stroke_rect(self, x, y, w, h);
    }
}

/// Counts from one [`draw`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub drawn: usize,
    pub skipped: usize,
}

/// Clear the canvas and draw every on-screen cell.
///
/// Each cell is a `cell_size` square at `(col*cell_size + x_off, row*cell_size + y_off)`,
/// stroked with the configured border then filled with its color. Cells whose
/// stroked outline lies entirely off the canvas are skipped.
///
/// # Errors
///
/// Returns `Err` if the surface rejects the initial transform.
pub fn draw<S: Surface>(
    surface: &mut S,
    grid: &Grid,
    layout: &Layout,
    config: &EngineConfig,
    dpr: f64,
) -> Result<DrawStats, S::Error> {
    surface.begin(dpr)?;
    surface.clear_rect(0.0, 0.0, layout.viewport_w, layout.viewport_h);
    surface.set_stroke(&config.border_color, config.border_width);

    let mut stats = DrawStats::default();
    let mut current_fill: Option<&str> = None;

    // The border is centered on the cell edge, so half of it lies outside the cell.
    let stroke_pad = config.border_width / 2.0;

    for (row, col, cell) in grid.iter() {
        let rect = layout.cell_rect(row, col);
        if !rect.inflate(stroke_pad).intersects_viewport(layout.viewport_w, layout.viewport_h) {
            stats.skipped += 1;
            continue;
        }

        let fill = cell.color.css(config);
        if current_fill != Some(fill) {
            surface.set_fill(fill);
            current_fill = Some(fill);
        }
        surface.stroke_rect(rect.x, rect.y, rect.width, rect.height);
        surface.fill_rect(rect.x, rect.y, rect.width, rect.height);
        stats.drawn += 1;
    }

    Ok(stats)
}
