//! Shared numeric constants and default palette for the grid engine.

// ── Grid dimensions ─────────────────────────────────────────────

/// Smallest supported row/column count.
pub const MIN_DIM: usize = 3;

/// Largest supported row/column count.
pub const MAX_DIM: usize = 50;

// ── Zoom ────────────────────────────────────────────────────────

/// Cell edge length in CSS pixels at zoom 1.0.
pub const BASE_CELL_SIZE: f64 = 200.0;

/// Lower zoom bound. `BASE_CELL_SIZE * ZOOM_MIN` must floor to at least 1px.
pub const ZOOM_MIN: f64 = 0.05;

/// Upper zoom bound.
pub const ZOOM_MAX: f64 = 1.0;

/// Zoom change per wheel tick.
pub const ZOOM_STEP: f64 = 0.02;

/// Zoom level a fresh engine starts at.
pub const INITIAL_ZOOM: f64 = 1.0;

// ── Rendering ───────────────────────────────────────────────────

/// Cell border width in CSS pixels.
pub const BORDER_WIDTH: f64 = 2.0;

/// Cell border color.
pub const BORDER_COLOR: &str = "rgba(0, 0, 0, 0.5)";

/// Fill for untouched cells.
pub const DEFAULT_COLOR: &str = "lightgreen";

/// Fill for painted cells.
pub const PAINTED_COLOR: &str = "gray";

// ── Cursors ─────────────────────────────────────────────────────

/// CSS cursor shown while panning.
pub const CURSOR_GRABBING: &str = "grabbing";
