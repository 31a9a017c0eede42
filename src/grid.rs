//! Grid store: cells, their colors, and the rectangular container that owns them.
//!
//! The grid is row-major and always fully rectangular. Cells have no lifecycle
//! of their own: they are created by [`Grid::generate`] and mutated in place by
//! the paint operations. Every accessor bounds-checks `(row, col)` and reports
//! [`GridError::OutOfBounds`] instead of indexing past the backing vector.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("cell ({row}, {col}) outside {rows}x{columns} grid")]
    OutOfBounds { row: usize, col: usize, rows: usize, columns: usize },
    #[error("unknown swatch {index} (palette has {len})")]
    UnknownSwatch { index: usize, len: usize },
}

/// Display color of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "index")]
pub enum CellColor {
    /// Untouched cell.
    #[default]
    Default,
    /// Cell painted by the pointer.
    Painted,
    /// Caller-chosen color from `EngineConfig::swatches`.
    Swatch(usize),
}

impl CellColor {
    /// Resolve to a CSS color string. Unknown swatches fall back to the default color.
    #[must_use]
    pub fn css(self, config: &EngineConfig) -> &str {
        match self {
            Self::Default => &config.default_color,
            Self::Painted => &config.painted_color,
            Self::Swatch(i) => config.swatches.get(i).map_or(config.default_color.as_str(), String::as_str),
        }
    }
}

/// Opaque tag for whatever occupies a cell. Not interpreted by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef(pub String);

/// One addressable grid unit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    pub color: CellColor,
    pub entity: Option<EntityRef>,
}

/// Rectangular `rows × columns` cell store.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocate a fresh grid with every cell at the default color.
    ///
    /// Both dimensions are clamped to the configured `[min_dim, max_dim]`.
    #[must_use]
    pub fn generate(rows: usize, columns: usize, config: &EngineConfig) -> Self {
        let rows = config.clamp_dim(rows);
        let columns = config.clamp_dim(columns);
        Self { rows, columns, cells: vec![Cell::default(); rows * columns] }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, GridError> {
        if row < self.rows && col < self.columns {
            Ok(row * self.columns + col)
        } else {
            Err(GridError::OutOfBounds { row, col, rows: self.rows, columns: self.columns })
        }
    }

    /// The cell at `(row, col)`, or `None` when out of range.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        if row < self.rows && col < self.columns {
            self.cells.get(row * self.columns + col)
        } else {
            None
        }
    }

    /// Set a cell's color. Returns `true` if the color changed.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `(row, col)` is outside the grid.
    pub fn set_color(&mut self, row: usize, col: usize, color: CellColor) -> Result<bool, GridError> {
        let i = self.index(row, col)?;
        let cell = &mut self.cells[i];
        if cell.color == color {
            return Ok(false);
        }
        cell.color = color;
        Ok(true)
    }

    /// Paint a cell. Returns `false` (no-op) if it was already painted.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `(row, col)` is outside the grid.
    pub fn paint(&mut self, row: usize, col: usize) -> Result<bool, GridError> {
        self.set_color(row, col, CellColor::Painted)
    }

    /// Flip a cell between painted and default. Returns the new color.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `(row, col)` is outside the grid.
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<CellColor, GridError> {
        let i = self.index(row, col)?;
        let cell = &mut self.cells[i];
        cell.color = if cell.color == CellColor::Painted {
            CellColor::Default
        } else {
            CellColor::Painted
        };
        Ok(cell.color)
    }

    /// Reset every cell to the default color and drop all entities.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Number of cells currently painted.
    #[must_use]
    pub fn painted_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.color == CellColor::Painted)
            .count()
    }

    /// Iterate `(row, col, cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (i / columns, i % columns, cell))
    }
}
