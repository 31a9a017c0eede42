//! Engine configuration: dimension limits, zoom range, and palette.
//!
//! Every field has a default from [`crate::consts`], so a host can pass a
//! partial JSON object (or nothing at all) and only override what it needs.
//! [`EngineConfig::validate`] enforces the invariants the engine relies on,
//! most importantly that the smallest zoom still yields a cell at least one
//! pixel wide.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    BASE_CELL_SIZE, BORDER_COLOR, BORDER_WIDTH, DEFAULT_COLOR, INITIAL_ZOOM, MAX_DIM, MIN_DIM, PAINTED_COLOR,
    ZOOM_MAX, ZOOM_MIN, ZOOM_STEP,
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid dimension limits: min {min}, max {max}")]
    InvalidDimensions { min: usize, max: usize },
    #[error("invalid zoom range: min {min}, initial {initial}, max {max}, step {step}")]
    InvalidZoom { min: f64, initial: f64, max: f64, step: f64 },
    #[error("cell size at minimum zoom is below one pixel (base {base}, zoom {zoom})")]
    CellSizeTooSmall { base: f64, zoom: f64 },
    #[error("invalid border width: {0}")]
    InvalidBorder(f64),
    #[error("unknown log level: {0}")]
    InvalidLogLevel(String),
}

/// Tunables for a grid engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub min_dim: usize,
    pub max_dim: usize,
    /// Cell edge in CSS pixels at zoom 1.0.
    pub base_cell_size: f64,
    pub zoom_min: f64,
    pub zoom_max: f64,
    /// Zoom change per wheel tick.
    pub zoom_step: f64,
    pub initial_zoom: f64,
    pub border_width: f64,
    pub border_color: String,
    pub default_color: String,
    pub painted_color: String,
    /// Extra colors addressable as `CellColor::Swatch(index)`.
    pub swatches: Vec<String>,
    /// Console log level for the browser host (`error`..`trace`).
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_dim: MIN_DIM,
            max_dim: MAX_DIM,
            base_cell_size: BASE_CELL_SIZE,
            zoom_min: ZOOM_MIN,
            zoom_max: ZOOM_MAX,
            zoom_step: ZOOM_STEP,
            initial_zoom: INITIAL_ZOOM,
            border_width: BORDER_WIDTH,
            border_color: BORDER_COLOR.to_owned(),
            default_color: DEFAULT_COLOR.to_owned(),
            painted_color: PAINTED_COLOR.to_owned(),
            swatches: Vec::new(),
            log_level: "info".to_owned(),
        }
    }
}

impl EngineConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    ///
    /// # Errors
    ///
    /// Returns `Parse` for malformed JSON, or any validation error from [`Self::validate`].
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the engine depends on.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_dim == 0 || self.min_dim > self.max_dim {
            return Err(ConfigError::InvalidDimensions { min: self.min_dim, max: self.max_dim });
        }

        let zoom_ok = self.zoom_min > 0.0
            && self.zoom_min <= self.initial_zoom
            && self.initial_zoom <= self.zoom_max
            && self.zoom_step > 0.0
            && self.zoom_max.is_finite();
        if !zoom_ok {
            return Err(ConfigError::InvalidZoom {
                min: self.zoom_min,
                initial: self.initial_zoom,
                max: self.zoom_max,
                step: self.zoom_step,
            });
        }

        if (self.base_cell_size * self.zoom_min).floor() < 1.0 {
            return Err(ConfigError::CellSizeTooSmall { base: self.base_cell_size, zoom: self.zoom_min });
        }

        if !(self.border_width >= 0.0 && self.border_width.is_finite()) {
            return Err(ConfigError::InvalidBorder(self.border_width));
        }

        self.level()?;
        Ok(())
    }

    /// Parsed [`Self::log_level`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidLogLevel` if the string is not a `log` level name.
    pub fn level(&self) -> Result<log::Level, ConfigError> {
        self.log_level
            .parse::<log::Level>()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    /// Clamp a requested dimension into `[min_dim, max_dim]`.
    ///
    /// Never panics: with inverted limits `max_dim` wins.
    #[must_use]
    pub fn clamp_dim(&self, n: usize) -> usize {
        n.max(self.min_dim).min(self.max_dim)
    }

    /// Clamp a zoom factor into `[zoom_min, zoom_max]`.
    ///
    /// Never panics: with inverted limits `zoom_max` wins, and NaN on either
    /// side is ignored.
    #[must_use]
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.max(self.zoom_min).min(self.zoom_max)
    }
}
