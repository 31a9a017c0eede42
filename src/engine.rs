use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Camera, Layout, Point};
use crate::config::{ConfigError, EngineConfig};
use crate::consts::CURSOR_GRABBING;
use crate::frame::FrameScheduler;
use crate::grid::{Cell, CellColor, Grid, GridError};
use crate::hit::{self, CellCoord};
use crate::input::{Button, InputState, WheelDelta};
use crate::render::{self, DrawStats, Surface};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from engine operations for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// State changed; the host should schedule a frame.
    RenderNeeded,
    /// A cell's color changed.
    CellChanged { row: usize, col: usize, color: CellColor },
    /// Set the canvas CSS cursor. An empty string restores the default.
    SetCursor(String),
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("no browser window")]
    NoWindow,
    #[error("canvas has no 2d context")]
    NoContext,
    #[error("javascript error: {0}")]
    Js(String),
    #[error("encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<JsValue> for EngineError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

/// Surfaces as a JavaScript `Error` so callers get a stack and `message`.
impl From<EngineError> for JsValue {
    fn from(err: EngineError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub config: EngineConfig,
    pub grid: Grid,
    pub camera: Camera,
    pub input: InputState,
    pub frames: FrameScheduler,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
    /// Page position of the canvas's top-left corner.
    pub canvas_origin: Point,
}

impl EngineCore {
    /// Build an engine with a fresh `rows × columns` grid.
    ///
    /// Dimensions are clamped to the configured limits. The viewport starts
    /// empty; the host reports its size through [`Self::set_viewport`].
    ///
    /// # Errors
    ///
    /// Returns the first constraint `config` violates (see [`EngineConfig::validate`]).
    pub fn new(rows: usize, columns: usize, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(rows, columns, config))
    }

    /// Build an engine with the default config.
    #[must_use]
    pub fn with_defaults(rows: usize, columns: usize) -> Self {
        Self::build(rows, columns, EngineConfig::default())
    }

    fn build(rows: usize, columns: usize, config: EngineConfig) -> Self {
        let grid = Grid::generate(rows, columns, &config);
        let camera = Camera::with_zoom(config.clamp_zoom(config.initial_zoom));
        Self {
            config,
            grid,
            camera,
            input: InputState::Idle,
            frames: FrameScheduler::new(),
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
            canvas_origin: Point::new(0.0, 0.0),
        }
    }

    // --- Geometry ---

    /// Pixel layout for the current camera, grid, and viewport.
    #[must_use]
    pub fn layout(&self) -> Layout {
        self.camera.layout(
            self.config.base_cell_size,
            self.grid.rows(),
            self.grid.columns(),
            self.viewport_width,
            self.viewport_height,
        )
    }

    #[must_use]
    pub fn cell_size(&self) -> f64 {
        self.camera.cell_size(self.config.base_cell_size)
    }

    #[must_use]
    pub fn virtual_width(&self) -> f64 {
        self.layout().virtual_width
    }

    #[must_use]
    pub fn virtual_height(&self) -> f64 {
        self.layout().virtual_height
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.camera.zoom
    }

    /// Canvas-local position of the grid's top-left corner.
    #[must_use]
    pub fn centering_offset(&self) -> Point {
        self.layout().centering_offset()
    }

    /// The cell under a page-space point, clamped into the grid.
    #[must_use]
    pub fn screen_to_logical(&self, screen: Point) -> CellCoord {
        hit::screen_to_logical(&self.layout(), self.canvas_origin, screen)
    }

    /// Whether a page-space point lies on the virtual grid.
    #[must_use]
    pub fn in_virtual_bounds(&self, screen: Point) -> bool {
        hit::in_virtual_bounds(&self.layout(), self.canvas_origin, screen)
    }

    /// Update viewport dimensions (CSS pixels) and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        self.viewport_width = width_css.max(0.0);
        self.viewport_height = height_css.max(0.0);
        self.dpr = if dpr > 0.0 { dpr } else { 1.0 };
        self.clamp_scroll();
        vec![Action::RenderNeeded]
    }

    /// Record where the canvas sits on the page.
    pub fn set_canvas_origin(&mut self, origin: Point) {
        self.canvas_origin = origin;
    }

    fn clamp_scroll(&mut self) {
        let limit = self.layout().scroll_limit();
        self.camera.clamp_scroll(limit);
    }

    // --- Grid store ---

    /// Replace the grid with a fresh `rows × columns` one (dimensions clamped).
    ///
    /// An in-progress gesture keeps going and targets the new grid.
    pub fn regenerate(&mut self, rows: usize, columns: usize) -> Vec<Action> {
        self.grid = Grid::generate(rows, columns, &self.config);
        self.clamp_scroll();
        log::debug!("grid regenerated: {}x{}", self.grid.rows(), self.grid.columns());
        vec![Action::RenderNeeded]
    }

    /// Reset every cell to the default color, keeping dimensions.
    pub fn clear(&mut self) -> Vec<Action> {
        self.grid.clear();
        vec![Action::RenderNeeded]
    }

    /// Flip a cell between the default and painted colors.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` for a cell outside the grid; nothing changes.
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<Vec<Action>, GridError> {
        let color = self.grid.toggle(row, col).inspect_err(|err| log::warn!("toggle rejected: {err}"))?;
        Ok(vec![Action::CellChanged { row, col, color }, Action::RenderNeeded])
    }

    /// Paint a cell. Already-painted cells produce no actions.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` for a cell outside the grid.
    pub fn paint_cell(&mut self, row: usize, col: usize) -> Result<Vec<Action>, GridError> {
        self.set_cell_color(row, col, CellColor::Painted)
    }

    /// Set any palette color on a cell. Unchanged cells produce no actions.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` for a cell outside the grid, or `UnknownSwatch`
    /// for a swatch index the config doesn't define.
    pub fn set_cell_color(&mut self, row: usize, col: usize, color: CellColor) -> Result<Vec<Action>, GridError> {
        if let CellColor::Swatch(index) = color {
            let len = self.config.swatches.len();
            if index >= len {
                return Err(GridError::UnknownSwatch { index, len });
            }
        }
        let changed = self
            .grid
            .set_color(row, col, color)
            .inspect_err(|err| log::warn!("paint rejected: {err}"))?;
        if changed {
            Ok(vec![Action::CellChanged { row, col, color }, Action::RenderNeeded])
        } else {
            Ok(Vec::new())
        }
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.grid.cell(row, col)
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.grid.columns()
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen: Point, button: Button) -> Vec<Action> {
        if !self.input.is_idle() {
            return Vec::new();
        }
        match button {
            Button::Primary => {
                self.input = InputState::Painting;
                self.paint_at(screen)
            }
            Button::Secondary => {
                let anchor = hit::grid_local(&self.layout(), self.canvas_origin, screen);
                self.input = InputState::Panning { anchor };
                vec![Action::SetCursor(CURSOR_GRABBING.to_owned())]
            }
        }
    }

    pub fn on_pointer_move(&mut self, screen: Point) -> Vec<Action> {
        match self.input {
            InputState::Idle => Vec::new(),
            InputState::Painting => self.paint_at(screen),
            InputState::Panning { anchor } => self.pan_to(screen, anchor),
        }
    }

    /// End the gesture started by `button`. Releases of other buttons are ignored.
    pub fn on_pointer_up(&mut self, button: Button) -> Vec<Action> {
        if self.input.active_button() != Some(button) {
            return Vec::new();
        }
        let was_panning = matches!(self.input, InputState::Panning { .. });
        self.input = InputState::Idle;
        if was_panning {
            vec![Action::SetCursor(String::new())]
        } else {
            Vec::new()
        }
    }

    /// Step zoom in (wheel up) or out (wheel down), clamped to the configured range.
    pub fn on_wheel(&mut self, delta: WheelDelta) -> Vec<Action> {
        let Some(direction) = delta.zoom_direction() else {
            return Vec::new();
        };
        let zoom = self.config.clamp_zoom(self.camera.zoom + direction * self.config.zoom_step);
        if (zoom - self.camera.zoom).abs() < f64::EPSILON {
            return Vec::new();
        }
        self.camera.zoom = zoom;
        self.clamp_scroll();
        log::debug!("zoom {zoom:.2}, cell size {}", self.cell_size());
        vec![Action::RenderNeeded]
    }

    fn paint_at(&mut self, screen: Point) -> Vec<Action> {
        let layout = self.layout();
        if !hit::in_virtual_bounds(&layout, self.canvas_origin, screen) {
            return Vec::new();
        }
        let CellCoord { row, col } = hit::screen_to_logical(&layout, self.canvas_origin, screen);
        match self.grid.paint(row, col) {
            Ok(true) => vec![Action::CellChanged { row, col, color: CellColor::Painted }, Action::RenderNeeded],
            Ok(false) => Vec::new(),
            Err(err) => {
                log::warn!("paint under pointer rejected: {err}");
                Vec::new()
            }
        }
    }

    fn pan_to(&mut self, screen: Point, anchor: Point) -> Vec<Action> {
        let layout = self.layout();
        let local = hit::grid_local(&layout, self.canvas_origin, screen);
        let (dx, dy) = (local.x - anchor.x, local.y - anchor.y);
        if self.camera.scroll_by(dx, dy, layout.scroll_limit()) {
            log::trace!("scroll ({}, {})", self.camera.scroll_x, self.camera.scroll_y);
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    // --- Frames ---

    /// Mark a frame as wanted if `actions` need one.
    ///
    /// Returns `true` when the host must request a new animation frame.
    pub fn schedule(&mut self, actions: &[Action]) -> bool {
        actions.iter().any(|a| matches!(a, Action::RenderNeeded)) && self.frames.request()
    }

    /// Draw unconditionally.
    ///
    /// # Errors
    ///
    /// Propagates surface failures.
    pub fn draw<S: Surface>(&self, surface: &mut S) -> Result<DrawStats, S::Error> {
        render::draw(surface, &self.grid, &self.layout(), &self.config, self.dpr)
    }

    /// Draw if a frame is pending. Called from the host's animation-frame callback.
    ///
    /// # Errors
    ///
    /// Propagates surface failures.
    pub fn present<S: Surface>(&mut self, surface: &mut S) -> Result<Option<DrawStats>, S::Error> {
        if !self.frames.take() {
            return Ok(None);
        }
        self.draw(surface).map(Some)
    }
}

/// The full grid engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pub core: EngineCore,
}

impl Engine {
    /// Create an engine bound to `canvas` with a fresh grid.
    ///
    /// # Errors
    ///
    /// Returns `Config` for an invalid config, or `NoContext` if the canvas
    /// cannot provide a 2D context.
    pub fn new(canvas: HtmlCanvasElement, rows: usize, columns: usize, config: EngineConfig) -> Result<Self, EngineError> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or(EngineError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| EngineError::NoContext)?;
        Ok(Self { canvas, ctx, core: EngineCore::new(rows, columns, config)? })
    }

    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    // --- Viewport ---

    /// Size the canvas backing store for `width_css × height_css` at `dpr` and update the core.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        let actions = self.core.set_viewport(width_css, height_css, dpr);
        let dpr = self.core.dpr;
        self.canvas.set_width((self.core.viewport_width * dpr).round() as u32);
        self.canvas.set_height((self.core.viewport_height * dpr).round() as u32);
        actions
    }

    /// Stretch the canvas over the window's inner area.
    ///
    /// # Errors
    ///
    /// Returns `NoWindow` outside a browser, or `Js` if a style write fails.
    pub fn fit_to_window(&mut self) -> Result<Vec<Action>, EngineError> {
        let window = web_sys::window().ok_or(EngineError::NoWindow)?;
        let width = window.inner_width()?.as_f64().unwrap_or(0.0);
        let height = window.inner_height()?.as_f64().unwrap_or(0.0);
        let style = self.canvas.style();
        style.set_property("width", &format!("{width}px"))?;
        style.set_property("height", &format!("{height}px"))?;
        Ok(self.set_viewport(width, height, window.device_pixel_ratio()))
    }

    /// Use the canvas's current CSS box as the viewport.
    pub fn fit_to_element(&mut self) -> Vec<Action> {
        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        let width = f64::from(self.canvas.client_width());
        let height = f64::from(self.canvas.client_height());
        self.set_viewport(width, height, dpr)
    }

    /// Refresh the canvas's page origin from its bounding rect.
    pub fn sync_origin(&mut self) {
        let rect = self.canvas.get_bounding_client_rect();
        self.core.set_canvas_origin(Point::new(rect.left(), rect.top()));
    }

    /// Apply a CSS cursor to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Js` if the style write fails.
    pub fn set_cursor(&self, cursor: &str) -> Result<(), EngineError> {
        let style = self.canvas.style();
        if cursor.is_empty() {
            style.remove_property("cursor")?;
        } else {
            style.set_property("cursor", cursor)?;
        }
        Ok(())
    }

    // --- Render ---

    /// Draw the current state to the canvas now.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context rejects a call.
    pub fn render(&mut self) -> Result<DrawStats, JsValue> {
        self.core.draw(&mut self.ctx)
    }

    /// Draw if a frame is pending.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context rejects a call.
    pub fn present(&mut self) -> Result<Option<DrawStats>, JsValue> {
        self.core.present(&mut self.ctx)
    }
}
