//! Browser host: DOM listeners, animation-frame scheduling, and wasm exports.
//!
//! [`attach`] binds an [`Engine`] to its canvas and returns an
//! [`EngineHandle`] that owns every listener closure. Dropping or disposing
//! the handle removes the listeners and cancels a pending frame, so a page can
//! tear an engine down and build a new one without leaking callbacks.
//!
//! Listener closures hold the engine strongly; the shared animation-frame
//! callback holds it weakly so the handle is the only owner that keeps it alive.

#[cfg(test)]
#[path = "web_test.rs"]
mod web_test;

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::Once;

use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Event, EventTarget, HtmlCanvasElement, MouseEvent, WheelEvent};

use crate::camera::Point;
use crate::config::EngineConfig;
use crate::engine::{Action, Engine, EngineError};
use crate::grid::CellColor;
use crate::input::{Button, WheelDelta};

static LOGGING: Once = Once::new();

/// Install the panic hook and console logger once per page.
fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    LOGGING.call_once(|| {
        if let Err(err) = console_log::init_with_level(level) {
            web_sys::console::warn_1(&JsValue::from_str(&format!("console logger not installed: {err}")));
        }
    });
}

// =============================================================
// Frame scheduling
// =============================================================

/// Host-side state shared by listeners and the handle.
#[derive(Default)]
struct HostState {
    /// Pending `requestAnimationFrame` id.
    frame_id: Option<i32>,
    /// Reusable frame callback; dropped on dispose.
    frame_callback: Option<Closure<dyn FnMut(f64)>>,
    /// JS function called as `(row, col, color)` for every cell change.
    on_cell_change: Option<js_sys::Function>,
}

fn present(engine: &Rc<RefCell<Engine>>) {
    if let Err(err) = engine.borrow_mut().present() {
        log::warn!("render failed: {err:?}");
    }
}

/// Apply host-side actions and request a frame if one is now due.
fn dispatch(engine: &Rc<RefCell<Engine>>, host: &Rc<RefCell<HostState>>, actions: &[Action]) {
    for action in actions {
        if let Action::SetCursor(cursor) = action {
            if let Err(err) = engine.borrow().set_cursor(cursor) {
                log::warn!("cursor update failed: {err}");
            }
        }
    }

    notify_cell_changes(host, actions);

    if !engine.borrow_mut().core.schedule(actions) {
        return;
    }

    let requested = web_sys::window().and_then(|window| {
        let host_ref = host.borrow();
        let callback = host_ref.frame_callback.as_ref()?;
        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(id) => Some(id),
            Err(err) => {
                log::warn!("requestAnimationFrame failed: {err:?}");
                None
            }
        }
    });

    match requested {
        Some(id) => host.borrow_mut().frame_id = Some(id),
        // No frame source: draw synchronously so state never goes stale.
        None => present(engine),
    }
}

/// `(row, col, color)` of every `CellChanged` in `actions`, in order.
fn cell_changes(actions: &[Action]) -> impl Iterator<Item = (usize, usize, CellColor)> + '_ {
    actions.iter().filter_map(|action| match action {
        Action::CellChanged { row, col, color } => Some((*row, *col, *color)),
        _ => None,
    })
}

fn notify_cell_changes(host: &Rc<RefCell<HostState>>, actions: &[Action]) {
    // Cloned out so the callback may call back into the handle.
    let Some(callback) = host.borrow().on_cell_change.clone() else {
        return;
    };
    for (row, col, color) in cell_changes(actions) {
        if let Err(err) = call_cell_change(&callback, row, col, color) {
            log::warn!("cell change callback failed: {err}");
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn call_cell_change(callback: &js_sys::Function, row: usize, col: usize, color: CellColor) -> Result<(), EngineError> {
    let color = js_sys::JSON::parse(&serde_json::to_string(&color)?)?;
    callback.call3(&JsValue::NULL, &JsValue::from_f64(row as f64), &JsValue::from_f64(col as f64), &color)?;
    Ok(())
}

fn frame_callback(engine: Weak<RefCell<Engine>>, host: Weak<RefCell<HostState>>) -> Closure<dyn FnMut(f64)> {
    Closure::wrap(Box::new(move |_ts: f64| {
        if let Some(host) = host.upgrade() {
            host.borrow_mut().frame_id = None;
        }
        if let Some(engine) = engine.upgrade() {
            present(&engine);
        }
    }) as Box<dyn FnMut(f64)>)
}

// =============================================================
// Listeners
// =============================================================

struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn add(target: &EventTarget, event: &'static str, passive: bool, callback: Closure<dyn FnMut(Event)>) -> Result<Self, EngineError> {
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self { target: target.clone(), event, callback })
    }

    fn remove(&self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref())
        {
            log::warn!("failed to remove {} listener: {err:?}", self.event);
        }
    }
}

fn mouse_point(ev: &MouseEvent) -> Point {
    Point::new(f64::from(ev.client_x()), f64::from(ev.client_y()))
}

/// Build a listener closure that maps a DOM event to engine actions.
fn handler<E, F>(engine: &Rc<RefCell<Engine>>, host: &Rc<RefCell<HostState>>, mut f: F) -> Closure<dyn FnMut(Event)>
where
    E: JsCast,
    F: FnMut(&mut Engine, &E) -> Vec<Action> + 'static,
{
    let engine = Rc::clone(engine);
    let host = Rc::clone(host);
    Closure::wrap(Box::new(move |ev: Event| {
        let Some(ev) = ev.dyn_ref::<E>() else {
            return;
        };
        let actions = f(&mut engine.borrow_mut(), ev);
        dispatch(&engine, &host, &actions);
    }) as Box<dyn FnMut(Event)>)
}

// =============================================================
// Handle
// =============================================================

/// Owns an attached engine and its listeners.
pub struct EngineHandle {
    engine: Rc<RefCell<Engine>>,
    host: Rc<RefCell<HostState>>,
    listeners: Vec<Listener>,
    disposed: bool,
}

/// Create an engine on `canvas`, bind its input listeners, and render the first frame.
///
/// With `fill_window` the canvas is stretched over the window and follows
/// resizes; otherwise the canvas's own CSS box is used.
///
/// # Errors
///
/// Returns `Config` for an invalid config, `NoWindow`/`NoContext` outside a
/// usable browser page, or `Js` if a listener cannot be attached.
pub fn attach(
    canvas: HtmlCanvasElement,
    rows: usize,
    columns: usize,
    config: EngineConfig,
    fill_window: bool,
) -> Result<EngineHandle, EngineError> {
    config.validate()?;
    init_logging(config.level()?);

    let window = web_sys::window().ok_or(EngineError::NoWindow)?;
    let mut engine = Engine::new(canvas.clone(), rows, columns, config)?;
    if fill_window {
        engine.fit_to_window()?;
    } else {
        engine.fit_to_element();
    }
    engine.sync_origin();

    let engine = Rc::new(RefCell::new(engine));
    let host = Rc::new(RefCell::new(HostState::default()));
    host.borrow_mut().frame_callback = Some(frame_callback(Rc::downgrade(&engine), Rc::downgrade(&host)));

    let mut handle = EngineHandle { engine: Rc::clone(&engine), host: Rc::clone(&host), listeners: Vec::new(), disposed: false };
    let canvas_target: &EventTarget = canvas.as_ref();
    let window_target: &EventTarget = window.as_ref();

    handle.listen(
        canvas_target,
        "mousedown",
        true,
        handler(&engine, &host, |engine: &mut Engine, ev: &MouseEvent| {
            let Some(button) = Button::from_dom(ev.button()) else {
                return Vec::new();
            };
            engine.sync_origin();
            engine.core.on_pointer_down(mouse_point(ev), button)
        }),
    )?;

    handle.listen(
        canvas_target,
        "mousemove",
        true,
        handler(&engine, &host, |engine: &mut Engine, ev: &MouseEvent| {
            ev.stop_propagation();
            engine.core.on_pointer_move(mouse_point(ev))
        }),
    )?;

    // On the window so a release outside the canvas still ends the gesture.
    handle.listen(
        window_target,
        "mouseup",
        true,
        handler(&engine, &host, |engine: &mut Engine, ev: &MouseEvent| {
            Button::from_dom(ev.button()).map_or_else(Vec::new, |button| engine.core.on_pointer_up(button))
        }),
    )?;

    handle.listen(
        canvas_target,
        "contextmenu",
        false,
        handler(&engine, &host, |_engine: &mut Engine, ev: &MouseEvent| {
            ev.prevent_default();
            Vec::new()
        }),
    )?;

    handle.listen(
        canvas_target,
        "wheel",
        false,
        handler(&engine, &host, |engine: &mut Engine, ev: &WheelEvent| {
            ev.prevent_default();
            engine.core.on_wheel(WheelDelta { dx: ev.delta_x(), dy: ev.delta_y() })
        }),
    )?;

    if fill_window {
        handle.listen(
            window_target,
            "resize",
            true,
            handler(&engine, &host, |engine: &mut Engine, _ev: &Event| {
                let actions = engine.fit_to_window().unwrap_or_else(|err| {
                    log::warn!("resize failed: {err}");
                    Vec::new()
                });
                engine.sync_origin();
                actions
            }),
        )?;
    }

    {
        let mut engine = engine.borrow_mut();
        engine.render()?;
        let core = &engine.core;
        log::info!(
            "grid engine attached: {}x{} cells, {}px, viewport {}x{}",
            core.rows(),
            core.columns(),
            core.cell_size(),
            core.viewport_width,
            core.viewport_height
        );
    }

    Ok(handle)
}

impl EngineHandle {
    fn listen(
        &mut self,
        target: &EventTarget,
        event: &'static str,
        passive: bool,
        callback: Closure<dyn FnMut(Event)>,
    ) -> Result<(), EngineError> {
        self.listeners.push(Listener::add(target, event, passive, callback)?);
        Ok(())
    }

    /// Run an engine operation and schedule whatever it asks for.
    fn apply<F>(&self, f: F)
    where
        F: FnOnce(&mut Engine) -> Vec<Action>,
    {
        let actions = f(&mut self.engine.borrow_mut());
        dispatch(&self.engine, &self.host, &actions);
    }

    /// Replace the grid with a fresh one (dimensions clamped).
    pub fn regenerate(&self, rows: usize, columns: usize) {
        self.apply(|engine| engine.core.regenerate(rows, columns));
    }

    /// Reset all cells to the default color.
    pub fn clear(&self) {
        self.apply(|engine| engine.core.clear());
    }

    /// Flip a cell between default and painted.
    ///
    /// # Errors
    ///
    /// Returns `Grid` for an out-of-range cell.
    pub fn toggle_cell(&self, row: usize, col: usize) -> Result<(), EngineError> {
        let actions = self.engine.borrow_mut().core.toggle_cell(row, col)?;
        dispatch(&self.engine, &self.host, &actions);
        Ok(())
    }

    /// Paint a cell with the primary color.
    ///
    /// # Errors
    ///
    /// Returns `Grid` for an out-of-range cell.
    pub fn paint_cell(&self, row: usize, col: usize) -> Result<(), EngineError> {
        let actions = self.engine.borrow_mut().core.paint_cell(row, col)?;
        dispatch(&self.engine, &self.host, &actions);
        Ok(())
    }

    /// Apply any palette color to a cell.
    ///
    /// # Errors
    ///
    /// Returns `Grid` for an out-of-range cell or an undefined swatch.
    pub fn set_cell_color(&self, row: usize, col: usize, color: CellColor) -> Result<(), EngineError> {
        let actions = self.engine.borrow_mut().core.set_cell_color(row, col, color)?;
        dispatch(&self.engine, &self.host, &actions);
        Ok(())
    }

    /// Register (or with `None`, remove) the cell change callback.
    pub fn set_on_cell_change(&self, callback: Option<js_sys::Function>) {
        self.host.borrow_mut().on_cell_change = callback;
    }

    #[must_use]
    pub fn virtual_width(&self) -> f64 {
        self.engine.borrow().core.virtual_width()
    }

    #[must_use]
    pub fn virtual_height(&self) -> f64 {
        self.engine.borrow().core.virtual_height()
    }

    #[must_use]
    pub fn cell_size(&self) -> f64 {
        self.engine.borrow().core.cell_size()
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.engine.borrow().core.zoom()
    }

    /// Remove every listener and cancel any pending frame. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        for listener in self.listeners.drain(..) {
            listener.remove();
        }

        let pending = self.host.borrow_mut().frame_id.take();
        if let (Some(id), Some(window)) = (pending, web_sys::window()) {
            if let Err(err) = window.cancel_animation_frame(id) {
                log::warn!("cancelAnimationFrame failed: {err:?}");
            }
        }
        {
            let mut host = self.host.borrow_mut();
            host.frame_callback = None;
            host.on_cell_change = None;
        }
        self.engine.borrow_mut().core.frames.cancel();
        log::info!("grid engine disposed");
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}

// =============================================================
// wasm exports
// =============================================================

/// JavaScript-facing grid canvas.
#[wasm_bindgen]
pub struct GridCanvas {
    handle: EngineHandle,
}

#[wasm_bindgen]
impl GridCanvas {
    /// Attach to `canvas` with default settings, filling the window.
    ///
    /// # Errors
    ///
    /// Rejects with a message string if the engine cannot attach.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, rows: usize, columns: usize) -> Result<GridCanvas, JsValue> {
        let handle = attach(canvas, rows, columns, EngineConfig::default(), true)?;
        Ok(Self { handle })
    }

    /// Attach with a JSON config; `fill_window` false keeps the canvas's own size.
    ///
    /// # Errors
    ///
    /// Rejects for malformed or invalid config, or if the engine cannot attach.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(
        canvas: HtmlCanvasElement,
        rows: usize,
        columns: usize,
        config_json: &str,
        fill_window: bool,
    ) -> Result<GridCanvas, JsValue> {
        let config = EngineConfig::from_json(config_json).map_err(EngineError::from)?;
        let handle = attach(canvas, rows, columns, config, fill_window)?;
        Ok(Self { handle })
    }

    pub fn regenerate(&self, rows: usize, columns: usize) {
        self.handle.regenerate(rows, columns);
    }

    pub fn clear(&self) {
        self.handle.clear();
    }

    /// # Errors
    ///
    /// Rejects for a cell outside the grid.
    #[wasm_bindgen(js_name = toggleCell)]
    pub fn toggle_cell(&self, row: usize, col: usize) -> Result<(), JsValue> {
        Ok(self.handle.toggle_cell(row, col)?)
    }

    /// # Errors
    ///
    /// Rejects for a cell outside the grid.
    #[wasm_bindgen(js_name = paintCell)]
    pub fn paint_cell(&self, row: usize, col: usize) -> Result<(), JsValue> {
        Ok(self.handle.paint_cell(row, col)?)
    }

    /// Fill a cell with `swatches[swatch]` from the config.
    ///
    /// # Errors
    ///
    /// Rejects for a cell outside the grid or an undefined swatch.
    #[wasm_bindgen(js_name = setCellColor)]
    pub fn set_cell_color(&self, row: usize, col: usize, swatch: usize) -> Result<(), JsValue> {
        Ok(self.handle.set_cell_color(row, col, CellColor::Swatch(swatch))?)
    }

    /// Call `callback(row, col, color)` after every cell change, where
    /// `color` is `{kind: "default" | "painted" | "swatch", index?}`.
    /// Pass `undefined` to unregister.
    #[wasm_bindgen(js_name = onCellChange)]
    pub fn on_cell_change(&self, callback: Option<js_sys::Function>) {
        self.handle.set_on_cell_change(callback);
    }

    #[wasm_bindgen(getter, js_name = virtualWidth)]
    #[must_use]
    pub fn virtual_width(&self) -> f64 {
        self.handle.virtual_width()
    }

    #[wasm_bindgen(getter, js_name = virtualHeight)]
    #[must_use]
    pub fn virtual_height(&self) -> f64 {
        self.handle.virtual_height()
    }

    #[wasm_bindgen(getter, js_name = cellSize)]
    #[must_use]
    pub fn cell_size(&self) -> f64 {
        self.handle.cell_size()
    }

    #[wasm_bindgen(getter)]
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.handle.zoom()
    }

    /// Detach all listeners. The object is unusable afterwards.
    pub fn dispose(&mut self) {
        self.handle.dispose();
    }
}
