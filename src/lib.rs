//! Grid-painting canvas engine.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns a
//! rectangular grid of colored cells drawn on a `<canvas>`: painting cells
//! with the primary mouse button, panning with the secondary button, and
//! zooming with the wheel. The host page only constructs a [`web::GridCanvas`]
//! and calls its operations; all input mapping and drawing happens here.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`grid`] | Cell store and color model |
//! | [`camera`] | Zoom/scroll state and derived pixel layout |
//! | [`hit`] | Screen point to cell mapping |
//! | [`input`] | Button/wheel types and the gesture state machine |
//! | [`render`] | Drawing through the [`render::Surface`] trait |
//! | [`frame`] | Redraw coalescing to one paint per animation frame |
//! | [`config`] | Validated, serde-loadable engine settings |
//! | [`web`] | DOM listeners, `requestAnimationFrame`, disposal, wasm exports |
//! | [`consts`] | Default limits and palette |

pub mod camera;
pub mod config;
pub mod consts;
pub mod engine;
pub mod frame;
pub mod grid;
pub mod hit;
pub mod input;
pub mod render;
pub mod web;
