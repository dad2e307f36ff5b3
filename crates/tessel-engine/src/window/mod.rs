//! Window + run-loop.
//!
//! Owns the `winit` event loop and window, wires them to the GPU layer, and
//! drives the presented scene on a fixed tick.

mod config;
mod runtime;

pub use config::AppConfig;
pub use runtime::Application;
