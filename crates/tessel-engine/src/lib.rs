//! Tessel engine crate.
//!
//! A small 2D game framework: a batched quad renderer on wgpu, orthographic
//! cameras, scenes with overridable hooks, and a winit run-loop that ties
//! update, fixed update, render and event routing together.

pub mod core;
pub mod device;
pub mod input;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;

pub use crate::core::{AppCtx, Event, KeyEvent, MouseButtonEvent};
pub use crate::window::{AppConfig, Application};
