//! Scenes: what the application presents.
//!
//! A scene owns a [`SceneState`] and implements the [`Scene`] hooks it needs.
//! The runtime routes events and ticks to the presented scene; the renderer
//! draws it through [`Scene::render`].

mod hooks;
mod state;

pub use hooks::Scene;
pub use state::SceneState;
