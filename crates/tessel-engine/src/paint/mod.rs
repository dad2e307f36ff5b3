//! Color model shared by scenes and the renderer.

pub mod color;

pub use color::Color;
