//! Geometry value types shared by scenes, input and the renderer.
//!
//! Canonical scene space:
//! - application units (independent of backbuffer pixels)
//! - origin at the scene center
//! - +X right, +Y up
//!
//! Window-space positions reported by input events use logical pixels with a
//! top-left origin; scenes convert as they see fit.

mod point;
mod rect;
mod size;

pub use point::Point;
pub use rect::Rect;
pub use size::Size;
