//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! `platform` translates window-system events into [`crate::core::Event`]s;
//! [`InputState`] folds those into held-key/button queries.

pub(crate) mod platform;
mod state;
mod types;

pub use state::InputState;
pub use types::{Key, Modifiers, MouseButton};
