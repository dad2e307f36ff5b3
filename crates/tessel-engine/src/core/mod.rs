//! Application-facing contracts.
//!
//! Events, the per-hook [`AppCtx`], and the routing of events to the
//! presented scene. Nothing here touches the window system or the GPU
//! directly, so all of it is testable headless.

mod ctx;
mod dispatch;
mod event;

pub use ctx::{AppCtx, Command, RunStats};
pub use dispatch::{dispatch, Flow};
pub use event::{Event, EventQueue, KeyEvent, MouseButtonEvent};
