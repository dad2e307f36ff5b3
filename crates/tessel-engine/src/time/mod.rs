//! Time subsystem.
//!
//! Run-loop timing that does not depend on the window system:
//! - `FrameClock` measures wall time between ticks
//! - `FixedStep` decides when `fixed_update` runs
//! - `RateCounter` publishes updates/frames per second

mod fixed_step;
mod frame_clock;
mod rate;

pub use fixed_step::FixedStep;
pub use frame_clock::{FrameClock, FrameTime};
pub use rate::{RateCounter, Rates};
