/// Fixed-step accumulator for `fixed_update`.
///
/// Each tick adds its wall delta; a step is taken once enough time has
/// accumulated. At most one step is released per tick, so after a stall the
/// backlog drains over the following ticks instead of bursting.
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: f32,
    accumulated: f32,
}

impl FixedStep {
    pub const DEFAULT_RATE: u32 = 60;

    /// Accumulator stepping `rate` times per second.
    ///
    /// Panics if `rate` is zero.
    pub fn new(rate: u32) -> Self {
        assert!(rate > 0, "fixed update rate must be positive");
        Self {
            step: 1.0 / rate as f32,
            accumulated: 0.0,
        }
    }

    /// Step length in seconds.
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Changes the rate. Time already accumulated is kept.
    pub fn set_rate(&mut self, rate: u32) {
        assert!(rate > 0, "fixed update rate must be positive");
        self.step = 1.0 / rate as f32;
    }

    pub fn accumulate(&mut self, dt: f32) {
        self.accumulated += dt;
    }

    /// Consumes one step if available and returns its length.
    pub fn take_step(&mut self) -> Option<f32> {
        if self.accumulated >= self.step {
            self.accumulated -= self.step;
            Some(self.step)
        } else {
            None
        }
    }

    pub fn accumulated(&self) -> f32 {
        self.accumulated
    }
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_after_enough_time() {
        let mut fixed = FixedStep::new(100);
        fixed.accumulate(0.004);
        assert_eq!(fixed.take_step(), None);
        fixed.accumulate(0.007);
        assert_eq!(fixed.take_step(), Some(0.01));
        assert!((fixed.accumulated() - 0.001).abs() < 1e-6);
    }

    #[test]
    fn releases_one_step_per_call() {
        let mut fixed = FixedStep::new(10);
        fixed.accumulate(0.35);
        assert!(fixed.take_step().is_some());
        assert!((fixed.accumulated() - 0.25).abs() < 1e-6);
        assert!(fixed.take_step().is_some());
        assert!(fixed.take_step().is_some());
        assert_eq!(fixed.take_step(), None);
    }

    #[test]
    fn rate_change_keeps_backlog() {
        let mut fixed = FixedStep::default();
        assert!((fixed.step() - 1.0 / 60.0).abs() < 1e-9);
        fixed.accumulate(0.005);
        fixed.set_rate(144);
        assert!((fixed.step() - 1.0 / 144.0).abs() < 1e-9);
        assert_eq!(fixed.accumulated(), 0.005);
    }

    #[test]
    #[should_panic(expected = "must be positive")]
    fn zero_rate_is_rejected() {
        FixedStep::new(0);
    }
}
