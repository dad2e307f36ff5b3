/// Per-second counts published by [`RateCounter`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Rates {
    /// Fixed updates in the last full second.
    pub updates: u32,
    /// Rendered frames in the last full second.
    pub frames: u32,
}

/// Counts fixed updates and frames, publishing the totals once per second.
#[derive(Debug, Clone, Default)]
pub struct RateCounter {
    updates: u32,
    frames: u32,
    since_publish: f32,
    last: Rates,
}

impl RateCounter {
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    pub fn record_frame(&mut self) {
        self.frames += 1;
    }

    /// Advances by `dt` seconds. Returns the new totals when a second boundary
    /// was crossed; the counters then restart from zero.
    pub fn advance(&mut self, dt: f32) -> Option<Rates> {
        self.since_publish += dt;
        if self.since_publish < 1.0 {
            return None;
        }

        self.since_publish -= 1.0;
        self.last = Rates {
            updates: self.updates,
            frames: self.frames,
        };
        self.updates = 0;
        self.frames = 0;
        Some(self.last)
    }

    /// Totals of the last published second.
    pub fn last(&self) -> Rates {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publishes_once_per_second() {
        let mut rates = RateCounter::default();
        for _ in 0..4 {
            rates.record_frame();
            assert_eq!(rates.advance(0.2), None);
        }
        rates.record_update();
        rates.record_frame();

        let published = rates.advance(0.25);
        assert_eq!(published, Some(Rates { updates: 1, frames: 5 }));
        assert_eq!(rates.last(), Rates { updates: 1, frames: 5 });

        // Remainder carries into the next second.
        assert_eq!(rates.advance(0.9), None);
        assert_eq!(rates.advance(0.1), Some(Rates::default()));
    }
}
