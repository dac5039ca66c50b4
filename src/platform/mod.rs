//! Platform abstraction layer
//!
//! Handles host-side timing: turning elapsed wall time into a whole number
//! of fixed simulation ticks.

use std::time::Duration;

/// Longest frame accepted before clamping (e.g. after a stall)
const MAX_FRAME: Duration = Duration::from_millis(100);

/// Fixed timestep accumulator
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: Duration,
    max_substeps: u32,
    accumulator: Duration,
}

impl FixedTimestep {
    pub fn new(step: Duration, max_substeps: u32) -> Self {
        Self {
            step: step.max(Duration::from_millis(1)),
            max_substeps: max_substeps.max(1),
            accumulator: Duration::ZERO,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Add elapsed time and return how many ticks to run now
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed.min(MAX_FRAME);

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_substeps {
            self.accumulator -= self.step;
            ticks += 1;
        }

        // Drop backlog we could not catch up on (spiral of death)
        if self.accumulator >= self.step {
            let remainder =
                Duration::from_nanos((self.accumulator.as_nanos() % self.step.as_nanos()) as u64);
            log::debug!(
                "Dropping {:?} of simulation backlog",
                self.accumulator - remainder
            );
            self.accumulator = remainder;
        }

        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_accumulates_partial_frames() {
        let mut clock = FixedTimestep::new(ms(16), 8);
        assert_eq!(clock.advance(ms(10)), 0);
        assert_eq!(clock.advance(ms(10)), 1);
        assert_eq!(clock.advance(ms(12)), 1);
        assert_eq!(clock.advance(ms(0)), 0);
    }

    #[test]
    fn test_multiple_ticks_per_frame() {
        let mut clock = FixedTimestep::new(ms(16), 8);
        assert_eq!(clock.advance(ms(50)), 3);
        // 2 ms carried over
        assert_eq!(clock.advance(ms(13)), 0);
        assert_eq!(clock.advance(ms(1)), 1);
    }

    #[test]
    fn test_substep_cap_drops_backlog() {
        let mut clock = FixedTimestep::new(ms(10), 4);
        // 100 ms would be 10 ticks; only 4 run and the rest is discarded
        assert_eq!(clock.advance(ms(100)), 4);
        assert_eq!(clock.advance(ms(0)), 0);
        assert_eq!(clock.advance(ms(9)), 0);
        assert_eq!(clock.advance(ms(1)), 1);
    }

    #[test]
    fn test_long_stall_is_clamped() {
        let mut clock = FixedTimestep::new(ms(16), 100);
        assert_eq!(clock.advance(Duration::from_secs(5)), 6);
    }
}
