//! Fixed-step clock
//!
//! Turns variable frame times into a whole number of simulation ticks.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Accumulates elapsed time and hands out fixed ticks
#[derive(Debug, Clone)]
pub struct FixedStep {
    accumulator: f64,
    dt: f64,
    max_frame_dt: f64,
    max_substeps: u32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_FRAME_DT, MAX_SUBSTEPS)
    }
}

impl FixedStep {
    pub fn new(dt: f64, max_frame_dt: f64, max_substeps: u32) -> Self {
        Self {
            accumulator: 0.0,
            dt,
            max_frame_dt,
            max_substeps,
        }
    }

    /// Feed a frame's elapsed seconds; returns how many ticks to run.
    /// Long frames are clamped and substeps capped to prevent spiral of death.
    pub fn advance(&mut self, elapsed: f64) -> u32 {
        self.accumulator += elapsed.clamp(0.0, self.max_frame_dt);

        let mut steps = 0;
        while self.accumulator >= self.dt && steps < self.max_substeps {
            self.accumulator -= self.dt;
            steps += 1;
        }
        steps
    }

    /// Fraction of a tick left in the accumulator (for interpolation)
    pub fn alpha(&self) -> f64 {
        self.accumulator / self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_partial_frames() {
        let mut clock = FixedStep::new(0.01, 1.0, 8);
        assert_eq!(clock.advance(0.004), 0);
        assert_eq!(clock.advance(0.004), 0);
        assert_eq!(clock.advance(0.004), 1);
        assert!((clock.alpha() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_caps_substeps() {
        let mut clock = FixedStep::new(0.01, 1.0, 8);
        assert_eq!(clock.advance(0.5), 8);
    }

    #[test]
    fn test_clamps_long_frames() {
        let mut clock = FixedStep::new(0.01, 0.035, 100);
        assert_eq!(clock.advance(10.0), 3);
    }

    #[test]
    fn test_ignores_negative_time() {
        let mut clock = FixedStep::default();
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.alpha(), 0.0);
    }

    #[test]
    fn test_default_runs_at_tick_rate() {
        let mut clock = FixedStep::default();
        assert_eq!(clock.advance(0.04), 2);
    }
}
