//! Fixed-timestep accumulator.
//!
//! Render frames arrive at irregular intervals; physics advances in fixed
//! sub-steps. Wall-clock time is accumulated and spent in whole sub-steps,
//! the remainder carried to the next frame. Long pauses are clamped so a
//! stall never turns into an unbounded catch-up.

use crate::config::WorldConfig;

/// How many sub-steps one frame should run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepPlan {
    pub substeps: u32,
    /// Wall-clock seconds dropped by the frame clamp or the sub-step cap.
    pub discarded: f32,
}

#[derive(Debug, Clone)]
pub struct Stepper {
    fixed_dt: f32,
    max_frame_delta: f32,
    max_substeps: u32,
    leftover: f32,
}

impl Stepper {
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            fixed_dt: config.fixed_dt,
            max_frame_delta: config.max_frame_delta,
            max_substeps: config.max_substeps,
            leftover: 0.0,
        }
    }

    pub fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }

    /// Time carried over to the next frame, always below one sub-step.
    pub fn leftover(&self) -> f32 {
        self.leftover
    }

    /// Fraction of a sub-step carried over, for render interpolation.
    pub fn alpha(&self) -> f32 {
        self.leftover / self.fixed_dt
    }

    pub fn reset(&mut self) {
        self.leftover = 0.0;
    }

    /// Accumulate `elapsed` wall-clock seconds and return the number of
    /// sub-steps to run. Negative or non-finite input counts as no time.
    pub fn advance(&mut self, elapsed: f32) -> StepPlan {
        let elapsed = if elapsed.is_finite() && elapsed > 0.0 {
            elapsed
        } else {
            0.0
        };
        let clamped = elapsed.min(self.max_frame_delta);
        let mut discarded = elapsed - clamped;

        self.leftover += clamped;
        let mut substeps = 0;
        while self.leftover >= self.fixed_dt && substeps < self.max_substeps {
            self.leftover -= self.fixed_dt;
            substeps += 1;
        }
        if self.leftover >= self.fixed_dt {
            let kept = self.leftover % self.fixed_dt;
            discarded += self.leftover - kept;
            self.leftover = kept;
        }

        StepPlan {
            substeps,
            discarded,
        }
    }
}
