//! Fixed-step animation clock.

/// Time accumulator advanced by a fixed step once per rendered frame.
///
/// The step does not depend on wall-clock time, so animation speed follows
/// the display refresh rate. Time is derived from the frame count, so after
/// `n` frames it is exactly `step * n` with no accumulated rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    step: f32,
    frames: u64,
}

impl FrameClock {
    pub fn new(step: f32) -> Self {
        Self { step, frames: 0 }
    }

    /// Advances one frame and returns the new time.
    pub fn advance(&mut self) -> f32 {
        self.frames += 1;
        self.time()
    }

    /// Current animation time.
    pub fn time(&self) -> f32 {
        self.step * self.frames as f32
    }

    /// Number of frames advanced so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn step(&self) -> f32 {
        self.step
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(0.05)
    }
}
