//! Frame clock
//!
//! Turns animation-frame timestamps (milliseconds) into capped deltas
//! (seconds) so a tab coming back from the background doesn't produce one
//! huge integration step.

use crate::clamp_frame_dt;

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start timing from `now_ms`; the next delta is measured from here
    pub fn with_start(now_ms: f64) -> Self {
        Self {
            last_ms: Some(now_ms),
            frames: 0,
        }
    }

    /// Delta since the previous call, capped. The first call returns 0.
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        self.frames += 1;
        clamp_frame_dt(dt)
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_FRAME_DT;

    #[test]
    fn test_first_frame_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(1234.0), 0.0);
        assert_eq!(clock.frame_count(), 1);
    }

    #[test]
    fn test_regular_frames() {
        let mut clock = FrameClock::with_start(1000.0);
        let dt = clock.delta(1016.0);
        assert!((dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_long_pause_is_capped() {
        let mut clock = FrameClock::with_start(0.0);
        assert_eq!(clock.delta(5000.0), MAX_FRAME_DT);
    }

    #[test]
    fn test_clock_going_backwards_is_zero() {
        let mut clock = FrameClock::with_start(500.0);
        assert_eq!(clock.delta(400.0), 0.0);
    }
}
