//! Data-driven physics balance
//!
//! Everything that changes how the player moves lives here so a difficulty
//! preset can swap it in one assignment.

use serde::{Deserialize, Serialize};

/// Movement and gravity constants for one round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsTuning {
    /// Horizontal run speed (units/s)
    pub speed: f32,
    /// Vertical velocity set on jump (negative = up)
    pub jump_impulse: f32,
    /// Downward acceleration (units/s²)
    pub gravity: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            speed: 240.0,
            jump_impulse: -480.0,
            gravity: 1400.0,
        }
    }
}

impl PhysicsTuning {
    /// Highest rise above the take-off point for a full jump
    pub fn jump_apex(&self) -> f32 {
        if self.gravity <= 0.0 {
            return f32::INFINITY;
        }
        self.jump_impulse * self.jump_impulse / (2.0 * self.gravity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_apex() {
        let tuning = PhysicsTuning::default();
        // 480² / 2800
        assert!((tuning.jump_apex() - 82.285_71).abs() < 1e-3);
    }
}
