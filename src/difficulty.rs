//! Named difficulty presets
//!
//! Stored by name so the persisted value stays readable and survives
//! tuning changes.

use serde::{Deserialize, Serialize};

use crate::tuning::PhysicsTuning;

/// Difficulty preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    /// Display label for the HUD
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Parse a persisted name, falling back to the default preset
    pub fn from_str_or_default(s: Option<&str>) -> Self {
        s.and_then(Self::from_str).unwrap_or_default()
    }

    /// Physics for this preset
    pub fn tuning(&self) -> PhysicsTuning {
        match self {
            // Floatier jump, enough to reach the top coin row
            Difficulty::Easy => PhysicsTuning {
                speed: 220.0,
                jump_impulse: -620.0,
                gravity: 1200.0,
            },
            Difficulty::Normal => PhysicsTuning::default(),
            Difficulty::Hard => PhysicsTuning {
                speed: 300.0,
                jump_impulse: -460.0,
                gravity: 1600.0,
            },
        }
    }
}
