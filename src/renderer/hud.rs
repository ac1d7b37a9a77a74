//! HUD text
//!
//! Computed from the session each frame; the web entry point copies it into
//! DOM elements.

use crate::audio::SoundSink;
use crate::persistence::KeyValueStore;
use crate::session::Session;
use crate::sim::GamePhase;

pub const TITLE: &str = "Simple Collect Game";
pub const CONTROLS: &str = "Use Arrows / A D to move, Space to jump";
pub const START_PROMPT: &str = "Press Space to Start";
pub const RESTART_PROMPT: &str = "Press Space to Restart";
pub const NEW_HIGH_SCORE: &str = "New high score!";

/// Which overlay is showing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Start,
    GameOver {
        final_score: u32,
        new_high_score: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudView {
    pub score: String,
    pub best: String,
    pub mode: String,
    pub overlay: Overlay,
}

impl HudView {
    pub fn new<S: KeyValueStore, A: SoundSink>(session: &Session<S, A>) -> Self {
        let settings = session.settings();
        let overlay = match session.phase() {
            GamePhase::Start => Overlay::Start,
            GamePhase::Playing => Overlay::None,
            GamePhase::GameOver => Overlay::GameOver {
                final_score: session.score(),
                new_high_score: session.new_high_score(),
            },
        };
        Self {
            score: format!("Score: {}", session.score()),
            best: format!("Best: {}", session.best_score()),
            mode: format!(
                "Mode: {} | Sound: {}",
                settings.difficulty.label(),
                if settings.sound_enabled { "On" } else { "Off" }
            ),
            overlay,
        }
    }

    /// Final score line for the game over panel
    pub fn final_score_text(&self) -> Option<String> {
        match self.overlay {
            Overlay::GameOver { final_score, .. } => Some(format!("Final Score: {}", final_score)),
            _ => None,
        }
    }

    pub fn show_high_score_banner(&self) -> bool {
        matches!(
            self.overlay,
            Overlay::GameOver {
                new_high_score: true,
                ..
            }
        )
    }
}
