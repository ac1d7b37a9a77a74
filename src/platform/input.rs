//! Input state
//!
//! Event handlers flip level flags between frames; the game loop takes one
//! `FrameInput` snapshot per frame. The start/restart trigger is an edge and
//! is consumed by the snapshot that sees it.

use crate::difficulty::Difficulty;
use crate::sim::FrameInput;

/// What a physical key or button means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Left,
    Right,
    /// Jump while playing, start/restart otherwise
    JumpOrStart,
    ToggleSound,
    SelectDifficulty(Difficulty),
}

impl Action {
    /// Map a `KeyboardEvent.code` value
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Action::Left),
            "ArrowRight" | "KeyD" => Some(Action::Right),
            "Space" => Some(Action::JumpOrStart),
            "KeyM" => Some(Action::ToggleSound),
            "Digit1" => Some(Action::SelectDifficulty(Difficulty::Easy)),
            "Digit2" => Some(Action::SelectDifficulty(Difficulty::Normal)),
            "Digit3" => Some(Action::SelectDifficulty(Difficulty::Hard)),
            _ => None,
        }
    }
}

/// Produces one input snapshot per frame
pub trait InputProvider {
    fn snapshot(&mut self) -> FrameInput;
}

/// Level flags set by keyboard and touch handlers
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    start_requested: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a movement level. Non-movement actions are ignored here.
    pub fn set_level(&mut self, action: Action, down: bool) {
        match action {
            Action::Left => self.left = down,
            Action::Right => self.right = down,
            Action::JumpOrStart => self.jump = down,
            Action::ToggleSound | Action::SelectDifficulty(_) => {}
        }
    }

    /// Latch a start/restart request for the next frame
    pub fn request_start(&mut self) {
        self.start_requested = true;
    }

    /// Take the pending start request, if any
    pub fn take_start(&mut self) -> bool {
        std::mem::take(&mut self.start_requested)
    }

    /// Release everything (window blur, restart)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl InputProvider for InputState {
    fn snapshot(&mut self) -> FrameInput {
        FrameInput {
            left: self.left,
            right: self.right,
            jump: self.jump,
        }
    }
}
