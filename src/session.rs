//! Session controller
//!
//! Owns the game state for the life of the page and everything around it:
//! start/reset transitions, best score, difficulty and sound preferences.
//! Storage and audio are collaborators handed in at construction.

use crate::audio::{SoundEffect, SoundSink};
use crate::clamp_frame_dt;
use crate::difficulty::Difficulty;
use crate::highscores::BestScore;
use crate::persistence::KeyValueStore;
use crate::settings::Settings;
use crate::sim::{FrameInput, GameEvent, GamePhase, GameState, tick};

pub struct Session<S, A> {
    state: GameState,
    best: BestScore,
    /// Set when the last finished round beat the previous best
    new_high_score: bool,
    settings: Settings,
    store: S,
    audio: A,
}

impl<S: KeyValueStore, A: SoundSink> Session<S, A> {
    /// Read persisted preferences and best score once, land on the title screen
    pub fn load(store: S, mut audio: A) -> Self {
        let settings = Settings::load(&store);
        let best = BestScore::load(&store);
        audio.set_enabled(settings.sound_enabled);
        Self {
            state: GameState::new(&settings.difficulty.tuning()),
            best,
            new_high_score: false,
            settings,
            store,
            audio,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn best_score(&self) -> u32 {
        self.best.value()
    }

    pub fn new_high_score(&self) -> bool {
        self.new_high_score
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Begin a fresh round
    pub fn start(&mut self) {
        self.state.reset_round();
        self.state.phase = GamePhase::Playing;
        self.new_high_score = false;
        log::info!("Round started ({})", self.settings.difficulty.as_str());
    }

    /// Back to the title screen with a clean round laid out
    pub fn reset(&mut self) {
        self.state.reset_round();
        self.state.phase = GamePhase::Start;
        log::info!("Back to title");
    }

    /// The start/restart trigger. Returns false while playing so the same
    /// key can act as jump.
    pub fn press_start(&mut self) -> bool {
        match self.state.phase {
            GamePhase::Start => {
                self.start();
                true
            }
            GamePhase::GameOver => {
                self.reset();
                true
            }
            GamePhase::Playing => false,
        }
    }

    /// Run one frame of simulation with a raw (uncapped) delta
    pub fn frame(&mut self, input: &FrameInput, dt: f32) -> Vec<GameEvent> {
        let events = tick(&mut self.state, input, clamp_frame_dt(dt));
        for event in &events {
            match *event {
                GameEvent::Jumped => self.audio.play(SoundEffect::Jump),
                GameEvent::CoinCollected { .. } => self.audio.play(SoundEffect::CoinCollect),
                GameEvent::Won { score } => self.finish_round(score),
            }
        }
        events
    }

    /// Playing -> GameOver bookkeeping; runs once per round
    fn finish_round(&mut self, score: u32) {
        self.new_high_score = self.best.submit(score);
        if self.new_high_score {
            self.best.save(&mut self.store);
            log::info!("New high score: {}", score);
        } else {
            log::info!("Round finished with {} (best {})", score, self.best.value());
        }
        self.audio.play(SoundEffect::GameOver);
    }

    /// Switch preset; takes effect immediately, even mid-round
    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        self.settings.difficulty = difficulty;
        self.state.apply_tuning(&difficulty.tuning());
        self.settings.save_difficulty(&mut self.store);
        log::info!("Difficulty set to {}", difficulty.as_str());
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.settings.sound_enabled = enabled;
        self.audio.set_enabled(enabled);
        self.settings.save_sound(&mut self.store);
    }

    /// Flip sound on/off, returning the new state
    pub fn toggle_sound(&mut self) -> bool {
        let enabled = !self.settings.sound_enabled;
        self.set_sound_enabled(enabled);
        enabled
    }
}
