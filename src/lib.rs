//! Coin Dash - a single-screen coin collecting platformer
//!
//! Core modules:
//! - `sim`: Simulation (player physics, ground/bounds collision, coin pickup, win detection)
//! - `session`: Start/reset/game-over transitions, score and best score bookkeeping
//! - `renderer`: Scene building, HUD text and the WebGPU pipeline
//! - `platform`: Frame clock, input snapshots, viewport fitting
//! - `persistence`: Best-effort string key/value storage
//! - `tuning` / `difficulty`: Data-driven physics presets

pub mod audio;
pub mod difficulty;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use difficulty::Difficulty;
pub use highscores::BestScore;
pub use session::Session;
pub use settings::Settings;
pub use tuning::PhysicsTuning;

/// Game configuration constants
pub mod consts {
    /// Logical playfield size (all simulation and rendering uses these units)
    pub const LOGICAL_WIDTH: f32 = 800.0;
    pub const LOGICAL_HEIGHT: f32 = 450.0;

    /// Largest time step handed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 1.0 / 20.0;

    /// Ground line; the player's lower edge never goes below it
    pub const GROUND_Y: f32 = 400.0;
    /// Horizontal walls the player is clamped between
    pub const WALL_LEFT: f32 = 10.0;
    pub const WALL_RIGHT: f32 = 790.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 36.0;
    pub const PLAYER_HEIGHT: f32 = 48.0;
    pub const PLAYER_SPAWN_X: f32 = 80.0;
    pub const PLAYER_SPAWN_Y: f32 = 350.0;

    /// Coin layout: a row stepping up in a 3-high zigzag
    pub const COIN_COUNT: usize = 8;
    pub const COIN_RADIUS: f32 = 10.0;
    pub const COIN_FIRST_X: f32 = 220.0;
    pub const COIN_SPACING_X: f32 = 70.0;
    pub const COIN_BASE_Y: f32 = 300.0;
    pub const COIN_STEP_Y: f32 = 40.0;
    /// Fraction of the player's larger dimension added to the coin radius for pickup
    pub const PICKUP_REACH: f32 = 0.25;

    /// Points per collected coin
    pub const COIN_SCORE: u32 = 10;
}

/// Clamp a raw frame delta into the range the simulation accepts
#[inline]
pub fn clamp_frame_dt(dt: f32) -> f32 {
    if dt.is_finite() {
        dt.clamp(0.0, consts::MAX_FRAME_DT)
    } else {
        0.0
    }
}
