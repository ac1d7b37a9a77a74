//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::PhysicsTuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// Title screen, waiting for the start action
    #[default]
    Start,
    /// Active gameplay
    Playing,
    /// All coins collected
    GameOver,
}

impl GamePhase {
    /// Whether `self -> next` is a legal transition
    pub fn can_transition_to(self, next: GamePhase) -> bool {
        matches!(
            (self, next),
            (GamePhase::Start, GamePhase::Playing)
                | (GamePhase::Playing, GamePhase::GameOver)
                | (GamePhase::GameOver, GamePhase::Start)
        )
    }
}

/// Something that happened during a tick, for sound and bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Player left the ground
    Jumped,
    /// Coin at `index` was picked up
    CoinCollected { index: usize },
    /// Last coin collected; phase is now GameOver
    Won { score: u32 },
}

/// The player sprite. `pos` is the top-left corner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Run speed (units/s)
    pub speed: f32,
    /// Vertical velocity applied on jump (negative = up)
    pub jump_impulse: f32,
    pub on_ground: bool,
}

impl Player {
    pub fn new(tuning: &PhysicsTuning) -> Self {
        Self {
            pos: Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y),
            vel: Vec2::ZERO,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            speed: tuning.speed,
            jump_impulse: tuning.jump_impulse,
            on_ground: false,
        }
    }

    /// Put the player back at the spawn point, standing still and airborne
    pub fn respawn(&mut self) {
        self.pos = Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y);
        self.vel = Vec2::ZERO;
        self.on_ground = false;
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Lower edge of the sprite
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Extra reach added to a coin's radius when testing pickup
    pub fn pickup_reach(&self) -> f32 {
        self.size.x.max(self.size.y) * PICKUP_REACH
    }
}

/// A collectable coin. `pos` is the centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub pos: Vec2,
    pub radius: f32,
    pub collected: bool,
}

impl Coin {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: COIN_RADIUS,
            collected: false,
        }
    }
}

/// The round's coin layout, all uncollected
pub fn spawn_coins() -> Vec<Coin> {
    (0..COIN_COUNT)
        .map(|i| {
            let x = COIN_FIRST_X + i as f32 * COIN_SPACING_X;
            let y = COIN_BASE_Y - (i % 3) as f32 * COIN_STEP_Y;
            Coin::new(Vec2::new(x, y))
        })
        .collect()
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub score: u32,
    pub player: Player,
    pub coins: Vec<Coin>,
    /// Active downward acceleration
    pub gravity: f32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&PhysicsTuning::default())
    }
}

impl GameState {
    /// Fresh state on the title screen
    pub fn new(tuning: &PhysicsTuning) -> Self {
        Self {
            phase: GamePhase::Start,
            score: 0,
            player: Player::new(tuning),
            coins: spawn_coins(),
            gravity: tuning.gravity,
        }
    }

    /// Swap in new physics. Position and velocity are left alone.
    pub fn apply_tuning(&mut self, tuning: &PhysicsTuning) {
        self.player.speed = tuning.speed;
        self.player.jump_impulse = tuning.jump_impulse;
        self.gravity = tuning.gravity;
    }

    /// Clear score, respawn player and coins
    pub fn reset_round(&mut self) {
        self.score = 0;
        self.player.respawn();
        self.coins = spawn_coins();
    }

    pub fn coins_remaining(&self) -> usize {
        self.coins.iter().filter(|c| !c.collected).count()
    }

    pub fn all_collected(&self) -> bool {
        self.coins.iter().all(|c| c.collected)
    }
}
