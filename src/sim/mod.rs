//! Simulation module
//!
//! All gameplay logic lives here. It must stay free of rendering and
//! platform dependencies:
//! - State is passed in explicitly, no globals
//! - Input arrives as a per-frame snapshot
//! - Side effects are reported as events for the caller to act on

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{clamp_to_walls, coin_in_reach, resolve_ground};
pub use state::{Coin, GameEvent, GamePhase, GameState, Player, spawn_coins};
pub use tick::{FrameInput, tick};
