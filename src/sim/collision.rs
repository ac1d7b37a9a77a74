//! Collision tests and responses for the single-screen playfield
//!
//! There is only one surface (the ground line) and two walls, so responses
//! are hard snaps rather than reflections.

use glam::Vec2;

use super::state::{Coin, Player};
use crate::consts::{GROUND_Y, WALL_LEFT, WALL_RIGHT};

/// Clamp the player between the side walls
pub fn clamp_to_walls(player: &mut Player) {
    let max_x = WALL_RIGHT - player.size.x;
    if player.pos.x < WALL_LEFT {
        player.pos.x = WALL_LEFT;
    }
    if player.pos.x > max_x {
        player.pos.x = max_x;
    }
}

/// Snap the player onto the ground if its lower edge reached it.
///
/// Returns true when the player is resting on the ground after the call.
pub fn resolve_ground(player: &mut Player) -> bool {
    if player.bottom() >= GROUND_Y {
        player.pos.y = GROUND_Y - player.size.y;
        player.vel.y = 0.0;
        player.on_ground = true;
    }
    player.on_ground
}

/// Whether a point is within pickup distance of a coin
pub fn coin_in_reach(center: Vec2, reach: f32, coin: &Coin) -> bool {
    center.distance(coin.pos) < coin.radius + reach
}
