//! Scene building: game state to a triangle list
//!
//! Pure read of the state; text lives in the DOM HUD (see `hud`).

use super::shapes::{circle, rect, ring};
use super::vertex::{Vertex, colors};
use crate::consts::{GROUND_Y, LOGICAL_HEIGHT, LOGICAL_WIDTH};
use crate::sim::{GamePhase, GameState};

/// Segments used for coin discs
const COIN_SEGMENTS: u32 = 20;
/// Eye square size and placement relative to the player's top corners
const EYE_SIZE: f32 = 6.0;
const EYE_INSET_X: f32 = 8.0;
const EYE_OFFSET_Y: f32 = 12.0;

/// Build every triangle for the current frame, back to front
pub fn build_scene(state: &GameState) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(1024);

    vertices.extend(rect(0.0, 0.0, LOGICAL_WIDTH, LOGICAL_HEIGHT, colors::BACKGROUND));
    vertices.extend(rect(
        0.0,
        GROUND_Y,
        LOGICAL_WIDTH,
        LOGICAL_HEIGHT - GROUND_Y,
        colors::GROUND,
    ));

    for coin in state.coins.iter().filter(|c| !c.collected) {
        vertices.extend(circle(coin.pos, coin.radius, colors::COIN, COIN_SEGMENTS));
        vertices.extend(ring(
            coin.pos,
            coin.radius - 1.0,
            coin.radius,
            colors::COIN_RIM,
            COIN_SEGMENTS,
        ));
    }

    let p = &state.player;
    vertices.extend(rect(p.pos.x, p.pos.y, p.size.x, p.size.y, colors::PLAYER));
    vertices.extend(rect(
        p.pos.x + EYE_INSET_X,
        p.pos.y + EYE_OFFSET_Y,
        EYE_SIZE,
        EYE_SIZE,
        colors::EYE,
    ));
    vertices.extend(rect(
        p.pos.x + p.size.x - EYE_INSET_X - EYE_SIZE,
        p.pos.y + EYE_OFFSET_Y,
        EYE_SIZE,
        EYE_SIZE,
        colors::EYE,
    ));

    // Dim panel behind the DOM overlay text
    match state.phase {
        GamePhase::Start => vertices.extend(rect(100.0, 90.0, 600.0, 260.0, colors::OVERLAY)),
        GamePhase::GameOver => vertices.extend(rect(120.0, 120.0, 560.0, 210.0, colors::OVERLAY)),
        GamePhase::Playing => {}
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECT: usize = 6;
    const COIN: usize = (COIN_SEGMENTS * 3 + COIN_SEGMENTS * 6) as usize;

    fn playing() -> GameState {
        let mut state = GameState::default();
        state.phase = GamePhase::Playing;
        state
    }

    #[test]
    fn test_playing_scene_layers() {
        let state = playing();
        let v = build_scene(&state);
        // background, ground, 8 coins, body, two eyes
        assert_eq!(v.len(), 2 * RECT + 8 * COIN + 3 * RECT);
        assert_eq!(v[0].color, colors::BACKGROUND);
        assert_eq!(v[RECT].color, colors::GROUND);
    }

    #[test]
    fn test_collected_coins_not_drawn() {
        let mut state = playing();
        state.coins[0].collected = true;
        state.coins[5].collected = true;
        let v = build_scene(&state);
        assert_eq!(v.len(), 2 * RECT + 6 * COIN + 3 * RECT);
    }

    #[test]
    fn test_eyes_follow_player() {
        let mut state = playing();
        state.player.pos = glam::Vec2::new(200.0, 300.0);
        let v = build_scene(&state);
        let eyes: Vec<&Vertex> = v.iter().filter(|v| v.color == colors::EYE).collect();
        assert_eq!(eyes.len(), 2 * RECT);
        // Left eye top-left corner, right eye top-left corner
        assert_eq!(eyes[0].position, [208.0, 312.0]);
        assert_eq!(eyes[RECT].position, [222.0, 312.0]);
    }

    #[test]
    fn test_overlay_only_off_play() {
        let overlay_count =
            |s: &GameState| build_scene(s).iter().filter(|v| v.color == colors::OVERLAY).count();

        let mut state = playing();
        assert_eq!(overlay_count(&state), 0);
        state.phase = GamePhase::Start;
        assert_eq!(overlay_count(&state), RECT);
        state.phase = GamePhase::GameOver;
        assert_eq!(overlay_count(&state), RECT);
    }

    #[test]
    fn test_scene_does_not_mutate() {
        let state = playing();
        let before = format!("{:?}", state);
        build_scene(&state);
        assert_eq!(format!("{:?}", state), before);
    }
}
