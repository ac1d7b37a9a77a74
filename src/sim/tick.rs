//! Per-frame simulation step
//!
//! Advances the player, resolves walls and ground, picks up coins and
//! detects the win. Does nothing outside of `GamePhase::Playing`.

use super::collision::{clamp_to_walls, coin_in_reach, resolve_ground};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::COIN_SCORE;

/// Input levels for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl FrameInput {
    /// Horizontal direction in {-1, 0, 1}. Left wins when both are held.
    pub fn direction(&self) -> f32 {
        if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        }
    }
}

/// Advance the game state by `dt` seconds.
///
/// `dt` must already be clamped (see [`crate::clamp_frame_dt`]).
pub fn tick(state: &mut GameState, input: &FrameInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Playing {
        return events;
    }

    let player = &mut state.player;

    // Horizontal speed is a direct function of input, never accumulated
    player.vel.x = input.direction() * player.speed;

    player.vel.y += state.gravity * dt;

    // Jump overrides the frame's vertical velocity
    if input.jump && player.on_ground {
        player.vel.y = player.jump_impulse;
        player.on_ground = false;
        events.push(GameEvent::Jumped);
    }

    player.pos += player.vel * dt;

    clamp_to_walls(player);
    resolve_ground(player);

    let center = player.center();
    let reach = player.pickup_reach();
    for (index, coin) in state.coins.iter_mut().enumerate() {
        if coin.collected || !coin_in_reach(center, reach, coin) {
            continue;
        }
        coin.collected = true;
        state.score += COIN_SCORE;
        log::debug!("Coin {} collected, score {}", index, state.score);
        events.push(GameEvent::CoinCollected { index });
    }

    if state.all_collected() {
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::Won { score: state.score });
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::tuning::PhysicsTuning;
    use glam::Vec2;
    use proptest::prelude::*;

    const DT: f32 = 0.016;

    fn playing() -> GameState {
        let mut state = GameState::new(&PhysicsTuning::default());
        state.phase = GamePhase::Playing;
        state
    }

    /// Park the player far from every coin, standing on the ground
    fn grounded_at(state: &mut GameState, x: f32) {
        state.player.pos = Vec2::new(x, GROUND_Y - PLAYER_HEIGHT);
        state.player.vel = Vec2::ZERO;
        state.player.on_ground = true;
    }

    #[test]
    fn test_idle_outside_playing() {
        for phase in [GamePhase::Start, GamePhase::GameOver] {
            let mut state = GameState::default();
            state.phase = phase;
            let before = state.player.pos;
            let input = FrameInput {
                right: true,
                jump: true,
                ..Default::default()
            };
            let events = tick(&mut state, &input, DT);
            assert!(events.is_empty());
            assert_eq!(state.player.pos, before);
            assert_eq!(state.phase, phase);
        }
    }

    #[test]
    fn test_horizontal_velocity_is_set_not_accumulated() {
        let mut state = playing();
        grounded_at(&mut state, 100.0);
        let right = FrameInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &right, DT);
        tick(&mut state, &right, DT);
        assert_eq!(state.player.vel.x, 240.0);

        tick(&mut state, &FrameInput::default(), DT);
        assert_eq!(state.player.vel.x, 0.0);

        let left = FrameInput {
            left: true,
            ..Default::default()
        };
        tick(&mut state, &left, DT);
        assert_eq!(state.player.vel.x, -240.0);
    }

    #[test]
    fn test_left_wins_when_both_held() {
        let mut state = playing();
        grounded_at(&mut state, 100.0);
        let both = FrameInput {
            left: true,
            right: true,
            ..Default::default()
        };
        tick(&mut state, &both, DT);
        assert_eq!(state.player.vel.x, -240.0);
    }

    #[test]
    fn test_jump_from_spawn_scenario() {
        let mut state = playing();
        assert_eq!(state.player.pos, Vec2::new(80.0, 350.0));
        assert_eq!(state.player.vel, Vec2::ZERO);
        state.player.on_ground = true;

        let jump = FrameInput {
            jump: true,
            ..Default::default()
        };
        let events = tick(&mut state, &jump, DT);

        assert_eq!(state.player.vel.y, -480.0);
        assert!(!state.player.on_ground);
        assert_eq!(events, vec![GameEvent::Jumped]);
    }

    #[test]
    fn test_held_jump_does_not_rejump_midair() {
        let mut state = playing();
        grounded_at(&mut state, 100.0);
        let jump = FrameInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &jump, DT);
        let vy_after_takeoff = state.player.vel.y;

        let events = tick(&mut state, &jump, DT);
        assert!(events.is_empty());
        // Only gravity acted on the second frame
        assert!((state.player.vel.y - (vy_after_takeoff + 1400.0 * DT)).abs() < 1e-4);
    }

    #[test]
    fn test_lands_and_can_jump_again() {
        let mut state = playing();
        grounded_at(&mut state, 100.0);
        let jump = FrameInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &jump, DT);

        let mut frames = 0;
        while !state.player.on_ground && frames < 200 {
            tick(&mut state, &FrameInput::default(), DT);
            frames += 1;
        }
        assert!(state.player.on_ground);
        assert_eq!(state.player.bottom(), GROUND_Y);
        assert_eq!(state.player.vel.y, 0.0);

        let events = tick(&mut state, &jump, DT);
        assert_eq!(events, vec![GameEvent::Jumped]);
    }

    #[test]
    fn test_falls_from_spawn_onto_ground() {
        let mut state = playing();
        for _ in 0..10 {
            tick(&mut state, &FrameInput::default(), DT);
        }
        assert!(state.player.on_ground);
        assert_eq!(state.player.pos.y, GROUND_Y - PLAYER_HEIGHT);
    }

    #[test]
    fn test_coin_pickup_scores_once() {
        let mut state = playing();
        // Centre the player on the first coin at (220, 300)
        state.player.pos = Vec2::new(220.0 - 18.0, 300.0 - 24.0);
        state.player.on_ground = false;

        let events = tick(&mut state, &FrameInput::default(), 0.0);
        assert!(state.coins[0].collected);
        assert_eq!(state.score, 10);
        assert_eq!(events, vec![GameEvent::CoinCollected { index: 0 }]);

        let events = tick(&mut state, &FrameInput::default(), 0.0);
        assert!(state.coins[0].collected);
        assert_eq!(state.score, 10);
        assert!(events.is_empty());
    }

    #[test]
    fn test_win_transition_fires_once() {
        let mut state = playing();
        grounded_at(&mut state, 100.0);
        for coin in &mut state.coins {
            coin.collected = true;
        }
        state.score = COIN_COUNT as u32 * COIN_SCORE;

        let events = tick(&mut state, &FrameInput::default(), DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(events, vec![GameEvent::Won { score: 80 }]);

        let events = tick(&mut state, &FrameInput::default(), DT);
        assert!(events.is_empty());
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_collecting_last_coin_wins_same_frame() {
        let mut state = playing();
        for coin in state.coins.iter_mut().take(COIN_COUNT - 1) {
            coin.collected = true;
        }
        state.score = (COIN_COUNT as u32 - 1) * COIN_SCORE;
        let last = state.coins[COIN_COUNT - 1].pos;
        state.player.pos = last - state.player.size * 0.5;

        let events = tick(&mut state, &FrameInput::default(), 0.0);
        assert_eq!(
            events,
            vec![
                GameEvent::CoinCollected {
                    index: COIN_COUNT - 1
                },
                GameEvent::Won { score: 80 },
            ]
        );
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    fn arb_input() -> impl Strategy<Value = FrameInput> {
        (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(left, right, jump)| {
            FrameInput { left, right, jump }
        })
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds(
            steps in prop::collection::vec((arb_input(), 0.0f32..=MAX_FRAME_DT), 1..300)
        ) {
            let mut state = playing();
            for (input, dt) in steps {
                tick(&mut state, &input, dt);
                let p = &state.player;
                prop_assert!(p.pos.x >= WALL_LEFT);
                prop_assert!(p.pos.x <= WALL_RIGHT - p.size.x);
                prop_assert!(p.bottom() <= GROUND_Y);
            }
        }

        #[test]
        fn prop_coins_and_score_monotonic(
            steps in prop::collection::vec((arb_input(), 0.0f32..=MAX_FRAME_DT), 1..300)
        ) {
            let mut state = playing();
            let mut prev_collected = vec![false; COIN_COUNT];
            let mut prev_score = 0;
            for (input, dt) in steps {
                tick(&mut state, &input, dt);
                for (coin, was) in state.coins.iter().zip(prev_collected.iter_mut()) {
                    prop_assert!(!*was || coin.collected);
                    *was = coin.collected;
                }
                prop_assert!(state.score >= prev_score);
                let taken = prev_collected.iter().filter(|c| **c).count() as u32;
                prop_assert_eq!(state.score, taken * COIN_SCORE);
                prev_score = state.score;
            }
        }

        #[test]
        fn prop_only_legal_transitions(
            steps in prop::collection::vec((arb_input(), 0.0f32..=MAX_FRAME_DT), 1..200),
            pre_collected in 0usize..=COIN_COUNT
        ) {
            let mut state = playing();
            for coin in state.coins.iter_mut().take(pre_collected) {
                coin.collected = true;
            }
            let mut wins = 0;
            for (input, dt) in steps {
                let before = state.phase;
                let events = tick(&mut state, &input, dt);
                if before != state.phase {
                    prop_assert!(before.can_transition_to(state.phase));
                }
                wins += events.iter().filter(|e| matches!(e, GameEvent::Won { .. })).count();
            }
            prop_assert!(wins <= 1);
        }
    }
}
