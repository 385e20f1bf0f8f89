//! Per-frame simulation tick
//!
//! Order: physics → obstacle collisions (may swap the level) → flyers and
//! falling hazards → camera/progress.

use serde::{Deserialize, Serialize};

use super::aerial::{update_flyers, update_hazards};
use super::collision::{CollisionOutcome, resolve_obstacles};
use super::physics::integrate_rat;
use super::state::{GameEvent, GameState};

/// Player intent for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Chew whatever the rat is touching
    pub chew: bool,
}

impl TickInput {
    pub const LEFT: u8 = 1 << 0;
    pub const RIGHT: u8 = 1 << 1;
    pub const JUMP: u8 = 1 << 2;
    pub const CHEW: u8 = 1 << 3;

    /// Decode a packed intent mask; unknown bits are ignored
    pub fn from_bits(bits: u8) -> Self {
        Self {
            left: bits & Self::LEFT != 0,
            right: bits & Self::RIGHT != 0,
            jump: bits & Self::JUMP != 0,
            chew: bits & Self::CHEW != 0,
        }
    }

    pub fn bits(&self) -> u8 {
        let mut bits = 0;
        if self.left {
            bits |= Self::LEFT;
        }
        if self.right {
            bits |= Self::RIGHT;
        }
        if self.jump {
            bits |= Self::JUMP;
        }
        if self.chew {
            bits |= Self::CHEW;
        }
        bits
    }
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();
    state.frame += 1;

    if integrate_rat(&mut state.rat, input) {
        state.emit(GameEvent::Jump);
    }

    if resolve_obstacles(state, input) == CollisionOutcome::LevelChanged {
        // The old level is gone; its flyers and hazards must not run
        return;
    }

    update_flyers(state);
    update_hazards(state);

    state.update_view();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{FallingHazard, Level, Obstacle, ObstacleKind, Viewport};
    use glam::Vec2;
    use proptest::prelude::*;

    fn quiet_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Viewport::default());
        state.obstacles.retain(|o| o.kind == ObstacleKind::SubwayEntrance);
        state.flyers.clear();
        state
    }

    #[test]
    fn test_from_bits_ignores_unknown() {
        let input = TickInput::from_bits(0b1111_0101);
        assert_eq!(
            input,
            TickInput {
                left: true,
                right: false,
                jump: true,
                chew: false,
            }
        );
        assert_eq!(input.bits(), 0b0101);
        assert_eq!(TickInput::from_bits(0xF0), TickInput::default());
    }

    #[test]
    fn test_tick_counts_frames_and_moves_camera() {
        let mut state = quiet_state(1);
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        tick(&mut state, &input);
        assert_eq!(state.frame, 2);
        assert_eq!(state.rat.pos.x, SPAWN_X + 2.0 * RUN_SPEED);
        assert_eq!(
            state.camera_x,
            state.rat.pos.x - state.viewport.half_width()
        );
        assert!(state.progress > 0.0 && state.progress < 1.0);
    }

    #[test]
    fn test_jump_emits_event_once() {
        let mut state = quiet_state(2);
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &jump);
        assert_eq!(state.events, vec![GameEvent::Jump]);
        tick(&mut state, &jump);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_pizza_scenario() {
        let mut state = quiet_state(3);
        state.score = 0;
        let x = state.rat.pos.x;
        state.obstacles.push(Obstacle::new(ObstacleKind::Pizza, x));
        let before = state.obstacles.len();

        let chew = TickInput {
            chew: true,
            ..Default::default()
        };
        tick(&mut state, &chew);
        assert_eq!(Some(state.score), ObstacleKind::Pizza.reward());
        assert_eq!(state.obstacles.len(), before - 1);
        assert!(!state.obstacles.iter().any(|o| o.kind == ObstacleKind::Pizza));
    }

    #[test]
    fn test_hazard_at_zero_score() {
        let mut state = quiet_state(4);
        state.score = 0;
        state.hazards.push(FallingHazard {
            pos: Vec2::new(state.rat.pos.x, 10.0),
            vy: 0.0,
        });
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 0);
        assert!(state.hazards.is_empty());
        assert!(state.events.contains(&GameEvent::HazardHit));
    }

    #[test]
    fn test_walk_into_subway() {
        let mut state = GameState::new(5, Viewport::default());
        let entrance_x = state.subway_entrance().unwrap().x;
        state.rat.pos.x = entrance_x - RAT_HALF_WIDTH - 3.0;
        state.hazards.push(FallingHazard {
            pos: Vec2::new(0.0, 300.0),
            vy: 0.0,
        });

        let right = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &right);

        assert_eq!(state.level, Level::Subway);
        assert!(state.level_completed);
        assert!(state.buildings.iter().all(|b| b.is_tunnel()));
        assert!(state.obstacles.iter().all(|o| matches!(
            o.kind,
            ObstacleKind::TrashPile | ObstacleKind::ThirdRail
        )));
        assert!(state.flyers.is_empty());
        assert!(state.hazards.is_empty());
        assert_eq!(state.rat.pos, Vec2::new(SPAWN_X, 0.0));
        assert_eq!(state.progress, 0.0);
        assert_eq!(state.camera_x, SPAWN_X - state.viewport.half_width());
        assert!(state.events.contains(&GameEvent::LevelChanged {
            level: Level::Subway
        }));
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = GameState::new(99, Viewport::default());
        let mut b = GameState::new(99, Viewport::default());
        assert_eq!(a.buildings, b.buildings);
        assert_eq!(a.obstacles, b.obstacles);

        let inputs = [
            TickInput::from_bits(TickInput::RIGHT),
            TickInput::from_bits(TickInput::RIGHT | TickInput::JUMP),
            TickInput::from_bits(TickInput::CHEW),
            TickInput::default(),
        ];
        for _ in 0..200 {
            for input in &inputs {
                tick(&mut a, input);
                tick(&mut b, input);
            }
        }
        assert_eq!(a.rat, b.rat);
        assert_eq!(a.score, b.score);
        assert_eq!(a.hazards, b.hazards);
        assert_eq!(a.flyers, b.flyers);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_score_never_negative(
            seed in any::<u64>(),
            masks in proptest::collection::vec(0u8..16, 1..400),
        ) {
            let mut state = GameState::new(seed, Viewport::default());
            for bits in masks {
                let before = state.score;
                tick(&mut state, &TickInput::from_bits(bits));
                let hits = state.events.iter().filter(|e| **e == GameEvent::HazardHit).count() as u32;
                // Losses only come from hazard hits and stop at zero
                prop_assert!(state.score + hits * HAZARD_HIT_PENALTY >= before);
            }
        }
    }
}
