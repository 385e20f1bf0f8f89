//! Demo mode - the rat plays itself
//!
//! Always runs right, chews anything edible within reach and hops over traps
//! and live rails. Used by the headless binary and attract screens.

use super::state::{GameState, Obstacle};
use super::tick::TickInput;
use crate::consts::*;

/// How far past the rat's nose obstacles are considered
const LOOKAHEAD: f32 = 40.0;
/// Take off when a hazard is this close
const JUMP_DISTANCE: f32 = 25.0;

/// Nearest collidable obstacle that is not yet behind the rat
fn next_obstacle(state: &GameState) -> Option<&Obstacle> {
    let tail = state.rat.pos.x - RAT_HALF_WIDTH;
    state
        .obstacles
        .iter()
        .filter(|o| !o.kind.is_decorative() && o.right() > tail)
        .min_by(|a, b| a.x.total_cmp(&b.x))
}

/// Pick the input for the next tick
pub fn drive(state: &GameState) -> TickInput {
    let mut input = TickInput {
        right: true,
        ..Default::default()
    };

    let Some(obstacle) = next_obstacle(state) else {
        return input;
    };
    let nose = state.rat.pos.x + RAT_HALF_WIDTH;
    let distance = obstacle.x - nose;

    if obstacle.kind.is_consumable() && distance < LOOKAHEAD {
        input.chew = true;
    } else if obstacle.kind.is_hazard() && distance < JUMP_DISTANCE && state.rat.grounded {
        input.jump = true;
    }

    input
}
