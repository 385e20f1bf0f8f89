//! Flyers and the things they drop
//!
//! Flyers are never destroyed: once they drift far enough behind the rat they
//! are moved back ahead of it, so the flock size stays constant for the level.

use rand::Rng;

use super::collision::Aabb;
use super::state::{FallingHazard, GameEvent, GameState};
use crate::consts::*;

/// Move flyers, recycle stragglers and roll for drops
pub fn update_flyers(state: &mut GameState) {
    let rat_x = state.rat.pos.x;
    let max_altitude = state.viewport.height / 2.0;
    let rng = &mut state.rng;

    for flyer in &mut state.flyers {
        flyer.pos.x -= flyer.speed;

        if flyer.pos.x < rat_x - FLYER_RECYCLE_DISTANCE {
            flyer.pos.x =
                rat_x + FLYER_RECYCLE_DISTANCE + rng.random::<f32>() * FLYER_RESPAWN_SPREAD;
            flyer.pos.y = rng.random::<f32>() * max_altitude;
            log::trace!("Recycled flyer to x={:.0}", flyer.pos.x);
        }

        if (flyer.pos.x - rat_x).abs() < FLYER_DROP_RANGE && rng.random_bool(FLYER_DROP_CHANCE) {
            state.hazards.push(FallingHazard {
                pos: flyer.pos,
                vy: 0.0,
            });
        }
    }
}

/// Let hazards fall; they vanish on the street or on the rat
pub fn update_hazards(state: &mut GameState) {
    let rat_box = Aabb::of_rat(&state.rat);
    let mut hits = 0u32;

    state.hazards.retain_mut(|hazard| {
        hazard.vy -= GRAVITY * HAZARD_GRAVITY_FACTOR;
        hazard.pos.y += hazard.vy;

        if hazard.pos.y < 0.0 {
            return false;
        }
        if Aabb::of_hazard(hazard).overlaps(&rat_box) {
            hits += 1;
            return false;
        }
        true
    });

    for _ in 0..hits {
        state.penalize(HAZARD_HIT_PENALTY);
        state.emit(GameEvent::HazardHit);
    }
    if hits > 0 {
        log::debug!("Rat hit by {} hazard(s), score {}", hits, state.score);
    }
}
