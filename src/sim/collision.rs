//! Collision detection and response for the rat against street obstacles
//!
//! Everything is an axis-aligned box. Obstacles stand on the street
//! (bottom = 0); the rat box is anchored bottom-centre at the rat position.

use super::level::enter_next_level;
use super::state::{FallingHazard, GameEvent, GameState, Obstacle, ObstacleKind, Rat};
use super::tick::TickInput;
use crate::consts::*;

/// Axis-aligned box, y up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl Aabb {
    /// The rat's body
    pub fn of_rat(rat: &Rat) -> Self {
        Self {
            left: rat.pos.x - RAT_HALF_WIDTH,
            right: rat.pos.x + RAT_HALF_WIDTH,
            bottom: rat.pos.y,
            top: rat.pos.y + RAT_HEIGHT,
        }
    }

    pub fn of_obstacle(obstacle: &Obstacle) -> Self {
        Self {
            left: obstacle.x,
            right: obstacle.right(),
            bottom: 0.0,
            top: obstacle.h,
        }
    }

    /// Small box hanging below the hazard position
    pub fn of_hazard(hazard: &FallingHazard) -> Self {
        Self {
            left: hazard.pos.x,
            right: hazard.pos.x + HAZARD_SIZE,
            bottom: hazard.pos.y,
            top: hazard.pos.y + HAZARD_SIZE,
        }
    }

    /// Strict overlap; touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.bottom < other.top
            && self.top > other.bottom
    }
}

/// What solid resolution did with the rat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolidContact {
    /// Rat came down on the top surface
    Landed,
    /// Rat pushed out through the left side
    PushedLeft,
    /// Rat pushed out through the right side
    PushedRight,
}

/// Whether the rest of the tick may run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    Continue,
    /// The level was regenerated; stale frame data must not be processed
    LevelChanged,
}

/// Resolve an overlap between the rat and a solid obstacle
///
/// Landing wins when the rat is not rising and the top penetration is both
/// shallow and smaller than the penetration through either side. Otherwise
/// the rat is pushed out of the nearer side. The comparison is a heuristic
/// and a fast diagonal approach can end up on the wrong branch.
pub fn resolve_solid(rat: &mut Rat, obstacle: &Obstacle) -> SolidContact {
    let rat_box = Aabb::of_rat(rat);
    let obs_box = Aabb::of_obstacle(obstacle);

    let pen_left = rat_box.right - obs_box.left;
    let pen_right = obs_box.right - rat_box.left;
    let pen_top = obs_box.top - rat_box.bottom;

    if rat.vel.y <= 0.0
        && pen_top > 0.0
        && pen_top < LANDING_MAX_PENETRATION
        && pen_top < pen_left.min(pen_right)
    {
        rat.pos.y = obs_box.top;
        rat.vel.y = 0.0;
        rat.grounded = true;
        SolidContact::Landed
    } else if pen_left < pen_right {
        if rat.vel.x > 0.0 {
            rat.vel.x = 0.0;
        }
        rat.pos.x = obs_box.left - RAT_HALF_WIDTH;
        SolidContact::PushedLeft
    } else {
        if rat.vel.x < 0.0 {
            rat.vel.x = 0.0;
        }
        rat.pos.x = obs_box.right + RAT_HALF_WIDTH;
        SolidContact::PushedRight
    }
}

/// Knock the rat up and away from the direction it is facing
pub fn knock_back(rat: &mut Rat) {
    rat.vel.y = HAZARD_BOUNCE_VY;
    rat.vel.x = if rat.facing_right {
        -HAZARD_BOUNCE_VX
    } else {
        HAZARD_BOUNCE_VX
    };
    rat.grounded = false;
}

/// Check the rat against every obstacle and apply each type's policy
///
/// Obstacles are scanned from the end so chewed ones can be removed in
/// place. Returns [`CollisionOutcome::LevelChanged`] as soon as the subway
/// entrance regenerates the world.
pub fn resolve_obstacles(state: &mut GameState, input: &TickInput) -> CollisionOutcome {
    let mut i = state.obstacles.len();
    while i > 0 {
        i -= 1;
        let obstacle = state.obstacles[i].clone();
        if obstacle.kind.is_decorative() {
            continue;
        }
        if !Aabb::of_rat(&state.rat).overlaps(&Aabb::of_obstacle(&obstacle)) {
            continue;
        }

        match obstacle.kind {
            kind if kind.is_consumable() => {
                if input.chew {
                    state.obstacles.remove(i);
                    state.award(kind.reward().unwrap_or(0));
                    state.emit(GameEvent::Chew { kind });
                    if kind == ObstacleKind::Prius {
                        state.emit(GameEvent::Honk);
                    }
                    log::debug!("Chewed {} (score {})", kind.as_str(), state.score);
                } else {
                    resolve_solid(&mut state.rat, &obstacle);
                }
            }
            kind if kind.is_hazard() => {
                state.emit(if kind == ObstacleKind::ThirdRail {
                    GameEvent::RailSpark
                } else {
                    GameEvent::TrapSnap
                });
                knock_back(&mut state.rat);
                log::debug!("Hit {} at x={}", kind.as_str(), obstacle.x);
            }
            ObstacleKind::SubwayEntrance => {
                if enter_next_level(state) {
                    return CollisionOutcome::LevelChanged;
                }
            }
            _ => {}
        }
    }

    CollisionOutcome::Continue
}
