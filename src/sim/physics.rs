//! Rat kinematics
//!
//! Fixed order every frame: horizontal intent, jump, gravity, Euler step,
//! floor clamp. Collisions run afterwards.

use super::state::Rat;
use super::tick::TickInput;
use crate::consts::*;

/// Advance the rat one frame. Returns true if a jump started this frame.
pub fn integrate_rat(rat: &mut Rat, input: &TickInput) -> bool {
    if input.right {
        rat.vel.x = RUN_SPEED;
        rat.facing_right = true;
    } else if input.left {
        rat.vel.x = -RUN_SPEED;
        rat.facing_right = false;
    } else if rat.grounded {
        // Momentum is kept in the air so jump arcs stay controllable
        rat.vel.x *= GROUND_FRICTION;
        if rat.vel.x.abs() < REST_THRESHOLD {
            rat.vel.x = 0.0;
        }
    }

    let jumped = input.jump && rat.grounded;
    if jumped {
        rat.vel.y = JUMP_IMPULSE;
        rat.grounded = false;
    }

    rat.vel.y -= GRAVITY;
    rat.pos += rat.vel;

    clamp_to_floor(rat);
    jumped
}

/// Stop the rat at street level
pub fn clamp_to_floor(rat: &mut Rat) {
    if rat.pos.y <= 0.0 {
        rat.pos.y = 0.0;
        rat.vel.y = 0.0;
        rat.grounded = true;
    }
}
