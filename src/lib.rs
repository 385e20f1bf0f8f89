//! RATS - a scrolling city platformer
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (level generation, physics, collisions, hazards)
//! - `audio`: Sound effects triggered by simulation events
//! - `settings`: Viewport, seed and volume preferences
//! - `web`: Browser bridge (wasm32 only)

pub mod audio;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use audio::SoundEffect;
pub use settings::Settings;

/// Game configuration constants
///
/// Units are world pixels and frames; the simulation advances one step per
/// rendered frame with no explicit timestep.
pub mod consts {
    /// Downward acceleration per frame
    pub const GRAVITY: f32 = 0.8;
    /// Horizontal speed while a direction is held
    pub const RUN_SPEED: f32 = 5.0;
    /// Vertical velocity applied on jump
    pub const JUMP_IMPULSE: f32 = 15.0;
    /// Multiplicative decay of idle grounded velocity
    pub const GROUND_FRICTION: f32 = 0.8;
    /// Idle velocity below this snaps to zero
    pub const REST_THRESHOLD: f32 = 0.5;

    /// Rat body box (anchored bottom-centre at the rat position)
    pub const RAT_HALF_WIDTH: f32 = 15.0;
    pub const RAT_HEIGHT: f32 = 20.0;

    /// Spawn point for every freshly generated level
    pub const SPAWN_X: f32 = 100.0;

    /// Vertical penetration must be below this to count as a landing
    pub const LANDING_MAX_PENETRATION: f32 = 20.0;
    /// Knock-back applied by traps and the third rail
    pub const HAZARD_BOUNCE_VY: f32 = 10.0;
    pub const HAZARD_BOUNCE_VX: f32 = 10.0;

    /// Aerial threats
    pub const FLYER_COUNT: usize = 5;
    pub const FLYER_SEED_SPREAD: f32 = 2000.0;
    pub const FLYER_MIN_SPEED: f32 = 1.0;
    pub const FLYER_SPEED_SPREAD: f32 = 2.0;
    /// Flyers further than this behind the rat get recycled ahead of it
    pub const FLYER_RECYCLE_DISTANCE: f32 = 500.0;
    pub const FLYER_RESPAWN_SPREAD: f32 = 500.0;
    /// Flyers only drop within this horizontal distance of the rat
    pub const FLYER_DROP_RANGE: f32 = 500.0;
    pub const FLYER_DROP_CHANCE: f64 = 0.005;

    /// Falling hazards fall at a fraction of normal gravity
    pub const HAZARD_GRAVITY_FACTOR: f32 = 0.2;
    pub const HAZARD_SIZE: f32 = 5.0;
    pub const HAZARD_HIT_PENALTY: u32 = 5;

    /// Smallest viewport height the generator accepts
    pub const MIN_VIEWPORT_HEIGHT: f32 = 150.0;
}
