//! Simulation module
//!
//! All gameplay logic lives here. One call to [`tick`] advances one rendered
//! frame; nothing in here touches rendering, audio or the platform. Sound and
//! drawing read the state (and drain [`GameEvent`]s) after the tick returns.

pub mod aerial;
pub mod autopilot;
pub mod collision;
pub mod level;
pub mod physics;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Aabb, CollisionOutcome, resolve_obstacles};
pub use level::{District, enter_next_level, generate_level};
pub use snapshot::FrameSnapshot;
pub use state::{
    Building, BuildingKind, FallingHazard, Flyer, GameEvent, GameState, Hsl, Level, Obstacle,
    ObstacleKind, Rat, Viewport,
};
pub use tick::{TickInput, tick};
