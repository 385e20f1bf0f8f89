//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`]. Rendering and
//! audio only ever borrow it between ticks.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::level;
use crate::consts::*;

/// Which of the two linked levels is loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Level {
    /// City streets (initial level)
    #[default]
    Surface,
    /// Subway tunnels (terminal level)
    Subway,
}

impl Level {
    /// The level reached through the subway entrance, if any
    pub fn next(self) -> Option<Level> {
        match self {
            Level::Surface => Some(Level::Subway),
            Level::Subway => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Surface => "SURFACE",
            Level::Subway => "SUBWAY",
        }
    }
}

/// Visible play area, used to size buildings and flyer altitudes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 540.0,
        }
    }
}

impl Viewport {
    /// Build a viewport, flooring the height so generation stays sane
    pub fn new(width: f32, height: f32) -> Self {
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        let height = if height.is_finite() {
            height.max(MIN_VIEWPORT_HEIGHT)
        } else {
            MIN_VIEWPORT_HEIGHT
        };
        Self { width, height }
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }
}

/// The player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rat {
    /// x: world position, y: height above the street (bottom-centre of the body)
    pub pos: Vec2,
    pub vel: Vec2,
    pub grounded: bool,
    pub facing_right: bool,
}

impl Default for Rat {
    fn default() -> Self {
        Self {
            pos: Vec2::new(SPAWN_X, 0.0),
            vel: Vec2::ZERO,
            grounded: true,
            facing_right: true,
        }
    }
}

impl Rat {
    /// Put the rat back on the spawn point at rest. Facing is kept.
    pub fn reset_to_spawn(&mut self) {
        self.pos = Vec2::new(SPAWN_X, 0.0);
        self.vel = Vec2::ZERO;
        self.grounded = true;
    }
}

/// HSL colour, hue in signed degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Hsl {
    pub const fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// CSS colour string
    pub fn css(&self) -> String {
        format!(
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// What a building is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildingKind {
    /// Street building belonging to a city district
    Street { district: level::District },
    /// Subway tunnel wall, background only
    Tunnel,
}

/// Background building. Never collides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub x: f32,
    pub w: f32,
    pub h: f32,
    pub color: Hsl,
    pub kind: BuildingKind,
}

impl Building {
    pub fn is_tunnel(&self) -> bool {
        self.kind == BuildingKind::Tunnel
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObstacleKind {
    Box,
    Trap,
    Prius,
    Barzinis,
    SignCity,
    SubwayEntrance,
    TrashPile,
    ThirdRail,
    Pizza,
    Coffee,
}

impl ObstacleKind {
    /// Default footprint (width, height)
    pub fn size(self) -> (f32, f32) {
        match self {
            ObstacleKind::Box => (30.0, 30.0),
            ObstacleKind::Trap => (40.0, 10.0),
            ObstacleKind::Prius => (80.0, 40.0),
            ObstacleKind::Barzinis | ObstacleKind::SignCity => (10.0, 10.0),
            ObstacleKind::SubwayEntrance => (60.0, 80.0),
            ObstacleKind::TrashPile => (40.0, 30.0),
            ObstacleKind::ThirdRail => (120.0, 5.0),
            ObstacleKind::Pizza => (30.0, 40.0),
            ObstacleKind::Coffee => (20.0, 30.0),
        }
    }

    /// Rendered only, skipped by collision
    pub fn is_decorative(self) -> bool {
        matches!(self, ObstacleKind::Barzinis | ObstacleKind::SignCity)
    }

    /// Score for chewing this obstacle, `None` if it cannot be chewed
    pub fn reward(self) -> Option<u32> {
        match self {
            ObstacleKind::Box | ObstacleKind::Prius | ObstacleKind::TrashPile => Some(1),
            ObstacleKind::Coffee => Some(3),
            ObstacleKind::Pizza => Some(10),
            _ => None,
        }
    }

    pub fn is_consumable(self) -> bool {
        self.reward().is_some()
    }

    /// Knocks the rat back on contact
    pub fn is_hazard(self) -> bool {
        matches!(self, ObstacleKind::Trap | ObstacleKind::ThirdRail)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::Box => "BOX",
            ObstacleKind::Trap => "TRAP",
            ObstacleKind::Prius => "PRIUS",
            ObstacleKind::Barzinis => "BARZINIS",
            ObstacleKind::SignCity => "SIGN_CITY",
            ObstacleKind::SubwayEntrance => "SUBWAY_ENTRANCE",
            ObstacleKind::TrashPile => "TRASH_PILE",
            ObstacleKind::ThirdRail => "THIRD_RAIL",
            ObstacleKind::Pizza => "PIZZA",
            ObstacleKind::Coffee => "COFFEE",
        }
    }
}

/// A ground-anchored obstacle spanning `x..x + w` and `0..h`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub w: f32,
    pub h: f32,
    pub kind: ObstacleKind,
}

impl Obstacle {
    /// Obstacle of the kind's default size with its left edge at `x`
    pub fn new(kind: ObstacleKind, x: f32) -> Self {
        let (w, h) = kind.size();
        Self { x, w, h, kind }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }
}

/// A bird crossing the sky right to left
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Flyer {
    pub pos: Vec2,
    pub speed: f32,
}

/// Something dropped by a flyer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FallingHazard {
    pub pos: Vec2,
    /// Vertical velocity, negative while falling
    pub vy: f32,
}

/// Discrete things that happened during a tick, for the audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Rat left the ground
    Jump,
    /// An obstacle was chewed up
    Chew { kind: ObstacleKind },
    /// Extra honk for chewing a car
    Honk,
    /// Rat stepped in a trap
    TrapSnap,
    /// Rat touched the third rail
    RailSpark,
    /// Rat was hit by a falling hazard
    HazardHit,
    /// A new level was generated
    LevelChanged { level: Level },
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the generator was created from
    pub seed: u64,
    /// All randomness is drawn from here
    pub rng: Pcg32,
    pub viewport: Viewport,
    /// Currently loaded level
    pub level: Level,
    /// Set once the subway entrance has been taken
    pub level_completed: bool,
    pub rat: Rat,
    /// Background buildings, left to right
    pub buildings: Vec<Building>,
    /// Obstacles, left to right
    pub obstacles: Vec<Obstacle>,
    pub flyers: Vec<Flyer>,
    pub hazards: Vec<FallingHazard>,
    /// Never negative; gains and losses go through `award`/`penalize`
    pub score: u32,
    /// Frames simulated since the run started
    pub frame: u64,
    /// Left edge of the view in world space
    pub camera_x: f32,
    /// How close the rat is to the subway entrance, 0..=1 (surface only)
    pub progress: f32,
    /// Events raised during the last tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new run on the surface with the given seed
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            viewport,
            level: Level::Surface,
            level_completed: false,
            rat: Rat::default(),
            buildings: Vec::new(),
            obstacles: Vec::new(),
            flyers: Vec::new(),
            hazards: Vec::new(),
            score: 0,
            frame: 0,
            camera_x: 0.0,
            progress: 0.0,
            events: Vec::new(),
        };

        level::generate_level(&mut state, Level::Surface);
        state
    }

    /// Create a new run seeded from system entropy
    pub fn from_entropy(viewport: Viewport) -> Self {
        Self::new(rand::random(), viewport)
    }

    /// Add points to the score
    pub fn award(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Take points off the score, stopping at zero
    pub fn penalize(&mut self, points: u32) {
        self.score = self.score.saturating_sub(points);
    }

    /// Queue an event for the audio collaborator
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take this tick's events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// The subway entrance on the current level, if there is one
    pub fn subway_entrance(&self) -> Option<&Obstacle> {
        self.obstacles
            .iter()
            .find(|o| o.kind == ObstacleKind::SubwayEntrance)
    }

    /// Recompute camera offset and level progress from the rat position
    pub fn update_view(&mut self) {
        self.camera_x = self.rat.pos.x - self.viewport.half_width();
        self.progress = match (self.level, self.subway_entrance()) {
            (Level::Surface, Some(entrance)) if entrance.x > 0.0 => {
                (self.rat.pos.x / entrance.x).clamp(0.0, 1.0)
            }
            _ => 0.0,
        };
    }
}
