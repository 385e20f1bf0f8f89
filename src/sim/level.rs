//! Level generation and the surface → subway transition
//!
//! Levels are never patched: every generation throws the previous layout away
//! and builds a new one from the state's RNG.

use glam::Vec2;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use serde::{Deserialize, Serialize};

use super::state::{
    Building, BuildingKind, Flyer, GameEvent, GameState, Hsl, Level, Obstacle, ObstacleKind,
};
use crate::consts::*;

/// Number of building blocks on the surface
pub const SURFACE_BLOCKS: usize = 25;
/// Number of tunnel segments in the subway
pub const SUBWAY_SEGMENTS: usize = 200;

/// Chance that an alley gets an obstacle
pub const ALLEY_OBSTACLE_CHANCE: f64 = 0.4;
/// Chance that a tunnel segment gets a hazard
pub const TUNNEL_HAZARD_CHANCE: f64 = 0.6;

/// Relative weights of alley obstacle types
const ALLEY_OBSTACLES: [(ObstacleKind, u32); 5] = [
    (ObstacleKind::Box, 30),
    (ObstacleKind::Trap, 30),
    (ObstacleKind::Prius, 20),
    (ObstacleKind::Pizza, 10),
    (ObstacleKind::Coffee, 10),
];

/// Decorative markers placed on fixed blocks
const LANDMARKS: [(usize, ObstacleKind); 2] =
    [(2, ObstacleKind::SignCity), (10, ObstacleKind::Barzinis)];

/// Half of each district's hue window, in degrees
pub const HUE_BAND_HALF_WIDTH: f32 = 20.0;

/// City district, decides the colour of the surface buildings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum District {
    /// First third of the city
    Burbs,
    /// Middle third
    Downtown,
    /// Everything after that, up to the subway
    Industrial,
}

impl District {
    /// District of block `index` in a city of `count` blocks
    pub fn for_block(index: usize, count: usize) -> Self {
        if index * 3 < count {
            District::Burbs
        } else if index * 3 < count * 2 {
            District::Downtown
        } else {
            District::Industrial
        }
    }

    /// Centre of the district's hue band
    pub fn base_hue(self) -> f32 {
        match self {
            District::Burbs => 100.0,
            District::Downtown => 200.0,
            District::Industrial => 0.0,
        }
    }

    /// Inclusive hue range of the district
    pub fn hue_band(self) -> (f32, f32) {
        let base = self.base_hue();
        (base - HUE_BAND_HALF_WIDTH, base + HUE_BAND_HALF_WIDTH)
    }

    fn color<R: Rng>(self, rng: &mut R) -> Hsl {
        let (lo, hi) = self.hue_band();
        Hsl::new(rng.random_range(lo..=hi), 20.0, 30.0)
    }
}

/// Tunnel walls are near-black
const TUNNEL_COLOR: Hsl = Hsl::new(0.0, 0.0, 7.0);

/// Throw away the current layout and build `level` from scratch
///
/// Resets the rat to the spawn point, clears falling hazards and the
/// completion flag. Flyers are only seeded on the surface.
pub fn generate_level(state: &mut GameState, level: Level) {
    state.level = level;
    state.buildings.clear();
    state.obstacles.clear();
    state.flyers.clear();
    state.hazards.clear();
    state.rat.reset_to_spawn();
    state.level_completed = false;

    match level {
        Level::Surface => generate_surface(state),
        Level::Subway => generate_subway(state),
    }

    log::info!(
        "Generated {}: {} buildings, {} obstacles, {} flyers",
        level.as_str(),
        state.buildings.len(),
        state.obstacles.len(),
        state.flyers.len()
    );
    state.emit(GameEvent::LevelChanged { level });
}

/// Draw an alley obstacle type, uniformly if the weighted mix is unavailable
fn alley_kind<R: Rng>(mix: Option<&WeightedIndex<u32>>, rng: &mut R) -> ObstacleKind {
    let index = match mix {
        Some(mix) => mix.sample(rng),
        None => rng.random_range(0..ALLEY_OBSTACLES.len()),
    };
    ALLEY_OBSTACLES[index].0
}

/// City streets: district-coloured buildings with obstacles in the alleys
pub fn generate_surface(state: &mut GameState) {
    let weights = ALLEY_OBSTACLES.map(|(_, weight)| weight);
    let alley_mix = WeightedIndex::new(weights).ok();
    if alley_mix.is_none() {
        log::error!("Alley obstacle weights are invalid, picking uniformly");
    }

    let rng = &mut state.rng;
    let max_extra_height = (state.viewport.height - 200.0).max(0.0);
    let mut x = 0.0;

    for i in 0..SURFACE_BLOCKS {
        let w = 100.0 + rng.random::<f32>() * 200.0;
        let h = 100.0 + rng.random::<f32>() * max_extra_height;
        let district = District::for_block(i, SURFACE_BLOCKS);
        state.buildings.push(Building {
            x,
            w,
            h,
            color: district.color(rng),
            kind: BuildingKind::Street { district },
        });

        for &(block, kind) in &LANDMARKS {
            if block == i {
                state.obstacles.push(Obstacle::new(kind, x + 20.0));
            }
        }

        let gap = 50.0 + rng.random::<f32>() * 50.0;
        if rng.random_bool(ALLEY_OBSTACLE_CHANCE) {
            // Centred in the alley
            let obs_x = x + w + gap / 2.0 - 15.0;
            let kind = alley_kind(alley_mix.as_ref(), rng);
            let obs_x = if kind == ObstacleKind::Prius {
                obs_x - 25.0
            } else {
                obs_x
            };
            state.obstacles.push(Obstacle::new(kind, obs_x));
        }

        x += w + gap;
    }

    state
        .obstacles
        .push(Obstacle::new(ObstacleKind::SubwayEntrance, x + 100.0));

    let max_altitude = state.viewport.height / 2.0;
    for _ in 0..FLYER_COUNT {
        let pos = Vec2::new(
            rng.random::<f32>() * FLYER_SEED_SPREAD,
            rng.random::<f32>() * max_altitude,
        );
        let speed = FLYER_MIN_SPEED + rng.random::<f32>() * FLYER_SPEED_SPREAD;
        state.flyers.push(Flyer { pos, speed });
    }
}

/// Subway: full-height tunnel walls with trash and live rails on the tracks
pub fn generate_subway(state: &mut GameState) {
    let rng = &mut state.rng;
    let mut x = 0.0;

    for _ in 0..SUBWAY_SEGMENTS {
        let w = 300.0 + rng.random::<f32>() * 200.0;
        state.buildings.push(Building {
            x,
            w,
            h: state.viewport.height,
            color: TUNNEL_COLOR,
            kind: BuildingKind::Tunnel,
        });

        if rng.random_bool(TUNNEL_HAZARD_CHANCE) {
            let kind = if rng.random_bool(0.5) {
                ObstacleKind::TrashPile
            } else {
                ObstacleKind::ThirdRail
            };
            state.obstacles.push(Obstacle::new(kind, x + w / 2.0));
        }

        x += w;
    }
}

/// Take the subway entrance
///
/// Fires at most once per run: the completion flag is raised after the new
/// level is generated so it survives into it. Returns whether a transition
/// happened.
pub fn enter_next_level(state: &mut GameState) -> bool {
    if state.level_completed {
        return false;
    }
    let Some(next) = state.level.next() else {
        return false;
    };

    log::info!("Leaving {} for {}", state.level.as_str(), next.as_str());
    generate_level(state, next);
    state.level_completed = true;
    state.update_view();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Viewport;
    use proptest::prelude::*;

    fn surface(seed: u64) -> GameState {
        GameState::new(seed, Viewport::default())
    }

    #[test]
    fn test_alley_kind_without_weights() {
        let mut rng = <rand_pcg::Pcg32 as rand::SeedableRng>::seed_from_u64(9);
        let kinds: Vec<_> = ALLEY_OBSTACLES.iter().map(|&(kind, _)| kind).collect();
        for _ in 0..200 {
            assert!(kinds.contains(&alley_kind(None, &mut rng)));
        }

        let weights = ALLEY_OBSTACLES.map(|(_, weight)| weight);
        let mix = WeightedIndex::new(weights).unwrap();
        for _ in 0..200 {
            assert!(kinds.contains(&alley_kind(Some(&mix), &mut rng)));
        }
    }

    #[test]
    fn test_surface_layout() {
        let state = surface(42);
        assert_eq!(state.level, Level::Surface);
        assert_eq!(state.buildings.len(), SURFACE_BLOCKS);
        assert_eq!(state.flyers.len(), FLYER_COUNT);
        assert!(state.hazards.is_empty());
        assert!(!state.level_completed);

        // Exactly one entrance, and it is the last obstacle
        let entrances = state
            .obstacles
            .iter()
            .filter(|o| o.kind == ObstacleKind::SubwayEntrance)
            .count();
        assert_eq!(entrances, 1);
        assert_eq!(
            state.obstacles.last().map(|o| o.kind),
            Some(ObstacleKind::SubwayEntrance)
        );

        // Entrance sits past the last building
        let last = state.buildings.last().unwrap();
        assert!(state.subway_entrance().unwrap().x > last.x + last.w);
    }

    #[test]
    fn test_landmarks_placed_once() {
        let state = surface(3);
        for (block, kind) in LANDMARKS {
            let markers: Vec<_> = state.obstacles.iter().filter(|o| o.kind == kind).collect();
            assert_eq!(markers.len(), 1);
            assert_eq!(markers[0].x, state.buildings[block].x + 20.0);
        }
    }

    #[test]
    fn test_building_heights_fit_viewport() {
        let mut state = GameState::new(9, Viewport::new(800.0, 150.0));
        generate_level(&mut state, Level::Surface);
        for b in &state.buildings {
            assert!(b.w >= 100.0 && b.w < 300.0);
            assert!(b.h >= 100.0 && b.h <= 100.0f32.max(state.viewport.height - 100.0));
        }
    }

    #[test]
    fn test_subway_layout() {
        let mut state = surface(11);
        generate_level(&mut state, Level::Subway);
        assert_eq!(state.level, Level::Subway);
        assert_eq!(state.buildings.len(), SUBWAY_SEGMENTS);
        assert!(state.flyers.is_empty());
        assert!(state.buildings.iter().all(|b| b.is_tunnel()));
        assert!(
            state
                .buildings
                .iter()
                .all(|b| b.h == state.viewport.height)
        );
        assert!(state.obstacles.iter().all(|o| matches!(
            o.kind,
            ObstacleKind::TrashPile | ObstacleKind::ThirdRail
        )));
        // Hazards are centred in their segment
        for o in &state.obstacles {
            let seg = state
                .buildings
                .iter()
                .find(|b| o.x >= b.x && o.x < b.x + b.w)
                .unwrap();
            assert!((o.x - (seg.x + seg.w / 2.0)).abs() < 1e-2);
        }
    }

    #[test]
    fn test_generation_resets_rat_and_hazards() {
        let mut state = surface(5);
        state.rat.pos = Vec2::new(4000.0, 60.0);
        state.rat.vel = Vec2::new(5.0, -3.0);
        state.hazards.push(crate::sim::FallingHazard {
            pos: Vec2::new(10.0, 10.0),
            vy: 0.0,
        });
        state.level_completed = true;

        generate_level(&mut state, Level::Surface);
        assert_eq!(state.rat.pos, Vec2::new(SPAWN_X, 0.0));
        assert_eq!(state.rat.vel, Vec2::ZERO);
        assert!(state.hazards.is_empty());
        assert!(!state.level_completed);
    }

    #[test]
    fn test_transition_fires_once() {
        let mut state = surface(8);
        state.events.clear();
        assert!(enter_next_level(&mut state));
        assert_eq!(state.level, Level::Subway);
        assert!(state.level_completed);
        assert_eq!(state.progress, 0.0);
        assert!(state.events.contains(&GameEvent::LevelChanged {
            level: Level::Subway
        }));

        let buildings = state.buildings.clone();
        assert!(!enter_next_level(&mut state));
        assert_eq!(state.level, Level::Subway);
        assert_eq!(state.buildings, buildings);
    }

    #[test]
    fn test_district_boundaries() {
        assert_eq!(District::for_block(0, 25), District::Burbs);
        assert_eq!(District::for_block(8, 25), District::Burbs);
        assert_eq!(District::for_block(9, 25), District::Downtown);
        assert_eq!(District::for_block(16, 25), District::Downtown);
        assert_eq!(District::for_block(17, 25), District::Industrial);
        assert_eq!(District::for_block(24, 25), District::Industrial);
    }

    proptest! {
        #[test]
        fn prop_district_hue_bands(seed in any::<u64>()) {
            let state = surface(seed);
            let n = state.buildings.len();
            for (i, b) in state.buildings.iter().enumerate() {
                let district = District::for_block(i, n);
                let (lo, hi) = district.hue_band();
                prop_assert_eq!(hi - lo, 2.0 * HUE_BAND_HALF_WIDTH);
                prop_assert!(b.color.hue >= lo && b.color.hue <= hi);
                prop_assert_eq!(b.kind, BuildingKind::Street { district });
            }
        }
    }

    #[test]
    fn test_hue_bands_disjoint() {
        let bands = [District::Burbs, District::Downtown, District::Industrial]
            .map(District::hue_band);
        for (i, a) in bands.iter().enumerate() {
            for b in bands.iter().skip(i + 1) {
                assert!(a.1 < b.0 || b.1 < a.0);
            }
        }
    }
}
