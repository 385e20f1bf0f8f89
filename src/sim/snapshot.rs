//! Read-only frame view handed to the renderer

use serde::Serialize;

use super::state::{Building, FallingHazard, Flyer, GameEvent, GameState, Level, Obstacle, Rat};

/// Everything a renderer needs for one frame, borrowed from the state
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot<'a> {
    pub frame: u64,
    pub level: Level,
    pub score: u32,
    pub camera_x: f32,
    /// Surface only; always 0 in the subway
    pub progress: f32,
    pub rat: &'a Rat,
    pub buildings: &'a [Building],
    pub obstacles: &'a [Obstacle],
    pub flyers: &'a [Flyer],
    pub hazards: &'a [FallingHazard],
    pub events: &'a [GameEvent],
}

impl<'a> FrameSnapshot<'a> {
    pub fn new(state: &'a GameState) -> Self {
        Self {
            frame: state.frame,
            level: state.level,
            score: state.score,
            camera_x: state.camera_x,
            progress: state.progress,
            rat: &state.rat,
            buildings: &state.buildings,
            obstacles: &state.obstacles,
            flyers: &state.flyers,
            hazards: &state.hazards,
            events: &state.events,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Viewport;

    #[test]
    fn test_snapshot_json_shape() {
        let state = GameState::new(21, Viewport::default());
        let json = FrameSnapshot::new(&state).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["level"], "Surface");
        assert_eq!(value["score"], 0);
        assert_eq!(
            value["buildings"].as_array().map(Vec::len),
            Some(state.buildings.len())
        );
        let kinds: Vec<_> = value["obstacles"]
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o["kind"].as_str().unwrap_or_default().to_string())
            .collect();
        assert!(kinds.iter().any(|k| k == "SUBWAY_ENTRANCE"));
    }
}
