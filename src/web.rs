//! Browser bridge
//!
//! The page owns the canvas and the keyboard/touch handlers. Each animation
//! frame it passes the current intent to [`WebGame::tick`] and draws the
//! returned snapshot JSON.

use wasm_bindgen::prelude::*;

use crate::audio::{AudioManager, SoundEffect};
use crate::settings::Settings;
use crate::sim::{FrameSnapshot, GameState, TickInput, Viewport, tick};

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }
    log::info!("RATS starting...");
}

/// One running game in the page
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    audio: AudioManager,
    settings: Settings,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> WebGame {
        let mut settings = Settings::load();
        settings.viewport_width = width;
        settings.viewport_height = height;

        let viewport = settings.viewport();
        let state = match settings.seed {
            Some(seed) => GameState::new(seed, viewport),
            None => GameState::from_entropy(viewport),
        };
        log::info!("New run, seed {}", state.seed);

        WebGame {
            audio: AudioManager::new(&settings),
            state,
            settings,
        }
    }

    /// Advance one frame and return the snapshot as JSON
    pub fn tick(&mut self, left: bool, right: bool, jump: bool, chew: bool) -> String {
        let input = TickInput {
            left,
            right,
            jump,
            chew,
        };
        tick(&mut self.state, &input);

        for event in &self.state.events {
            if let Some(effect) = SoundEffect::for_event(event) {
                self.audio.play(effect);
            }
        }

        match FrameSnapshot::new(&self.state).to_json() {
            Ok(json) => json,
            Err(e) => {
                log::error!("Snapshot failed: {}", e);
                String::from("{}")
            }
        }
    }

    /// Track canvas size; takes effect for camera now and for the next level
    pub fn resize(&mut self, width: f32, height: f32) {
        self.settings.viewport_width = width;
        self.settings.viewport_height = height;
        self.settings.save();
        self.state.viewport = Viewport::new(width, height);
        self.state.update_view();
    }

    /// Browsers only allow audio after a user gesture
    pub fn resume_audio(&self) {
        self.audio.resume();
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.settings.sfx_enabled = !muted;
        self.audio.apply(&self.settings);
        self.settings.save();
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }
}
