//! RATS entry point
//!
//! The browser build is driven from `rats_game::web`. Natively this runs the
//! simulation headless with the autopilot and prints the last frame.
//!
//! Usage: `rats-game [settings.json] [frames]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use rats_game::Settings;
    use rats_game::sim::{FrameSnapshot, GameEvent, GameState, Level, autopilot, tick};

    env_logger::init();
    log::info!("RATS (native, headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) if path != "-" => Settings::load_from(std::path::Path::new(&path)),
        _ => Settings::default(),
    };
    let frames: u64 = match args.next().map(|s| s.parse()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::warn!("Bad frame count ({}), using default", e);
            3600
        }
        None => 3600,
    };

    let viewport = settings.viewport();
    let mut state = match settings.seed {
        Some(seed) => GameState::new(seed, viewport),
        None => GameState::from_entropy(viewport),
    };
    log::info!("Seed {}, running {} frames", state.seed, frames);

    let mut chewed = 0u32;
    let mut hits = 0u32;
    for _ in 0..frames {
        let input = autopilot::drive(&state);
        let level = state.level;
        tick(&mut state, &input);

        for event in state.drain_events() {
            match event {
                GameEvent::Chew { .. } => chewed += 1,
                GameEvent::HazardHit => hits += 1,
                _ => {}
            }
        }
        if level != state.level {
            log::info!("Frame {}: reached {}", state.frame, state.level.as_str());
        } else if state.level == Level::Surface && state.frame % 600 == 0 {
            log::info!(
                "Frame {}: x={:.0} progress={:.2} score={}",
                state.frame,
                state.rat.pos.x,
                state.progress,
                state.score
            );
        }
    }

    log::info!(
        "Done: level={} score={} chewed={} hits={}",
        state.level.as_str(),
        state.score,
        chewed,
        hits
    );
    match FrameSnapshot::new(&state).to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Snapshot failed: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is rats_game::web::wasm_main
}
