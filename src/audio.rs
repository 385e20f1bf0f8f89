//! Sound effects for simulation events
//!
//! Procedurally generated tones - no external files needed! The mapping from
//! events to tones is plain data so it works (and is tested) on every target;
//! only the Web Audio player is wasm-specific.

use crate::sim::{GameEvent, Level};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Rat jumps
    Jump,
    /// Something got chewed
    Chew,
    /// Car horn after chewing a Prius
    Honk,
    /// Trap snaps shut
    Snap,
    /// Third rail zap
    Spark,
    /// Hit from above
    Splat,
    /// Stinger when a level starts
    LevelStart { level: Level },
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// One oscillator sweep with an exponential fade
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub waveform: Waveform,
    pub start_hz: f32,
    pub end_hz: f32,
    /// Seconds
    pub duration: f32,
    /// Peak gain before volume scaling
    pub gain: f32,
}

impl SoundEffect {
    /// The effect an event should trigger, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match *event {
            GameEvent::Jump => Some(SoundEffect::Jump),
            GameEvent::Chew { .. } => Some(SoundEffect::Chew),
            GameEvent::Honk => Some(SoundEffect::Honk),
            GameEvent::TrapSnap => Some(SoundEffect::Snap),
            GameEvent::RailSpark => Some(SoundEffect::Spark),
            GameEvent::HazardHit => Some(SoundEffect::Splat),
            GameEvent::LevelChanged { level } => Some(SoundEffect::LevelStart { level }),
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            // *Squeak!*
            SoundEffect::Jump => Tone {
                waveform: Waveform::Square,
                start_hz: 660.0,
                end_hz: 660.0,
                duration: 0.1,
                gain: 0.5,
            },
            SoundEffect::Chew => Tone {
                waveform: Waveform::Square,
                start_hz: 220.0,
                end_hz: 110.0,
                duration: 0.08,
                gain: 0.4,
            },
            SoundEffect::Honk => Tone {
                waveform: Waveform::Sawtooth,
                start_hz: 392.0,
                end_hz: 370.0,
                duration: 0.3,
                gain: 0.35,
            },
            SoundEffect::Snap => Tone {
                waveform: Waveform::Square,
                start_hz: 1200.0,
                end_hz: 300.0,
                duration: 0.05,
                gain: 0.5,
            },
            SoundEffect::Spark => Tone {
                waveform: Waveform::Sawtooth,
                start_hz: 3500.0,
                end_hz: 80.0,
                duration: 0.18,
                gain: 0.3,
            },
            SoundEffect::Splat => Tone {
                waveform: Waveform::Triangle,
                start_hz: 180.0,
                end_hz: 60.0,
                duration: 0.15,
                gain: 0.5,
            },
            SoundEffect::LevelStart { level } => Tone {
                waveform: Waveform::Sine,
                start_hz: match level {
                    Level::Surface => 440.0,
                    Level::Subway => 110.0,
                },
                end_hz: match level {
                    Level::Surface => 880.0,
                    Level::Subway => 55.0,
                },
                duration: 0.5,
                gain: 0.3,
            },
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web_audio::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web_audio {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundEffect, Tone, Waveform};
    use crate::settings::Settings;

    impl Waveform {
        fn oscillator_type(self) -> OscillatorType {
            match self {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Square => OscillatorType::Square,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
                Waveform::Triangle => OscillatorType::Triangle,
            }
        }
    }

    /// Web Audio player for sound effects
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        /// Gain applied to every effect, from [`Settings::effective_sfx_volume`]
        volume: f32,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_sfx_volume(),
            }
        }

        /// Pick up changed audio preferences
        pub fn apply(&mut self, settings: &Settings) {
            self.volume = settings.effective_sfx_volume();
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            self.play_tone(ctx, &effect.tone(), vol);
        }

        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        fn play_tone(&self, ctx: &AudioContext, tone: &Tone, vol: f32) {
            let Some((osc, gain)) =
                self.create_osc(ctx, tone.start_hz, tone.waveform.oscillator_type())
            else {
                return;
            };
            let t = ctx.current_time();
            let end = t + f64::from(tone.duration);

            gain.gain().set_value_at_time(vol * tone.gain, t).ok();
            gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok();
            if tone.end_hz != tone.start_hz {
                osc.frequency().set_value_at_time(tone.start_hz, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(tone.end_hz, end)
                    .ok();
            }

            osc.start().ok();
            osc.stop_with_when(end).ok();
        }
    }
}
