//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//!
//! Each [`SoundEffect`] is described by a [`Voice`]: plain data that the
//! browser player turns into an oscillator, an optional filter and a gain
//! envelope. The descriptions compile and test natively; only
//! [`AudioManager`] touches Web Audio.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Short engine pulse while driving
    Engine,
    /// Obstacle dodged
    Score,
    /// Three-note arpeggio on a new level
    LevelUp,
    /// Crash
    Collision,
}

impl SoundEffect {
    /// Sound for a simulation event, if it has one
    ///
    /// `EngineStop` has no sound of its own; the player silences the engine
    /// voice instead.
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::EngineTick => Some(Self::Engine),
            GameEvent::ObstacleScored => Some(Self::Score),
            GameEvent::LevelUp { .. } => Some(Self::LevelUp),
            GameEvent::Collision => Some(Self::Collision),
            GameEvent::EngineStop => None,
        }
    }

    /// Describe the voice for this effect
    ///
    /// `jitter` in `[0, 1)` detunes the engine so consecutive pulses differ.
    pub fn voice(self, jitter: f32) -> Voice {
        match self {
            SoundEffect::Engine => Voice {
                waveform: Waveform::Sawtooth,
                pitch: Pitch::Linear {
                    from: 150.0 + jitter * 50.0,
                    to: 200.0 + jitter * 50.0,
                },
                highpass: Some(100.0),
                gain: 0.2,
                duration: 0.1,
            },
            SoundEffect::Score => Voice {
                waveform: Waveform::Sine,
                pitch: Pitch::Steps(&[(0.0, 800.0), (0.067, 1000.0), (0.133, 1200.0)]),
                highpass: None,
                gain: 0.25,
                duration: 0.2,
            },
            SoundEffect::LevelUp => Voice {
                waveform: Waveform::Sine,
                // C5, E5, G5
                pitch: Pitch::Steps(&[(0.0, 523.0), (0.1, 659.0), (0.2, 784.0)]),
                highpass: None,
                gain: 0.2,
                duration: 0.3,
            },
            SoundEffect::Collision => Voice {
                waveform: Waveform::Sine,
                pitch: Pitch::Exponential {
                    from: 200.0,
                    to: 100.0,
                },
                highpass: None,
                gain: 0.4,
                duration: 0.2,
            },
        }
    }
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Sawtooth,
}

/// Frequency over the life of a voice
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pitch {
    /// Linear glide across the whole duration
    Linear { from: f32, to: f32 },
    /// Exponential glide across the whole duration
    Exponential { from: f32, to: f32 },
    /// Hard steps at `(offset seconds, Hz)`
    Steps(&'static [(f64, f32)]),
}

impl Pitch {
    /// Starting frequency in Hz
    pub fn start(&self) -> f32 {
        match *self {
            Pitch::Linear { from, .. } | Pitch::Exponential { from, .. } => from,
            Pitch::Steps(steps) => steps.first().map_or(0.0, |&(_, hz)| hz),
        }
    }
}

/// One synthesized sound
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    pub waveform: Waveform,
    pub pitch: Pitch,
    /// High-pass cutoff in Hz
    pub highpass: Option<f32>,
    /// Peak gain before volume scaling; decays to near silence over `duration`
    pub gain: f32,
    /// Seconds
    pub duration: f64,
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{
        AudioContext, AudioNode, BiquadFilterType, GainNode, OscillatorNode, OscillatorType,
    };

    use super::{Pitch, SoundEffect, Voice, Waveform};
    use crate::settings::Settings;

    /// Gain envelope floor (exponential ramps cannot reach zero)
    const SILENCE: f32 = 0.01;

    impl From<Waveform> for OscillatorType {
        fn from(waveform: Waveform) -> Self {
            match waveform {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
            }
        }
    }

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
        /// Most recent engine pulse, stopped on `EngineStop`
        engine: Option<OscillatorNode>,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_volume(),
                engine: None,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Pick up volume and mute changes
        pub fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_volume();
            if self.volume <= 0.0 {
                self.stop_engine();
            }
        }

        /// Silence the engine pulse if one is still sounding
        pub fn stop_engine(&mut self) {
            if let Some(osc) = self.engine.take() {
                let _ = osc.stop();
            }
        }

        /// Play a sound effect
        pub fn play(&mut self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let voice = effect.voice(js_sys::Math::random() as f32);
            let Some(osc) = play_voice(ctx, &voice, vol) else {
                log::warn!("Could not synthesize {:?}", effect);
                return;
            };
            if effect == SoundEffect::Engine {
                self.engine = Some(osc);
            }
        }
    }

    /// Build and schedule one voice, returning its oscillator
    fn play_voice(ctx: &AudioContext, voice: &Voice, vol: f32) -> Option<OscillatorNode> {
        let (osc, gain) = filtered_chain(ctx, voice).or_else(|| {
            log::warn!("Filter chain unavailable, using plain oscillator");
            plain_chain(ctx, voice)
        })?;
        let t = ctx.current_time();
        let end = t + voice.duration;

        gain.gain().set_value_at_time(vol * voice.gain, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(SILENCE, end)
            .ok();

        let freq = osc.frequency();
        match voice.pitch {
            Pitch::Linear { from, to } => {
                freq.set_value_at_time(from, t).ok();
                freq.linear_ramp_to_value_at_time(to, end).ok();
            }
            Pitch::Exponential { from, to } => {
                freq.set_value_at_time(from, t).ok();
                freq.exponential_ramp_to_value_at_time(to, end).ok();
            }
            Pitch::Steps(steps) => {
                for &(offset, hz) in steps {
                    freq.set_value_at_time(hz, t + offset).ok();
                }
            }
        }

        osc.start_with_when(t).ok()?;
        osc.stop_with_when(end).ok();
        Some(osc)
    }

    /// Oscillator -> optional high-pass -> gain -> destination
    fn filtered_chain(ctx: &AudioContext, voice: &Voice) -> Option<(OscillatorNode, GainNode)> {
        let osc = create_osc(ctx, voice)?;
        let gain = ctx.create_gain().ok()?;

        let head: AudioNode = match voice.highpass {
            Some(cutoff) => {
                let filter = ctx.create_biquad_filter().ok()?;
                filter.set_type(BiquadFilterType::Highpass);
                filter.frequency().set_value(cutoff);
                filter.connect_with_audio_node(&gain).ok()?;
                filter.into()
            }
            None => gain.clone().into(),
        };
        osc.connect_with_audio_node(&head).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;
        Some((osc, gain))
    }

    /// Oscillator -> gain -> destination
    fn plain_chain(ctx: &AudioContext, voice: &Voice) -> Option<(OscillatorNode, GainNode)> {
        let osc = create_osc(ctx, voice)?;
        let gain = ctx.create_gain().ok()?;
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;
        Some((osc, gain))
    }

    fn create_osc(ctx: &AudioContext, voice: &Voice) -> Option<OscillatorNode> {
        let osc = ctx.create_oscillator().ok()?;
        osc.set_type(voice.waveform.into());
        osc.frequency().set_value(voice.pitch.start());
        Some(osc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_mapping() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::EngineTick),
            Some(SoundEffect::Engine)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::ObstacleScored),
            Some(SoundEffect::Score)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::LevelUp { level: 4 }),
            Some(SoundEffect::LevelUp)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Collision),
            Some(SoundEffect::Collision)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::EngineStop), None);
    }

    #[test]
    fn test_engine_jitter() {
        let low = SoundEffect::Engine.voice(0.0);
        let high = SoundEffect::Engine.voice(0.99);
        assert_eq!(low.pitch.start(), 150.0);
        assert!(high.pitch.start() > 199.0 && high.pitch.start() < 200.0);
        assert_eq!(low.highpass, Some(100.0));
        assert_eq!(low.waveform, Waveform::Sawtooth);
    }

    #[test]
    fn test_only_engine_is_sawtooth() {
        let effects = [
            SoundEffect::Engine,
            SoundEffect::Score,
            SoundEffect::LevelUp,
            SoundEffect::Collision,
        ];
        let waveforms: Vec<Waveform> = effects.iter().map(|e| e.voice(0.0).waveform).collect();
        assert_eq!(
            waveforms,
            vec![
                Waveform::Sawtooth,
                Waveform::Sine,
                Waveform::Sine,
                Waveform::Sine
            ]
        );
    }

    #[test]
    fn test_level_up_arpeggio() {
        let voice = SoundEffect::LevelUp.voice(0.5);
        let Pitch::Steps(steps) = voice.pitch else {
            panic!("expected stepped pitch");
        };
        let notes: Vec<f32> = steps.iter().map(|&(_, hz)| hz).collect();
        assert_eq!(notes, vec![523.0, 659.0, 784.0]);
        assert!(steps.iter().all(|&(t, _)| t < voice.duration));
    }

    #[test]
    fn test_collision_falls() {
        let voice = SoundEffect::Collision.voice(0.0);
        assert_eq!(
            voice.pitch,
            Pitch::Exponential {
                from: 200.0,
                to: 100.0
            }
        );
    }
}
