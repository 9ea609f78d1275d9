//! Web Audio backend
//!
//! Every cue is a short run of oscillator blips with an exponential decay.
//! The context is created lazily from the first player gesture.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use super::SoundCue;
use crate::settings::Settings;

/// One note of a cue: (delay s, frequency Hz, duration s, waveform, gain)
type Note = (f64, f32, f64, OscillatorType, f32);

/// Plays cues; silent until `ensure_ready` succeeds
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
    haptics: bool,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl AudioManager {
    /// Build without touching the audio hardware; see `ensure_ready`
    pub fn new(settings: &Settings) -> Self {
        Self {
            ctx: None,
            volume: settings.effective_volume(),
            haptics: settings.haptics,
            muted: false,
        }
    }

    /// Create or resume the audio context. Idempotent; call from a user
    /// gesture since browsers refuse to start audio otherwise.
    pub fn ensure_ready(&mut self) {
        if self.ctx.is_none() {
            self.ctx = AudioContext::new().ok();
            if self.ctx.is_none() {
                log::warn!("No AudioContext, cues will be silent");
                return;
            }
            log::info!("Audio context created");
        }
        if let Some(ctx) = &self.ctx {
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }
    }

    /// Re-read volume and haptics preferences
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings.effective_volume();
        self.haptics = settings.haptics;
    }

    /// Mute/unmute all audio (e.g. on window blur)
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    /// Play a cue and fire its haptic pulse
    pub fn play(&self, cue: SoundCue) {
        if self.haptics && !self.muted {
            vibrate(cue.haptic_ms());
        }

        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        let notes: &[Note] = match cue {
            SoundCue::Eat => &[
                (0.0, 880.0, 0.08, OscillatorType::Square, 0.06),
                (0.05, 1100.0, 0.1, OscillatorType::Square, 0.05),
            ],
            SoundCue::EatGolden => &[
                (0.0, 1047.0, 0.08, OscillatorType::Square, 0.07),
                (0.06, 1319.0, 0.08, OscillatorType::Square, 0.06),
                (0.12, 1568.0, 0.12, OscillatorType::Square, 0.06),
            ],
            SoundCue::EatSpeed => &[
                (0.0, 660.0, 0.06, OscillatorType::Sawtooth, 0.05),
                (0.04, 880.0, 0.06, OscillatorType::Sawtooth, 0.05),
            ],
            SoundCue::Death => &[
                (0.0, 440.0, 0.15, OscillatorType::Square, 0.08),
                (0.1, 330.0, 0.15, OscillatorType::Square, 0.07),
                (0.2, 220.0, 0.25, OscillatorType::Triangle, 0.06),
            ],
            SoundCue::Turn => &[(0.0, 300.0, 0.02, OscillatorType::Sine, 0.015)],
        };

        for &(delay, freq, duration, osc_type, gain) in notes {
            self.play_tone(ctx, delay, freq, duration, osc_type, gain * vol);
        }
    }

    /// Oscillator routed through its own gain node
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

    /// Single decaying blip
    fn play_tone(
        &self,
        ctx: &AudioContext,
        delay: f64,
        freq: f32,
        duration: f64,
        osc_type: OscillatorType,
        gain_value: f32,
    ) {
        let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) else {
            return;
        };
        let t = ctx.current_time() + delay;

        gain.gain().set_value_at_time(gain_value, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.001, t + duration)
            .ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + duration).ok();
    }
}

/// Haptic pulse where the browser supports it
fn vibrate(ms: u32) {
    if let Some(window) = web_sys::window() {
        let _ = window.navigator().vibrate_with_duration(ms);
    }
}
