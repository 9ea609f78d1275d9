//! Sound cues
//!
//! The engine only names cues; what they sound like is up to the audio
//! backend (`web::AudioManager` in the browser).

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::sim::{FoodKind, GameEvent};

/// Fire-and-forget feedback triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Plain apple eaten
    Eat,
    /// Golden food eaten
    EatGolden,
    /// Speed food eaten
    EatSpeed,
    /// Run ended
    Death,
    /// Heading changed
    Turn,
}

impl SoundCue {
    /// Cue for a simulation event
    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::Ate { kind, .. } => match kind {
                FoodKind::Apple => SoundCue::Eat,
                FoodKind::Golden => SoundCue::EatGolden,
                FoodKind::Speed => SoundCue::EatSpeed,
            },
            GameEvent::Turned(_) => SoundCue::Turn,
            GameEvent::Died { .. } => SoundCue::Death,
        }
    }

    /// Vibration pulse length (ms)
    pub fn haptic_ms(self) -> u32 {
        match self {
            SoundCue::Eat => 15,
            SoundCue::EatGolden => 30,
            SoundCue::EatSpeed => 20,
            SoundCue::Death => 100,
            SoundCue::Turn => 5,
        }
    }
}
