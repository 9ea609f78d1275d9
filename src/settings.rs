//! Player preferences
//!
//! Stored as JSON under their own LocalStorage key, next to (not inside)
//! the best score.

use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use crate::best_score::local_storage;
use crate::best_score::StorageError;
use crate::consts::MAX_PARTICLES;
use crate::sim::MovementRule;

/// LocalStorage key for the JSON blob
pub const SETTINGS_KEY: &str = "snake-settings";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Edge behaviour; applied at the next restart
    pub movement: MovementRule,

    /// Board jolts on eat and death
    pub screen_shake: bool,
    pub particles: bool,

    /// Overall gain, 0..=1
    pub master_volume: f32,
    /// Cue gain on top of the master, 0..=1
    pub sfx_volume: f32,
    pub muted: bool,
    /// Vibrate on cues where supported
    pub haptics: bool,
    /// Silence cues while the window is unfocused
    pub mute_on_blur: bool,
    /// Pause when the tab is hidden or the window loses focus
    pub auto_pause_on_blur: bool,

    /// Turns off shake and the head pulse
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            movement: MovementRule::Wrap,
            screen_shake: true,
            particles: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            haptics: true,
            mute_on_blur: true,
            auto_pause_on_blur: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Head grows briefly after eating
    pub fn effective_eat_pulse(&self) -> bool {
        !self.reduced_motion
    }

    /// How many particles the renderer may draw
    pub fn max_particles(&self) -> usize {
        if self.particles { MAX_PARTICLES } else { 0 }
    }

    /// Cue gain after master/sfx/mute
    pub fn effective_volume(&self) -> f32 {
        let gain = self.master_volume.clamp(0.0, 1.0) * self.sfx_volume.clamp(0.0, 1.0);
        if self.muted { 0.0 } else { gain }
    }

    /// Parse stored JSON, falling back to defaults for anything unreadable
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    /// Read persisted settings; anything missing or unreadable falls back
    /// to defaults
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = local_storage().and_then(|storage| {
            storage
                .get_item(SETTINGS_KEY)
                .map_err(|e| StorageError::Read(format!("{:?}", e)))
        });
        match stored {
            Ok(Some(json)) => {
                log::info!("Settings restored");
                Self::from_json(&json)
            }
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("Settings unavailable: {}", e);
                Self::default()
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string(self).map_err(|e| StorageError::Write(e.to_string()))?;
        local_storage()?
            .set_item(SETTINGS_KEY, &json)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))?;
        log::info!("Settings saved ({} bytes)", json.len());
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    /// Nowhere to persist natively
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
