//! Game settings and preferences
//!
//! The gameplay variants the tuning left open live here, persisted in
//! LocalStorage separately from any game state.

use serde::{Deserialize, Serialize};

pub use crate::sim::collision::HitboxMode;

use crate::consts::GAME_OVER_MARGIN;

/// What happens to the player's position on reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ResetPolicy {
    /// Leave the ship where it was when the run ended
    #[default]
    KeepPlayer,
    /// Snap the ship back to the horizontal center
    Recenter,
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Collision variant: full sprite bounds or centered shrunk hitboxes
    pub hitbox: HitboxMode,
    /// How far past the player's top edge an enemy may descend before the
    /// run ends; 0.0 is the exact-threshold variant
    pub game_over_margin: f32,
    /// Player repositioning on reset
    pub reset_policy: ResetPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hitbox: HitboxMode::default(),
            game_over_margin: GAME_OVER_MARGIN,
            reset_policy: ResetPolicy::default(),
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "stage_invaders_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
