//! Game settings
//!
//! Persisted in LocalStorage on the web. Missing fields fall back to the
//! defaults in `consts`, so old saved settings keep loading.

use serde::{Deserialize, Serialize};

use crate::clock::ClockMode;
use crate::consts::*;
use crate::error::SettingsError;

/// Smallest arena that still has room between the wall rows and goal columns
pub const MIN_ARENA_SIZE: i32 = 5;

/// Collisions are tested on the landing cell only, so a tick may move the
/// ball at most one cell or it can skip over a wall or goal
pub const MAX_STEPS_PER_TICK: i32 = 1;

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    /// Arena width in cells
    pub arena_width: i32,
    /// Arena height in cells
    pub arena_height: i32,

    // === Timing ===
    /// Milliseconds between ticks
    pub tick_interval_ms: f64,
    /// Logical steps per tick
    pub steps_per_tick: i32,
    /// Drop excess frame time instead of lagging behind
    pub resync_clock: bool,

    // === Rules ===
    /// Segments per paddle
    pub paddle_length: usize,
    /// Keep paddles between the wall rows
    pub clamp_paddles: bool,
    /// Points needed to win
    pub max_score: u32,
    /// Respawn RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,

    // === Display ===
    /// Canvas pixels per cell
    pub scaling_factor: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            tick_interval_ms: TICK_INTERVAL_MS,
            steps_per_tick: STEPS_PER_TICK,
            resync_clock: false,

            paddle_length: PADDLE_LENGTH,
            clamp_paddles: false,
            max_score: MAX_SCORE,
            seed: None,

            scaling_factor: SCALING_FACTOR,
        }
    }
}

impl Settings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys: serialization cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Check values the simulation relies on
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.arena_width < MIN_ARENA_SIZE || self.arena_height < MIN_ARENA_SIZE {
            return Err(SettingsError::ArenaTooSmall {
                width: self.arena_width,
                height: self.arena_height,
                min: MIN_ARENA_SIZE,
            });
        }
        if self.tick_interval_ms.is_nan() || self.tick_interval_ms <= 0.0 {
            return Err(SettingsError::NotPositive {
                field: "tick_interval_ms",
            });
        }
        if self.steps_per_tick <= 0 {
            return Err(SettingsError::NotPositive {
                field: "steps_per_tick",
            });
        }
        if self.steps_per_tick > MAX_STEPS_PER_TICK {
            return Err(SettingsError::TooManySteps {
                steps: self.steps_per_tick,
                max: MAX_STEPS_PER_TICK,
            });
        }
        if self.paddle_length == 0 {
            return Err(SettingsError::NotPositive {
                field: "paddle_length",
            });
        }
        if self.max_score == 0 {
            return Err(SettingsError::NotPositive { field: "max_score" });
        }
        if self.scaling_factor == 0 {
            return Err(SettingsError::NotPositive {
                field: "scaling_factor",
            });
        }
        // Paddle must fit between the wall rows
        if self.paddle_length as i32 > self.arena_height - 2 {
            return Err(SettingsError::PaddleTooLong {
                length: self.paddle_length,
                height: self.arena_height,
            });
        }
        Ok(())
    }

    pub fn clock_mode(&self) -> ClockMode {
        if self.resync_clock {
            ClockMode::Resync
        } else {
            ClockMode::Fixed
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "grid_pong_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
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
            let _ = storage.set_item(Self::STORAGE_KEY, &self.to_json());
            log::info!("Settings saved");
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
