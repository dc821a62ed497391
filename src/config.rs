//! Tunables and difficulty tables.
//!
//! Everything here has a sensible `Default`; a JSON file only needs to list
//! the fields it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entities::{Bounds, Level, Vec2};
use crate::error::ConfigError;

// ── Difficulty tables ────────────────────────────────────────────────────────

/// Size of the shared life pool at level start.
pub fn hearts_for(level: &Level) -> u32 {
    match level {
        Level::Easy => 5,
        Level::Medium => 3,
        Level::Hard => 2,
    }
}

/// Multiplier applied to every enemy weapon's fire interval.
pub fn fire_interval_scale(level: &Level) -> f32 {
    match level {
        Level::Easy => 1.5,
        Level::Medium => 1.0,
        Level::Hard => 0.75,
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// px/s; must be an exact multiple of `acceleration_step`.
    pub top_speed: f32,
    /// px/s gained per frame while a direction is held.
    pub acceleration_step: f32,
    /// Released axes lose `1/decay_divisor` of their speed per frame.
    pub decay_divisor: f32,
    /// Speeds at or below this snap to zero while decaying.
    pub snap_threshold: f32,
    pub dodge_distance: f32,
    pub dodge_cooldown_ms: u64,
    pub dodge_invulnerability_ms: u64,
    pub damage_invulnerability_ms: u64,
    pub health: i32,
    /// Muzzle position relative to the ship.
    pub track_offset: Vec2,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            top_speed: 500.0,
            acceleration_step: 100.0,
            decay_divisor: 5.0,
            snap_threshold: 2.0,
            dodge_distance: 125.0,
            dodge_cooldown_ms: 2800,
            dodge_invulnerability_ms: 200,
            damage_invulnerability_ms: 1000,
            health: 3,
            track_offset: Vec2::new(25.0, 0.0),
        }
    }
}

impl PlayerTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let step = self.acceleration_step;
        if step <= 0.0 {
            return Err(ConfigError::StepNotPositive { step });
        }
        let ratio = self.top_speed / step;
        if (ratio - ratio.round()).abs() > 1e-4 {
            return Err(ConfigError::TopSpeedNotMultiple {
                top_speed: self.top_speed,
                step,
            });
        }
        if self.decay_divisor <= 1.0 {
            return Err(ConfigError::DecayDivisorTooSmall {
                divisor: self.decay_divisor,
            });
        }
        Ok(())
    }
}

// ── Game ──────────────────────────────────────────────────────────────────────

/// Smallest play area a level can be laid out in.
pub const MIN_WORLD_WIDTH: f32 = 320.0;
pub const MIN_WORLD_HEIGHT: f32 = 240.0;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub level: Level,
    pub player: PlayerTuning,
    pub world: Bounds,
}

impl GameConfig {
    pub fn for_level(level: Level) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate_world()?;
        Ok(config)
    }

    /// The play area must leave room for the spawn columns on the right and
    /// the player's start on the left.
    pub fn validate_world(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.world.width(), self.world.height());
        let fits = width >= MIN_WORLD_WIDTH && height >= MIN_WORLD_HEIGHT;
        if !fits {
            return Err(ConfigError::WorldTooSmall {
                width,
                height,
                min_width: MIN_WORLD_WIDTH,
                min_height: MIN_WORLD_HEIGHT,
            });
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Player tuning with health matched to the level's life pool.
    pub fn player_tuning(&self) -> PlayerTuning {
        PlayerTuning {
            health: hearts_for(&self.level) as i32,
            ..self.player.clone()
        }
    }
}
