//! Game configuration
//!
//! Every tunable the simulation reads lives in `GameConfig`. The simulation
//! takes its own copy at construction and never mutates it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Rect;

/// Errors raised while loading or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: i64 },
    #[error("{field} must be at most {max} (got {value})")]
    TooLarge {
        field: &'static str,
        value: i64,
        max: i64,
    },
    #[error("ai_fire_chance must be within 0.0..=1.0 (got {0})")]
    FireChance(f64),
}

/// Largest accepted screen side; keeps every world coordinate well inside `i32`
pub const MAX_SCREEN_EXTENT: i32 = 16_384;

/// Immutable game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width: i32,
    pub screen_height: i32,
    pub tile_size: i32,
    /// Target frame rate of the outer loop
    pub fps: u32,

    pub tank_speed: i32,
    pub shoot_cooldown: u32,

    pub bullet_speed: i32,
    pub bullet_size: i32,

    /// Ticks between AI wander re-rolls
    pub ai_direction_interval: u32,
    /// Probability the AI fires on a given tick
    pub ai_fire_chance: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            tile_size: TILE_SIZE,
            fps: FPS,
            tank_speed: TANK_SPEED,
            shoot_cooldown: SHOOT_COOLDOWN,
            bullet_speed: BULLET_SPEED,
            bullet_size: BULLET_SIZE,
            ai_direction_interval: AI_DIRECTION_INTERVAL,
            ai_fire_chance: AI_FIRE_CHANCE,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would produce degenerate geometry
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            ("screen_width", self.screen_width as i64),
            ("screen_height", self.screen_height as i64),
            ("tile_size", self.tile_size as i64),
            ("fps", self.fps as i64),
            ("tank_speed", self.tank_speed as i64),
            ("bullet_speed", self.bullet_speed as i64),
            ("bullet_size", self.bullet_size as i64),
            ("ai_direction_interval", self.ai_direction_interval as i64),
        ];
        for (field, value) in sizes {
            if value <= 0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let short_side = self.screen_width.min(self.screen_height);
        let long_side = self.screen_width.max(self.screen_height);
        let limits = [
            ("screen_width", self.screen_width, MAX_SCREEN_EXTENT),
            ("screen_height", self.screen_height, MAX_SCREEN_EXTENT),
            ("tile_size", self.tile_size, short_side),
            ("tank_speed", self.tank_speed, self.tile_size),
            ("bullet_size", self.bullet_size, self.tile_size),
            ("bullet_speed", self.bullet_speed, long_side),
        ];
        for (field, value, max) in limits {
            if value > max {
                return Err(ConfigError::TooLarge {
                    field,
                    value: value as i64,
                    max: max as i64,
                });
            }
        }

        if !(0.0..=1.0).contains(&self.ai_fire_chance) {
            return Err(ConfigError::FireChance(self.ai_fire_chance));
        }
        Ok(())
    }

    /// The playable screen area
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.screen_width, self.screen_height)
    }
}
