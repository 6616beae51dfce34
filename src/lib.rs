//! Tank Battle - a two-tank arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, bullets, walls, game state)
//! - `config`: Immutable game configuration
//! - `platform`: Input sources and frame pacing
//! - `renderer`: Presentation of a frame snapshot

pub mod config;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, GameConfig};

/// Game configuration constants (defaults for `GameConfig`)
pub mod consts {
    /// Screen dimensions in world units
    pub const SCREEN_WIDTH: i32 = 800;
    pub const SCREEN_HEIGHT: i32 = 600;
    /// Side length of one arena tile (and of a tank)
    pub const TILE_SIZE: i32 = 40;
    /// Simulation ticks per second
    pub const FPS: u32 = 60;

    /// Tank movement per tick
    pub const TANK_SPEED: i32 = 3;
    /// Ticks between shots from the same tank (0.5 s)
    pub const SHOOT_COOLDOWN: u32 = 30;

    /// Bullet movement per tick
    pub const BULLET_SPEED: i32 = 8;
    /// Bullet hitbox side, centered on the spawn point
    pub const BULLET_SIZE: i32 = 4;

    /// AI re-rolls its wander direction every 2 seconds
    pub const AI_DIRECTION_INTERVAL: u32 = FPS * 2;
    /// Per-tick chance that the AI pulls the trigger
    pub const AI_FIRE_CHANCE: f64 = 0.02;
}
