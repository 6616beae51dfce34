//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed tick per call, integer world units
//! - Seeded RNG only
//! - Stable iteration order (spawn order for tanks and bullets, row-major for walls)
//! - No rendering or platform dependencies

pub mod arena;
pub mod bullet;
pub mod collision;
pub mod controller;
pub mod rect;
pub mod state;
pub mod tick;

pub use arena::{Arena, MapError, STANDARD_LAYOUT, TileKind};
pub use bullet::{Bullet, Expiry};
pub use collision::{attempt_move, first_wall_hit};
pub use controller::{Action, AiState, Controller};
pub use rect::Rect;
pub use state::{Direction, GamePhase, GameState, Pilot, Seat, Tank, TankColor};
pub use tick::{TickInput, tick};
