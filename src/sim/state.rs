//! Game state and core simulation types
//!
//! `GameState` owns every mutable collection of a match: the wall boxes, the
//! tanks with their controllers, and the bullets in flight.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::bullet::Bullet;
use super::controller::Controller;
use super::rect::Rect;
use crate::config::GameConfig;

/// Facing / travel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step in screen space (y grows downward)
    pub fn unit(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }
}

/// Tank identity, shown in the win banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TankColor {
    Green,
    Purple,
}

impl TankColor {
    pub fn label(&self) -> &'static str {
        match self {
            TankColor::Green => "GREEN",
            TankColor::Purple => "PURPLE",
        }
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            TankColor::Green => (0, 255, 0),
            TankColor::Purple => (128, 0, 128),
        }
    }
}

/// A tank. Knows nothing about who drives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tank {
    pub id: u32,
    pub rect: Rect,
    pub facing: Direction,
    pub color: TankColor,
    /// Ticks until the next shot is allowed
    pub shoot_cooldown: u32,
}

impl Tank {
    pub fn new(id: u32, pos: IVec2, size: i32, color: TankColor) -> Self {
        Self {
            id,
            rect: Rect::new(pos.x, pos.y, size, size),
            facing: Direction::Up,
            color,
            shoot_cooldown: 0,
        }
    }

    /// Midpoint of the edge the tank is facing; bullets spawn here
    pub fn muzzle(&self) -> IVec2 {
        let c = self.rect.center();
        match self.facing {
            Direction::Up => IVec2::new(c.x, self.rect.top()),
            Direction::Down => IVec2::new(c.x, self.rect.bottom()),
            Direction::Left => IVec2::new(self.rect.left(), c.y),
            Direction::Right => IVec2::new(self.rect.right(), c.y),
        }
    }

    /// Fire along the current facing if the cooldown has run out.
    /// Returns whether a bullet was added.
    pub fn shoot(
        &mut self,
        bullets: &mut Vec<Bullet>,
        next_id: &mut u32,
        config: &GameConfig,
    ) -> bool {
        if self.shoot_cooldown > 0 {
            return false;
        }

        let id = *next_id;
        *next_id += 1;
        let bullet = Bullet::new(
            id,
            self.muzzle(),
            config.bullet_size,
            self.facing,
            config.bullet_speed,
            self,
        );
        log::debug!(
            "{} fired bullet {} {:?} from {:?}",
            self.color.label(),
            id,
            self.facing,
            self.muzzle()
        );
        bullets.push(bullet);
        self.shoot_cooldown = config.shoot_cooldown;
        true
    }

    /// Once-per-tick cooldown decrement, floored at zero
    pub fn cool_down(&mut self) {
        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
    }
}

/// Who drives a seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pilot {
    Human,
    Ai,
}

/// A tank slot in a match: identity, spawn point and driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub color: TankColor,
    pub spawn: IVec2,
    pub pilot: Pilot,
}

impl Seat {
    /// Green human in the top-left and purple AI in the bottom-right
    pub fn standard(config: &GameConfig) -> [Seat; 2] {
        let t = config.tile_size;
        [
            Seat {
                color: TankColor::Green,
                spawn: IVec2::new(2 * t, 2 * t),
                pilot: Pilot::Human,
            },
            Seat {
                color: TankColor::Purple,
                spawn: IVec2::new(config.screen_width - 3 * t, config.screen_height - 3 * t),
                pilot: Pilot::Ai,
            },
        ]
    }
}

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Terminal: set once, never cleared
    GameOver { winner: TankColor },
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub arena: Arena,
    /// Remaining wall boxes (row-major spawn order)
    pub walls: Vec<Rect>,
    /// Tanks in spawn order
    pub tanks: Vec<Tank>,
    /// One controller per tank, same order as `tanks`
    pub(crate) controllers: Vec<Controller>,
    pub bullets: Vec<Bullet>,
    pub phase: GamePhase,
    /// Simulation tick counter (stops when the game is over)
    pub time_ticks: u64,
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) next_id: u32,
}

impl GameState {
    /// Standard match: the reference arena, player vs AI
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let seats = Seat::standard(&config);
        Self::with_arena(config, Arena::standard(), seed, &seats)
    }

    /// Standard arena with both seats driven by the AI
    pub fn demo(config: GameConfig, seed: u64) -> Self {
        let seats = Seat::standard(&config).map(|seat| Seat {
            pilot: Pilot::Ai,
            ..seat
        });
        Self::with_arena(config, Arena::standard(), seed, &seats)
    }

    /// Arbitrary arena and seating
    pub fn with_arena(config: GameConfig, arena: Arena, seed: u64, seats: &[Seat]) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let walls = arena.build_walls(config.tile_size);

        let mut next_id = 1;
        let mut tanks = Vec::with_capacity(seats.len());
        let mut controllers = Vec::with_capacity(seats.len());
        for seat in seats {
            tanks.push(Tank::new(next_id, seat.spawn, config.tile_size, seat.color));
            next_id += 1;
            controllers.push(match seat.pilot {
                Pilot::Human => Controller::Human,
                Pilot::Ai => Controller::ai(&mut rng),
            });
        }

        log::info!(
            "Match started with seed {}: {} tanks, {} walls",
            seed,
            tanks.len(),
            walls.len()
        );

        Self {
            config,
            arena,
            walls,
            tanks,
            controllers,
            bullets: Vec::new(),
            phase: GamePhase::Playing,
            time_ticks: 0,
            seed,
            rng,
            next_id,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver { .. })
    }

    pub fn winner(&self) -> Option<TankColor> {
        match self.phase {
            GamePhase::GameOver { winner } => Some(winner),
            GamePhase::Playing => None,
        }
    }

    /// Controller driving the tank at `index`
    pub fn controller(&self, index: usize) -> Option<&Controller> {
        self.controllers.get(index)
    }

    /// Fire from the tank at `index`, outside the normal controller flow
    pub fn fire(&mut self, index: usize) -> bool {
        let Some(tank) = self.tanks.get_mut(index) else {
            return false;
        };
        tank.shoot(&mut self.bullets, &mut self.next_id, &self.config)
    }
}
