//! Fixed timestep simulation tick
//!
//! One call advances the match by one frame: tanks act, bullets fly, hits are
//! resolved. Once a winner is decided every further call is a no-op.

use super::bullet::{Bullet, Expiry};
use super::collision::attempt_move;
use super::state::{Direction, GamePhase, GameState};

/// Logical controls held during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub shoot: bool,
}

impl TickInput {
    /// First held direction in priority order up > down > left > right
    pub fn direction(&self) -> Option<Direction> {
        [
            (self.up, Direction::Up),
            (self.down, Direction::Down),
            (self.left, Direction::Left),
            (self.right, Direction::Right),
        ]
        .into_iter()
        .find_map(|(held, dir)| held.then_some(dir))
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.is_over() {
        return;
    }
    state.time_ticks += 1;

    update_tanks(state, input);
    let expired = update_bullets(state);
    resolve_hits(state, &expired);
}

fn update_tanks(state: &mut GameState, input: &TickInput) {
    let GameState {
        config,
        walls,
        tanks,
        controllers,
        bullets,
        rng,
        next_id,
        ..
    } = state;
    let bounds = config.bounds();

    for (tank, controller) in tanks.iter_mut().zip(controllers.iter_mut()) {
        let action = controller.decide(input, rng, config);

        if let Some(dir) = action.movement {
            tank.facing = dir;
            attempt_move(&mut tank.rect, dir.unit() * config.tank_speed, walls, &bounds);
        }
        if action.fire {
            tank.shoot(bullets, next_id, config);
        }
        tank.cool_down();
    }
}

/// Move every bullet and drop the ones that expired. Returns the removed
/// bullets at their final positions.
fn update_bullets(state: &mut GameState) -> Vec<Bullet> {
    let bounds = state.config.bounds();
    let mut expired = Vec::new();

    for bullet in state.bullets.iter_mut() {
        let Some(expiry) = bullet.update(&state.walls, &state.tanks, &bounds) else {
            continue;
        };
        // Applied before the next bullet is classified, so one wall can only
        // absorb one bullet.
        if let Expiry::Wall(index) = expiry {
            let wall = state.walls.remove(index);
            log::debug!("Bullet {} destroyed wall at ({}, {})", bullet.id, wall.x, wall.y);
        }
        expired.push(*bullet);
    }

    state
        .bullets
        .retain(|b| !expired.iter().any(|gone| gone.id == b.id));
    expired
}

/// Credit the first expired bullet that overlaps an enemy tank
fn resolve_hits(state: &mut GameState, expired: &[Bullet]) {
    let hit = expired
        .iter()
        .find_map(|bullet| bullet.first_enemy_hit(&state.tanks).map(|tank| (bullet, tank)));

    if let Some((bullet, tank)) = hit {
        log::info!(
            "{} tank destroyed by bullet {}; {} wins after {} ticks",
            tank.color.label(),
            bullet.id,
            bullet.owner_color.label(),
            state.time_ticks
        );
        state.phase = GamePhase::GameOver {
            winner: bullet.owner_color,
        };
    }
}
