//! Bullet lifecycle
//!
//! A bullet flies in a straight line until it hits a wall, hits a tank other
//! than the one that fired it, or leaves the screen. Classification is a
//! read-only pass; the caller applies the wall removal.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::collision::first_wall_hit;
use super::rect::Rect;
use super::state::{Direction, Tank, TankColor};

/// A projectile in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub rect: Rect,
    pub direction: Direction,
    pub speed: i32,
    /// Entity id of the tank that fired this bullet
    pub owner: u32,
    /// Colour of the owner, for rendering and win attribution
    pub owner_color: TankColor,
}

/// Why a bullet left play this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// Struck the wall at this index; that wall is destroyed
    Wall(usize),
    /// Struck the tank with this entity id
    Tank(u32),
    OutOfBounds,
}

impl Bullet {
    /// Spawn a `size`×`size` bullet centered on `origin`
    pub fn new(
        id: u32,
        origin: IVec2,
        size: i32,
        direction: Direction,
        speed: i32,
        owner: &Tank,
    ) -> Self {
        Self {
            id,
            rect: Rect::centered(origin, size),
            direction,
            speed,
            owner: owner.id,
            owner_color: owner.color,
        }
    }

    /// Move one tick along the fixed direction
    pub fn advance(&mut self) {
        self.rect = self.rect.translated(self.direction.unit() * self.speed);
    }

    /// Decide whether the bullet expires at its current position.
    ///
    /// Walls are checked before tanks, so a bullet overlapping both only
    /// reports the wall.
    pub fn classify(&self, walls: &[Rect], tanks: &[Tank], bounds: &Rect) -> Option<Expiry> {
        if let Some(index) = first_wall_hit(&self.rect, walls) {
            return Some(Expiry::Wall(index));
        }

        if let Some(tank) = self.first_enemy_hit(tanks) {
            return Some(Expiry::Tank(tank.id));
        }

        let in_x = (bounds.left()..=bounds.right()).contains(&self.rect.left());
        let in_y = (bounds.top()..=bounds.bottom()).contains(&self.rect.top());
        if !(in_x && in_y) {
            return Some(Expiry::OutOfBounds);
        }

        None
    }

    /// First tank other than the owner that this bullet overlaps
    pub fn first_enemy_hit<'a>(&self, tanks: &'a [Tank]) -> Option<&'a Tank> {
        tanks
            .iter()
            .find(|tank| tank.id != self.owner && self.rect.intersects(&tank.rect))
    }

    /// Advance one tick and classify; the full per-tick update
    pub fn update(&mut self, walls: &[Rect], tanks: &[Tank], bounds: &Rect) -> Option<Expiry> {
        self.advance();
        self.classify(walls, tanks, bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Rect = Rect::new(0, 0, 800, 600);

    fn tank(id: u32, x: i32, y: i32, color: TankColor) -> Tank {
        Tank::new(id, IVec2::new(x, y), 40, color)
    }

    fn bullet_from(owner: &Tank, origin: IVec2, direction: Direction) -> Bullet {
        Bullet::new(100, origin, 4, direction, 8, owner)
    }

    #[test]
    fn test_bullet_leaves_screen_in_one_tick() {
        let green = tank(1, 80, 80, TankColor::Green);
        let mut bullet = bullet_from(&green, IVec2::new(796, 300), Direction::Right);
        assert_eq!(bullet.rect.left(), 794);

        let expiry = bullet.update(&[], &[green], &SCREEN);
        assert_eq!(bullet.rect.left(), 802);
        assert_eq!(expiry, Some(Expiry::OutOfBounds));
    }

    #[test]
    fn test_bullet_on_screen_edge_survives() {
        let green = tank(1, 80, 80, TankColor::Green);
        // Left edge lands exactly on 800: still inside the inclusive range
        let mut bullet = bullet_from(&green, IVec2::new(794, 300), Direction::Right);
        assert_eq!(bullet.update(&[], &[green], &SCREEN), None);
        assert_eq!(bullet.rect.left(), 800);
    }

    #[test]
    fn test_bullet_reports_first_wall() {
        let green = tank(1, 80, 80, TankColor::Green);
        let walls = vec![Rect::new(0, 0, 40, 40), Rect::new(200, 40, 40, 40)];
        let mut bullet = bullet_from(&green, IVec2::new(220, 86), Direction::Up);
        assert_eq!(bullet.update(&walls, &[green], &SCREEN), Some(Expiry::Wall(1)));
    }

    #[test]
    fn test_owner_is_ignored() {
        let green = tank(1, 80, 80, TankColor::Green);
        let bullet = bullet_from(&green, IVec2::new(100, 100), Direction::Up);
        assert_eq!(bullet.classify(&[], std::slice::from_ref(&green), &SCREEN), None);
    }

    #[test]
    fn test_enemy_tank_hit() {
        let green = tank(1, 80, 80, TankColor::Green);
        let purple = tank(2, 200, 80, TankColor::Purple);
        let mut bullet = bullet_from(&green, IVec2::new(195, 100), Direction::Right);
        let tanks = [green, purple];
        assert_eq!(bullet.update(&[], &tanks, &SCREEN), Some(Expiry::Tank(2)));
        assert_eq!(bullet.first_enemy_hit(&tanks).map(|t| t.color), Some(TankColor::Purple));
    }

    #[test]
    fn test_wall_takes_priority_over_tank() {
        let green = tank(1, 80, 80, TankColor::Green);
        let purple = tank(2, 200, 80, TankColor::Purple);
        let walls = vec![Rect::new(200, 90, 40, 40)];
        let bullet = bullet_from(&green, IVec2::new(202, 100), Direction::Right);
        let tanks = [green, purple];
        assert_eq!(bullet.classify(&walls, &tanks, &SCREEN), Some(Expiry::Wall(0)));
        // The enemy overlap is still visible to the hit re-test
        assert!(bullet.first_enemy_hit(&tanks).is_some());
    }
}
