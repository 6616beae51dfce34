//! Collision queries against the wall set and screen bounds
//!
//! Tanks move all-or-nothing: a blocked move leaves the rectangle where it
//! was. There is no sliding along walls and no penetration resolution.

use glam::IVec2;

use super::rect::Rect;

/// Index of the first wall (in iteration order) overlapping `rect`
pub fn first_wall_hit(rect: &Rect, walls: &[Rect]) -> Option<usize> {
    walls.iter().position(|wall| rect.intersects(wall))
}

/// Try to translate `rect` by `delta`.
///
/// The move is committed only if the candidate touches no wall and stays
/// fully inside `bounds`. Returns whether the rectangle moved.
pub fn attempt_move(rect: &mut Rect, delta: IVec2, walls: &[Rect], bounds: &Rect) -> bool {
    let candidate = rect.translated(delta);
    if first_wall_hit(&candidate, walls).is_some() {
        return false;
    }
    if !bounds.contains_rect(&candidate) {
        return false;
    }
    *rect = candidate;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::arena::Arena;
    use proptest::prelude::*;

    const SCREEN: Rect = Rect::new(0, 0, 800, 600);

    #[test]
    fn test_move_blocked_by_wall_above() {
        let walls = Arena::standard().build_walls(40);
        let mut tank = Rect::new(80, 80, 40, 40);
        // Row 1 is open, so first walk up against the border
        let mut moved = 0;
        while attempt_move(&mut tank, IVec2::new(0, -3), &walls, &SCREEN) {
            moved += 1;
        }
        assert_eq!(moved, 13);
        assert_eq!(tank, Rect::new(80, 41, 40, 40));

        let before = tank;
        assert!(!attempt_move(&mut tank, IVec2::new(0, -3), &walls, &SCREEN));
        assert_eq!(tank, before);
    }

    #[test]
    fn test_move_blocked_by_adjacent_wall() {
        let walls = vec![Rect::new(80, 40, 40, 40)];
        let mut tank = Rect::new(80, 80, 40, 40);
        assert!(!attempt_move(&mut tank, IVec2::new(0, -3), &walls, &SCREEN));
        assert_eq!(tank, Rect::new(80, 80, 40, 40));

        // Sideways is free
        assert!(attempt_move(&mut tank, IVec2::new(3, 0), &walls, &SCREEN));
        assert_eq!(tank, Rect::new(83, 80, 40, 40));
    }

    #[test]
    fn test_move_rejected_outside_screen() {
        let mut tank = Rect::new(759, 0, 40, 40);
        assert!(attempt_move(&mut tank, IVec2::new(1, 0), &[], &SCREEN));
        assert!(!attempt_move(&mut tank, IVec2::new(3, 0), &[], &SCREEN));
        assert!(!attempt_move(&mut tank, IVec2::new(0, -3), &[], &SCREEN));
        assert_eq!(tank, Rect::new(760, 0, 40, 40));
    }

    #[test]
    fn test_first_wall_hit_order() {
        let walls = vec![
            Rect::new(0, 0, 40, 40),
            Rect::new(40, 0, 40, 40),
            Rect::new(80, 0, 40, 40),
        ];
        let straddling = Rect::new(38, 10, 4, 4);
        assert_eq!(first_wall_hit(&straddling, &walls), Some(0));
        assert_eq!(first_wall_hit(&Rect::new(90, 50, 4, 4), &walls), None);
    }

    proptest! {
        #[test]
        fn prop_move_is_all_or_nothing(
            x in 0i32..=760,
            y in 0i32..=560,
            axis in 0usize..2,
            step in -3i32..=3,
        ) {
            let walls = Arena::standard().build_walls(40);
            let delta = if axis == 0 { IVec2::new(step, 0) } else { IVec2::new(0, step) };
            let start = Rect::new(x, y, 40, 40);
            let mut rect = start;

            let moved = attempt_move(&mut rect, delta, &walls, &SCREEN);
            if moved {
                prop_assert_eq!(rect, start.translated(delta));
                prop_assert!(first_wall_hit(&rect, &walls).is_none());
                prop_assert!(SCREEN.contains_rect(&rect));
            } else {
                prop_assert_eq!(rect, start);
            }
        }
    }
}
