// src/engine_lib/collision.rs
use glam::Vec2;
use super::level_types::{Level, Sector};

const PARALLEL_EPSILON: f32 = 1e-4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveResolution {
    pub x: f32,
    pub z: f32,
    pub collided: bool,
}

/// Parametric segment test; both parameters must land in `[0, 1]`.
/// Parallel and near-parallel pairs never intersect.
pub fn segments_intersect(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> bool {
    let denom = (p1.x - p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x - p4.x);
    if denom.abs() < PARALLEL_EPSILON {
        return false;
    }

    let t = ((p1.x - p3.x) * (p3.y - p4.y) - (p1.y - p3.y) * (p3.x - p4.x)) / denom;
    let u = -((p1.x - p2.x) * (p1.y - p3.y) - (p1.y - p2.y) * (p1.x - p3.x)) / denom;

    (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
}

fn blocks_move(sector: &Sector, from: Vec2, to: Vec2) -> bool {
    sector
        .walls
        .iter()
        .filter(|wall| wall.is_solid)
        .any(|wall| segments_intersect(from, to, wall.start(), wall.end()))
}

/// Checks the move `old -> desired` against the solid walls of the sector
/// containing the old position and, when different, the one containing the
/// desired position. Any hit rejects the whole move.
pub fn resolve_move(level: &Level, desired_x: f32, desired_z: f32, old_x: f32, old_z: f32) -> MoveResolution {
    let from = Vec2::new(old_x, old_z);
    let to = Vec2::new(desired_x, desired_z);

    let old_sector = level.find_containing_sector_index(old_x, old_z);
    let new_sector = level.find_containing_sector_index(desired_x, desired_z);

    let mut collided = false;
    if let Some(i) = old_sector {
        collided |= blocks_move(&level.sectors[i], from, to);
    }
    if let Some(j) = new_sector {
        if new_sector != old_sector {
            collided |= blocks_move(&level.sectors[j], from, to);
        }
    }

    if collided {
        MoveResolution { x: old_x, z: old_z, collided: true }
    } else {
        MoveResolution { x: desired_x, z: desired_z, collided: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_lib::level_types::Wall;

    fn square_level(solid: bool) -> Level {
        let mut sector = Sector::rectangle(0, 0, [-5.0, -5.0], [5.0, 5.0], 0.0, 4.0);
        for wall in &mut sector.walls {
            wall.is_solid = solid;
        }
        Level::new("square", "mem", vec![sector])
    }

    #[test]
    fn crossing_solid_wall_reverts_to_old_position() {
        let level = square_level(true);
        let result = resolve_move(&level, 0.0, -6.0, 0.0, -4.0);
        assert_eq!(result, MoveResolution { x: 0.0, z: -4.0, collided: true });
    }

    #[test]
    fn non_solid_wall_lets_the_move_through() {
        let level = square_level(false);
        let result = resolve_move(&level, 0.0, -6.0, 0.0, -4.0);
        assert_eq!(result, MoveResolution { x: 0.0, z: -6.0, collided: false });
    }

    #[test]
    fn move_inside_sector_is_untouched() {
        let level = square_level(true);
        let result = resolve_move(&level, 1.0, 1.5, 0.5, 0.5);
        assert_eq!(result, MoveResolution { x: 1.0, z: 1.5, collided: false });
    }

    #[test]
    fn new_sector_walls_are_checked_when_entering_from_outside() {
        let level = square_level(true);
        let result = resolve_move(&level, 0.0, -4.0, 0.0, -6.0);
        assert!(result.collided);
        assert_eq!((result.x, result.z), (0.0, -6.0));
    }

    #[test]
    fn invisible_solid_wall_still_blocks() {
        let mut level = square_level(true);
        level.sectors[0].walls[0].is_invisible = true;
        assert!(resolve_move(&level, 0.0, -6.0, 0.0, -4.0).collided);
    }

    #[test]
    fn open_portal_between_rooms() {
        let mut left = Sector::rectangle(0, 0, [0.0, 0.0], [4.0, 4.0], 0.0, 3.0);
        left.walls[1] = Wall { is_solid: false, ..left.walls[1].clone() }.invisible();
        let mut right = Sector::rectangle(1, 10, [4.0, 0.0], [8.0, 4.0], 0.0, 3.0);
        right.walls[3] = Wall { is_solid: false, ..right.walls[3].clone() }.invisible();
        let level = Level::new("rooms", "mem", vec![left, right]);

        let through = resolve_move(&level, 4.5, 2.0, 3.5, 2.0);
        assert!(!through.collided);
        let into_wall = resolve_move(&level, 8.5, 2.0, 7.5, 2.0);
        assert!(into_wall.collided);
    }

    #[test]
    fn segment_intersection_cases() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(2.0, 2.0);
        assert!(segments_intersect(a, b, Vec2::new(0.0, 2.0), Vec2::new(2.0, 0.0)));
        assert!(!segments_intersect(a, b, Vec2::new(3.0, 0.0), Vec2::new(3.0, 5.0)));
        // Touching at an endpoint counts.
        assert!(segments_intersect(a, b, Vec2::new(2.0, 2.0), Vec2::new(4.0, 0.0)));
        // Collinear overlap is treated as parallel.
        assert!(!segments_intersect(a, b, Vec2::new(1.0, 1.0), Vec2::new(3.0, 3.0)));
    }
}
