// src/engine_lib/level_types.rs
use glam::Vec2;

// Type aliases for IDs
pub type WallId = u32;
pub type SectorId = i32;

pub type Rgb = [f32; 3];

/// Endpoint matching tolerance, shared by the enclosure check and portal lookup.
pub const POINT_EPSILON: f32 = 0.001;

/// Portal endpoint match: strictly inside the tolerance.
#[inline]
pub fn points_match(a: Vec2, b: Vec2) -> bool {
    (a.x - b.x).abs() < POINT_EPSILON && (a.y - b.y).abs() < POINT_EPSILON
}

/// Loop closure: a gap of exactly `POINT_EPSILON` still closes.
#[inline]
fn gap_closes(a: Vec2, b: Vec2) -> bool {
    (a.x - b.x).abs() <= POINT_EPSILON && (a.y - b.y).abs() <= POINT_EPSILON
}

/// A directed boundary segment in the XZ plane.
#[derive(Clone, Debug, PartialEq)]
pub struct Wall {
    pub id: WallId,
    pub x1: f32,
    pub z1: f32,
    pub x2: f32,
    pub z2: f32,
    pub color: Rgb,
    pub is_solid: bool,
    pub is_invisible: bool,
    pub texture_ref: Option<String>,
}

impl Wall {
    pub fn new(id: WallId, x1: f32, z1: f32, x2: f32, z2: f32, is_solid: bool) -> Self {
        Self {
            id,
            x1,
            z1,
            x2,
            z2,
            color: [1.0, 1.0, 1.0],
            is_solid,
            is_invisible: false,
            texture_ref: None,
        }
    }

    pub fn invisible(mut self) -> Self {
        self.is_invisible = true;
        self
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn start(&self) -> Vec2 {
        Vec2::new(self.x1, self.z1)
    }

    pub fn end(&self) -> Vec2 {
        Vec2::new(self.x2, self.z2)
    }

    pub fn length(&self) -> f32 {
        self.start().distance(self.end())
    }

    pub fn is_degenerate(&self) -> bool {
        self.x1 == self.x2 && self.z1 == self.z2
    }

    /// True when `other` covers the same edge, in either direction.
    pub fn shares_edge_with(&self, other: &Wall) -> bool {
        (points_match(self.start(), other.start()) && points_match(self.end(), other.end()))
            || (points_match(self.start(), other.end()) && points_match(self.end(), other.start()))
    }
}

/// A closed polygon of walls with uniform floor, ceiling and light.
///
/// Walls are stored in traversal order; `walls[i].end()` meets `walls[i + 1].start()`
/// cyclically. The floor and ceiling are fanned from the first wall's start vertex,
/// so the polygon must be star-shaped from that vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct Sector {
    pub id: SectorId,
    pub light_intensity: f32,
    pub floor_height: f32,
    pub ceil_height: f32,
    pub walls: Vec<Wall>,
}

impl Sector {
    pub fn new(id: SectorId, light_intensity: f32, floor_height: f32, ceil_height: f32, walls: Vec<Wall>) -> Self {
        Self { id, light_intensity, floor_height, ceil_height, walls }
    }

    /// Axis-aligned room with solid walls, wound (min, min) -> (max, min) -> (max, max) -> (min, max).
    /// Wall ids run from `first_wall_id` upwards.
    pub fn rectangle(id: SectorId, first_wall_id: WallId, min: [f32; 2], max: [f32; 2], floor_height: f32, ceil_height: f32) -> Self {
        let [x0, z0] = min;
        let [x1, z1] = max;
        let walls = vec![
            Wall::new(first_wall_id, x0, z0, x1, z0, true),
            Wall::new(first_wall_id + 1, x1, z0, x1, z1, true),
            Wall::new(first_wall_id + 2, x1, z1, x0, z1, true),
            Wall::new(first_wall_id + 3, x0, z1, x0, z0, true),
        ];
        Self::new(id, 1.0, floor_height, ceil_height, walls)
    }

    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    /// Index of the first wall whose end does not meet the next wall's start.
    pub fn first_gap(&self) -> Option<usize> {
        let n = self.walls.len();
        (0..n).find(|&i| !gap_closes(self.walls[i].end(), self.walls[(i + 1) % n].start()))
    }

    pub fn is_enclosed(&self) -> bool {
        self.first_gap().is_none()
    }

    /// Average of the polygon's vertices, used as a spawn point.
    pub fn centroid(&self) -> Option<Vec2> {
        if self.walls.is_empty() {
            return None;
        }
        let sum = self.walls.iter().fold(Vec2::ZERO, |acc, w| acc + w.start());
        Some(sum / self.walls.len() as f32)
    }

}

#[derive(Clone, Debug, Default)]
pub struct Level {
    pub name: String,
    pub source_path: String,
    pub sectors: Vec<Sector>,
}

impl Level {
    pub fn new(name: impl Into<String>, source_path: impl Into<String>, sectors: Vec<Sector>) -> Self {
        Self { name: name.into(), source_path: source_path.into(), sectors }
    }

    pub fn empty(name: impl Into<String>, source_path: impl Into<String>) -> Self {
        Self::new(name, source_path, Vec::new())
    }

    pub fn sector_count(&self) -> usize {
        self.sectors.len()
    }

    pub fn wall_count(&self) -> usize {
        self.sectors.iter().map(Sector::wall_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }

    /// Releases every sector and its walls; the level stays usable but empty.
    pub fn cleanup(&mut self) {
        for sector in &mut self.sectors {
            sector.walls.clear();
        }
        self.sectors.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(id: SectorId, min: f32, max: f32) -> Sector {
        Sector::rectangle(id, id as WallId * 10, [min, min], [max, max], 0.0, 4.0)
    }

    #[test]
    fn square_is_enclosed() {
        let sector = square(0, -5.0, 5.0);
        assert!(sector.is_enclosed());
        assert_eq!(sector.centroid(), Some(Vec2::ZERO));
    }

    #[test]
    fn broken_loop_reports_gap() {
        let mut sector = square(0, -5.0, 5.0);
        sector.walls[1].x2 = 4.0;
        assert_eq!(sector.first_gap(), Some(1));
    }

    #[test]
    fn gap_of_exactly_epsilon_still_closes() {
        let walls = vec![
            Wall::new(0, 0.0, 0.0, 1.0, 0.0, true),
            Wall::new(1, 1.0, 0.0, 0.001, 1.0, true),
            Wall::new(2, 0.001, 1.0, 0.001, 0.0, true),
        ];
        assert!(Sector::new(0, 1.0, 0.0, 2.0, walls.clone()).is_enclosed());

        let mut wider = walls;
        wider[2].x1 = 0.0015;
        wider[2].x2 = 0.0015;
        assert_eq!(Sector::new(0, 1.0, 0.0, 2.0, wider).first_gap(), Some(2));
    }

    #[test]
    fn shared_edge_matches_both_directions() {
        let a = Wall::new(0, 0.0, 0.0, 1.0, 0.0, false);
        let reversed = Wall::new(1, 1.0, 0.0, 0.0005, 0.0, false);
        let offset = Wall::new(2, 1.0, 0.0, 0.0, 0.01, false);
        assert!(a.shares_edge_with(&reversed));
        assert!(!a.shares_edge_with(&offset));
    }

    #[test]
    fn cleanup_empties_level() {
        let mut level = Level::new("t", "t.lvl", vec![square(0, 0.0, 1.0), square(1, 1.0, 2.0)]);
        assert_eq!(level.wall_count(), 8);
        level.cleanup();
        assert!(level.is_empty());
        assert_eq!(level.wall_count(), 0);
    }
}
