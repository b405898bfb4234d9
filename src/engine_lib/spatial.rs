// src/engine_lib/spatial.rs
use super::level_types::{Level, Sector, Wall};

/// Crossing-number test along +x. Horizontal edges never count: the two
/// z-range branches are asymmetric (`<=` / `>`), so `z1 == z2` satisfies neither.
pub fn point_in_polygon(px: f32, pz: f32, walls: &[Wall]) -> bool {
    let mut crossings = 0u32;
    for w in walls {
        if (w.z1 <= pz && w.z2 > pz) || (w.z2 <= pz && w.z1 > pz) {
            let t = (pz - w.z1) / (w.z2 - w.z1);
            if px < w.x1 + t * (w.x2 - w.x1) {
                crossings += 1;
            }
        }
    }
    crossings % 2 == 1
}

impl Sector {
    pub fn contains_point(&self, x: f32, z: f32) -> bool {
        point_in_polygon(x, z, &self.walls)
    }
}

impl Level {
    /// Index of the first sector, in level order, containing `(x, z)`.
    /// Sectors are expected not to overlap; if they do, the earlier one wins.
    pub fn find_containing_sector_index(&self, x: f32, z: f32) -> Option<usize> {
        self.sectors.iter().position(|sector| sector.contains_point(x, z))
    }

    pub fn find_containing_sector(&self, x: f32, z: f32) -> Option<&Sector> {
        self.find_containing_sector_index(x, z).map(|i| &self.sectors[i])
    }

    /// Finds the other sector that owns `wall`'s edge, in either direction.
    /// `sector` must be borrowed from this level; it is skipped by identity.
    pub fn find_adjacent(&self, sector: &Sector, wall: &Wall) -> Option<&Sector> {
        self.sectors
            .iter()
            .filter(|candidate| !std::ptr::eq(*candidate, sector))
            .find(|candidate| candidate.walls.iter().any(|w| w.shares_edge_with(wall)))
    }
}
