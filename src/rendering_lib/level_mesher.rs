// src/rendering_lib/level_mesher.rs
//! Builds the frame's triangle list from a level: wall quads, portal step faces,
//! and fan-triangulated floors and ceilings.

use super::frame_geometry::FrameGeometry;
use super::vertex::Vertex;
use crate::engine_lib::level_types::{Level, Sector, Wall};

/// Minimum height difference across a portal that produces a step face.
pub const HEIGHT_EPSILON: f32 = 1e-4;
pub const WALL_U_SCALE: f32 = 1.0;
pub const FLOOR_SHADE: f32 = 0.3;
pub const CEILING_SHADE: f32 = 0.7;

fn shade(base: f32, light: f32) -> [f32; 4] {
    let v = base * light;
    [v, v, v, 1.0]
}

fn wall_color(wall: &Wall, light: f32) -> [f32; 4] {
    [wall.color[0] * light, wall.color[1] * light, wall.color[2] * light, 1.0]
}

/// Vertical quad along `wall` between `bottom` and `top`. U runs along the wall
/// length, V up from `bottom`.
fn wall_quad(wall: &Wall, bottom: f32, top: f32, color: [f32; 4], u_scale: f32) -> [Vertex; 6] {
    let u_max = wall.length() * u_scale;
    let v_max = top - bottom;
    let (x1, z1, x2, z2) = (wall.x1, wall.z1, wall.x2, wall.z2);
    [
        Vertex::new([x1, bottom, z1], [0.0, 0.0], color),
        Vertex::new([x2, top, z2], [u_max, v_max], color),
        Vertex::new([x2, bottom, z2], [u_max, 0.0], color),
        Vertex::new([x1, bottom, z1], [0.0, 0.0], color),
        Vertex::new([x1, top, z1], [0.0, v_max], color),
        Vertex::new([x2, top, z2], [u_max, v_max], color),
    ]
}

/// One floor and one ceiling triangle fanned from the sector's first vertex.
/// The ceiling is wound the other way so both face into the room.
fn fan_pair(sector: &Sector, wall: &Wall) -> [Vertex; 6] {
    let origin = &sector.walls[0];
    let floor = sector.floor_height;
    let ceil = sector.ceil_height;
    let floor_color = shade(FLOOR_SHADE, sector.light_intensity);
    let ceil_color = shade(CEILING_SHADE, sector.light_intensity);
    [
        Vertex::new([origin.x1, floor, origin.z1], [origin.x1, origin.z1], floor_color),
        Vertex::new([wall.x1, floor, wall.z1], [wall.x1, wall.z1], floor_color),
        Vertex::new([wall.x2, floor, wall.z2], [wall.x2, wall.z2], floor_color),
        Vertex::new([origin.x1, ceil, origin.z1], [origin.x1, origin.z1], ceil_color),
        Vertex::new([wall.x2, ceil, wall.z2], [wall.x2, wall.z2], ceil_color),
        Vertex::new([wall.x1, ceil, wall.z1], [wall.x1, wall.z1], ceil_color),
    ]
}

/// Faces where two sectors meet at different heights: the floor band and the
/// ceiling band between `sector` and `adjacent`. Matching heights emit nothing.
fn portal_step_faces(sector: &Sector, adjacent: &Sector) -> impl Iterator<Item = (f32, f32)> {
    let floor_band = (
        sector.floor_height.min(adjacent.floor_height),
        sector.floor_height.max(adjacent.floor_height),
    );
    let ceil_band = (
        sector.ceil_height.min(adjacent.ceil_height),
        sector.ceil_height.max(adjacent.ceil_height),
    );
    [floor_band, ceil_band]
        .into_iter()
        .filter(|(bottom, top)| top - bottom > HEIGHT_EPSILON)
}

pub fn render_sector(level: &Level, sector: &Sector, geometry: &mut FrameGeometry) {
    for (i, wall) in sector.walls.iter().enumerate() {
        let color = wall_color(wall, sector.light_intensity);

        if !wall.is_invisible {
            geometry.push_group(&wall_quad(wall, sector.floor_height, sector.ceil_height, color, WALL_U_SCALE));
        } else if let Some(adjacent) = level.find_adjacent(sector, wall) {
            for (bottom, top) in portal_step_faces(sector, adjacent) {
                geometry.push_group(&wall_quad(wall, bottom, top, color, WALL_U_SCALE));
            }
        }

        if i > 0 {
            geometry.push_group(&fan_pair(sector, wall));
        }
    }
}

/// Rebuilds `geometry` from every sector of `level`.
pub fn render_level(level: &Level, geometry: &mut FrameGeometry) {
    geometry.clear();
    for sector in &level.sectors {
        render_sector(level, sector, geometry);
    }
}
