// src/demo_level.rs
//! Built-in level used when no level file is available: a hall, a raised
//! corridor with a lower ceiling, and a higher gallery, joined by open portals.

use crate::engine_lib::level_types::{Level, Rgb, Sector, SectorId, Wall, WallId};

const HALL_ID: SectorId = 0;
const CORRIDOR_ID: SectorId = 1;
const GALLERY_ID: SectorId = 2;

const HALL_COLOR: Rgb = [0.8, 0.8, 0.8];
const CORRIDOR_COLOR: Rgb = [0.3, 0.3, 0.8];
const GALLERY_COLOR: Rgb = [0.9, 0.5, 0.2];
const STEP_COLOR: Rgb = [0.6, 0.6, 0.6];

struct RoomBlueprint<'a> {
    id: SectorId,
    first_wall_id: WallId,
    light: f32,
    floor_height: f32,
    ceil_height: f32,
    color: Rgb,
    outline: &'a [(f32, f32)],
    // Indices of edges that open into a neighbour.
    portals: &'a [usize],
}

fn build_room(bp: &RoomBlueprint) -> Sector {
    let n = bp.outline.len();
    let walls = (0..n)
        .map(|i| {
            let (x1, z1) = bp.outline[i];
            let (x2, z2) = bp.outline[(i + 1) % n];
            let wall = Wall::new(bp.first_wall_id + i as WallId, x1, z1, x2, z2, true);
            if bp.portals.contains(&i) {
                Wall { is_solid: false, ..wall }.invisible().with_color(STEP_COLOR)
            } else {
                wall.with_color(bp.color)
            }
        })
        .collect();
    Sector::new(bp.id, bp.light, bp.floor_height, bp.ceil_height, walls)
}

pub fn create_demo_level() -> Level {
    let hall = build_room(&RoomBlueprint {
        id: HALL_ID,
        first_wall_id: 0,
        light: 1.0,
        floor_height: 0.0,
        ceil_height: 4.0,
        color: HALL_COLOR,
        outline: &[(-4.0, -4.0), (4.0, -4.0), (4.0, -1.0), (4.0, 1.0), (4.0, 4.0), (-4.0, 4.0)],
        portals: &[2],
    });
    let corridor = build_room(&RoomBlueprint {
        id: CORRIDOR_ID,
        first_wall_id: 10,
        light: 0.6,
        floor_height: 0.25,
        ceil_height: 3.0,
        color: CORRIDOR_COLOR,
        outline: &[(4.0, -1.0), (10.0, -1.0), (10.0, 1.0), (4.0, 1.0)],
        portals: &[1, 3],
    });
    let gallery = build_room(&RoomBlueprint {
        id: GALLERY_ID,
        first_wall_id: 20,
        light: 0.8,
        floor_height: 0.75,
        ceil_height: 5.0,
        color: GALLERY_COLOR,
        outline: &[(10.0, -5.0), (18.0, -5.0), (18.0, 5.0), (10.0, 5.0), (10.0, 1.0), (10.0, -1.0)],
        portals: &[4],
    });

    Level::new("demo", "<built-in>", vec![hall, corridor, gallery])
}
