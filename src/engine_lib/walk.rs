// src/engine_lib/walk.rs
use glam::Vec2;
use crate::engine_lib::camera::Camera;
use crate::engine_lib::collision::resolve_move;
use crate::engine_lib::level_types::{Level, Sector};

/// Per-session walkthrough state: the camera plus what the level said about it last frame.
#[derive(Debug, Clone)]
pub struct WalkState {
    pub camera: Camera,
    pub eye_height: f32,
    pub current_sector: Option<usize>,
    pub last_move_collided: bool,
    pub collision_count: u64,
}

impl WalkState {
    pub fn new(level: &Level, camera: Camera, eye_height: f32) -> Self {
        let mut state = Self {
            camera,
            eye_height,
            current_sector: None,
            last_move_collided: false,
            collision_count: 0,
        };
        state.relocate(level);
        state
    }

    pub fn current_sector<'a>(&self, level: &'a Level) -> Option<&'a Sector> {
        self.current_sector.and_then(|i| level.sectors.get(i))
    }

    fn relocate(&mut self, level: &Level) {
        let position = self.camera.xz();
        let previous = self.current_sector;
        self.current_sector = level.find_containing_sector_index(position.x, position.y);

        if previous != self.current_sector {
            log::debug!(
                "camera moved from sector {:?} to {:?}",
                previous.map(|i| level.sectors[i].id),
                self.current_sector.map(|i| level.sectors[i].id)
            );
        }
        if let Some(sector) = self.current_sector(level) {
            self.camera.position.y = sector.floor_height + self.eye_height;
        }
    }
}

/// Applies one frame of movement: collide, then locate the occupied sector.
pub fn update_camera_in_level(level: &Level, state: &mut WalkState, proposed_xz: Vec2) {
    let old = state.camera.xz();
    let resolution = resolve_move(level, proposed_xz.x, proposed_xz.y, old.x, old.y);

    state.last_move_collided = resolution.collided;
    if resolution.collided {
        state.collision_count += 1;
    }
    state.camera.position.x = resolution.x;
    state.camera.position.z = resolution.z;
    state.relocate(level);
}
