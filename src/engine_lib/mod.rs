// src/engine_lib/mod.rs
pub mod level_types;
pub mod level_loader;
pub mod spatial;
pub mod collision;
pub mod camera;
pub mod walk;
pub mod controller;

pub use level_types::{Level, Sector, Wall, SectorId, WallId};
pub use level_loader::LevelError;
pub use collision::{resolve_move, MoveResolution};
pub use camera::Camera;
pub use walk::{update_camera_in_level, WalkState};
pub use controller::CameraController;
