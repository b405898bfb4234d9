// src/config.rs

use std::path::PathBuf;
use clap::Parser;
use glam::Vec2;

use crate::engine_lib::level_types::Level;

#[derive(Parser, Debug, Clone)]
#[command(name = "sector_engine")]
#[command(about = "First-person walkthrough of a sector/portal level")]
pub struct Config {
    /// Level file to load; falls back to the built-in level if it cannot be read
    #[arg(long, default_value = "levels/demo.lvl")]
    pub level: PathBuf,

    /// Vertex capacity of the per-frame geometry buffer
    #[arg(long, default_value_t = 60_000)]
    pub max_vertices: usize,

    #[arg(long, default_value_t = 1024)]
    pub width: u32,

    #[arg(long, default_value_t = 768)]
    pub height: u32,

    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 75.0)]
    pub fov: f32,

    /// Camera height above the occupied sector's floor
    #[arg(long, default_value_t = 1.6)]
    pub eye_height: f32,

    /// Walking speed in units per second
    #[arg(long, default_value_t = 3.0)]
    pub move_speed: f32,

    /// Keyboard turn speed in radians per second
    #[arg(long, default_value_t = 1.2)]
    pub turn_speed: f32,

    /// Mouse look in radians per pixel
    #[arg(long, default_value_t = 0.002)]
    pub mouse_sensitivity: f32,

    /// Start position; defaults to the centre of the first sector
    #[arg(long, allow_hyphen_values = true)]
    pub spawn_x: Option<f32>,

    #[arg(long, allow_hyphen_values = true)]
    pub spawn_z: Option<f32>,
}

impl Config {
    /// Explicit spawn coordinates win; missing ones come from the first sector's centroid.
    pub fn spawn_point(&self, level: &Level) -> Vec2 {
        let fallback = level
            .sectors
            .first()
            .and_then(|s| s.centroid())
            .unwrap_or(Vec2::ZERO);
        Vec2::new(self.spawn_x.unwrap_or(fallback.x), self.spawn_z.unwrap_or(fallback.y))
    }
}
