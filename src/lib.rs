// src/lib.rs

pub mod engine_lib;
pub mod rendering_lib;
pub mod demo_level;
pub mod config;

pub use engine_lib::{Level, LevelError, Sector, Wall};
pub use rendering_lib::{render_level, render_sector, FrameGeometry};
