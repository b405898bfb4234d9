// src/rendering_lib/mod.rs

pub mod renderer;
pub mod shader;
pub mod vertex;
pub mod frame_geometry;
pub mod level_mesher;

pub use renderer::Renderer;
pub use vertex::Vertex;
pub use frame_geometry::FrameGeometry;
pub use level_mesher::{render_level, render_sector};
pub use shader::WGSL_SHADER_SOURCE;
