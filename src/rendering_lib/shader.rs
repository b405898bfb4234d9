// src/rendering_lib/shader.rs

pub const WGSL_SHADER_SOURCE: &str = r#"
struct CameraUniform {
    view_proj: mat4x4<f32>,
}

@group(0) @binding(0)
var<uniform> camera: CameraUniform;

struct VertexInput {
    @location(0) position: vec3<f32>, // World space
    @location(1) uv: vec2<f32>,
    @location(2) color: vec4<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) color: vec4<f32>,
}

@vertex
fn vs_main(model: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.uv = model.uv;
    out.color = model.color;
    out.clip_position = camera.view_proj * vec4<f32>(model.position, 1.0);
    return out;
}

// One unit per checker cell, matching the mesher's UV scale.
@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let cell = floor(in.uv.x) + floor(in.uv.y);
    let parity = cell - 2.0 * floor(cell * 0.5);
    let checker = select(1.0, 0.75, parity > 0.5);
    return vec4<f32>(in.color.rgb * checker, in.color.a);
}
"#;
