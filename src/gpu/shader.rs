//! WGSL source for the flat-colored triangle pipeline.

use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct Uniforms {
    /// Surface size in pixels.
    pub viewport: [f32; 2],
    pub _padding: [f32; 2],
}

/// Pixel-space vertices in, straight-alpha colors out.
pub const SHADER_SOURCE: &str = r#"
struct Uniforms {
    viewport: vec2<f32>,
    padding: vec2<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(
    @location(0) position: vec2<f32>,
    @location(1) color: vec4<f32>,
) -> VertexOutput {
    let ndc = vec2<f32>(
        position.x / uniforms.viewport.x * 2.0 - 1.0,
        1.0 - position.y / uniforms.viewport.y * 2.0,
    );

    var out: VertexOutput;
    out.clip_position = vec4<f32>(ndc, 0.0, 1.0);
    out.color = color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;
