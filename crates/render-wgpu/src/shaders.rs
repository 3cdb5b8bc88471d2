/// WGSL shader for the box: positions go through the model transform, every
/// fragment is flat white.
pub const QUAD_SHADER: &str = r#"
struct Transform {
    model: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> transform: Transform;

struct VertexInput {
    @location(0) position: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> @builtin(position) vec4<f32> {
    return transform.model * vec4<f32>(vertex.position, 1.0);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 1.0, 1.0, 1.0);
}
"#;
