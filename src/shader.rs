/// WGSL declarations of the shared records.
///
/// WGSL lets a scalar follow a `vec3<f32>` directly, so the 3-vectors that are
/// followed by another field are widened with `@size(16)` to keep the host
/// offsets.
pub const WGSL_DECLARATIONS: &str = r#"
const LIGHT_TYPE_UNDEFINED: u32 = 0u;
const LIGHT_TYPE_DIRECTIONAL: u32 = 1u;
const LIGHT_TYPE_AMBIENT: u32 = 2u;

const SURFACE_TYPE_UNLIT: u32 = 0u;
const SURFACE_TYPE_LIT: u32 = 1u;

struct Light {
    @size(16) position: vec3<f32>,
    @size(16) color: vec3<f32>,
    intensity: f32,
    light_type: u32,
}

struct PrimitiveVertexUniforms {
    model_matrix: mat4x4<f32>,
    projection_matrix: mat4x4<f32>,
    view_matrix: mat4x4<f32>,
    normal_matrix: mat3x3<f32>,
    color: vec4<f32>,
}

struct PrimitiveFragmentUniforms {
    light_count: u32,
    @size(16) camera_position: vec3<f32>,
    surface_type: u32,
}

struct BezierVertexUniforms {
    model_view_matrix: mat4x4<f32>,
    color: vec4<f32>,
    p0: vec2<f32>,
    p1: vec2<f32>,
    p2: vec2<f32>,
    p3: vec2<f32>,
}
"#;
