use std::mem::size_of;

use bytemuck::Pod;
use memoffset::offset_of;

use crate::error::UniformError;
use crate::types::{
    BezierVertexUniforms, Light, PrimitiveFragmentUniforms, PrimitiveVertexUniforms,
};

/// Placement of one shader-visible field inside a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    pub name: &'static str,
    pub offset: usize,
    /// Bytes carrying data, excluding the filler after a 3-vector.
    pub size: usize,
    pub wgsl_type: &'static str,
}

impl FieldLayout {
    const fn new(name: &'static str, offset: usize, size: usize, wgsl_type: &'static str) -> Self {
        Self {
            name,
            offset,
            size,
            wgsl_type,
        }
    }
}

/// A record that is uploaded verbatim as a uniform block.
pub trait UniformLayout: Pod {
    /// Struct name on the shader side.
    const NAME: &'static str;

    /// Shader-visible fields in declaration order.
    fn fields() -> Vec<FieldLayout>;

    fn size() -> usize {
        size_of::<Self>()
    }

    fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    /// Reads a record back from exactly `size()` bytes. The input does not
    /// need to be aligned.
    fn from_bytes(bytes: &[u8]) -> Result<Self, UniformError> {
        if bytes.len() != Self::size() {
            return Err(UniformError::BufferSize {
                name: Self::NAME,
                expected: Self::size(),
                actual: bytes.len(),
            });
        }
        Ok(bytemuck::pod_read_unaligned(bytes))
    }

    /// Bind group layout entry for a uniform buffer holding one record.
    fn binding_layout(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
        wgpu::BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: wgpu::BufferSize::new(Self::size() as u64),
            },
            count: None,
        }
    }
}

impl UniformLayout for Light {
    const NAME: &'static str = "Light";

    fn fields() -> Vec<FieldLayout> {
        vec![
            FieldLayout::new("position", offset_of!(Light, position), 12, "vec3<f32>"),
            FieldLayout::new("color", offset_of!(Light, color), 12, "vec3<f32>"),
            FieldLayout::new("intensity", offset_of!(Light, intensity), 4, "f32"),
            FieldLayout::new("light_type", offset_of!(Light, light_type), 4, "u32"),
        ]
    }
}

impl UniformLayout for PrimitiveVertexUniforms {
    const NAME: &'static str = "PrimitiveVertexUniforms";

    fn fields() -> Vec<FieldLayout> {
        vec![
            FieldLayout::new(
                "model_matrix",
                offset_of!(PrimitiveVertexUniforms, model_matrix),
                64,
                "mat4x4<f32>",
            ),
            FieldLayout::new(
                "projection_matrix",
                offset_of!(PrimitiveVertexUniforms, projection_matrix),
                64,
                "mat4x4<f32>",
            ),
            FieldLayout::new(
                "view_matrix",
                offset_of!(PrimitiveVertexUniforms, view_matrix),
                64,
                "mat4x4<f32>",
            ),
            FieldLayout::new(
                "normal_matrix",
                offset_of!(PrimitiveVertexUniforms, normal_matrix),
                48,
                "mat3x3<f32>",
            ),
            FieldLayout::new(
                "color",
                offset_of!(PrimitiveVertexUniforms, color),
                16,
                "vec4<f32>",
            ),
        ]
    }
}

impl UniformLayout for PrimitiveFragmentUniforms {
    const NAME: &'static str = "PrimitiveFragmentUniforms";

    fn fields() -> Vec<FieldLayout> {
        vec![
            FieldLayout::new(
                "light_count",
                offset_of!(PrimitiveFragmentUniforms, light_count),
                4,
                "u32",
            ),
            FieldLayout::new(
                "camera_position",
                offset_of!(PrimitiveFragmentUniforms, camera_position),
                12,
                "vec3<f32>",
            ),
            FieldLayout::new(
                "surface_type",
                offset_of!(PrimitiveFragmentUniforms, surface_type),
                4,
                "u32",
            ),
        ]
    }
}

impl UniformLayout for BezierVertexUniforms {
    const NAME: &'static str = "BezierVertexUniforms";

    fn fields() -> Vec<FieldLayout> {
        vec![
            FieldLayout::new(
                "model_view_matrix",
                offset_of!(BezierVertexUniforms, model_view_matrix),
                64,
                "mat4x4<f32>",
            ),
            FieldLayout::new("color", offset_of!(BezierVertexUniforms, color), 16, "vec4<f32>"),
            FieldLayout::new("p0", offset_of!(BezierVertexUniforms, p0), 8, "vec2<f32>"),
            FieldLayout::new("p1", offset_of!(BezierVertexUniforms, p1), 8, "vec2<f32>"),
            FieldLayout::new("p2", offset_of!(BezierVertexUniforms, p2), 8, "vec2<f32>"),
            FieldLayout::new("p3", offset_of!(BezierVertexUniforms, p3), 8, "vec2<f32>"),
        ]
    }
}

/// Packs a light sequence into one contiguous buffer, one record per stride.
pub fn encode_lights(lights: &[Light]) -> Vec<u8> {
    bytemuck::cast_slice(lights).to_vec()
}

pub fn decode_lights(bytes: &[u8]) -> Result<Vec<Light>, UniformError> {
    let stride = Light::size();
    if bytes.len() % stride != 0 {
        return Err(UniformError::LightStride {
            stride,
            actual: bytes.len(),
        });
    }
    Ok(bytes
        .chunks_exact(stride)
        .map(bytemuck::pod_read_unaligned)
        .collect())
}

/// Bind group layout entry for a read-only storage buffer of lights.
pub fn light_sequence_binding_layout(
    binding: u32,
    visibility: wgpu::ShaderStages,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Storage { read_only: true },
            has_dynamic_offset: false,
            min_binding_size: wgpu::BufferSize::new(Light::size() as u64),
        },
        count: None,
    }
}
