//! Records shared byte-for-byte with the vertex and fragment shaders.
//!
//! Every record is `#[repr(C)]` and made only of 32-bit scalars, so the host
//! view produced by [`bytemuck`] is exactly what the shader reads. Three
//! component vectors occupy a full 16-byte slot and 3x3 matrices are stored
//! as three 16-byte columns; the filler words are explicit and always zero.
//! Matrices are column-major.

use std::fmt;
use std::str::FromStr;

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::error::UniformError;

/// How a [`Light`]'s position and intensity are interpreted.
///
/// Stored as a plain `u32` tag so the width matches the shader scalar. Tags
/// outside the named constants can be represented but are undefined for the
/// consuming shader.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct LightType(pub u32);

impl LightType {
    pub const UNDEFINED: Self = Self(0);
    /// `position` is a direction.
    pub const DIRECTIONAL: Self = Self(1);
    /// `position` is ignored.
    pub const AMBIENT: Self = Self(2);

    const NAMES: [(Self, &'static str); 3] = [
        (Self::UNDEFINED, "undefined"),
        (Self::DIRECTIONAL, "directional"),
        (Self::AMBIENT, "ambient"),
    ];

    /// Returns `true` when the tag is one of the named constants.
    pub fn is_defined(self) -> bool {
        self.name().is_some()
    }

    pub fn name(self) -> Option<&'static str> {
        Self::NAMES
            .iter()
            .find(|(tag, _)| *tag == self)
            .map(|(_, name)| *name)
    }
}

impl fmt::Display for LightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "LightType({})", self.0),
        }
    }
}

impl FromStr for LightType {
    type Err = UniformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::NAMES
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(s.trim()))
            .map(|(tag, _)| *tag)
            .ok_or_else(|| UniformError::UnknownTagName {
                kind: "light type",
                name: s.trim().to_string(),
            })
    }
}

/// Whether the fragment stage applies lighting or passes colour through.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceType(pub u32);

impl SurfaceType {
    pub const UNLIT: Self = Self(0);
    pub const LIT: Self = Self(1);

    const NAMES: [(Self, &'static str); 2] = [(Self::UNLIT, "unlit"), (Self::LIT, "lit")];

    pub fn is_defined(self) -> bool {
        self.name().is_some()
    }

    pub fn name(self) -> Option<&'static str> {
        Self::NAMES
            .iter()
            .find(|(tag, _)| *tag == self)
            .map(|(_, name)| *name)
    }
}

impl fmt::Display for SurfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "SurfaceType({})", self.0),
        }
    }
}

impl FromStr for SurfaceType {
    type Err = UniformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::NAMES
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(s.trim()))
            .map(|(tag, _)| *tag)
            .ok_or_else(|| UniformError::UnknownTagName {
                kind: "surface type",
                name: s.trim().to_string(),
            })
    }
}

/// One light source. Lights are uploaded as a sequence whose valid length is
/// carried separately in [`PrimitiveFragmentUniforms::light_count`].
///
/// Equality compares the shader-visible fields only; filler words are ignored.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct Light {
    pub position: [f32; 3],
    #[serde(skip)]
    _padding0: u32,
    /// Linear RGB, expected in `[0, 1]` but not clamped.
    pub color: [f32; 3],
    #[serde(skip)]
    _padding1: u32,
    pub intensity: f32,
    #[serde(rename = "type")]
    pub light_type: LightType,
    #[serde(skip)]
    _padding2: [u32; 2],
}

impl PartialEq for Light {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
            && self.color == other.color
            && self.intensity == other.intensity
            && self.light_type == other.light_type
    }
}

impl Light {
    pub fn new(position: Vec3, color: Vec3, intensity: f32, light_type: LightType) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
            intensity,
            light_type,
            ..Self::zeroed()
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn color(&self) -> Vec3 {
        Vec3::from_array(self.color)
    }
}

/// Per-draw transforms for lit and unlit primitives.
///
/// `normal_matrix` is expected to be the inverse-transpose of the upper 3x3 of
/// `model_matrix`; keeping the two consistent is up to the producer (see
/// [`crate::transform::normal_matrix`]).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct PrimitiveVertexUniforms {
    pub model_matrix: [[f32; 4]; 4],
    pub projection_matrix: [[f32; 4]; 4],
    pub view_matrix: [[f32; 4]; 4],
    /// Three columns, the fourth lane of each is filler.
    pub normal_matrix: [[f32; 4]; 3],
    pub color: [f32; 4],
}

impl PrimitiveVertexUniforms {
    pub fn new(model: Mat4, projection: Mat4, view: Mat4, normal: Mat3, color: Vec4) -> Self {
        Self {
            model_matrix: model.to_cols_array_2d(),
            projection_matrix: projection.to_cols_array_2d(),
            view_matrix: view.to_cols_array_2d(),
            normal_matrix: mat3_to_columns(normal),
            color: color.to_array(),
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model_matrix)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.projection_matrix)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.view_matrix)
    }

    pub fn normal_matrix(&self) -> Mat3 {
        columns_to_mat3(&self.normal_matrix)
    }

    pub fn color(&self) -> Vec4 {
        Vec4::from_array(self.color)
    }
}

impl Default for PrimitiveVertexUniforms {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY, Mat3::IDENTITY, Vec4::ONE)
    }
}

/// Per-draw fragment state. `light_count` must not exceed the number of valid
/// entries in the light sequence bound alongside; it is stored as given.
/// Filler words do not take part in equality.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct PrimitiveFragmentUniforms {
    pub light_count: u32,
    #[serde(skip)]
    _padding0: [u32; 3],
    /// World space.
    pub camera_position: [f32; 3],
    #[serde(skip)]
    _padding1: u32,
    pub surface_type: SurfaceType,
    #[serde(skip)]
    _padding2: [u32; 3],
}

impl PartialEq for PrimitiveFragmentUniforms {
    fn eq(&self, other: &Self) -> bool {
        self.light_count == other.light_count
            && self.camera_position == other.camera_position
            && self.surface_type == other.surface_type
    }
}

impl PrimitiveFragmentUniforms {
    pub fn new(light_count: u32, camera_position: Vec3, surface_type: SurfaceType) -> Self {
        Self {
            light_count,
            camera_position: camera_position.to_array(),
            surface_type,
            ..Self::zeroed()
        }
    }

    pub fn camera_position(&self) -> Vec3 {
        Vec3::from_array(self.camera_position)
    }
}

/// Uniforms for one cubic Bézier segment. `p0` and `p3` are the endpoints,
/// `p1` and `p2` the handles, all in local space before `model_view_matrix`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct BezierVertexUniforms {
    pub model_view_matrix: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub p0: [f32; 2],
    pub p1: [f32; 2],
    pub p2: [f32; 2],
    pub p3: [f32; 2],
}

impl BezierVertexUniforms {
    pub fn new(model_view: Mat4, color: Vec4, points: [Vec2; 4]) -> Self {
        let [p0, p1, p2, p3] = points.map(|point| point.to_array());
        Self {
            model_view_matrix: model_view.to_cols_array_2d(),
            color: color.to_array(),
            p0,
            p1,
            p2,
            p3,
        }
    }

    pub fn model_view_matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model_view_matrix)
    }

    pub fn color(&self) -> Vec4 {
        Vec4::from_array(self.color)
    }

    /// Control points in curve order.
    pub fn points(&self) -> [Vec2; 4] {
        [self.p0, self.p1, self.p2, self.p3].map(Vec2::from_array)
    }
}

pub(crate) fn mat3_to_columns(matrix: Mat3) -> [[f32; 4]; 3] {
    [
        matrix.x_axis.extend(0.0).to_array(),
        matrix.y_axis.extend(0.0).to_array(),
        matrix.z_axis.extend(0.0).to_array(),
    ]
}

pub(crate) fn columns_to_mat3(columns: &[[f32; 4]; 3]) -> Mat3 {
    Mat3::from_cols(
        Vec4::from_array(columns[0]).truncate(),
        Vec4::from_array(columns[1]).truncate(),
        Vec4::from_array(columns[2]).truncate(),
    )
}

const _: () = assert!(std::mem::size_of::<Light>() == 48);
const _: () = assert!(std::mem::size_of::<PrimitiveVertexUniforms>() == 256);
const _: () = assert!(std::mem::size_of::<PrimitiveFragmentUniforms>() == 48);
const _: () = assert!(std::mem::size_of::<BezierVertexUniforms>() == 112);

#[cfg(test)]
mod tests {
    use super::*;
    use memoffset::offset_of;

    #[test]
    fn enum_tags_match_shader_values() {
        assert_eq!(LightType::UNDEFINED.0, 0);
        assert_eq!(LightType::DIRECTIONAL.0, 1);
        assert_eq!(LightType::AMBIENT.0, 2);
        assert_eq!(SurfaceType::UNLIT.0, 0);
        assert_eq!(SurfaceType::LIT.0, 1);
        assert_eq!(bytemuck::bytes_of(&LightType::AMBIENT), &2u32.to_ne_bytes());
        assert_eq!(std::mem::size_of::<LightType>(), 4);
        assert_eq!(std::mem::size_of::<SurfaceType>(), 4);
    }

    #[test]
    fn tag_names_parse_and_display() {
        assert_eq!("Directional".parse::<LightType>(), Ok(LightType::DIRECTIONAL));
        assert_eq!(" lit ".parse::<SurfaceType>(), Ok(SurfaceType::LIT));
        assert!("point".parse::<LightType>().is_err());
        assert_eq!(LightType::AMBIENT.to_string(), "ambient");
        assert_eq!(LightType(7).to_string(), "LightType(7)");
        assert!(!SurfaceType(2).is_defined());
    }

    #[test]
    fn light_offsets() {
        assert_eq!(offset_of!(Light, position), 0);
        assert_eq!(offset_of!(Light, color), 16);
        assert_eq!(offset_of!(Light, intensity), 32);
        assert_eq!(offset_of!(Light, light_type), 36);
        assert_eq!(std::mem::size_of::<Light>(), 48);
    }

    #[test]
    fn primitive_vertex_offsets() {
        assert_eq!(offset_of!(PrimitiveVertexUniforms, model_matrix), 0);
        assert_eq!(offset_of!(PrimitiveVertexUniforms, projection_matrix), 64);
        assert_eq!(offset_of!(PrimitiveVertexUniforms, view_matrix), 128);
        assert_eq!(offset_of!(PrimitiveVertexUniforms, normal_matrix), 192);
        assert_eq!(offset_of!(PrimitiveVertexUniforms, color), 240);
        assert_eq!(std::mem::size_of::<PrimitiveVertexUniforms>(), 256);
    }

    #[test]
    fn primitive_fragment_offsets() {
        assert_eq!(offset_of!(PrimitiveFragmentUniforms, light_count), 0);
        assert_eq!(offset_of!(PrimitiveFragmentUniforms, camera_position), 16);
        assert_eq!(offset_of!(PrimitiveFragmentUniforms, surface_type), 32);
        assert_eq!(std::mem::size_of::<PrimitiveFragmentUniforms>(), 48);
    }

    #[test]
    fn bezier_offsets() {
        assert_eq!(offset_of!(BezierVertexUniforms, model_view_matrix), 0);
        assert_eq!(offset_of!(BezierVertexUniforms, color), 64);
        assert_eq!(offset_of!(BezierVertexUniforms, p0), 80);
        assert_eq!(offset_of!(BezierVertexUniforms, p1), 88);
        assert_eq!(offset_of!(BezierVertexUniforms, p2), 96);
        assert_eq!(offset_of!(BezierVertexUniforms, p3), 104);
        assert_eq!(std::mem::size_of::<BezierVertexUniforms>(), 112);
    }

    #[test]
    fn padding_stays_zero() {
        let light = Light::new(Vec3::ONE, Vec3::ONE, 1.0, LightType::DIRECTIONAL);
        let words: &[u32] = bytemuck::cast_slice(bytemuck::bytes_of(&light));
        assert_eq!(words[3], 0);
        assert_eq!(words[7], 0);
        assert_eq!(&words[10..], &[0, 0]);
    }

    #[test]
    fn normal_matrix_columns_round_trip() {
        let normal = Mat3::from_cols_array(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        let uniforms =
            PrimitiveVertexUniforms::new(Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY, normal, Vec4::ONE);
        assert_eq!(uniforms.normal_matrix[1], [4.0, 5.0, 6.0, 0.0]);
        assert_eq!(uniforms.normal_matrix(), normal);
    }

    #[test]
    fn light_count_is_stored_verbatim() {
        let uniforms = PrimitiveFragmentUniforms::new(3, Vec3::ZERO, SurfaceType::LIT);
        assert_eq!(uniforms.light_count, 3);
    }

    #[test]
    fn bezier_points_keep_their_order() {
        let points = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 2.0),
            Vec2::new(3.0, 2.0),
            Vec2::new(4.0, 0.0),
        ];
        let uniforms = BezierVertexUniforms::new(Mat4::IDENTITY, Vec4::ONE, points);
        assert_eq!(uniforms.p1, [1.0, 2.0]);
        assert_eq!(uniforms.p3, [4.0, 0.0]);
        assert_eq!(uniforms.points(), points);
    }

    #[test]
    fn serde_skips_padding_and_renames_type() {
        let light = Light::directional(Vec3::ONE, Vec3::Y, 0.8);
        let json = serde_json::to_string(&light).unwrap();
        assert!(!json.contains("_padding"), "{json}");
        assert!(json.contains("\"type\":1"), "{json}");
        let decoded: Light = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, light);

        let uniforms = PrimitiveFragmentUniforms::new(2, Vec3::new(0.0, 0.0, -100.0), SurfaceType::LIT);
        let json = serde_json::to_string(&uniforms).unwrap();
        assert!(!json.contains("_padding"), "{json}");
        assert!(json.contains("\"surface_type\":1"), "{json}");
        let decoded: PrimitiveFragmentUniforms = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, uniforms);
        assert_eq!(bytemuck::bytes_of(&decoded), bytemuck::bytes_of(&uniforms));
    }

    #[test]
    fn equality_ignores_filler_words() {
        use crate::layout::UniformLayout;

        let light = Light::directional(Vec3::ONE, Vec3::Y, 0.8);
        let mut bytes = light.to_bytes();
        bytes[12] = 1;
        let decoded = Light::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, light);
        assert_ne!(decoded.as_bytes(), light.as_bytes());

        let uniforms = PrimitiveFragmentUniforms::new(1, Vec3::X, SurfaceType::UNLIT);
        let mut bytes = uniforms.to_bytes();
        bytes[4] = 0xff;
        bytes[44] = 0xff;
        assert_eq!(PrimitiveFragmentUniforms::from_bytes(&bytes).unwrap(), uniforms);

        let mut moved = light;
        moved.intensity = 0.5;
        assert_ne!(moved, light);
    }
}
