//! Uniform layouts shared between the ElmJr host renderer and its shaders.
//!
//! The records in [`types`] are bit-compatible with the shader structs in
//! [`shader::WGSL_DECLARATIONS`]. They carry no behaviour of their own: the
//! byte mapping lives in [`layout`], the optional consistency checks in
//! [`validate`], and the host-side helpers that fill them in per draw call in
//! [`lights`], [`transform`] and [`scene`].

pub mod error;
pub mod layout;
pub mod lights;
pub mod scene;
pub mod shader;
pub mod transform;
pub mod types;
pub mod validate;

pub use error::UniformError;
pub use layout::{
    decode_lights, encode_lights, light_sequence_binding_layout, FieldLayout, UniformLayout,
};
pub use scene::SceneLighting;
pub use shader::WGSL_DECLARATIONS;
pub use transform::{normal_matrix, perspective, SceneProps};
pub use types::{
    BezierVertexUniforms, Light, LightType, PrimitiveFragmentUniforms, PrimitiveVertexUniforms,
    SurfaceType,
};
pub use validate::{validate_fragment, validate_light};
