//! Opt-in consistency checks.
//!
//! The layout types never validate themselves; a malformed record is simply
//! undefined for the shader. Producers that want a guard call these before
//! uploading.

use crate::error::UniformError;
use crate::types::{Light, PrimitiveFragmentUniforms};

pub fn validate_light(index: usize, light: &Light) -> Result<(), UniformError> {
    if !light.light_type.is_defined() {
        return Err(UniformError::UndefinedLightType {
            index,
            tag: light.light_type,
        });
    }
    Ok(())
}

/// Checks that `light_count` stays within `lights` and that every light the
/// shader will read carries a defined tag. Entries past `light_count` are not
/// inspected.
pub fn validate_fragment(
    uniforms: &PrimitiveFragmentUniforms,
    lights: &[Light],
) -> Result<(), UniformError> {
    if !uniforms.surface_type.is_defined() {
        return Err(UniformError::UndefinedSurfaceType(uniforms.surface_type));
    }
    let count = uniforms.light_count as usize;
    if count > lights.len() {
        return Err(UniformError::LightCountExceeded {
            count: uniforms.light_count,
            supplied: lights.len(),
        });
    }
    lights[..count]
        .iter()
        .enumerate()
        .try_for_each(|(index, light)| validate_light(index, light))
}
