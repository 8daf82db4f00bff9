use glam::Vec3;

use crate::types::{Light, LightType};

impl Light {
    /// Light arriving from `position` treated as a direction.
    pub fn directional(color: Vec3, position: Vec3, intensity: f32) -> Self {
        Self::new(position, color, intensity, LightType::DIRECTIONAL)
    }

    /// Uniform light with no position.
    pub fn ambient(color: Vec3, intensity: f32) -> Self {
        Self::new(Vec3::ZERO, color, intensity, LightType::AMBIENT)
    }
}
