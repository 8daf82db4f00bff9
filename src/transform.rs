//! Host-side producers for the per-draw vertex uniforms.

use glam::{Mat3, Mat4, Vec2, Vec4};

use crate::types::{BezierVertexUniforms, PrimitiveVertexUniforms};

pub const DEFAULT_FOV_DEGREES: f32 = 65.0;
pub const DEFAULT_NEAR: f32 = 0.1;
pub const DEFAULT_FAR: f32 = 300.0;

/// Inverse-transpose of the upper 3x3 of `model`, which keeps normals
/// perpendicular under non-uniform scale.
pub fn normal_matrix(model: Mat4) -> Mat3 {
    Mat3::from_mat4(model).inverse().transpose()
}

/// Right-handed perspective projection with a `[0, 1]` depth range.
pub fn perspective(fov_y_radians: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    Mat4::perspective_rh(fov_y_radians, aspect, near, far)
}

/// Camera state shared by every draw of a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneProps {
    pub projection_matrix: Mat4,
    pub view_matrix: Mat4,
    /// Seconds since the scene started.
    pub time: f32,
}

impl Default for SceneProps {
    fn default() -> Self {
        Self {
            projection_matrix: Mat4::IDENTITY,
            view_matrix: Mat4::IDENTITY,
            time: 0.0,
        }
    }
}

impl SceneProps {
    /// Rebuilds the projection for a new drawable size.
    pub fn set_drawable_size(&mut self, width: u32, height: u32) {
        let aspect = if height == 0 {
            1.0
        } else {
            width as f32 / height as f32
        };
        self.projection_matrix = perspective(
            DEFAULT_FOV_DEGREES.to_radians(),
            aspect,
            DEFAULT_NEAR,
            DEFAULT_FAR,
        );
    }

    /// Advances the clock by one frame at `fps`.
    pub fn advance(&mut self, fps: f32) {
        self.time += 1.0 / fps;
    }

    pub fn primitive_vertex_uniforms(&self, model: Mat4, color: Vec4) -> PrimitiveVertexUniforms {
        PrimitiveVertexUniforms::new(
            model,
            self.projection_matrix,
            self.view_matrix,
            normal_matrix(model),
            color,
        )
    }

    pub fn bezier_vertex_uniforms(
        &self,
        model: Mat4,
        color: Vec4,
        points: [Vec2; 4],
    ) -> BezierVertexUniforms {
        let model_view = self.projection_matrix * self.view_matrix * model;
        BezierVertexUniforms::new(model_view, color, points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn normal_matrix_undoes_non_uniform_scale() {
        let model = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
        let normal = normal_matrix(model);
        let transformed = normal * Vec3::new(1.0, 1.0, 0.0);
        assert!((transformed - Vec3::new(0.5, 1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn normal_matrix_of_rotation_is_rotation() {
        let model = Mat4::from_rotation_y(0.7) * Mat4::from_translation(Vec3::new(4.0, 0.0, 0.0));
        let normal = normal_matrix(model);
        assert!(normal.abs_diff_eq(Mat3::from_rotation_y(0.7), 1e-5));
    }

    #[test]
    fn drawable_size_sets_projection() {
        let mut props = SceneProps::default();
        props.set_drawable_size(1600, 800);
        let expected = Mat4::perspective_rh(65f32.to_radians(), 2.0, 0.1, 300.0);
        assert!(props.projection_matrix.abs_diff_eq(expected, 1e-6));

        props.set_drawable_size(640, 0);
        let square = Mat4::perspective_rh(65f32.to_radians(), 1.0, 0.1, 300.0);
        assert!(props.projection_matrix.abs_diff_eq(square, 1e-6));
    }

    #[test]
    fn advance_steps_time() {
        let mut props = SceneProps::default();
        props.advance(60.0);
        props.advance(60.0);
        assert!((props.time - 2.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn primitive_uniforms_keep_normal_in_sync() {
        let mut props = SceneProps::default();
        props.set_drawable_size(800, 600);
        props.view_matrix = Mat4::from_translation(Vec3::new(0.0, 0.0, -100.0));
        let model = Mat4::from_scale(Vec3::new(1.0, 3.0, 1.0));
        let uniforms = props.primitive_vertex_uniforms(model, Vec4::ONE);
        assert_eq!(uniforms.model_matrix(), model);
        assert_eq!(uniforms.view_matrix(), props.view_matrix);
        assert_eq!(uniforms.projection_matrix(), props.projection_matrix);
        assert!(uniforms.normal_matrix().abs_diff_eq(normal_matrix(model), 1e-6));
    }

    #[test]
    fn bezier_model_view_includes_projection() {
        let mut props = SceneProps::default();
        props.set_drawable_size(800, 600);
        props.view_matrix = Mat4::from_translation(Vec3::new(0.0, 0.0, -10.0));
        let model = Mat4::from_translation(Vec3::X);
        let points = [Vec2::ZERO, Vec2::Y, Vec2::ONE, Vec2::X];
        let uniforms = props.bezier_vertex_uniforms(model, Vec4::ONE, points);
        let expected = props.projection_matrix * props.view_matrix * model;
        assert!(uniforms.model_view_matrix().abs_diff_eq(expected, 1e-6));
        assert_eq!(uniforms.points(), points);
    }
}
