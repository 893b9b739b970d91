//! Build camera

use crate::core::types::{Vec2, Vec3, Mat4, Quat};
use crate::math::Ray;

/// Camera with position, rotation, and projection parameters
pub struct Camera {
    /// World position
    pub position: Vec3,
    /// Rotation as quaternion
    pub rotation: Quat,
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
}

impl Camera {
    /// Create a new camera
    pub fn new(position: Vec3, fov_y_degrees: f32, aspect: f32) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            fov_y: fov_y_degrees.to_radians(),
            aspect,
            near: 0.01,
            far: 1000.0,
        }
    }

    /// Create camera looking at a target
    pub fn look_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        let forward = (target - position).normalize();
        let right = forward.cross(up).normalize();
        let up = right.cross(forward);

        let rotation = Quat::from_mat3(&glam::Mat3::from_cols(right, up, -forward));

        Self {
            position,
            rotation,
            ..Self::default()
        }
    }

    /// Get view matrix (world to camera space)
    pub fn view_matrix(&self) -> Mat4 {
        let rotation_matrix = Mat4::from_quat(self.rotation.conjugate());
        let translation_matrix = Mat4::from_translation(-self.position);
        rotation_matrix * translation_matrix
    }

    /// Get projection matrix (camera to clip space)
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Get combined view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Get inverse view-projection matrix (for ray generation)
    pub fn view_projection_inverse(&self) -> Mat4 {
        self.view_projection().inverse()
    }

    /// Get forward direction (negative Z in camera space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Get right direction (positive X in camera space)
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Get up direction (positive Y in camera space)
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Set rotation from euler angles (yaw, pitch in radians)
    pub fn set_rotation_euler(&mut self, yaw: f32, pitch: f32) {
        self.rotation = Quat::from_euler(glam::EulerRot::YXZ, yaw, pitch, 0.0);
    }

    /// Update aspect ratio (call on window resize)
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        self.aspect = width / height;
    }

    /// Build a world-space ray through a pointer position.
    ///
    /// `pointer` is in window pixels with the origin at the top-left corner,
    /// `viewport` is the window size in pixels.
    pub fn screen_point_to_ray(&self, pointer: Vec2, viewport: Vec2) -> Ray {
        let ndc = Vec2::new(
            2.0 * pointer.x / viewport.x - 1.0,
            1.0 - 2.0 * pointer.y / viewport.y,
        );

        let inv = self.view_projection_inverse();
        // Depth range 0..1 from the near to the far plane
        let near = inv.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
        let far = inv.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));

        Ray::new(near, (far - near).normalize())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 5.0), 60.0, 16.0 / 9.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directions() {
        let camera = Camera::default();

        // Default camera looks down -Z
        let forward = camera.forward();
        assert!((forward.z - (-1.0)).abs() < 0.001);

        let right = camera.right();
        assert!((right.x - 1.0).abs() < 0.001);

        let up = camera.up();
        assert!((up.y - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_view_matrix_translation() {
        let mut camera = Camera::default();
        camera.position = Vec3::new(10.0, 0.0, 0.0);

        let view = camera.view_matrix();
        let origin_in_camera = view.transform_point3(Vec3::ZERO);
        assert!((origin_in_camera.x - (-10.0)).abs() < 0.001);
    }

    #[test]
    fn test_center_ray_matches_forward() {
        let camera = Camera::look_at(Vec3::new(0.0, 10.0, 10.0), Vec3::ZERO, Vec3::Y);
        let viewport = Vec2::new(1280.0, 720.0);

        let ray = camera.screen_point_to_ray(viewport * 0.5, viewport);

        assert!((ray.direction - camera.forward()).length() < 0.001);
        // Origin sits on the near plane, just in front of the camera
        assert!((ray.origin - camera.position).length() < 0.1);
    }

    #[test]
    fn test_left_edge_ray_points_left() {
        let camera = Camera::default();
        let viewport = Vec2::new(800.0, 600.0);

        let ray = camera.screen_point_to_ray(Vec2::new(0.0, 300.0), viewport);

        assert!(ray.direction.x < 0.0);
        assert!(ray.direction.y.abs() < 0.001);
    }
}
