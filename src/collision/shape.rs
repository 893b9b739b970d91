//! Collision shapes

use serde::{Deserialize, Serialize};

use crate::core::Error;
use crate::core::types::{Result, Vec3};
use crate::math::{Aabb, Pose};

/// Convex shape in its own local frame
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ColliderShape {
    /// Box centered on the origin. A zero extent on one axis makes a flat
    /// panel, which is how floor tiles are represented.
    Cuboid { half_extents: Vec3 },
    Sphere { radius: f32 },
}

impl ColliderShape {
    /// Check that the shape can take part in penetration tests.
    pub fn validate(&self) -> Result<()> {
        match *self {
            ColliderShape::Cuboid { half_extents } => {
                if !half_extents.is_finite() || half_extents.min_element() < 0.0 {
                    return Err(Error::InvalidGeometry(format!(
                        "cuboid half extents must be finite and non-negative, got {}",
                        half_extents
                    )));
                }
                if half_extents.max_element() == 0.0 {
                    return Err(Error::InvalidGeometry("cuboid has no extent".to_string()));
                }
            }
            ColliderShape::Sphere { radius } => {
                if !(radius.is_finite() && radius > 0.0) {
                    return Err(Error::InvalidGeometry(format!(
                        "sphere radius must be positive, got {}",
                        radius
                    )));
                }
            }
        }
        Ok(())
    }

    /// Bounds in the shape's local frame
    pub fn local_bounds(&self) -> Aabb {
        match *self {
            ColliderShape::Cuboid { half_extents } => Aabb::from_center_half_extent(Vec3::ZERO, half_extents),
            ColliderShape::Sphere { radius } => Aabb::from_center_half_extent(Vec3::ZERO, Vec3::splat(radius)),
        }
    }

    /// Distance from a world point to the shape placed at `pose` (zero inside)
    pub fn distance_to_point(&self, pose: &Pose, point: Vec3) -> f32 {
        match *self {
            ColliderShape::Cuboid { .. } => {
                let local = pose.inverse_transform_point(point);
                self.local_bounds().distance_squared_to_point(local).sqrt()
            }
            ColliderShape::Sphere { radius } => ((point - pose.position).length() - radius).max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Quat;

    #[test]
    fn test_validate() {
        assert!(ColliderShape::Cuboid { half_extents: Vec3::new(0.5, 0.0, 0.5) }.validate().is_ok());
        assert!(ColliderShape::Cuboid { half_extents: Vec3::ZERO }.validate().is_err());
        assert!(ColliderShape::Cuboid { half_extents: Vec3::new(1.0, -1.0, 1.0) }.validate().is_err());
        assert!(ColliderShape::Cuboid { half_extents: Vec3::new(f32::NAN, 1.0, 1.0) }.validate().is_err());
        assert!(ColliderShape::Sphere { radius: 0.0 }.validate().is_err());
        assert!(ColliderShape::Sphere { radius: 2.0 }.validate().is_ok());
    }

    #[test]
    fn test_distance_to_rotated_box() {
        let shape = ColliderShape::Cuboid { half_extents: Vec3::new(2.0, 1.0, 0.5) };
        let pose = Pose::new(Vec3::ZERO, Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));

        // Rotated 90°: the long axis now runs along Z
        assert!(shape.distance_to_point(&pose, Vec3::new(0.0, 0.0, 1.9)) < 0.0001);
        assert!((shape.distance_to_point(&pose, Vec3::new(1.5, 0.0, 0.0)) - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_distance_to_sphere() {
        let shape = ColliderShape::Sphere { radius: 1.0 };
        let pose = Pose::from_position(Vec3::new(0.0, 5.0, 0.0));
        assert!((shape.distance_to_point(&pose, Vec3::ZERO) - 4.0).abs() < 0.0001);
        assert_eq!(shape.distance_to_point(&pose, Vec3::new(0.0, 5.5, 0.0)), 0.0);
    }
}
