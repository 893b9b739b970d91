//! Ray type and operations

use crate::core::types::{Vec3, Mat4};
use super::aabb::Aabb;

/// A ray defined by origin and direction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    /// Precomputed 1/direction for fast AABB intersection
    pub inv_direction: Vec3,
}

impl Ray {
    /// Create a new ray (direction should be normalized)
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            inv_direction: direction.recip(),
        }
    }

    /// Get point along ray at parameter t
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Ray-AABB intersection using slab method
    /// Returns Some((t_near, t_far)) if intersection, None otherwise
    pub fn intersects_aabb(&self, aabb: &Aabb) -> Option<(f32, f32)> {
        let t1 = (aabb.min - self.origin) * self.inv_direction;
        let t2 = (aabb.max - self.origin) * self.inv_direction;

        let t_min = t1.min(t2);
        let t_max = t1.max(t2);

        let t_near = t_min.x.max(t_min.y).max(t_min.z);
        let t_far = t_max.x.min(t_max.y).min(t_max.z);

        if t_near <= t_far && t_far >= 0.0 {
            Some((t_near.max(0.0), t_far))
        } else {
            None
        }
    }

    /// Ray-sphere intersection. Returns the nearest non-negative t.
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_d = discriminant.sqrt();
        let t_near = -b - sqrt_d;
        let t_far = -b + sqrt_d;
        if t_far < 0.0 {
            None
        } else {
            Some(t_near.max(0.0))
        }
    }

    /// Transform ray by matrix
    pub fn transform(&self, matrix: &Mat4) -> Ray {
        let new_origin = matrix.transform_point3(self.origin);
        let new_direction = matrix.transform_vector3(self.direction).normalize();
        Ray::new(new_origin, new_direction)
    }
}
