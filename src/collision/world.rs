//! In-crate physics collaborator.
//!
//! Brute-force over all colliders; a playfield holds a few hundred at most.

use std::collections::BTreeMap;

use crate::core::types::Vec3;
use crate::math::Ray;

use super::shape::ColliderShape;
use super::{Collider, ColliderRef, LayerMask, PhysicsWorld, RayHit};

/// Collider store with raycast and overlap queries
#[derive(Default)]
pub struct CollisionWorld {
    colliders: BTreeMap<ColliderRef, Collider>,
    next_id: u64,
}

impl CollisionWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    fn active(&self, layers: LayerMask) -> impl Iterator<Item = (&ColliderRef, &Collider)> {
        self.colliders
            .iter()
            .filter(move |(_, c)| c.enabled && c.layers.intersects(layers))
    }
}

/// Distance along `ray` to the first surface of `collider`
fn ray_distance(ray: &Ray, collider: &Collider) -> Option<f32> {
    match collider.shape {
        ColliderShape::Sphere { radius } => ray.intersects_sphere(collider.pose.position, radius),
        ColliderShape::Cuboid { .. } => {
            // Rigid transform, so distances are the same in local space
            let local = ray.transform(&collider.pose.to_mat4().inverse());
            local
                .intersects_aabb(&collider.shape.local_bounds())
                .map(|(t_near, _)| t_near)
        }
    }
}

impl PhysicsWorld for CollisionWorld {
    fn raycast(&self, ray: &Ray, max_distance: f32, layers: LayerMask) -> Option<RayHit> {
        self.active(layers)
            .filter_map(|(&id, collider)| {
                ray_distance(ray, collider)
                    .filter(|&t| t <= max_distance)
                    .map(|t| RayHit {
                        point: ray.at(t),
                        distance: t,
                        collider: id,
                    })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn overlap_sphere(&self, center: Vec3, radius: f32, layers: LayerMask) -> Vec<ColliderRef> {
        self.active(layers)
            .filter(|(_, c)| c.shape.distance_to_point(&c.pose, center) <= radius)
            .map(|(&id, _)| id)
            .collect()
    }

    fn collider(&self, id: ColliderRef) -> Option<&Collider> {
        self.colliders.get(&id)
    }

    fn insert(&mut self, collider: Collider) -> ColliderRef {
        let id = ColliderRef(self.next_id);
        self.next_id += 1;
        self.colliders.insert(id, collider);
        id
    }

    fn remove(&mut self, id: ColliderRef) -> Option<Collider> {
        self.colliders.remove(&id)
    }

    fn set_enabled(&mut self, id: ColliderRef, enabled: bool) -> bool {
        match self.colliders.get_mut(&id) {
            Some(collider) => {
                collider.enabled = enabled;
                true
            }
            None => false,
        }
    }
}
