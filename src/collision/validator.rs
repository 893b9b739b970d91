//! No-build-zone validation for placement candidates.

use crate::core::Error;
use crate::core::types::Result;
use crate::math::Pose;

use super::shape::ColliderShape;
use super::{LayerMask, PhysicsWorld};

/// Shape and pose of a placement candidate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CandidateVolume {
    /// `None` when the placeable has no collision shape
    pub shape: Option<ColliderShape>,
    pub pose: Pose,
}

/// Checks candidate volumes against forbidden zones.
///
/// A radius query around the candidate narrows the zones first, then the exact
/// penetration test runs on each until one hits.
#[derive(Clone, Debug)]
pub struct OverlapValidator {
    pub search_radius: f32,
    pub zone_layers: LayerMask,
}

impl Default for OverlapValidator {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl OverlapValidator {
    pub fn new(search_radius: f32) -> Self {
        Self {
            search_radius,
            zone_layers: LayerMask::NO_BUILD_ZONE,
        }
    }

    /// Whether the candidate penetrates any zone near it.
    ///
    /// Fails with [`Error::InvalidGeometry`] if the candidate has no usable
    /// shape; callers should treat that as blocked.
    pub fn is_blocked<P: PhysicsWorld + ?Sized>(&self, physics: &P, candidate: &CandidateVolume) -> Result<bool> {
        let shape = candidate
            .shape
            .ok_or_else(|| Error::InvalidGeometry("candidate has no collision shape".to_string()))?;
        shape.validate()?;

        let nearby = physics.overlap_sphere(candidate.pose.position, self.search_radius, self.zone_layers);

        for id in nearby {
            let Some(zone) = physics.collider(id) else {
                continue;
            };
            if let Some(penetration) = physics.penetration(&shape, &candidate.pose, &zone.shape, &zone.pose) {
                log::trace!("Candidate penetrates zone {:?} by {:.4}", id, penetration.depth);
                return Ok(true);
            }
        }

        Ok(false)
    }
}
