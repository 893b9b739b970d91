//! Collision queries used by placement.
//!
//! The placement code talks to physics only through [`PhysicsWorld`], so an
//! engine can plug in its own raycasts and overlap tests. [`CollisionWorld`] is
//! the in-crate implementation used by the demo and the tests.

pub mod shape;
pub mod sat;
pub mod world;
pub mod validator;

use serde::{Deserialize, Serialize};

use crate::core::types::Vec3;
use crate::math::{Pose, Ray};

pub use shape::ColliderShape;
pub use sat::{compute_penetration, Penetration};
pub use world::CollisionWorld;
pub use validator::{CandidateVolume, OverlapValidator};

/// Bit set of collision layers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    /// Surfaces the pointer ray snaps placements onto
    pub const FLOOR: LayerMask = LayerMask(1 << 0);
    /// Committed objects that can be hovered and picked up
    pub const PLACEABLE: LayerMask = LayerMask(1 << 1);
    /// Volumes nothing may be built into
    pub const NO_BUILD_ZONE: LayerMask = LayerMask(1 << 2);

    pub fn contains(self, other: LayerMask) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }
}

impl std::ops::BitOr for LayerMask {
    type Output = LayerMask;

    fn bitor(self, rhs: LayerMask) -> LayerMask {
        LayerMask(self.0 | rhs.0)
    }
}

/// Handle to a collider owned by a [`PhysicsWorld`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ColliderRef(pub u64);

/// A posed shape on a set of layers
#[derive(Clone, Debug, PartialEq)]
pub struct Collider {
    pub shape: ColliderShape,
    pub pose: Pose,
    pub layers: LayerMask,
    /// Disabled colliders are skipped by every query
    pub enabled: bool,
}

impl Collider {
    pub fn new(shape: ColliderShape, pose: Pose, layers: LayerMask) -> Self {
        Self {
            shape,
            pose,
            layers,
            enabled: true,
        }
    }
}

/// Nearest raycast hit
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    pub distance: f32,
    pub collider: ColliderRef,
}

/// Physics collaborator consumed by placement, hover picking and floor painting.
pub trait PhysicsWorld {
    /// Nearest enabled collider on `layers` hit within `max_distance`.
    fn raycast(&self, ray: &Ray, max_distance: f32, layers: LayerMask) -> Option<RayHit>;

    /// Enabled colliders on `layers` within `radius` of `center`, in ascending
    /// handle order.
    fn overlap_sphere(&self, center: Vec3, radius: f32, layers: LayerMask) -> Vec<ColliderRef>;

    fn collider(&self, id: ColliderRef) -> Option<&Collider>;

    /// Exact penetration test between two posed shapes.
    fn penetration(
        &self,
        a: &ColliderShape,
        pose_a: &Pose,
        b: &ColliderShape,
        pose_b: &Pose,
    ) -> Option<Penetration> {
        compute_penetration(a, pose_a, b, pose_b)
    }

    fn insert(&mut self, collider: Collider) -> ColliderRef;

    fn remove(&mut self, id: ColliderRef) -> Option<Collider>;

    /// Enable or disable a collider. Returns false for unknown handles.
    fn set_enabled(&mut self, id: ColliderRef, enabled: bool) -> bool;
}
