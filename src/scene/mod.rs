//! Build scene: entity registry, physics, floor and visual table

pub mod registry;
pub mod visual;

pub use registry::{
    ColliderLink, EntityRegistry, Ghost, NoBuildZone, Outline, PlacedObject, Renderable, Selectable,
};
pub use visual::{MaterialHandle, MaterialSource, VisualState, VisualTable};

use crate::collision::{Collider, ColliderShape, LayerMask, PhysicsWorld};
use crate::config::GameConfig;
use crate::math::Pose;
use crate::mesh::FloorPainter;

/// Everything placement mutates during a tick
pub struct BuildScene<P: PhysicsWorld> {
    pub registry: EntityRegistry,
    pub physics: P,
    pub floor: FloorPainter,
    pub visuals: VisualTable,
}

impl<P: PhysicsWorld> BuildScene<P> {
    pub fn new(physics: P, visuals: VisualTable, config: &GameConfig) -> Self {
        Self {
            registry: EntityRegistry::new(),
            physics,
            floor: FloorPainter::new(config.floor.clone()),
            visuals,
        }
    }

    /// Add a no-build zone volume to physics and the registry.
    pub fn add_no_build_zone(&mut self, shape: ColliderShape, pose: Pose) -> hecs::Entity {
        let collider = self
            .physics
            .insert(Collider::new(shape, pose, LayerMask::NO_BUILD_ZONE));
        self.registry.spawn_zone(collider, &self.visuals)
    }

    /// Add a pickable floor surface.
    pub fn add_floor_surface(&mut self, shape: ColliderShape, pose: Pose) {
        self.physics.insert(Collider::new(shape, pose, LayerMask::FLOOR));
    }
}
