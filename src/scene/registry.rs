//! Entity registry: what each scene object can do, as hecs components.
//!
//! Placed objects, no-build zones and the placement ghost all live in one
//! `hecs::World`. The renderer reads `Renderable` and `Outline`; placement
//! reads `PlacedObject` and `ColliderLink`. Collider handles are indexed so a
//! raycast hit can be traced back to its entity.

use std::collections::HashMap;

use hecs::{Entity, EntityBuilder, World};

use crate::collision::ColliderRef;
use crate::core::Error;
use crate::core::types::Result;
use crate::math::Pose;
use crate::placement::{PlaceableId, RotationStep};

use super::visual::{MaterialHandle, VisualState, VisualTable};

/// A committed placement
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedObject {
    pub placeable: PlaceableId,
    pub pose: Pose,
    pub rotation: RotationStep,
    /// Validator result recorded at commit. Only unblocked candidates are
    /// committed, so placements made by the controller always carry `true`.
    pub valid: bool,
}

/// Current look of an entity
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Renderable {
    pub state: VisualState,
    /// `None` while showing the object's own materials
    pub material: Option<MaterialHandle>,
}

/// Hover highlight flag
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Outline {
    pub enabled: bool,
}

/// Marks placed objects that can be picked up and moved
#[derive(Clone, Copy, Debug)]
pub struct Selectable;

/// Marks no-build zone volumes
#[derive(Clone, Copy, Debug)]
pub struct NoBuildZone;

/// Placement preview
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ghost {
    pub placeable: PlaceableId,
    pub pose: Pose,
    pub blocked: bool,
}

/// Collider owned by an entity
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColliderLink(pub ColliderRef);

/// Entity/component table for the build scene
#[derive(Default)]
pub struct EntityRegistry {
    world: World,
    by_collider: HashMap<ColliderRef, Entity>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access for renderers and tools
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn spawn_placed(&mut self, placed: PlacedObject, collider: ColliderRef, selectable: bool) -> Entity {
        let mut builder = EntityBuilder::new();
        builder
            .add(placed)
            .add(Renderable::default())
            .add(Outline::default())
            .add(ColliderLink(collider));
        if selectable {
            builder.add(Selectable);
        }

        let entity = self.world.spawn(builder.build());
        self.by_collider.insert(collider, entity);
        entity
    }

    pub fn spawn_zone(&mut self, collider: ColliderRef, table: &VisualTable) -> Entity {
        let entity = self.world.spawn((
            NoBuildZone,
            Renderable {
                state: VisualState::NoBuildZone,
                material: table.material(VisualState::NoBuildZone),
            },
            ColliderLink(collider),
        ));
        self.by_collider.insert(collider, entity);
        entity
    }

    pub fn spawn_ghost(&mut self, placeable: PlaceableId, pose: Pose, table: &VisualTable) -> Entity {
        let entity = self.world.spawn((
            Ghost {
                placeable,
                pose,
                blocked: false,
            },
            Renderable::default(),
        ));
        self.set_visual(entity, VisualState::Ghost, table);
        entity
    }

    /// Remove an entity and forget its collider link.
    pub fn despawn(&mut self, entity: Entity) -> Result<()> {
        if let Some(collider) = self.collider_of(entity) {
            self.by_collider.remove(&collider);
        }
        self.world
            .despawn(entity)
            .map_err(|e| Error::Entity(format!("{:?}: {}", entity, e)))
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.world.contains(entity)
    }

    pub fn entity_for_collider(&self, collider: ColliderRef) -> Option<Entity> {
        self.by_collider.get(&collider).copied()
    }

    pub fn collider_of(&self, entity: Entity) -> Option<ColliderRef> {
        self.world.get::<&ColliderLink>(entity).ok().map(|link| link.0)
    }

    pub fn placed(&self, entity: Entity) -> Option<PlacedObject> {
        self.world.get::<&PlacedObject>(entity).ok().map(|p| *p)
    }

    pub fn ghost(&self, entity: Entity) -> Option<Ghost> {
        self.world.get::<&Ghost>(entity).ok().map(|g| *g)
    }

    pub fn is_selectable(&self, entity: Entity) -> bool {
        self.world.get::<&Selectable>(entity).is_ok()
    }

    pub fn renderable(&self, entity: Entity) -> Option<Renderable> {
        self.world.get::<&Renderable>(entity).ok().map(|r| *r)
    }

    pub fn outline(&self, entity: Entity) -> bool {
        self.world
            .get::<&Outline>(entity)
            .map(|o| o.enabled)
            .unwrap_or(false)
    }

    pub fn set_outline(&mut self, entity: Entity, enabled: bool) {
        if let Ok(outline) = self.world.query_one_mut::<&mut Outline>(entity) {
            outline.enabled = enabled;
        }
    }

    /// Move the ghost and record its validity.
    pub fn update_ghost(&mut self, entity: Entity, pose: Pose, blocked: bool) {
        if let Ok(ghost) = self.world.query_one_mut::<&mut Ghost>(entity) {
            ghost.pose = pose;
            ghost.blocked = blocked;
        }
    }

    /// Switch an entity's look. A state without a material is logged and
    /// the previous look is kept. Returns whether the switch happened.
    pub fn set_visual(&mut self, entity: Entity, state: VisualState, table: &VisualTable) -> bool {
        if !table.can_apply(state) {
            log::error!("No material for {:?}; keeping current look of {:?}", state, entity);
            return false;
        }

        match self.world.query_one_mut::<&mut Renderable>(entity) {
            Ok(renderable) => {
                renderable.state = state;
                renderable.material = table.material(state);
                true
            }
            Err(_) => false,
        }
    }

    /// Put any no-build zone whose look drifted back into the zone state.
    pub fn enforce_zone_visuals(&mut self, table: &VisualTable) {
        let Some(material) = table.material(VisualState::NoBuildZone) else {
            return;
        };

        for (_, (_, renderable)) in self.world.query_mut::<(&NoBuildZone, &mut Renderable)>() {
            if renderable.state != VisualState::NoBuildZone || renderable.material != Some(material) {
                renderable.state = VisualState::NoBuildZone;
                renderable.material = Some(material);
            }
        }
    }

    /// Number of committed placements
    pub fn placed_count(&self) -> usize {
        self.world.query::<&PlacedObject>().iter().count()
    }

    /// All committed placements
    pub fn placed_objects(&self) -> Vec<(Entity, PlacedObject)> {
        self.world
            .query::<&PlacedObject>()
            .iter()
            .map(|(entity, placed)| (entity, *placed))
            .collect()
    }
}
