//! Placement state machine
//!
//! `Select` hovers and picks up placed objects, `Build` drops fresh copies of
//! the selected placeable, `Move` relocates a picked-up object. A ghost entity
//! previews the candidate in `Build` and `Move`; it switches between the ghost
//! and blocked looks only when its validity changes.

use hecs::Entity;

use crate::collision::{CandidateVolume, Collider, ColliderRef, LayerMask, OverlapValidator, PhysicsWorld};
use crate::config::PlacementConfig;
use crate::math::Pose;
use crate::scene::{BuildScene, PlacedObject, VisualState};

use super::catalog::{PlaceableCatalog, PlaceableId, PlaceableKind};
use super::grid::{adjust_height, snap, RotationStep};
use super::input::FrameInput;

/// Controller mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PlacementMode {
    #[default]
    Select,
    Build,
    Move,
}

/// Outcome of a selection or tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlacementEvent {
    Placed {
        entity: Entity,
        placeable: PlaceableId,
        cost: f32,
    },
    /// `from` was removed and replaced by `to`
    Moved { from: Entity, to: Entity },
    /// A move was abandoned; `entity` is back in place
    MoveCancelled { entity: Entity },
    ModeChanged { from: PlacementMode, to: PlacementMode },
}

/// Object picked up in `Move` mode
#[derive(Clone, Copy, Debug)]
struct MoveSession {
    entity: Entity,
    collider: ColliderRef,
}

pub struct PlacementController {
    config: PlacementConfig,
    catalog: PlaceableCatalog,
    validator: OverlapValidator,
    mode: PlacementMode,
    selected: PlaceableId,
    rotation: RotationStep,
    height_offset: f32,
    ghost: Option<Entity>,
    ghost_blocked: bool,
    moving: Option<MoveSession>,
    hovered: Option<Entity>,
}

impl PlacementController {
    pub fn new(config: PlacementConfig, catalog: PlaceableCatalog) -> Self {
        let validator = OverlapValidator::new(config.zone_search_radius);
        Self {
            config,
            catalog,
            validator,
            mode: PlacementMode::Select,
            selected: PlaceableId::NONE,
            rotation: RotationStep::default(),
            height_offset: 0.0,
            ghost: None,
            ghost_blocked: false,
            moving: None,
            hovered: None,
        }
    }

    pub fn mode(&self) -> PlacementMode {
        self.mode
    }

    pub fn selected(&self) -> PlaceableId {
        self.selected
    }

    pub fn rotation(&self) -> RotationStep {
        self.rotation
    }

    pub fn height_offset(&self) -> f32 {
        self.height_offset
    }

    pub fn ghost(&self) -> Option<Entity> {
        self.ghost
    }

    pub fn is_ghost_blocked(&self) -> bool {
        self.ghost_blocked
    }

    pub fn hovered(&self) -> Option<Entity> {
        self.hovered
    }

    /// Entity being relocated in `Move` mode
    pub fn moving(&self) -> Option<Entity> {
        self.moving.map(|session| session.entity)
    }

    pub fn catalog(&self) -> &PlaceableCatalog {
        &self.catalog
    }

    /// Choose a catalog slot.
    ///
    /// 0 returns to `Select`. Choosing the slot already being built also
    /// returns to `Select`. Any other valid slot starts `Build` with a fresh
    /// ghost and rotation reset; the height offset carries over. Slots past
    /// the end of the catalog are ignored.
    pub fn select_type<P: PhysicsWorld>(&mut self, index: usize, scene: &mut BuildScene<P>) -> Option<PlacementEvent> {
        if !self.catalog.contains_index(index) {
            log::debug!("Ignoring placeable slot {} (catalog has {})", index, self.catalog.slot_count());
            return None;
        }

        let id = PlaceableId(index);
        if id.is_none() || (self.mode == PlacementMode::Build && self.selected == id) {
            return self.enter_select(scene);
        }

        let from = self.mode;
        if let Some(session) = self.moving.take() {
            scene.physics.set_enabled(session.collider, true);
        }
        self.clear_hover(scene);
        self.clear_ghost(scene);

        self.selected = id;
        self.rotation = RotationStep::default();
        self.ghost = Some(scene.registry.spawn_ghost(id, Pose::default(), &scene.visuals));
        self.ghost_blocked = false;
        self.mode = PlacementMode::Build;

        self.mode_changed(from)
    }

    /// Choose a catalog slot by placeable name.
    pub fn select_type_by_name<P: PhysicsWorld>(&mut self, name: &str, scene: &mut BuildScene<P>) -> Option<PlacementEvent> {
        match self.catalog.by_name(name) {
            Some(id) => {
                log::info!("Selected placeable: {}", name);
                self.select_type(id.0, scene)
            }
            None => {
                log::warn!("No placeable named '{}'", name);
                None
            }
        }
    }

    /// Run one frame of placement. A tick that changes mode through selection
    /// or cancel ends there.
    pub fn tick<P: PhysicsWorld>(&mut self, input: &FrameInput, scene: &mut BuildScene<P>) -> Option<PlacementEvent> {
        if let Some(index) = input.select {
            let event = self.select_type(index, scene);
            if event.is_some() {
                return event;
            }
        }

        if input.cancel {
            return self.enter_select(scene);
        }

        if input.rotate_cw {
            self.rotation = self.rotation.increment();
        }
        if input.rotate_ccw {
            self.rotation = self.rotation.decrement();
        }
        if input.raise {
            self.height_offset += self.config.height_increment;
        }
        if input.lower {
            self.height_offset -= self.config.height_increment;
        }

        if input.pointer_over_ui {
            return None;
        }

        match self.mode {
            PlacementMode::Select => self.tick_select(input, scene),
            PlacementMode::Build | PlacementMode::Move => self.tick_ghost(input, scene),
        }
    }

    fn tick_select<P: PhysicsWorld>(&mut self, input: &FrameInput, scene: &mut BuildScene<P>) -> Option<PlacementEvent> {
        let hovered = input
            .pointer_ray
            .and_then(|ray| scene.physics.raycast(&ray, self.config.max_ray_distance, LayerMask::PLACEABLE))
            .and_then(|hit| scene.registry.entity_for_collider(hit.collider))
            .filter(|&entity| scene.registry.is_selectable(entity));

        if hovered != self.hovered {
            self.clear_hover(scene);
            if let Some(entity) = hovered {
                scene.registry.set_outline(entity, true);
            }
            self.hovered = hovered;
        }

        match hovered {
            Some(entity) if input.commit => self.begin_move(entity, scene),
            _ => None,
        }
    }

    fn begin_move<P: PhysicsWorld>(&mut self, entity: Entity, scene: &mut BuildScene<P>) -> Option<PlacementEvent> {
        let placed = scene.registry.placed(entity)?;
        let collider = scene.registry.collider_of(entity)?;
        if self.catalog.get(placed.placeable).is_none() {
            log::warn!("Cannot move {:?}: placeable {:?} is not in the catalog", entity, placed.placeable);
            return None;
        }

        self.clear_hover(scene);
        scene.physics.set_enabled(collider, false);

        self.selected = placed.placeable;
        self.rotation = placed.rotation;
        self.ghost = Some(scene.registry.spawn_ghost(placed.placeable, placed.pose, &scene.visuals));
        self.ghost_blocked = false;
        self.moving = Some(MoveSession { entity, collider });
        self.mode = PlacementMode::Move;

        log::info!("Picked up {:?} for moving", entity);
        self.mode_changed(PlacementMode::Select)
    }

    fn tick_ghost<P: PhysicsWorld>(&mut self, input: &FrameInput, scene: &mut BuildScene<P>) -> Option<PlacementEvent> {
        let ghost = self.ghost?;
        let def = self.catalog.get(self.selected)?;
        let (shape, base_rotation) = (def.shape, def.base_rotation);
        let ray = input.pointer_ray?;
        let hit = scene
            .physics
            .raycast(&ray, self.config.max_ray_distance, LayerMask::FLOOR)?;

        let position = adjust_height(snap(hit.point, self.config.grid_size), self.height_offset);
        let pose = Pose::new(position.world(), base_rotation * self.rotation.to_quat());
        let candidate = CandidateVolume { shape, pose };

        let blocked = match self.validator.is_blocked(&scene.physics, &candidate) {
            Ok(blocked) => blocked,
            Err(e) => {
                log::warn!("Treating {:?} as blocked: {}", self.selected, e);
                true
            }
        };

        scene.registry.update_ghost(ghost, pose, blocked);
        if blocked != self.ghost_blocked {
            let state = if blocked { VisualState::Blocked } else { VisualState::Ghost };
            scene.registry.set_visual(ghost, state, &scene.visuals);
            self.ghost_blocked = blocked;
        }
        log::debug!("Ghost at {} (blocked: {})", pose.position, blocked);

        if input.commit && !blocked {
            self.commit(pose, scene)
        } else {
            None
        }
    }

    fn commit<P: PhysicsWorld>(&mut self, pose: Pose, scene: &mut BuildScene<P>) -> Option<PlacementEvent> {
        let def = self.catalog.get(self.selected)?;
        let shape = def.shape?;

        let mut layers = LayerMask::PLACEABLE;
        if def.blocks_building {
            layers = layers | LayerMask::NO_BUILD_ZONE;
        }
        if def.kind == PlaceableKind::FloorTile {
            layers = layers | LayerMask::FLOOR;
        }

        let collider = scene.physics.insert(Collider::new(shape, pose, layers));
        let placed = PlacedObject {
            placeable: self.selected,
            pose,
            rotation: self.rotation,
            // Blocked candidates never reach commit
            valid: true,
        };
        // Painted floor becomes part of the ground and cannot be picked up
        let selectable = def.kind != PlaceableKind::FloorTile;
        let entity = scene.registry.spawn_placed(placed, collider, selectable);

        if def.kind == PlaceableKind::FloorTile {
            match &def.mesh {
                Some(mesh) => scene.floor.add_tile(mesh, &pose.to_mat4()),
                None => log::warn!("Floor tile '{}' has no mesh", def.name),
            }
        }
        let (name, cost) = (def.name.clone(), def.cost);

        match self.moving.take() {
            Some(session) => {
                scene.physics.remove(session.collider);
                if let Err(e) = scene.registry.despawn(session.entity) {
                    log::warn!("Moved object already gone: {}", e);
                }
                self.clear_ghost(scene);
                self.mode = PlacementMode::Select;
                self.selected = PlaceableId::NONE;

                log::info!("Moved '{}' to {}", name, pose.position);
                Some(PlacementEvent::Moved {
                    from: session.entity,
                    to: entity,
                })
            }
            None => {
                log::info!("Placed '{}' at {}", name, pose.position);
                Some(PlacementEvent::Placed {
                    entity,
                    placeable: self.selected,
                    cost,
                })
            }
        }
    }

    /// Drop the ghost and any move in progress, then go to `Select`.
    fn enter_select<P: PhysicsWorld>(&mut self, scene: &mut BuildScene<P>) -> Option<PlacementEvent> {
        let from = self.mode;
        let cancelled = self.moving.take().map(|session| {
            scene.physics.set_enabled(session.collider, true);
            log::info!("Move of {:?} cancelled", session.entity);
            PlacementEvent::MoveCancelled { entity: session.entity }
        });

        self.clear_ghost(scene);
        self.selected = PlaceableId::NONE;
        self.mode = PlacementMode::Select;

        cancelled.or_else(|| self.mode_changed(from))
    }

    fn mode_changed(&self, from: PlacementMode) -> Option<PlacementEvent> {
        if from == self.mode {
            return None;
        }
        log::info!("Placement mode: {:?} -> {:?}", from, self.mode);
        Some(PlacementEvent::ModeChanged { from, to: self.mode })
    }

    fn clear_ghost<P: PhysicsWorld>(&mut self, scene: &mut BuildScene<P>) {
        if let Some(ghost) = self.ghost.take() {
            if let Err(e) = scene.registry.despawn(ghost) {
                log::warn!("Ghost already gone: {}", e);
            }
        }
        self.ghost_blocked = false;
    }

    fn clear_hover<P: PhysicsWorld>(&mut self, scene: &mut BuildScene<P>) {
        if let Some(entity) = self.hovered.take() {
            scene.registry.set_outline(entity, false);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::collision::{ColliderShape, CollisionWorld};
    use crate::config::{GameConfig, VisualNames};
    use crate::core::types::Vec3;
    use crate::math::Ray;
    use crate::mesh::MeshBuffer;
    use crate::placement::PlaceableDef;
    use crate::scene::{MaterialHandle, VisualTable};

    const WALL: usize = 1;
    const TILE: usize = 2;
    const PILLAR: usize = 3;
    const HOLLOW: usize = 4;

    fn catalog() -> PlaceableCatalog {
        PlaceableCatalog::new(vec![
            PlaceableDef::new("Wall", ColliderShape::Cuboid { half_extents: Vec3::splat(0.5) }).with_cost(10.0),
            PlaceableDef::new("Tile", ColliderShape::Cuboid { half_extents: Vec3::new(0.5, 0.0, 0.5) })
                .floor_tile(MeshBuffer::quad(1.0)),
            PlaceableDef::new("Pillar", ColliderShape::Cuboid { half_extents: Vec3::splat(0.5) }).blocking(),
            PlaceableDef {
                shape: None,
                ..PlaceableDef::new("Hollow", ColliderShape::Sphere { radius: 1.0 })
            },
        ])
    }

    fn setup() -> (PlacementController, BuildScene<CollisionWorld>) {
        let config = GameConfig::default();
        let materials = HashMap::from([
            ("GhostMaterial".to_string(), MaterialHandle(1)),
            ("NoBuildMaterial".to_string(), MaterialHandle(2)),
            ("NoBuildZone".to_string(), MaterialHandle(3)),
        ]);
        let visuals = VisualTable::resolve(&materials, &VisualNames::default());

        let mut scene = BuildScene::new(CollisionWorld::new(), visuals, &config);
        scene.add_floor_surface(
            ColliderShape::Cuboid { half_extents: Vec3::new(50.0, 0.5, 50.0) },
            Pose::from_position(Vec3::new(0.0, -0.5, 0.0)),
        );
        scene.add_no_build_zone(
            ColliderShape::Cuboid { half_extents: Vec3::splat(1.0) },
            Pose::from_position(Vec3::new(10.0, 0.0, 0.0)),
        );

        (PlacementController::new(config.placement, catalog()), scene)
    }

    fn down_at(x: f32, z: f32) -> Ray {
        Ray::new(Vec3::new(x, 10.0, z), -Vec3::Y)
    }

    fn click_at(x: f32, z: f32) -> FrameInput {
        FrameInput {
            commit: true,
            ..FrameInput::pointing(down_at(x, z))
        }
    }

    fn ghost_state(controller: &PlacementController, scene: &BuildScene<CollisionWorld>) -> Option<VisualState> {
        controller
            .ghost()
            .and_then(|ghost| scene.registry.renderable(ghost))
            .map(|look| look.state)
    }

    #[test]
    fn test_select_type_enters_build_with_ghost() {
        let (mut controller, mut scene) = setup();

        let event = controller.select_type(WALL, &mut scene);
        assert_eq!(
            event,
            Some(PlacementEvent::ModeChanged { from: PlacementMode::Select, to: PlacementMode::Build })
        );
        assert_eq!(controller.mode(), PlacementMode::Build);
        assert_eq!(controller.selected(), PlaceableId(WALL));
        assert_eq!(ghost_state(&controller, &scene), Some(VisualState::Ghost));
    }

    #[test]
    fn test_commit_places_snapped_object_and_stays_in_build() {
        let (mut controller, mut scene) = setup();
        controller.select_type(WALL, &mut scene);

        let event = controller.tick(&click_at(1.3, 2.7), &mut scene);
        let Some(PlacementEvent::Placed { entity, placeable, cost }) = event else {
            panic!("expected a placement, got {:?}", event);
        };
        assert_eq!(placeable, PlaceableId(WALL));
        assert_eq!(cost, 10.0);

        let placed = scene.registry.placed(entity).expect("placed component");
        assert!((placed.pose.position - Vec3::new(1.5, 0.0, 2.5)).length() < 1e-5);
        assert!(placed.valid);

        let collider = scene.registry.collider_of(entity).expect("collider link");
        let layers = scene.physics.collider(collider).map(|c| c.layers);
        assert_eq!(layers, Some(LayerMask::PLACEABLE));

        assert_eq!(controller.mode(), PlacementMode::Build);
        assert!(controller.ghost().is_some());

        // Successive placements without reselecting
        assert!(matches!(
            controller.tick(&click_at(4.2, 4.2), &mut scene),
            Some(PlacementEvent::Placed { .. })
        ));
        assert_eq!(scene.registry.placed_count(), 2);
    }

    #[test]
    fn test_blocked_candidate_never_commits() {
        let (mut controller, mut scene) = setup();
        controller.select_type(WALL, &mut scene);

        assert_eq!(controller.tick(&click_at(10.1, 0.2), &mut scene), None);
        assert_eq!(scene.registry.placed_count(), 0);
        assert!(controller.is_ghost_blocked());
        assert_eq!(ghost_state(&controller, &scene), Some(VisualState::Blocked));

        // Leaving the zone restores the ghost look
        controller.tick(&FrameInput::pointing(down_at(3.1, 3.1)), &mut scene);
        assert!(!controller.is_ghost_blocked());
        assert_eq!(ghost_state(&controller, &scene), Some(VisualState::Ghost));
    }

    #[test]
    fn test_missing_shape_is_treated_as_blocked() {
        let (mut controller, mut scene) = setup();
        controller.select_type(HOLLOW, &mut scene);

        assert_eq!(controller.tick(&click_at(1.1, 1.1), &mut scene), None);
        assert!(controller.is_ghost_blocked());
        assert_eq!(scene.registry.placed_count(), 0);
    }

    #[test]
    fn test_index_zero_returns_to_select() {
        let (mut controller, mut scene) = setup();
        controller.select_type(WALL, &mut scene);
        let ghost = controller.ghost().expect("ghost");

        let event = controller.tick(&FrameInput { select: Some(0), ..FrameInput::default() }, &mut scene);
        assert_eq!(
            event,
            Some(PlacementEvent::ModeChanged { from: PlacementMode::Build, to: PlacementMode::Select })
        );
        assert_eq!(controller.mode(), PlacementMode::Select);
        assert!(controller.ghost().is_none());
        assert!(!scene.registry.contains(ghost));

        // Already in Select: nothing to report
        assert_eq!(controller.select_type(0, &mut scene), None);
        assert_eq!(controller.mode(), PlacementMode::Select);
    }

    #[test]
    fn test_out_of_range_selection_is_noop() {
        let (mut controller, mut scene) = setup();
        controller.select_type(WALL, &mut scene);
        let ghost = controller.ghost();

        assert_eq!(controller.select_type(9, &mut scene), None);
        assert_eq!(controller.mode(), PlacementMode::Build);
        assert_eq!(controller.selected(), PlaceableId(WALL));
        assert_eq!(controller.ghost(), ghost);
    }

    #[test]
    fn test_reselecting_active_type_toggles_off() {
        let (mut controller, mut scene) = setup();
        controller.select_type(WALL, &mut scene);
        controller.select_type(WALL, &mut scene);
        assert_eq!(controller.mode(), PlacementMode::Select);
        assert!(controller.ghost().is_none());
    }

    #[test]
    fn test_switching_type_replaces_ghost() {
        let (mut controller, mut scene) = setup();
        controller.select_type(WALL, &mut scene);
        let first = controller.ghost().expect("ghost");

        assert_eq!(controller.select_type(PILLAR, &mut scene), None);
        let second = controller.ghost().expect("ghost");
        assert_ne!(first, second);
        assert!(!scene.registry.contains(first));
        assert_eq!(scene.registry.ghost(second).map(|g| g.placeable), Some(PlaceableId(PILLAR)));
    }

    #[test]
    fn test_rotation_resets_on_switch_but_height_persists() {
        let (mut controller, mut scene) = setup();
        controller.select_type(WALL, &mut scene);

        let steps = FrameInput { rotate_cw: true, raise: true, ..FrameInput::default() };
        controller.tick(&steps, &mut scene);
        controller.tick(&steps, &mut scene);
        controller.tick(&FrameInput { rotate_ccw: true, lower: true, ..FrameInput::default() }, &mut scene);
        assert_eq!(controller.rotation().get(), 1);
        assert_eq!(controller.height_offset(), 0.125);

        controller.select_type(PILLAR, &mut scene);
        assert_eq!(controller.rotation().get(), 0);
        assert_eq!(controller.height_offset(), 0.125);

        let event = controller.tick(&click_at(2.1, 2.1), &mut scene);
        let Some(PlacementEvent::Placed { entity, .. }) = event else {
            panic!("expected a placement, got {:?}", event);
        };
        let placed = scene.registry.placed(entity).expect("placed component");
        assert!((placed.pose.position - Vec3::new(2.0, 0.125, 2.0)).length() < 1e-5);
    }

    #[test]
    fn test_rotation_wraps_and_is_committed() {
        let (mut controller, mut scene) = setup();
        controller.select_type(WALL, &mut scene);
        controller.tick(&FrameInput { rotate_ccw: true, ..FrameInput::default() }, &mut scene);
        assert_eq!(controller.rotation().get(), 3);

        let event = controller.tick(&click_at(1.1, 1.1), &mut scene);
        let Some(PlacementEvent::Placed { entity, .. }) = event else {
            panic!("expected a placement, got {:?}", event);
        };
        let placed = scene.registry.placed(entity).expect("placed component");
        assert_eq!(placed.rotation.get(), 3);
        assert!(placed.pose.rotation.abs_diff_eq(RotationStep::new(3).to_quat(), 1e-6));
    }

    #[test]
    fn test_rotated_floor_tile_stays_flat() {
        let (mut controller, mut scene) = setup();
        controller.select_type(TILE, &mut scene);
        controller.tick(&FrameInput { rotate_cw: true, ..FrameInput::default() }, &mut scene);

        let event = controller.tick(&click_at(0.1, 0.1), &mut scene);
        assert!(matches!(event, Some(PlacementEvent::Placed { .. })), "got {:?}", event);

        let bounds = scene.floor.merged().bounds().expect("painted tile");
        assert!(bounds.min.y.abs() < 1e-5 && bounds.max.y.abs() < 1e-5);
        assert!((bounds.max.x - bounds.min.x - 1.0).abs() < 1e-5);
        assert!((bounds.max.z - bounds.min.z - 1.0).abs() < 1e-5);
        for n in scene.floor.merged().normals() {
            assert!((*n - Vec3::Y).length() < 1e-4);
        }
    }

    #[test]
    fn test_rotated_wall_stays_upright() {
        let (mut controller, mut scene) = setup();
        controller.select_type(WALL, &mut scene);
        controller.tick(&FrameInput { rotate_cw: true, ..FrameInput::default() }, &mut scene);

        let event = controller.tick(&click_at(2.1, 2.1), &mut scene);
        let Some(PlacementEvent::Placed { entity, .. }) = event else {
            panic!("expected a placement, got {:?}", event);
        };
        let placed = scene.registry.placed(entity).expect("placed component");
        assert!((placed.pose.rotation * Vec3::Y - Vec3::Y).length() < 1e-5);
        assert!((placed.pose.rotation * Vec3::X - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_pointer_over_ui_skips_placement() {
        let (mut controller, mut scene) = setup();
        controller.select_type(WALL, &mut scene);

        let input = FrameInput { pointer_over_ui: true, ..click_at(1.1, 1.1) };
        assert_eq!(controller.tick(&input, &mut scene), None);
        assert_eq!(scene.registry.placed_count(), 0);
        let ghost = controller.ghost().expect("ghost");
        assert_eq!(scene.registry.ghost(ghost).map(|g| g.pose), Some(Pose::default()));
    }

    #[test]
    fn test_blocking_placeable_becomes_zone() {
        let (mut controller, mut scene) = setup();
        controller.select_type(PILLAR, &mut scene);
        assert!(controller.tick(&click_at(3.1, 3.1), &mut scene).is_some());

        // The same spot is now off limits
        assert_eq!(controller.tick(&click_at(3.1, 3.1), &mut scene), None);
        assert!(controller.is_ghost_blocked());
        assert_eq!(scene.registry.placed_count(), 1);
    }

    #[test]
    fn test_floor_tiles_feed_floor_painter() {
        let (mut controller, mut scene) = setup();
        controller.select_type(TILE, &mut scene);

        let Some(PlacementEvent::Placed { entity, .. }) = controller.tick(&click_at(0.1, 0.1), &mut scene) else {
            panic!("first tile not placed");
        };
        assert!(controller.tick(&click_at(1.1, 0.1), &mut scene).is_some());

        assert_eq!(scene.floor.tile_count(), 2);
        assert_eq!(scene.floor.merged().vertex_count(), 6);
        assert_eq!(scene.floor.boundary().len(), 6);
        assert!(!scene.registry.is_selectable(entity));
    }

    #[test]
    fn test_hover_outline_follows_pointer() {
        let (mut controller, mut scene) = setup();
        controller.select_type(WALL, &mut scene);
        let Some(PlacementEvent::Placed { entity: a, .. }) = controller.tick(&click_at(1.1, 1.1), &mut scene) else {
            panic!("first wall not placed");
        };
        let Some(PlacementEvent::Placed { entity: b, .. }) = controller.tick(&click_at(4.1, 4.1), &mut scene) else {
            panic!("second wall not placed");
        };
        controller.select_type(0, &mut scene);

        controller.tick(&FrameInput::pointing(down_at(1.1, 0.9)), &mut scene);
        assert_eq!(controller.hovered(), Some(a));
        assert!(scene.registry.outline(a));

        controller.tick(&FrameInput::pointing(down_at(3.9, 4.2)), &mut scene);
        assert_eq!(controller.hovered(), Some(b));
        assert!(!scene.registry.outline(a));
        assert!(scene.registry.outline(b));

        controller.tick(&FrameInput::pointing(down_at(20.2, 20.2)), &mut scene);
        assert_eq!(controller.hovered(), None);
        assert!(!scene.registry.outline(b));
    }

    #[test]
    fn test_move_relocates_object() {
        let (mut controller, mut scene) = setup();
        controller.select_type(PILLAR, &mut scene);
        controller.tick(&FrameInput { rotate_cw: true, ..FrameInput::default() }, &mut scene);
        let Some(PlacementEvent::Placed { entity: original, .. }) = controller.tick(&click_at(1.1, 0.9), &mut scene)
        else {
            panic!("pillar not placed");
        };
        let old_collider = scene.registry.collider_of(original).expect("collider link");
        controller.select_type(0, &mut scene);

        let event = controller.tick(&click_at(1.1, 0.9), &mut scene);
        assert_eq!(
            event,
            Some(PlacementEvent::ModeChanged { from: PlacementMode::Select, to: PlacementMode::Move })
        );
        assert_eq!(controller.moving(), Some(original));
        assert_eq!(controller.rotation().get(), 1);
        assert!(!scene.registry.outline(original));
        assert_eq!(scene.physics.collider(old_collider).map(|c| c.enabled), Some(false));

        // The suspended pillar does not block its own old spot
        controller.tick(&FrameInput::pointing(down_at(1.1, 0.9)), &mut scene);
        assert!(!controller.is_ghost_blocked());

        let event = controller.tick(&click_at(3.2, 2.9), &mut scene);
        let Some(PlacementEvent::Moved { from, to }) = event else {
            panic!("expected a move, got {:?}", event);
        };
        assert_eq!(from, original);
        assert!(!scene.registry.contains(original));
        assert!(scene.physics.collider(old_collider).is_none());

        let placed = scene.registry.placed(to).expect("placed component");
        assert!((placed.pose.position - Vec3::new(3.0, 0.0, 3.0)).length() < 1e-5);
        assert_eq!(placed.rotation.get(), 1);
        assert_eq!(controller.mode(), PlacementMode::Select);
        assert!(controller.ghost().is_none());
        assert_eq!(scene.registry.placed_count(), 1);
    }

    #[test]
    fn test_move_cancel_restores_collider() {
        let (mut controller, mut scene) = setup();
        controller.select_type(PILLAR, &mut scene);
        let Some(PlacementEvent::Placed { entity, .. }) = controller.tick(&click_at(1.1, 0.9), &mut scene) else {
            panic!("pillar not placed");
        };
        let collider = scene.registry.collider_of(entity).expect("collider link");
        controller.select_type(0, &mut scene);
        controller.tick(&click_at(1.1, 0.9), &mut scene);
        assert_eq!(controller.mode(), PlacementMode::Move);

        let event = controller.tick(&FrameInput { cancel: true, ..FrameInput::default() }, &mut scene);
        assert_eq!(event, Some(PlacementEvent::MoveCancelled { entity }));
        assert_eq!(controller.mode(), PlacementMode::Select);
        assert!(controller.ghost().is_none());
        assert!(scene.registry.contains(entity));
        assert_eq!(scene.physics.collider(collider).map(|c| c.enabled), Some(true));
    }

    #[test]
    fn test_select_by_name() {
        let (mut controller, mut scene) = setup();
        assert_eq!(controller.select_type_by_name("Gazebo", &mut scene), None);
        assert_eq!(controller.mode(), PlacementMode::Select);

        controller.select_type_by_name("Pillar", &mut scene);
        assert_eq!(controller.selected(), PlaceableId(PILLAR));
        assert_eq!(controller.mode(), PlacementMode::Build);
    }
}
