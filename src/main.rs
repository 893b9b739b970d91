//! Wizbuild - scripted headless build session
//!
//! Usage:
//!   cargo run -- [--config settings.json] [--write-config out.json]
//!
//! Drives the build camera, placement controller and floor painter through a
//! short scripted session and logs what happened. Set RUST_LOG=debug to see
//! per-tick detail.

use std::collections::HashMap;
use std::path::PathBuf;

use winit::keyboard::KeyCode;

use wizbuild::collision::{ColliderShape, CollisionWorld};
use wizbuild::config::GameConfig;
use wizbuild::core::camera::Camera;
use wizbuild::core::camera_controller::BuildCamController;
use wizbuild::core::input::InputState;
use wizbuild::core::logging;
use wizbuild::core::types::{Vec2, Vec3};
use wizbuild::math::{Pose, Ray};
use wizbuild::mesh::MeshBuffer;
use wizbuild::placement::{FrameInput, PlaceableCatalog, PlaceableDef, PlacementController, PlacementEvent};
use wizbuild::scene::{BuildScene, MaterialHandle, NoBuildZone, Renderable, VisualState, VisualTable};
use wizbuild::session::{ModeToggle, Wallet};

const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);
const FRAME_DT: f32 = 1.0 / 60.0;

fn parse_path_arg(args: &[String], name: &str) -> Option<PathBuf> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
}

/// Window pixel that shows `world` through `camera`
fn pointer_for(camera: &Camera, world: Vec3) -> Vec2 {
    let ndc = camera.view_projection().project_point3(world);
    Vec2::new(
        (ndc.x + 1.0) * 0.5 * VIEWPORT.x,
        (1.0 - ndc.y) * 0.5 * VIEWPORT.y,
    )
}

fn catalog(config: &GameConfig) -> PlaceableCatalog {
    let tile_half = config.floor.tile_size * 0.5;
    PlaceableCatalog::new(vec![
        PlaceableDef::new("Wall", ColliderShape::Cuboid { half_extents: Vec3::new(0.5, 1.0, 0.1) }).with_cost(15.0),
        PlaceableDef::new("Pillar", ColliderShape::Cuboid { half_extents: Vec3::new(0.25, 1.0, 0.25) })
            .with_cost(25.0)
            .blocking(),
        PlaceableDef::new("Tile", ColliderShape::Cuboid { half_extents: Vec3::new(tile_half, 0.0, tile_half) })
            .with_cost(2.0)
            .floor_tile(MeshBuffer::quad(config.floor.tile_size)),
    ])
}

struct Session {
    camera: Camera,
    camera_controller: BuildCamController,
    input: InputState,
    controller: PlacementController,
    scene: BuildScene<CollisionWorld>,
    wallet: Wallet,
    toggle: ModeToggle,
}

impl Session {
    fn pointer_ray(&self, target: Vec3) -> Ray {
        self.camera
            .screen_point_to_ray(pointer_for(&self.camera, target), VIEWPORT)
    }

    /// One frame: press `keys` (and the left button if `click`) with the
    /// pointer over `target`.
    fn frame(&mut self, keys: &[KeyCode], click: bool, target: Vec3) {
        for &key in keys {
            self.input.press_key(key);
        }
        if click {
            self.input.press_mouse(winit::event::MouseButton::Left);
        }

        self.camera_controller
            .update(&mut self.camera, &self.input, FRAME_DT);

        let ray = self.pointer_ray(target);
        let frame = FrameInput::from_input(&self.input, Some(ray), false);
        if let Some(event) = self.controller.tick(&frame, &mut self.scene) {
            self.handle(event);
        }
        self.scene.registry.enforce_zone_visuals(&self.scene.visuals);

        for &key in keys {
            self.input.release_key(key);
        }
        if click {
            self.input.release_mouse(winit::event::MouseButton::Left);
        }
        self.input.end_frame();
    }

    fn handle(&mut self, event: PlacementEvent) {
        match event {
            PlacementEvent::Placed { entity, placeable, cost } => {
                if !self.wallet.can_afford(cost) {
                    log::warn!("{:?} placed on credit", placeable);
                }
                self.wallet.subtract(cost);
                log::info!("Placed {:?} as {:?}, balance {}", placeable, entity, self.wallet.display());
            }
            PlacementEvent::Moved { from, to } => log::info!("Moved {:?} -> {:?}", from, to),
            PlacementEvent::MoveCancelled { entity } => log::info!("Move of {:?} cancelled", entity),
            PlacementEvent::ModeChanged { from, to } => log::info!("Placement {:?} -> {:?}", from, to),
        }
    }
}

fn main() {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let config = match parse_path_arg(&args, "--config") {
        Some(path) => match GameConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };

    if let Some(path) = parse_path_arg(&args, "--write-config") {
        if let Err(e) = config.save(&path) {
            log::error!("Failed to write {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }

    let materials: HashMap<String, MaterialHandle> = [
        &config.visuals.ghost,
        &config.visuals.blocked,
        &config.visuals.no_build_zone,
    ]
    .into_iter()
    .enumerate()
    .map(|(i, name)| (name.clone(), MaterialHandle(i as u32 + 1)))
    .collect();
    let visuals = VisualTable::resolve(&materials, &config.visuals);

    let mut scene = BuildScene::new(CollisionWorld::new(), visuals, &config);
    scene.add_floor_surface(
        ColliderShape::Cuboid { half_extents: Vec3::new(50.0, 0.5, 50.0) },
        Pose::from_position(Vec3::new(0.0, -0.5, 0.0)),
    );
    scene.add_no_build_zone(
        ColliderShape::Cuboid { half_extents: Vec3::new(1.5, 1.0, 1.5) },
        Pose::from_position(Vec3::new(6.0, 0.0, 0.0)),
    );

    // Above and behind the origin, looking down at it
    let mut camera = Camera::default();
    camera.position = Vec3::new(0.0, 14.0, 12.0);
    let mut camera_controller = BuildCamController::new(&config.camera);
    camera_controller.set_orientation(0.0, -(14.0f32).atan2(12.0));
    camera.set_rotation_euler(camera_controller.yaw(), camera_controller.pitch());

    let mut session = Session {
        camera,
        camera_controller,
        input: InputState::new(),
        controller: PlacementController::new(config.placement.clone(), catalog(&config)),
        scene,
        wallet: Wallet::new(config.starting_money),
        toggle: ModeToggle::new(),
    };
    session.camera.set_aspect(VIEWPORT.x, VIEWPORT.y);
    session.wallet.add(100.0);

    session.toggle.toggle(&mut session.controller, &mut session.scene);

    // Drift the camera back a little
    for _ in 0..30 {
        session.frame(&[KeyCode::KeyS], false, Vec3::ZERO);
    }

    // Walls, one of them aimed into the no-build zone
    session.frame(&[KeyCode::Digit1], false, Vec3::new(2.0, 0.0, 2.0));
    session.frame(&[KeyCode::KeyE], true, Vec3::new(2.2, 0.0, 1.9));
    session.frame(&[], true, Vec3::new(6.0, 0.0, 0.3));
    session.frame(&[], true, Vec3::new(-1.1, 0.0, 2.1));

    // A raised pillar
    session.frame(&[KeyCode::Digit2], false, Vec3::new(-3.0, 0.0, 2.0));
    session.frame(&[KeyCode::Equal], true, Vec3::new(-3.0, 0.0, 2.0));

    // Three floor tiles in an L
    session.frame(&[KeyCode::Digit3], false, Vec3::new(0.0, 0.0, -3.0));
    for target in [
        Vec3::new(0.1, 0.0, -3.1),
        Vec3::new(1.1, 0.0, -3.1),
        Vec3::new(0.1, 0.0, -4.1),
    ] {
        session.frame(&[], true, target);
    }

    // Pick the first wall up and put it somewhere else
    session.frame(&[KeyCode::Digit0], false, Vec3::new(2.0, 0.0, 2.0));
    session.frame(&[], true, Vec3::new(2.0, 0.0, 2.0));
    session.frame(&[KeyCode::KeyQ], true, Vec3::new(-2.2, 0.0, -1.1));

    // Paint one tile straight from the pointer
    let ray = session.pointer_ray(Vec3::new(4.0, 0.0, -4.0));
    let scene = &mut session.scene;
    if !scene.floor.paint(&scene.physics, &ray, config.placement.max_ray_distance) {
        log::warn!("Paint ray missed the floor");
    }

    session.toggle.toggle(&mut session.controller, &mut session.scene);

    for (entity, placed) in session.scene.registry.placed_objects() {
        log::debug!("{:?}: {:?} at {}", entity, placed.placeable, placed.pose.position);
    }
    let zones = session
        .scene
        .registry
        .world()
        .query::<(&NoBuildZone, &Renderable)>()
        .iter()
        .filter(|(_, (_, look))| look.state == VisualState::NoBuildZone)
        .count();
    log::debug!("{} no-build zones shown", zones);

    let floor = &session.scene.floor;
    log::info!(
        "Session done: {} objects, {} floor tiles ({} vertices, {} triangles, {} boundary edges), money {}",
        session.scene.registry.placed_count(),
        floor.tile_count(),
        floor.merged().vertex_count(),
        floor.merged().triangle_count(),
        floor.boundary().len(),
        session.wallet.display()
    );
}
