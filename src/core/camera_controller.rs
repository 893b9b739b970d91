//! Free-fly build camera controller

use crate::config::BuildCamConfig;
use crate::core::camera::Camera;
use crate::core::input::InputState;
use crate::core::types::Vec3;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Pitch limit in radians (straight up / straight down)
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2;

/// Build-mode camera: hold the right mouse button to look around, WASD to fly,
/// Shift/Ctrl to rise and sink.
pub struct BuildCamController {
    /// Horizontal movement speed in units per second
    pub move_speed: f32,
    /// Vertical (Shift/Ctrl) speed in units per second
    pub vertical_speed: f32,
    /// Degrees of rotation per pixel of mouse movement
    pub look_speed: f32,
    /// Current yaw (rotation around Y axis) in radians
    yaw: f32,
    /// Current pitch (rotation around X axis) in radians
    pitch: f32,
    /// Whether the right mouse button is held this frame
    panning: bool,
}

impl BuildCamController {
    /// Create new controller
    pub fn new(config: &BuildCamConfig) -> Self {
        Self {
            move_speed: config.move_speed,
            vertical_speed: config.vertical_speed,
            look_speed: config.look_speed,
            yaw: 0.0,
            pitch: 0.0,
            panning: false,
        }
    }

    /// Update camera based on input
    pub fn update(&mut self, camera: &mut Camera, input: &InputState, dt: f32) {
        self.panning = input.is_mouse_button_pressed(MouseButton::Right);

        if self.panning {
            let delta = input.mouse_delta();
            // Screen Y grows downward; moving the mouse up looks up
            self.yaw -= (delta.x * self.look_speed).to_radians();
            self.pitch -= (delta.y * self.look_speed).to_radians();
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);

            camera.set_rotation_euler(self.yaw, self.pitch);
        }

        let mut planar = Vec3::ZERO;
        if input.is_key_pressed(KeyCode::KeyW) {
            planar += camera.forward();
        }
        if input.is_key_pressed(KeyCode::KeyS) {
            planar -= camera.forward();
        }
        if input.is_key_pressed(KeyCode::KeyD) {
            planar += camera.right();
        }
        if input.is_key_pressed(KeyCode::KeyA) {
            planar -= camera.right();
        }

        let mut vertical = 0.0;
        if input.is_key_pressed(KeyCode::ShiftLeft) || input.is_key_pressed(KeyCode::ShiftRight) {
            vertical += 1.0;
        }
        if input.is_key_pressed(KeyCode::ControlLeft) || input.is_key_pressed(KeyCode::ControlRight) {
            vertical -= 1.0;
        }

        camera.position += planar * self.move_speed * dt
            + camera.up() * vertical * self.vertical_speed * dt;
    }

    /// Whether the camera is being rotated (cursor should be locked)
    pub fn is_panning(&self) -> bool {
        self.panning
    }

    /// Set initial orientation from angles (in radians)
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Get current yaw
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Get current pitch
    pub fn pitch(&self) -> f32 {
        self.pitch
    }
}

impl Default for BuildCamController {
    fn default() -> Self {
        Self::new(&BuildCamConfig::default())
    }
}
