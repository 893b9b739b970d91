//! Input state tracking
//!
//! Keys and mouse buttons are tracked with "just pressed" sets so that build
//! actions (rotate, raise, place) fire once per press instead of once per frame.

use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::core::types::Vec2;

/// Tracks keyboard and mouse input state
pub struct InputState {
    /// Currently pressed keys
    keys_pressed: HashSet<KeyCode>,
    /// Keys pressed this frame
    keys_just_pressed: HashSet<KeyCode>,
    /// Keys released this frame
    keys_just_released: HashSet<KeyCode>,
    /// Currently pressed mouse buttons
    mouse_buttons: HashSet<MouseButton>,
    /// Mouse buttons pressed this frame
    mouse_just_pressed: HashSet<MouseButton>,
    /// Mouse movement delta since last frame
    mouse_delta: Vec2,
    /// Current cursor position in window pixels
    mouse_position: Vec2,
}

impl InputState {
    /// Create new input state
    pub fn new() -> Self {
        Self {
            keys_pressed: HashSet::new(),
            keys_just_pressed: HashSet::new(),
            keys_just_released: HashSet::new(),
            mouse_buttons: HashSet::new(),
            mouse_just_pressed: HashSet::new(),
            mouse_delta: Vec2::ZERO,
            mouse_position: Vec2::ZERO,
        }
    }

    /// Process a window event
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event: KeyEvent {
                    physical_key: PhysicalKey::Code(key_code),
                    state,
                    ..
                },
                ..
            } => match state {
                ElementState::Pressed => self.press_key(*key_code),
                ElementState::Released => self.release_key(*key_code),
            },
            WindowEvent::CursorMoved { position, .. } => {
                self.move_cursor(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::MouseInput { state, button, .. } => match state {
                ElementState::Pressed => self.press_mouse(*button),
                ElementState::Released => self.release_mouse(*button),
            },
            _ => {}
        }
    }

    /// Register a key press. Key repeat does not re-trigger "just pressed".
    pub fn press_key(&mut self, key: KeyCode) {
        if self.keys_pressed.insert(key) {
            self.keys_just_pressed.insert(key);
        }
    }

    /// Register a key release
    pub fn release_key(&mut self, key: KeyCode) {
        self.keys_pressed.remove(&key);
        self.keys_just_released.insert(key);
    }

    /// Register a mouse button press
    pub fn press_mouse(&mut self, button: MouseButton) {
        if self.mouse_buttons.insert(button) {
            self.mouse_just_pressed.insert(button);
        }
    }

    /// Register a mouse button release
    pub fn release_mouse(&mut self, button: MouseButton) {
        self.mouse_buttons.remove(&button);
    }

    /// Move the cursor to an absolute window position
    pub fn move_cursor(&mut self, position: Vec2) {
        self.mouse_delta += position - self.mouse_position;
        self.mouse_position = position;
    }

    /// Process raw mouse motion (used while the cursor is locked)
    pub fn process_mouse_motion(&mut self, delta: (f64, f64)) {
        self.mouse_delta += Vec2::new(delta.0 as f32, delta.1 as f32);
    }

    /// Call at end of frame to reset per-frame state
    pub fn end_frame(&mut self) {
        self.keys_just_pressed.clear();
        self.keys_just_released.clear();
        self.mouse_just_pressed.clear();
        self.mouse_delta = Vec2::ZERO;
    }

    /// Check if key is currently pressed
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if key was just pressed this frame
    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.keys_just_pressed.contains(&key)
    }

    /// Check if key was just released this frame
    pub fn is_key_just_released(&self, key: KeyCode) -> bool {
        self.keys_just_released.contains(&key)
    }

    /// Check if mouse button is pressed
    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons.contains(&button)
    }

    /// Check if mouse button was just pressed this frame
    pub fn is_mouse_button_just_pressed(&self, button: MouseButton) -> bool {
        self.mouse_just_pressed.contains(&button)
    }

    /// Get mouse delta since last frame
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// Get current mouse position
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
