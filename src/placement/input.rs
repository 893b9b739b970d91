//! Per-tick placement actions

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use crate::core::input::InputState;
use crate::math::Ray;

/// Digit keys mapped to catalog slots 0..=9
const SELECT_KEYS: [KeyCode; 10] = [
    KeyCode::Digit0,
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// Placement actions for one tick. Every flag is edge-triggered.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// World ray under the pointer
    pub pointer_ray: Option<Ray>,
    /// Pointer is over a UI surface; no picking or placement this tick
    pub pointer_over_ui: bool,
    pub commit: bool,
    pub cancel: bool,
    pub rotate_cw: bool,
    pub rotate_ccw: bool,
    pub raise: bool,
    pub lower: bool,
    /// Catalog slot chosen this tick
    pub select: Option<usize>,
}

impl FrameInput {
    /// Map raw input to actions: left click commits, Escape cancels, E/Q
    /// rotate, =/- raise and lower, digits select a slot.
    pub fn from_input(input: &InputState, pointer_ray: Option<Ray>, pointer_over_ui: bool) -> Self {
        Self {
            pointer_ray,
            pointer_over_ui,
            commit: input.is_mouse_button_just_pressed(MouseButton::Left),
            cancel: input.is_key_just_pressed(KeyCode::Escape),
            rotate_cw: input.is_key_just_pressed(KeyCode::KeyE),
            rotate_ccw: input.is_key_just_pressed(KeyCode::KeyQ),
            raise: input.is_key_just_pressed(KeyCode::Equal),
            lower: input.is_key_just_pressed(KeyCode::Minus),
            select: SELECT_KEYS.iter().position(|&key| input.is_key_just_pressed(key)),
        }
    }

    /// Input with only a pointer ray
    pub fn pointing(ray: Ray) -> Self {
        Self {
            pointer_ray: Some(ray),
            ..Self::default()
        }
    }
}
