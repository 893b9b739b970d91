//! Grid snapping and rotation steps

use std::f32::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use crate::core::types::{Quat, Vec3};

/// A point on the placement lattice plus a free vertical offset
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GridPosition {
    pub snapped: Vec3,
    pub height_offset: f32,
}

impl GridPosition {
    /// World-space position
    pub fn world(&self) -> Vec3 {
        self.snapped + Vec3::Y * self.height_offset
    }
}

/// Quantize each axis of `point` to the nearest multiple of `grid_size`.
///
/// Ties round half to even, so 0.25 on a 0.5 grid lands on 0.0 and 0.75 on
/// 1.0. A non-positive or non-finite grid leaves the point as is.
pub fn snap(point: Vec3, grid_size: f32) -> GridPosition {
    if !(grid_size > 0.0 && grid_size.is_finite()) {
        log::debug!("Grid size {} cannot snap, using raw point", grid_size);
        return GridPosition {
            snapped: point,
            height_offset: 0.0,
        };
    }

    let round = |v: f32| (v / grid_size).round_ties_even() * grid_size;
    GridPosition {
        snapped: Vec3::new(round(point.x), round(point.y), round(point.z)),
        height_offset: 0.0,
    }
}

/// Add `offset` to the vertical offset only.
pub fn adjust_height(position: GridPosition, offset: f32) -> GridPosition {
    GridPosition {
        height_offset: position.height_offset + offset,
        ..position
    }
}

/// Quarter turns, always in `0..4`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RotationStep(u8);

impl RotationStep {
    pub const STEPS: u8 = 4;

    pub fn new(step: u8) -> Self {
        Self(step % Self::STEPS)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn increment(self) -> Self {
        Self((self.0 + 1) % Self::STEPS)
    }

    pub fn decrement(self) -> Self {
        Self((self.0 + Self::STEPS - 1) % Self::STEPS)
    }

    pub fn radians(self) -> f32 {
        self.0 as f32 * FRAC_PI_2
    }

    /// Quarter turns about the vertical (Y) axis.
    pub fn to_quat(self) -> Quat {
        Quat::from_rotation_y(self.radians())
    }
}
