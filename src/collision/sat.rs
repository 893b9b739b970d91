//! Exact penetration tests between posed shapes.
//!
//! Boxes use the separating axis theorem over the 15 candidate axes (3 face
//! normals of each box plus the 9 edge cross products). The returned
//! direction is the one along which the first shape has to move to separate,
//! and depth is the distance to move. Overlaps no deeper than
//! `CONTACT_EPSILON` count as touching, so tiles placed exactly edge to edge
//! with a zone do not penetrate it.

use serde::{Deserialize, Serialize};

use crate::core::types::Vec3;
use crate::math::Pose;

use super::shape::ColliderShape;

/// Overlaps at or below this depth are treated as touching
pub const CONTACT_EPSILON: f32 = 1e-4;

/// Minimum translation that separates two shapes
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Penetration {
    /// Unit direction to move the first shape along
    pub direction: Vec3,
    pub depth: f32,
}

/// Penetration of shape `a` at `pose_a` into shape `b` at `pose_b`, if any.
pub fn compute_penetration(
    a: &ColliderShape,
    pose_a: &Pose,
    b: &ColliderShape,
    pose_b: &Pose,
) -> Option<Penetration> {
    match (*a, *b) {
        (ColliderShape::Cuboid { half_extents: ha }, ColliderShape::Cuboid { half_extents: hb }) => {
            box_box(&Obb::new(pose_a, ha), &Obb::new(pose_b, hb))
        }
        (ColliderShape::Sphere { radius: ra }, ColliderShape::Sphere { radius: rb }) => {
            sphere_sphere(pose_a.position, ra, pose_b.position, rb)
        }
        (ColliderShape::Sphere { radius }, ColliderShape::Cuboid { half_extents }) => {
            sphere_box(pose_a.position, radius, &Obb::new(pose_b, half_extents))
        }
        (ColliderShape::Cuboid { half_extents }, ColliderShape::Sphere { radius }) => {
            sphere_box(pose_b.position, radius, &Obb::new(pose_a, half_extents)).map(|p| Penetration {
                direction: -p.direction,
                depth: p.depth,
            })
        }
    }
}

/// Oriented box in world space
struct Obb {
    center: Vec3,
    axes: [Vec3; 3],
    half: [f32; 3],
}

impl Obb {
    fn new(pose: &Pose, half_extents: Vec3) -> Self {
        Self {
            center: pose.position,
            axes: pose.axes(),
            half: half_extents.to_array(),
        }
    }

    /// Half the length of the box's projection onto a unit axis
    fn projected_radius(&self, axis: Vec3) -> f32 {
        (0..3).map(|i| axis.dot(self.axes[i]).abs() * self.half[i]).sum()
    }

    fn to_local(&self, p: Vec3) -> Vec3 {
        let d = p - self.center;
        Vec3::new(d.dot(self.axes[0]), d.dot(self.axes[1]), d.dot(self.axes[2]))
    }

    fn to_world_dir(&self, v: Vec3) -> Vec3 {
        self.axes[0] * v.x + self.axes[1] * v.y + self.axes[2] * v.z
    }
}

fn box_box(a: &Obb, b: &Obb) -> Option<Penetration> {
    let d = b.center - a.center;

    let mut axes: Vec<Vec3> = Vec::with_capacity(15);
    axes.extend_from_slice(&a.axes);
    axes.extend_from_slice(&b.axes);
    for ea in a.axes {
        for eb in b.axes {
            axes.push(ea.cross(eb));
        }
    }

    let mut best: Option<Penetration> = None;
    for axis in axes {
        // Parallel edges give a zero cross product; the face axes cover them
        let Some(axis) = axis.try_normalize() else {
            continue;
        };

        let distance = d.dot(axis);
        let overlap = a.projected_radius(axis) + b.projected_radius(axis) - distance.abs();
        if overlap <= CONTACT_EPSILON {
            return None;
        }

        if best.is_none_or(|p| overlap < p.depth) {
            // b lies on the positive side: push a the other way
            let direction = if distance > 0.0 { -axis } else { axis };
            best = Some(Penetration { direction, depth: overlap });
        }
    }
    best
}

fn sphere_sphere(ca: Vec3, ra: f32, cb: Vec3, rb: f32) -> Option<Penetration> {
    let offset = ca - cb;
    let distance = offset.length();
    let depth = ra + rb - distance;
    if depth <= CONTACT_EPSILON {
        return None;
    }

    Some(Penetration {
        direction: offset.try_normalize().unwrap_or(Vec3::Y),
        depth,
    })
}

/// Sphere against box; the direction moves the sphere out of the box.
fn sphere_box(center: Vec3, radius: f32, obb: &Obb) -> Option<Penetration> {
    let local = obb.to_local(center);
    let half = Vec3::from_array(obb.half);
    let clamped = local.clamp(-half, half);
    let outside = local - clamped;

    if outside.length_squared() > 0.0 {
        let distance = outside.length();
        let depth = radius - distance;
        if depth <= CONTACT_EPSILON {
            return None;
        }
        return Some(Penetration {
            direction: obb.to_world_dir(outside / distance),
            depth,
        });
    }

    // Center inside the box: exit through the nearest face
    let to_face = half - local.abs();
    let axis = if to_face.x <= to_face.y && to_face.x <= to_face.z {
        0
    } else if to_face.y <= to_face.z {
        1
    } else {
        2
    };
    let mut normal = Vec3::ZERO;
    normal[axis] = if local[axis] >= 0.0 { 1.0 } else { -1.0 };

    Some(Penetration {
        direction: obb.to_world_dir(normal),
        depth: to_face[axis] + radius,
    })
}
