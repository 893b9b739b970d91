//! Duplicate and degenerate triangle removal

use std::collections::HashSet;

use super::buffer::MeshBuffer;

/// Remove triangles that reuse an already seen vertex triple in any order.
///
/// The first occurrence survives with its original winding, and survivors keep
/// their relative order. Vertices are left untouched; normals are recomputed.
pub fn dedupe(mesh: &MeshBuffer) -> MeshBuffer {
    let mut seen: HashSet<[u32; 3]> = HashSet::with_capacity(mesh.triangle_count());

    let triangles: Vec<[u32; 3]> = mesh
        .triangles()
        .iter()
        .filter(|tri| {
            let mut key = **tri;
            key.sort_unstable();
            seen.insert(key)
        })
        .copied()
        .collect();

    let removed = mesh.triangle_count() - triangles.len();
    if removed > 0 {
        log::trace!("Removed {} duplicate triangles", removed);
    }

    MeshBuffer::from_parts_unchecked(mesh.positions().to_vec(), triangles)
}

/// Remove triangles that repeat a vertex index or have zero area.
///
/// Welding can collapse small triangles; merged floor meshes keep them unless
/// the floor is configured to drop them.
pub fn drop_degenerate(mesh: &MeshBuffer) -> MeshBuffer {
    let positions = mesh.positions();

    let triangles: Vec<[u32; 3]> = mesh
        .triangles()
        .iter()
        .filter(|&&[a, b, c]| {
            if a == b || b == c || a == c {
                return false;
            }
            let (pa, pb, pc) = (
                positions[a as usize],
                positions[b as usize],
                positions[c as usize],
            );
            (pb - pa).cross(pc - pa).length_squared() > f32::EPSILON * f32::EPSILON
        })
        .copied()
        .collect();

    MeshBuffer::from_parts_unchecked(positions.to_vec(), triangles)
}
