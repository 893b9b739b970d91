//! Indexed triangle mesh storage

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::core::Error;
use crate::core::types::{Mat4, Result, Vec3};
use crate::math::Aabb;

/// Interleaved vertex layout for GPU upload
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Vertex positions, per-vertex normals and triangle index triples.
///
/// Every triangle index refers to a vertex of this buffer; constructors
/// enforce that.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MeshData", into = "MeshData")]
pub struct MeshBuffer {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
}

impl MeshBuffer {
    /// Build a mesh, validating indices and computing normals.
    pub fn new(positions: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Result<Self> {
        let vertex_count = positions.len();
        if let Some((i, tri)) = triangles
            .iter()
            .enumerate()
            .find(|(_, tri)| tri.iter().any(|&idx| idx as usize >= vertex_count))
        {
            return Err(Error::Mesh(format!(
                "triangle {} {:?} references a vertex outside 0..{}",
                i, tri, vertex_count
            )));
        }

        Ok(Self::from_parts_unchecked(positions, triangles))
    }

    /// Build a mesh whose indices are already known to be in range.
    pub(crate) fn from_parts_unchecked(positions: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Self {
        let normals = compute_normals(&positions, &triangles);
        Self {
            positions,
            normals,
            triangles,
        }
    }

    /// Flat square tile in the XZ plane centered on the origin, facing +Y.
    pub fn quad(size: f32) -> Self {
        let h = size * 0.5;
        let positions = vec![
            Vec3::new(-h, 0.0, -h),
            Vec3::new(h, 0.0, -h),
            Vec3::new(h, 0.0, h),
            Vec3::new(-h, 0.0, h),
        ];
        // Counter-clockwise seen from above
        Self::from_parts_unchecked(positions, vec![[0, 2, 1], [0, 3, 2]])
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Copy of this mesh with every vertex transformed by `matrix`.
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        let positions = self
            .positions
            .iter()
            .map(|&p| matrix.transform_point3(p))
            .collect();
        Self::from_parts_unchecked(positions, self.triangles.clone())
    }

    /// Bounding box of all vertices, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<Aabb> {
        let (first, rest) = self.positions.split_first()?;
        let mut aabb = Aabb::new(*first, *first);
        for &p in rest {
            aabb.expand(p);
        }
        Some(aabb)
    }

    /// Interleaved position/normal vertices for upload.
    pub fn vertex_data(&self) -> Vec<MeshVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .map(|(p, n)| MeshVertex {
                position: p.to_array(),
                normal: n.to_array(),
            })
            .collect()
    }

    /// Flat `u32` index list (three per triangle) for upload.
    pub fn index_data(&self) -> &[u32] {
        bytemuck::cast_slice(&self.triangles)
    }
}

/// Serialized form: normals are derived, so only geometry is stored.
#[derive(Serialize, Deserialize)]
struct MeshData {
    positions: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
}

impl TryFrom<MeshData> for MeshBuffer {
    type Error = Error;

    fn try_from(data: MeshData) -> Result<Self> {
        MeshBuffer::new(data.positions, data.triangles)
    }
}

impl From<MeshBuffer> for MeshData {
    fn from(mesh: MeshBuffer) -> Self {
        MeshData {
            positions: mesh.positions,
            triangles: mesh.triangles,
        }
    }
}

/// Area-weighted vertex normals. Vertices not used by any triangle, or only by
/// zero-area triangles, get a zero normal.
pub fn compute_normals(positions: &[Vec3], triangles: &[[u32; 3]]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];

    for &[a, b, c] in triangles {
        let (pa, pb, pc) = (
            positions[a as usize],
            positions[b as usize],
            positions[c as usize],
        );
        // Unnormalized cross product: length is twice the triangle area
        let face = (pb - pa).cross(pc - pa);
        normals[a as usize] += face;
        normals[b as usize] += face;
        normals[c as usize] += face;
    }

    for n in &mut normals {
        *n = n.normalize_or_zero();
    }
    normals
}
