//! Vertex welding across one or more meshes.
//!
//! Input vertices are visited in the order their buffers are concatenated.
//! Each one maps to the earliest accepted output vertex whose squared distance
//! is below `threshold²`; otherwise it becomes a new output vertex. That is the
//! contract of a plain O(n²) scan over accepted vertices. Here the scan is
//! narrowed with a hash grid of cell size `threshold`: any vertex closer than
//! `threshold` lies in one of the 27 cells around the query, and picking the
//! smallest matching output index keeps the earliest-inserted tie-break.
//!
//! Welding is always done from scratch; callers that grow a mesh re-weld the
//! full set of inputs.

use std::collections::HashMap;

use crate::core::types::Vec3;
use super::buffer::MeshBuffer;

/// Result of welding: the merged mesh and where each input vertex went.
#[derive(Clone, Debug, Default)]
pub struct WeldedMesh {
    pub mesh: MeshBuffer,
    /// `remap[i]` is the output vertex of the i-th input vertex, counting
    /// across all input buffers in order.
    pub remap: Vec<u32>,
}

/// Merge vertices closer than `threshold` and remap triangle indices.
///
/// Degenerate triangles produced by the merge are kept. A non-positive or
/// non-finite threshold disables merging.
pub fn weld(buffers: &[MeshBuffer], threshold: f32) -> WeldedMesh {
    let total_vertices: usize = buffers.iter().map(MeshBuffer::vertex_count).sum();
    let total_triangles: usize = buffers.iter().map(MeshBuffer::triangle_count).sum();

    let mut grid = WeldGrid::new(threshold);
    let mut positions: Vec<Vec3> = Vec::with_capacity(total_vertices);
    let mut remap: Vec<u32> = Vec::with_capacity(total_vertices);
    let mut triangles: Vec<[u32; 3]> = Vec::with_capacity(total_triangles);

    for buffer in buffers {
        let base = remap.len();

        for &p in buffer.positions() {
            let index = match grid.find(p, &positions) {
                Some(existing) => existing,
                None => {
                    let index = positions.len() as u32;
                    positions.push(p);
                    grid.insert(p, index);
                    index
                }
            };
            remap.push(index);
        }

        triangles.extend(buffer.triangles().iter().map(|tri| {
            [
                remap[base + tri[0] as usize],
                remap[base + tri[1] as usize],
                remap[base + tri[2] as usize],
            ]
        }));
    }

    log::trace!(
        "Welded {} vertices into {} (threshold {})",
        total_vertices,
        positions.len(),
        threshold
    );

    WeldedMesh {
        mesh: MeshBuffer::from_parts_unchecked(positions, triangles),
        remap,
    }
}

/// Hash grid over accepted output vertices.
struct WeldGrid {
    /// `None` when merging is disabled
    threshold: Option<f32>,
    cells: HashMap<(i64, i64, i64), Vec<u32>>,
}

impl WeldGrid {
    fn new(threshold: f32) -> Self {
        let threshold = (threshold.is_finite() && threshold > 0.0).then_some(threshold);
        Self {
            threshold,
            cells: HashMap::new(),
        }
    }

    /// Cell coordinates saturate for points far outside the grid's range.
    fn cell_of(p: Vec3, cell_size: f32) -> (i64, i64, i64) {
        let c = (p / cell_size).floor();
        (c.x as i64, c.y as i64, c.z as i64)
    }

    /// Smallest accepted index within the threshold of `p`, if any.
    fn find(&self, p: Vec3, accepted: &[Vec3]) -> Option<u32> {
        let threshold = self.threshold?;
        let threshold_sq = threshold * threshold;
        let (cx, cy, cz) = Self::cell_of(p, threshold);

        let mut best: Option<u32> = None;
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let cell = (cx.saturating_add(dx), cy.saturating_add(dy), cz.saturating_add(dz));
                    let Some(indices) = self.cells.get(&cell) else {
                        continue;
                    };
                    for &idx in indices {
                        if best.is_some_and(|b| b <= idx) {
                            // Cell lists are in insertion order
                            break;
                        }
                        if (accepted[idx as usize] - p).length_squared() < threshold_sq {
                            best = Some(idx);
                            break;
                        }
                    }
                }
            }
        }
        best
    }

    fn insert(&mut self, p: Vec3, index: u32) {
        if let Some(threshold) = self.threshold {
            self.cells
                .entry(Self::cell_of(p, threshold))
                .or_default()
                .push(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Mat4;

    /// Direct O(n²) scan: the behavior `weld` must reproduce.
    fn weld_linear(positions: &[Vec3], threshold: f32) -> (Vec<Vec3>, Vec<u32>) {
        let mut out: Vec<Vec3> = Vec::new();
        let mut remap = Vec::new();
        for &p in positions {
            match out.iter().position(|&q| (p - q).length_squared() < threshold * threshold) {
                Some(j) => remap.push(j as u32),
                None => {
                    remap.push(out.len() as u32);
                    out.push(p);
                }
            }
        }
        (out, remap)
    }

    fn quad_at(x: f32, z: f32) -> MeshBuffer {
        MeshBuffer::quad(1.0).transformed(&Mat4::from_translation(Vec3::new(x, 0.0, z)))
    }

    #[test]
    fn test_shared_edge_vertices_merge() {
        let welded = weld(&[quad_at(0.0, 0.0), quad_at(1.0, 0.0)], 0.01);

        assert_eq!(welded.mesh.vertex_count(), 6);
        assert_eq!(welded.mesh.triangle_count(), 4);
        // Second quad's left corners (-0.5+1, ±0.5) reuse the first quad's right corners
        assert_eq!(welded.remap[4], welded.remap[1]);
        assert_eq!(welded.remap[7], welded.remap[2]);
    }

    #[test]
    fn test_close_vertices_merge_and_far_vertices_stay() {
        let mesh = MeshBuffer::new(
            vec![
                Vec3::ZERO,
                Vec3::new(0.005, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
            ],
            vec![[0, 3, 2], [1, 3, 2]],
        )
        .expect("valid mesh");

        let welded = weld(&[mesh], 0.01);

        assert_eq!(welded.remap, vec![0, 0, 1, 2]);
        assert_eq!(welded.mesh.vertex_count(), 3);
        // Both triangles now reference the same vertices
        assert_eq!(welded.mesh.triangles(), &[[0, 2, 1], [0, 2, 1]]);
    }

    #[test]
    fn test_earliest_vertex_wins_tie_break() {
        // b is within threshold of both a and c; a was accepted first
        let a = Vec3::new(0.0, 0.0, 0.0);
        let c = Vec3::new(0.018, 0.0, 0.0);
        let b = Vec3::new(0.009, 0.0, 0.0);
        let mesh = MeshBuffer::new(vec![a, c, b], vec![[0, 1, 2]]).expect("valid mesh");

        let welded = weld(&[mesh], 0.01);

        assert_eq!(welded.remap, vec![0, 1, 0]);
    }

    #[test]
    fn test_threshold_is_strict() {
        let mesh = MeshBuffer::new(
            vec![Vec3::ZERO, Vec3::new(0.5, 0.0, 0.0), Vec3::Z],
            vec![[0, 2, 1]],
        )
        .expect("valid mesh");

        let welded = weld(&[mesh], 0.5);
        assert_eq!(welded.mesh.vertex_count(), 3);
    }

    #[test]
    fn test_zero_threshold_disables_merging() {
        let welded = weld(&[quad_at(0.0, 0.0), quad_at(0.0, 0.0)], 0.0);
        assert_eq!(welded.mesh.vertex_count(), 8);
    }

    #[test]
    fn test_degenerate_triangles_are_kept() {
        let mesh = MeshBuffer::new(
            vec![Vec3::ZERO, Vec3::new(0.001, 0.0, 0.0), Vec3::new(0.0, 0.0, 0.002)],
            vec![[0, 1, 2]],
        )
        .expect("valid mesh");

        let welded = weld(&[mesh], 0.01);

        assert_eq!(welded.mesh.triangles(), &[[0, 0, 0]]);
    }

    #[test]
    fn test_matches_linear_scan_on_jittered_grid() {
        // Deterministic jitter spanning cell boundaries
        let mut positions = Vec::new();
        for i in 0..400u32 {
            let h = i.wrapping_mul(2_654_435_761);
            let jitter = |shift: u32| ((h >> shift) & 0xff) as f32 / 255.0 * 0.03 - 0.015;
            let x = (i % 7) as f32 * 0.05 + jitter(0);
            let y = ((i / 7) % 3) as f32 * 0.05 + jitter(8);
            let z = (i / 21) as f32 * 0.02 + jitter(16);
            positions.push(Vec3::new(x, y, z));
        }
        let triangles: Vec<[u32; 3]> = (0..positions.len() as u32 / 3)
            .map(|t| [t * 3, t * 3 + 1, t * 3 + 2])
            .collect();
        let mesh = MeshBuffer::new(positions.clone(), triangles).expect("valid mesh");

        let threshold = 0.02;
        let welded = weld(&[mesh], threshold);
        let (expected_positions, expected_remap) = weld_linear(&positions, threshold);

        assert_eq!(welded.remap, expected_remap);
        assert_eq!(welded.mesh.positions(), expected_positions.as_slice());
    }

    #[test]
    fn test_tiny_threshold_saturates_cells() {
        let mesh = MeshBuffer::new(
            vec![
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(2.0, 0.0, 0.0),
                Vec3::new(-1.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
            ],
            vec![[0, 1, 2], [1, 2, 3]],
        )
        .expect("valid mesh");

        let welded = weld(&[mesh], 1e-20);

        assert_eq!(welded.remap, vec![0, 1, 2, 0]);
        assert_eq!(welded.mesh.vertex_count(), 3);
    }

    #[test]
    fn test_normals_recomputed_after_weld() {
        let welded = weld(&[quad_at(0.0, 0.0), quad_at(1.0, 0.0)], 0.01);
        for n in welded.mesh.normals() {
            assert!((*n - Vec3::Y).length() < 0.0001);
        }
    }
}
