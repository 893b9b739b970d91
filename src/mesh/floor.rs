//! Floor painter: keeps every painted tile and derives one merged floor mesh.
//!
//! Each addition re-welds all accumulated tiles from scratch, then removes
//! duplicate triangles and recomputes the outline. The cost grows with the
//! total number of tiles on every addition, which is fine for one playfield's
//! worth of floor; a union-find based incremental weld would be needed for
//! much larger maps.

use std::collections::BTreeSet;

use crate::collision::{LayerMask, PhysicsWorld};
use crate::config::FloorConfig;
use crate::core::types::{Mat4, Vec3};
use crate::math::Ray;

use super::boundary::{boundary_edges, EdgeKey};
use super::buffer::MeshBuffer;
use super::dedupe::{dedupe, drop_degenerate};
use super::weld::weld;

/// Accumulates world-space tile meshes and maintains the merged floor.
pub struct FloorPainter {
    config: FloorConfig,
    /// Tile used by `paint`
    tile: MeshBuffer,
    /// World-space tile meshes in the order they were added
    tiles: Vec<MeshBuffer>,
    merged: MeshBuffer,
    boundary: BTreeSet<EdgeKey>,
}

impl FloorPainter {
    pub fn new(config: FloorConfig) -> Self {
        let tile = MeshBuffer::quad(config.tile_size);
        Self {
            config,
            tile,
            tiles: Vec::new(),
            merged: MeshBuffer::default(),
            boundary: BTreeSet::new(),
        }
    }

    /// Add a tile mesh placed with `transform` and rebuild the merged floor.
    pub fn add_tile(&mut self, mesh: &MeshBuffer, transform: &Mat4) {
        self.tiles.push(mesh.transformed(transform));
        self.rebuild();
    }

    /// Paint a tile where `ray` hits the floor. Returns whether a tile was added.
    pub fn paint<P: PhysicsWorld + ?Sized>(&mut self, physics: &P, ray: &Ray, max_distance: f32) -> bool {
        let Some(hit) = physics.raycast(ray, max_distance, LayerMask::FLOOR) else {
            return false;
        };

        let position = hit.point + Vec3::Y * self.config.hover_height;
        let tile = self.tile.clone();
        self.add_tile(&tile, &Mat4::from_translation(position));
        true
    }

    /// Drop all tiles
    pub fn clear(&mut self) {
        self.tiles.clear();
        self.merged = MeshBuffer::default();
        self.boundary.clear();
    }

    fn rebuild(&mut self) {
        let welded = weld(&self.tiles, self.config.weld_threshold);
        let mut merged = dedupe(&welded.mesh);
        if self.config.drop_degenerate_triangles {
            merged = drop_degenerate(&merged);
        }

        self.boundary = boundary_edges(&merged);
        self.merged = merged;

        log::debug!(
            "Floor rebuilt: {} tiles, {} vertices, {} triangles, {} boundary edges",
            self.tiles.len(),
            self.merged.vertex_count(),
            self.merged.triangle_count(),
            self.boundary.len()
        );
    }

    /// The welded, deduplicated floor mesh
    pub fn merged(&self) -> &MeshBuffer {
        &self.merged
    }

    /// Open outline edges of the merged floor
    pub fn boundary(&self) -> &BTreeSet<EdgeKey> {
        &self.boundary
    }

    /// Boundary edges as world-space line segments for overlay drawing
    pub fn boundary_segments(&self) -> Vec<(Vec3, Vec3)> {
        let positions = self.merged.positions();
        self.boundary
            .iter()
            .map(|edge| (positions[edge.a() as usize], positions[edge.b() as usize]))
            .collect()
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }
}
