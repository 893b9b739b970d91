//! Open boundary edges of a triangle mesh

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use super::buffer::MeshBuffer;

/// Undirected edge between two vertices, stored with the smaller index first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeKey(u32, u32);

impl EdgeKey {
    pub fn new(a: u32, b: u32) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }

    pub fn a(&self) -> u32 {
        self.0
    }

    pub fn b(&self) -> u32 {
        self.1
    }
}

/// Edges referenced by exactly one triangle.
pub fn boundary_edges(mesh: &MeshBuffer) -> BTreeSet<EdgeKey> {
    let mut counts: HashMap<EdgeKey, u32> = HashMap::with_capacity(mesh.triangle_count() * 3);

    for &[a, b, c] in mesh.triangles() {
        for edge in [EdgeKey::new(a, b), EdgeKey::new(b, c), EdgeKey::new(c, a)] {
            *counts.entry(edge).or_insert(0) += 1;
        }
    }

    counts
        .into_iter()
        .filter(|&(_, count)| count == 1)
        .map(|(edge, _)| edge)
        .collect()
}
