//! Floor mesh merging: welding, duplicate removal and boundary extraction

pub mod buffer;
pub mod weld;
pub mod dedupe;
pub mod boundary;
pub mod floor;

pub use buffer::{MeshBuffer, MeshVertex};
pub use weld::{weld, WeldedMesh};
pub use dedupe::{dedupe, drop_degenerate};
pub use boundary::{boundary_edges, EdgeKey};
pub use floor::FloorPainter;
