//! Grid-snapped placement of catalog objects

pub mod catalog;
pub mod controller;
pub mod grid;
pub mod input;

pub use catalog::{PlaceableCatalog, PlaceableDef, PlaceableId, PlaceableKind};
pub use controller::{PlacementController, PlacementEvent, PlacementMode};
pub use grid::{adjust_height, snap, GridPosition, RotationStep};
pub use input::FrameInput;
