//! Placeable types offered to the player

use serde::{Deserialize, Serialize};

use crate::collision::ColliderShape;
use crate::core::types::Quat;
use crate::mesh::MeshBuffer;

/// Catalog index. 0 is reserved for "nothing selected".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlaceableId(pub usize);

impl PlaceableId {
    pub const NONE: PlaceableId = PlaceableId(0);

    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

/// What committing a placeable produces
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaceableKind {
    /// A standalone object
    #[default]
    Structure,
    /// A floor piece merged into the painted floor mesh
    FloorTile,
}

/// One entry of the build menu
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaceableDef {
    pub name: String,
    #[serde(default)]
    pub cost: f32,
    /// Collision volume used for zone checks and picking
    pub shape: Option<ColliderShape>,
    /// Orientation of the unrotated placeable
    #[serde(default = "identity")]
    pub base_rotation: Quat,
    #[serde(default)]
    pub kind: PlaceableKind,
    /// Placed copies become no-build zones themselves
    #[serde(default)]
    pub blocks_building: bool,
    /// Local-space mesh, required for floor tiles
    #[serde(default)]
    pub mesh: Option<MeshBuffer>,
}

fn identity() -> Quat {
    Quat::IDENTITY
}

impl PlaceableDef {
    pub fn new(name: impl Into<String>, shape: ColliderShape) -> Self {
        Self {
            name: name.into(),
            cost: 0.0,
            shape: Some(shape),
            base_rotation: Quat::IDENTITY,
            kind: PlaceableKind::Structure,
            blocks_building: false,
            mesh: None,
        }
    }

    pub fn with_cost(mut self, cost: f32) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_base_rotation(mut self, rotation: Quat) -> Self {
        self.base_rotation = rotation;
        self
    }

    pub fn blocking(mut self) -> Self {
        self.blocks_building = true;
        self
    }

    /// Turn this into a floor tile contributing `mesh` to the floor.
    pub fn floor_tile(mut self, mesh: MeshBuffer) -> Self {
        self.kind = PlaceableKind::FloorTile;
        self.mesh = Some(mesh);
        self
    }
}

/// Ordered placeable list; index 0 means "none"
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PlaceableCatalog {
    defs: Vec<PlaceableDef>,
}

impl PlaceableCatalog {
    pub fn new(defs: Vec<PlaceableDef>) -> Self {
        Self { defs }
    }

    pub fn push(&mut self, def: PlaceableDef) -> PlaceableId {
        self.defs.push(def);
        PlaceableId(self.defs.len())
    }

    /// Definition for a non-zero index, `None` for 0 or out of range
    pub fn get(&self, id: PlaceableId) -> Option<&PlaceableDef> {
        id.0.checked_sub(1).and_then(|i| self.defs.get(i))
    }

    /// Whether `index` names a slot, including the "none" slot
    pub fn contains_index(&self, index: usize) -> bool {
        index <= self.defs.len()
    }

    pub fn by_name(&self, name: &str) -> Option<PlaceableId> {
        self.defs
            .iter()
            .position(|def| def.name == name)
            .map(|i| PlaceableId(i + 1))
    }

    /// Number of slots including "none"
    pub fn slot_count(&self) -> usize {
        self.defs.len() + 1
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlaceableId, &PlaceableDef)> {
        self.defs
            .iter()
            .enumerate()
            .map(|(i, def)| (PlaceableId(i + 1), def))
    }
}
