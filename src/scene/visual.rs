//! Visual states and the material table they resolve to.
//!
//! Material names are looked up once, when the table is built. A name that
//! cannot be found is logged at that point and the state simply has no
//! material; applying it later leaves the entity's current look unchanged.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::VisualNames;

/// Look of an entity as far as placement is concerned
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualState {
    /// The object's own materials
    #[default]
    Normal,
    /// Placement preview that can be committed
    Ghost,
    /// Placement preview inside a no-build zone
    Blocked,
    /// A no-build zone volume
    NoBuildZone,
}

/// Opaque material id handed out by the renderer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialHandle(pub u32);

/// Renderer-side lookup of materials by name
pub trait MaterialSource {
    fn find_material(&self, name: &str) -> Option<MaterialHandle>;
}

impl MaterialSource for HashMap<String, MaterialHandle> {
    fn find_material(&self, name: &str) -> Option<MaterialHandle> {
        self.get(name).copied()
    }
}

/// Materials for every swappable visual state
#[derive(Clone, Debug, Default)]
pub struct VisualTable {
    materials: HashMap<VisualState, MaterialHandle>,
}

impl VisualTable {
    /// Resolve the configured material names against `source`.
    pub fn resolve<S: MaterialSource + ?Sized>(source: &S, names: &VisualNames) -> Self {
        let mut materials = HashMap::new();

        for (state, name) in [
            (VisualState::Ghost, &names.ghost),
            (VisualState::Blocked, &names.blocked),
            (VisualState::NoBuildZone, &names.no_build_zone),
        ] {
            match source.find_material(name) {
                Some(handle) => {
                    materials.insert(state, handle);
                }
                None => log::error!("Material '{}' for {:?} not found", name, state),
            }
        }

        Self { materials }
    }

    /// Material for a state. `Normal` never has one: it means "own materials".
    pub fn material(&self, state: VisualState) -> Option<MaterialHandle> {
        self.materials.get(&state).copied()
    }

    /// Whether applying `state` would change anything on screen
    pub fn can_apply(&self, state: VisualState) -> bool {
        state == VisualState::Normal || self.materials.contains_key(&state)
    }
}
