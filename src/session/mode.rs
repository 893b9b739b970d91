//! Play/build mode switching

use serde::{Deserialize, Serialize};

use crate::collision::PhysicsWorld;
use crate::placement::PlacementController;
use crate::scene::BuildScene;

/// Top-level game mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Character control, cursor captured
    #[default]
    Play,
    /// Free camera and placement, cursor released
    Build,
}

/// Switches between play and build mode (bound to B).
#[derive(Clone, Debug, Default)]
pub struct ModeToggle {
    mode: GameMode,
}

impl ModeToggle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Cursor is captured while playing
    pub fn cursor_locked(&self) -> bool {
        self.mode == GameMode::Play
    }

    /// Flip the mode. Placement is deselected either way.
    pub fn toggle<P: PhysicsWorld>(&mut self, controller: &mut PlacementController, scene: &mut BuildScene<P>) -> GameMode {
        controller.select_type(0, scene);
        self.mode = match self.mode {
            GameMode::Play => GameMode::Build,
            GameMode::Build => GameMode::Play,
        };

        log::info!("Switched to {:?} mode", self.mode);
        self.mode
    }
}
