//! Wizbuild - grid-snapped building placement with painted, welded floors

pub mod core;
pub mod math;
pub mod config;
pub mod collision;
pub mod mesh;
pub mod placement;
pub mod scene;
pub mod session;
