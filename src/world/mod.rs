//! World module - arena layout and setup.

mod layout;
mod plugin;
mod spawning;

pub use layout::{ArenaEntity, ArenaLayout, EnemyPlacement, OccluderPlacement, PickupPlacement};
pub use plugin::{setup_arena, WorldPlugin};
pub use spawning::ArenaCamera;
