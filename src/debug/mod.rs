//! Debug module - wireframe overlays for sensors, attack areas and player status.

mod plugin;

pub use plugin::{DebugDraw, DebugDrawPlugin, DEBUG_DRAW_KEY};
