//! Player module - movement state machine, stamina, respawning and occluder fading.

mod components;
mod controller;
mod fade;
mod movement;
mod plugin;
mod respawn;
mod stamina;

pub use components::*;
pub use controller::*;
pub use fade::{AlphaFade, Occluder};
pub use movement::spawn_player;
pub use plugin::PlayerPlugin;
pub use respawn::SpawnPoint;
pub use stamina::StaminaPool;
