//! Combat module - attack pattern chains, attack areas and damage.

mod components;
mod cycle;
mod plugin;
mod systems;

pub use components::*;
pub use cycle::*;
pub use plugin::CombatPlugin;
pub use systems::CombatSet;
