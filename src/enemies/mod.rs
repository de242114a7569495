//! Enemies module - enemy definitions, pursuit AI and steering.

mod ai;
mod brain;
mod components;
mod data;
mod plugin;

pub use ai::{AiRng, ViewSensor};
pub use brain::*;
pub use components::*;
pub use data::{EnemyDefinition, EnemyRegistry};
pub use plugin::EnemyPlugin;
