//! Brawler - a top-down arena brawler in Bevy.
//!
//! The game logic lives in small controllers that take a clock snapshot and
//! sensed inputs and return commands. Bevy systems feed them and apply the
//! results.
//!
//! # Architecture
//!
//! - **Core**: Game states, global events, timers, sensing ports, data loading
//! - **Player**: Movement state machine, stamina, see-through scenery
//! - **Combat**: Attack pattern chains, damage, deaths
//! - **Enemies**: Pursuit state machine, roaming, steering
//! - **Inventory**: Fixed-size item slots, pickups
//! - **World**: Arena layout and setup
//! - **Debug**: Gizmo overlays for sensors and attack areas

pub mod combat;
pub mod core;
pub mod debug;
pub mod enemies;
pub mod inventory;
pub mod player;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct BrawlerPlugin;

impl Plugin for BrawlerPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            .add_plugins(player::PlayerPlugin)
            .add_plugins(combat::CombatPlugin)
            .add_plugins(enemies::EnemyPlugin)
            .add_plugins(inventory::InventoryPlugin)

            // Arena setup (uses every registry above)
            .add_plugins(world::WorldPlugin)

            .add_plugins(debug::DebugDrawPlugin);
    }
}
