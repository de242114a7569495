//! Inventory module - fixed-size item slots for the player.

mod components;
mod container;
mod items;
mod plugin;

pub use components::*;
pub use container::{Inventory, InventorySlot, InventorySnapshot};
pub use items::{ItemCatalog, ItemDefinition};
pub use plugin::InventoryPlugin;
