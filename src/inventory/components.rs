//! Inventory components and events.

use bevy::prelude::*;
use serde::Deserialize;

use super::container::{Inventory, InventorySnapshot};
use super::items::ItemDefinition;
use crate::core::ConfigError;

/// Default number of player inventory slots.
pub const DEFAULT_INVENTORY_SIZE: usize = 10;

/// Contents of `inventory.ron`.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct InventoryData {
    pub size: usize,
    pub items: Vec<ItemDefinition>,
}

impl Default for InventoryData {
    fn default() -> Self {
        Self {
            size: DEFAULT_INVENTORY_SIZE,
            items: Vec::new(),
        }
    }
}

/// Slot count for newly spawned player inventories.
#[derive(Resource, Debug, Clone, Copy)]
pub struct InventorySettings {
    pub size: usize,
}

impl Default for InventorySettings {
    fn default() -> Self {
        Self {
            size: DEFAULT_INVENTORY_SIZE,
        }
    }
}

/// The player's slot inventory, initialized on creation.
#[derive(Component, Debug, Clone, Deref, DerefMut)]
pub struct PlayerInventory(pub Inventory);

impl PlayerInventory {
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        let mut inventory = Inventory::new(size)?;
        inventory.initialize();
        Ok(Self(inventory))
    }
}

/// Item lying in the world, collected on player contact.
#[derive(Component, Debug, Clone)]
pub struct ItemPickup {
    pub item_id: String,
    pub quantity: u32,
}

/// Request to exchange two slots of `owner`'s inventory.
#[derive(Event, Debug, Clone, Copy)]
pub struct InventorySwapEvent {
    pub owner: Entity,
    pub a: usize,
    pub b: usize,
}

/// Non-empty slots of `owner`'s inventory after a change.
#[derive(Event, Debug, Clone)]
pub struct InventoryUpdatedEvent {
    pub owner: Entity,
    pub slots: InventorySnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parse_ron;

    #[test]
    fn player_inventory_starts_with_empty_slots() {
        let inventory = PlayerInventory::new(4).unwrap();
        assert_eq!(inventory.slots().len(), 4);
        assert!(inventory.current_state().is_empty());
    }

    #[test]
    fn player_inventory_rejects_zero_slots() {
        assert_eq!(
            PlayerInventory::new(0).unwrap_err(),
            ConfigError::InvalidInventorySize(0)
        );
    }

    #[test]
    fn inventory_data_defaults_size() {
        let data: InventoryData =
            parse_ron("inventory.ron", r#"(items: [(id: "potion", name: "Potion")])"#).unwrap();
        assert_eq!(data.size, DEFAULT_INVENTORY_SIZE);
        assert_eq!(data.items.len(), 1);
    }
}
