//! Fixed-size slot inventory.
//!
//! Slot identity is its index. A slot is empty when it holds no item
//! reference. Adding fills the first empty slot; when every slot is taken
//! the item is dropped and the inventory stays unchanged.

use std::collections::BTreeMap;
use std::sync::Arc;

use bevy::prelude::*;

use super::items::ItemDefinition;
use crate::core::{ConfigError, InventoryError};

/// Non-empty slots by index.
pub type InventorySnapshot = BTreeMap<usize, InventorySlot>;

#[derive(Debug, Clone, Default)]
pub struct InventorySlot {
    pub item: Option<Arc<ItemDefinition>>,
    pub quantity: u32,
}

impl InventorySlot {
    pub fn new(item: Arc<ItemDefinition>, quantity: u32) -> Self {
        Self {
            item: Some(item),
            quantity,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.item.is_none()
    }

    pub fn with_quantity(&self, quantity: u32) -> Self {
        Self {
            item: self.item.clone(),
            quantity,
        }
    }
}

/// Slots compare item references by identity.
impl PartialEq for InventorySlot {
    fn eq(&self, other: &Self) -> bool {
        let same_item = match (&self.item, &other.item) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_item && self.quantity == other.quantity
    }
}

#[derive(Debug, Clone)]
pub struct Inventory {
    size: usize,
    slots: Vec<InventorySlot>,
    notifications: Vec<InventorySnapshot>,
}

impl Inventory {
    /// An inventory of `size` slots. Slots exist only after [`Inventory::initialize`].
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::InvalidInventorySize(size));
        }
        Ok(Self {
            size,
            slots: Vec::new(),
            notifications: Vec::new(),
        })
    }

    /// Reset to `size` empty slots.
    pub fn initialize(&mut self) {
        self.slots = vec![InventorySlot::empty(); self.size];
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn slots(&self) -> &[InventorySlot] {
        &self.slots
    }

    /// Put `item` in the first empty slot, returning its index.
    pub fn add_item(&mut self, item: Arc<ItemDefinition>, quantity: u32) -> Option<usize> {
        let Some(index) = self.slots.iter().position(InventorySlot::is_empty) else {
            warn!("Inventory full, dropped {} x{}", item.id, quantity);
            return None;
        };
        self.slots[index] = InventorySlot::new(item, quantity);
        Some(index)
    }

    pub fn add_slot(&mut self, slot: InventorySlot) -> Option<usize> {
        let item = slot.item?;
        self.add_item(item, slot.quantity)
    }

    pub fn get_at(&self, index: usize) -> Result<&InventorySlot, InventoryError> {
        self.slots.get(index).ok_or(InventoryError::OutOfRange {
            index,
            len: self.slots.len(),
        })
    }

    /// Exchange two slots, empty or not, and queue a change notification.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<(), InventoryError> {
        let len = self.slots.len();
        for index in [a, b] {
            if index >= len {
                return Err(InventoryError::OutOfRange { index, len });
            }
        }

        debug!("Swapping inventory slots {} and {}", a, b);
        self.slots.swap(a, b);
        let snapshot = self.current_state();
        self.notifications.push(snapshot);
        Ok(())
    }

    pub fn current_state(&self) -> InventorySnapshot {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| !slot.is_empty())
            .map(|(index, slot)| (index, slot.clone()))
            .collect()
    }

    /// Drain queued change notifications, oldest first.
    pub fn take_notifications(&mut self) -> Vec<InventorySnapshot> {
        std::mem::take(&mut self.notifications)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> Arc<ItemDefinition> {
        Arc::new(ItemDefinition {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            max_stack: 10,
        })
    }

    fn inventory(size: usize) -> Inventory {
        let mut inventory = Inventory::new(size).unwrap();
        inventory.initialize();
        inventory
    }

    #[test]
    fn zero_size_is_rejected() {
        assert_eq!(Inventory::new(0).unwrap_err(), ConfigError::InvalidInventorySize(0));
    }

    #[test]
    fn slots_exist_only_after_initialize() {
        let mut inventory = Inventory::new(3).unwrap();
        assert_eq!(
            inventory.get_at(0),
            Err(InventoryError::OutOfRange { index: 0, len: 0 })
        );

        inventory.initialize();
        assert_eq!(inventory.slots().len(), 3);
        assert!(inventory.get_at(2).unwrap().is_empty());
        assert!(inventory.current_state().is_empty());
    }

    #[test]
    fn add_fills_first_empty_slot() {
        let mut inventory = inventory(3);
        let potion = item("potion");

        assert_eq!(inventory.add_item(potion.clone(), 2), Some(0));
        assert_eq!(inventory.add_item(item("key"), 1), Some(1));
        inventory.swap(0, 2).unwrap();
        assert_eq!(inventory.add_item(item("gem"), 4), Some(0));

        assert_eq!(inventory.get_at(2).unwrap(), &InventorySlot::new(potion, 2));
    }

    #[test]
    fn add_on_full_inventory_changes_nothing() {
        let mut inventory = inventory(2);
        inventory.add_item(item("a"), 1);
        inventory.add_item(item("b"), 1);
        let before = inventory.slots().to_vec();

        assert_eq!(inventory.add_item(item("c"), 1), None);
        assert_eq!(inventory.slots(), before.as_slice());
    }

    #[test]
    fn add_empty_slot_is_ignored() {
        let mut inventory = inventory(2);
        assert_eq!(inventory.add_slot(InventorySlot::empty()), None);
        assert_eq!(inventory.add_slot(InventorySlot::new(item("a"), 3)), Some(0));
    }

    #[test]
    fn swap_twice_restores_slots() {
        let mut inventory = inventory(4);
        inventory.add_item(item("a"), 1);
        inventory.add_item(item("b"), 5);
        let before = inventory.slots().to_vec();

        inventory.swap(1, 3).unwrap();
        assert!(inventory.get_at(1).unwrap().is_empty());
        assert_eq!(inventory.get_at(3).unwrap().quantity, 5);

        inventory.swap(1, 3).unwrap();
        assert_eq!(inventory.slots(), before.as_slice());
    }

    #[test]
    fn swap_notifies_with_non_empty_slots() {
        let mut inventory = inventory(3);
        let a = item("a");
        inventory.add_item(a.clone(), 1);
        assert!(inventory.take_notifications().is_empty());

        inventory.swap(0, 2).unwrap();
        let notifications = inventory.take_notifications();
        assert_eq!(notifications.len(), 1);

        let expected: InventorySnapshot = [(2, InventorySlot::new(a, 1))].into_iter().collect();
        assert_eq!(notifications[0], expected);
        assert!(inventory.take_notifications().is_empty());
    }

    #[test]
    fn swap_out_of_range_fails_without_change() {
        let mut inventory = inventory(2);
        inventory.add_item(item("a"), 1);

        assert_eq!(
            inventory.swap(0, 5),
            Err(InventoryError::OutOfRange { index: 5, len: 2 })
        );
        assert!(!inventory.get_at(0).unwrap().is_empty());
        assert!(inventory.take_notifications().is_empty());
    }

    #[test]
    fn slot_identity_and_quantity_change() {
        let potion = item("potion");
        let slot = InventorySlot::new(potion.clone(), 1);

        assert_eq!(slot.with_quantity(4).quantity, 4);
        assert_ne!(slot, InventorySlot::new(item("potion"), 1));
        assert_eq!(slot, InventorySlot::new(potion, 1));
    }
}
