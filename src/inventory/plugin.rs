//! Inventory plugin - pickups, slot swaps and change notifications.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use super::items::ItemCatalog;
use crate::core::{load_or_default, GameState, ItemPickupEvent, DATA_DIR};

pub struct InventoryPlugin;

impl Plugin for InventoryPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<ItemCatalog>()
            .init_resource::<InventorySettings>()
            .add_event::<InventorySwapEvent>()
            .add_event::<InventoryUpdatedEvent>()
            .add_systems(Startup, load_inventory_data)
            .add_systems(
                Update,
                (
                    collect_item_pickups,
                    handle_item_pickups,
                    handle_inventory_swaps,
                    publish_inventory_updates,
                )
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            );
    }
}

fn load_inventory_data(mut commands: Commands) {
    let data: InventoryData = load_or_default(format!("{DATA_DIR}/inventory.ron"));
    let catalog = ItemCatalog::from_definitions(data.items);
    if catalog.is_empty() {
        warn!("Item catalog is empty; every pickup will be ignored");
    } else {
        info!("Item catalog holds {} item(s)", catalog.len());
    }

    commands.insert_resource(InventorySettings { size: data.size });
    commands.insert_resource(catalog);
}

/// Turn player contact with world pickups into pickup events.
fn collect_item_pickups(
    mut commands: Commands,
    mut collisions: EventReader<CollisionEvent>,
    mut pickup_events: EventWriter<ItemPickupEvent>,
    collectors: Query<(), With<PlayerInventory>>,
    pickups: Query<&ItemPickup>,
) {
    for event in collisions.read() {
        let CollisionEvent::Started(a, b, _) = event else {
            continue;
        };
        let (collector, pickup_entity) = if collectors.contains(*a) {
            (*a, *b)
        } else if collectors.contains(*b) {
            (*b, *a)
        } else {
            continue;
        };
        let Ok(pickup) = pickups.get(pickup_entity) else {
            continue;
        };

        pickup_events.send(ItemPickupEvent {
            collector,
            item_id: pickup.item_id.clone(),
            quantity: pickup.quantity,
        });
        commands.entity(pickup_entity).despawn_recursive();
    }
}

fn handle_item_pickups(
    mut pickup_events: EventReader<ItemPickupEvent>,
    catalog: Res<ItemCatalog>,
    mut inventories: Query<&mut PlayerInventory>,
) {
    for event in pickup_events.read() {
        let Ok(mut inventory) = inventories.get_mut(event.collector) else {
            continue;
        };
        let Some(item) = catalog.get(&event.item_id) else {
            warn!("Unknown item '{}' picked up", event.item_id);
            continue;
        };

        if let Some(index) = inventory.add_item(item, event.quantity) {
            info!("Picked up {} x{} into slot {}", event.item_id, event.quantity, index);
        }
    }
}

fn handle_inventory_swaps(
    mut swap_events: EventReader<InventorySwapEvent>,
    mut inventories: Query<&mut PlayerInventory>,
) {
    for event in swap_events.read() {
        let Ok(mut inventory) = inventories.get_mut(event.owner) else {
            continue;
        };
        if let Err(e) = inventory.swap(event.a, event.b) {
            warn!("Rejected inventory swap: {}", e);
        }
    }
}

fn publish_inventory_updates(
    mut inventories: Query<(Entity, &mut PlayerInventory)>,
    mut updated_events: EventWriter<InventoryUpdatedEvent>,
) {
    for (owner, mut inventory) in &mut inventories {
        for slots in inventory.take_notifications() {
            updated_events.send(InventoryUpdatedEvent { owner, slots });
        }
    }
}
