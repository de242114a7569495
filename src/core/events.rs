//! Global events used for cross-system communication.
//!
//! Events keep the behaviour controllers decoupled from whatever consumes
//! their output. The combat system sends DamageEvents, the health system
//! applies them and reports deaths.

use bevy::prelude::*;

/// Sent when an entity takes damage.
#[derive(Event, Debug, Clone)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity that caused the damage
    pub source: Entity,
    /// Damage amount
    pub amount: f32,
}

/// Sent when an entity dies (health reaches 0).
#[derive(Event, Debug, Clone)]
pub struct DeathEvent {
    /// Entity that died
    pub entity: Entity,
    /// Entity that killed them (if any)
    pub killed_by: Option<Entity>,
}

/// Sent when an entity picks up an item.
#[derive(Event, Debug, Clone)]
pub struct ItemPickupEvent {
    /// Entity whose inventory receives the item
    pub collector: Entity,
    /// Catalog id of the item
    pub item_id: String,
    pub quantity: u32,
}
