//! Putting a dead player back on their feet.

use bevy::prelude::*;

use super::components::Player;
use super::controller::MovementController;
use super::stamina::StaminaPool;
use crate::combat::{CombatSet, Dead, Health};
use crate::core::GameState;

/// Where the player comes back after dying.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint(pub Vec3);

pub fn setup_respawn_systems(app: &mut App) {
    app.add_systems(
        Update,
        respawn_dead_player
            .after(CombatSet::Damage)
            .run_if(in_state(GameState::InGame)),
    );
}

/// Restore a dead player at their spawn point with full health and stamina.
fn respawn_dead_player(
    mut commands: Commands,
    mut query: Query<
        (
            Entity,
            &SpawnPoint,
            &mut Transform,
            &mut MovementController,
            &mut StaminaPool,
            &mut Health,
        ),
        (With<Player>, With<Dead>),
    >,
) {
    for (entity, spawn, mut transform, mut movement, mut stamina, mut health) in query.iter_mut() {
        movement.reset();
        stamina.refill();
        let maximum = health.maximum;
        health.heal(maximum);
        transform.translation = spawn.0;

        commands.entity(entity).remove::<Dead>();
        info!("Player respawned at {:?}", spawn.0);
    }
}
