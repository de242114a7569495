//! Enemy plugin - registers all enemy systems.

use bevy::prelude::*;

use super::ai::{self, AiRng};
use super::data::{load_enemy_definitions, EnemyRegistry};
use crate::combat::CombatSet;
use crate::core::GameState;

/// Enemy plugin - handles enemy definitions, pursuit AI and steering.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<EnemyRegistry>()
            .init_resource::<AiRng>()
            .add_systems(Startup, load_enemy_definitions)
            // AI runs before damage so despawned enemies are gone next frame
            .add_systems(
                Update,
                (ai::enemy_think, ai::steer_nav_agents)
                    .chain()
                    .before(CombatSet::Damage)
                    .run_if(in_state(GameState::InGame)),
            )
            .add_systems(
                Update,
                ai::enemy_attack
                    .after(ai::enemy_think)
                    .in_set(CombatSet::Action),
            );
    }
}
