//! Combat plugin - attack chains and damage.

use bevy::prelude::*;

use super::components::{CombatDefinition, PlayerCombat};
use super::systems;
use crate::core::{load_or_default, DATA_DIR};

/// Combat plugin - handles all combat systems.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_player_combat);
        systems::setup_combat_systems(app);
    }
}

/// Read `combat.ron`. An invalid definition stops the player from spawning.
fn load_player_combat(mut commands: Commands) {
    let definition: CombatDefinition = load_or_default(format!("{DATA_DIR}/combat.ron"));
    if let Err(e) = definition.validate() {
        error!("{}", e);
    }
    commands.insert_resource(PlayerCombat(definition));
}
