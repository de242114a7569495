//! Player plugin - movement, stamina and occluder fading.

use bevy::prelude::*;

use super::components::*;
use super::fade;
use super::movement;
use super::respawn;
use crate::core::{load_or_default, DATA_DIR};

/// Player plugin - handles player tuning, movement and see-through scenery.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<PlayerBindings>()
            .add_systems(Startup, load_player_config);

        movement::setup_movement_systems(app);
        respawn::setup_respawn_systems(app);
        fade::setup_fade_systems(app);
    }
}

fn load_player_config(mut commands: Commands) {
    let config: PlayerConfig = load_or_default(format!("{DATA_DIR}/player.ron"));
    commands.insert_resource(config);
}
