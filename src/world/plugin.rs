//! World plugin - arena setup, camera follow and restart.

use bevy::prelude::*;

use crate::combat::{CombatDefinition, PlayerCombat};
use crate::core::{ConfigError, GameState};
use crate::enemies::EnemyRegistry;
use crate::inventory::InventorySettings;
use crate::player::{spawn_player, Player, PlayerConfig};

use super::layout::{load_arena_layout, ArenaEntity, ArenaLayout};
use super::spawning::*;

/// Key that rebuilds the arena from scratch.
pub const RESTART_KEY: KeyCode = KeyCode::F5;

/// World plugin - builds the arena once data is loaded.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_arena_layout)
            .add_systems(Update, finish_loading.run_if(in_state(GameState::Loading)))
            .add_systems(
                OnTransition {
                    exited: GameState::Loading,
                    entered: GameState::InGame,
                },
                setup_arena,
            )
            .add_systems(OnEnter(GameState::Loading), cleanup_arena)
            .add_systems(
                Update,
                (restart_on_key, follow_player).run_if(in_state(GameState::InGame)),
            );
    }
}

/// Definitions are read in `Startup`, so the first update can start the game.
fn finish_loading(mut next_state: ResMut<NextState<GameState>>) {
    info!("Data loaded, entering arena");
    next_state.set(GameState::InGame);
}

/// Build the arena. A bad combat, inventory or enemy configuration ends the app.
#[allow(clippy::too_many_arguments)]
pub fn setup_arena(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    layout: Res<ArenaLayout>,
    player_config: Res<PlayerConfig>,
    player_combat: Res<PlayerCombat>,
    inventory_settings: Res<InventorySettings>,
    enemy_registry: Res<EnemyRegistry>,
    mut exit: EventWriter<AppExit>,
) {
    info!("Building arena");

    spawn_environment(&mut commands, &mut meshes, &mut materials, &layout);
    for placement in &layout.occluders {
        spawn_occluder(&mut commands, &mut meshes, &mut materials, placement);
    }
    for position in &layout.towers {
        spawn_tower(&mut commands, &mut meshes, &mut materials, *position);
    }
    for placement in &layout.pickups {
        spawn_item_pickup(&mut commands, &mut meshes, &mut materials, placement);
    }

    let spawned = spawn_actors(
        &mut commands,
        &mut meshes,
        &mut materials,
        &layout,
        &player_config,
        &player_combat.0,
        inventory_settings.size,
        &enemy_registry,
    );
    if let Err(e) = spawned {
        error!("Invalid configuration: {}", e);
        exit.send(AppExit::error());
    }
}

#[allow(clippy::too_many_arguments)]
fn spawn_actors(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    layout: &ArenaLayout,
    player_config: &PlayerConfig,
    combat: &CombatDefinition,
    inventory_size: usize,
    enemy_registry: &EnemyRegistry,
) -> Result<(), ConfigError> {
    spawn_enemies(commands, meshes, materials, &layout.enemies, enemy_registry)?;

    let (x, z) = layout.player_spawn;
    spawn_player(
        commands,
        meshes,
        materials,
        Vec3::new(x, 0.8, z),
        player_config,
        combat,
        inventory_size,
    )?;
    Ok(())
}

/// Despawn the arena and the player.
fn cleanup_arena(
    mut commands: Commands,
    arena_query: Query<Entity, With<ArenaEntity>>,
    player_query: Query<Entity, With<Player>>,
) {
    for entity in arena_query.iter().chain(player_query.iter()) {
        commands.entity(entity).despawn_recursive();
    }
}

fn restart_on_key(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(RESTART_KEY) {
        info!("Restarting arena");
        next_state.set(GameState::Loading);
    }
}

fn follow_player(
    player_query: Query<&Transform, (With<Player>, Without<ArenaCamera>)>,
    mut camera_query: Query<&mut Transform, With<ArenaCamera>>,
) {
    let Ok(player) = player_query.get_single() else {
        return;
    };
    for mut camera in camera_query.iter_mut() {
        camera.translation = player.translation + CAMERA_OFFSET;
    }
}
