//! Top-down player movement.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use super::controller::{MovementController, MovementInput, IS_DASH_PARAM};
use super::fade::ActiveFades;
use super::respawn::SpawnPoint;
use super::stamina::StaminaPool;
use crate::combat::{AttackTargets, CombatController, CombatDefinition, CombatSet, Health};
use crate::core::{
    world_position, AnimationSink, Animator, ConfigError, GameState, Tick, ALLY_GROUP,
    ENEMY_GROUP, PLAYER_GROUP, SCENERY_GROUP,
};
use crate::enemies::{PriorityTag, Tagged};
use crate::inventory::PlayerInventory;

/// Set up player movement systems.
pub fn setup_movement_systems(app: &mut App) {
    // Attacks start in `CombatSet::Action`; moving after it sees this tick's lock.
    app.add_systems(
        Update,
        player_movement
            .after(CombatSet::Action)
            .run_if(in_state(GameState::InGame)),
    );
}

/// Read the directional keys into an axis in the ground plane.
fn read_axis(keyboard: &ButtonInput<KeyCode>, bindings: &PlayerBindings) -> Vec2 {
    let mut axis = Vec2::ZERO;
    if keyboard.pressed(bindings.up) {
        axis.y -= 1.0;
    }
    if keyboard.pressed(bindings.down) {
        axis.y += 1.0;
    }
    if keyboard.pressed(bindings.left) {
        axis.x -= 1.0;
    }
    if keyboard.pressed(bindings.right) {
        axis.x += 1.0;
    }
    axis
}

/// Run the movement state machine and push the result into the character controller.
pub fn player_movement(
    keyboard: Res<ButtonInput<KeyCode>>,
    bindings: Res<PlayerBindings>,
    time: Res<Time>,
    mut player_query: Query<(
        &mut MovementController,
        &mut StaminaPool,
        &mut Animator,
        &mut Facing,
        &mut Transform,
        &mut KinematicCharacterController,
        Option<&CombatController>,
    ), With<Player>>,
) {
    let Ok((mut movement, mut stamina, mut animator, mut facing, mut transform, mut controller, combat)) =
        player_query.get_single_mut()
    else {
        return;
    };

    let input = MovementInput {
        axis: read_axis(&keyboard, &bindings),
        sprint_held: keyboard.pressed(bindings.sprint),
        dash_pressed: keyboard.just_pressed(bindings.dash),
        attack_locked: combat.is_some_and(|c| c.is_attacking()),
    };

    let tick = Tick::from_time(&time);
    let output = movement.tick(tick, &input, &mut stamina);

    controller.translation = Some(world_position(output.velocity * tick.dt, 0.0));

    if let Some(animation) = output.animation {
        animator.set_trigger(animation.trigger);
        animator.set_bool(IS_DASH_PARAM, animation.is_dash);
    }

    if let Some(new_facing) = output.facing {
        *facing = new_facing;
        transform.rotation = match new_facing {
            Facing::Left => Quat::from_rotation_y(std::f32::consts::PI),
            Facing::Right => Quat::IDENTITY,
        };
    }
}

/// Spawn the player entity.
///
/// Fails when the combat definition can't drive an attack chain.
pub fn spawn_player(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    position: Vec3,
    config: &PlayerConfig,
    combat: &CombatDefinition,
    inventory_size: usize,
) -> Result<Entity, ConfigError> {
    let combat_controller = CombatController::from_definition(combat)?;
    let inventory = PlayerInventory::new(inventory_size)?;

    let player = commands
        .spawn((
            (
                Player,
                Tagged(PriorityTag::Player),
                MovementController::new(config.clone()),
                StaminaPool::from_config(config),
                Facing::default(),
                Animator::default(),
                ActiveFades::default(),
                SpawnPoint(position),
            ),
            (
                combat_controller,
                combat.attack_area(),
                AttackTargets::default(),
                Health::new(100.0),
                inventory,
            ),
            Mesh3d(meshes.add(Capsule3d::new(0.3, 1.0))),
            MeshMaterial3d(materials.add(Color::srgb(0.2, 0.4, 0.9))),
            Transform::from_translation(position),
            (
                RigidBody::KinematicPositionBased,
                Collider::capsule_y(0.5, 0.3),
                CollisionGroups::new(PLAYER_GROUP, SCENERY_GROUP | ENEMY_GROUP | ALLY_GROUP),
                ActiveEvents::COLLISION_EVENTS,
                ActiveCollisionTypes::default() | ActiveCollisionTypes::KINEMATIC_STATIC,
                KinematicCharacterController {
                    offset: CharacterLength::Absolute(0.01),
                    snap_to_ground: Some(CharacterLength::Absolute(0.5)),
                    ..default()
                },
            ),
        ))
        .id();

    info!("Spawned player at {:?}", position);
    Ok(player)
}

#[cfg(test)]
mod tests {
    use bevy::state::app::StatesPlugin;

    use super::*;
    use crate::combat::AttackPattern;

    fn start_swing(mut query: Query<(&mut CombatController, &mut Animator)>) {
        for (mut combat, mut animator) in query.iter_mut() {
            if let Some(started) = combat.attack_handle(0.0) {
                animator.set_trigger(&started.trigger);
            }
        }
    }

    #[test]
    fn attack_started_this_tick_locks_movement() {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .insert_state(GameState::InGame)
            .init_resource::<Time>()
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<PlayerBindings>()
            .configure_sets(
                Update,
                (CombatSet::Sense, CombatSet::Action, CombatSet::Damage).chain(),
            )
            .add_systems(Update, start_swing.in_set(CombatSet::Action));
        setup_movement_systems(&mut app);

        let config = PlayerConfig::default();
        let combat =
            CombatController::new(vec![AttackPattern::new(1.0, 0.2, 0.4, "Swing")], 10.0).unwrap();
        let player = app
            .world_mut()
            .spawn((
                Player,
                MovementController::new(config.clone()),
                StaminaPool::from_config(&config),
                Animator::default(),
                Facing::default(),
                Transform::default(),
                KinematicCharacterController::default(),
                combat,
            ))
            .id();

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyA);
        app.update();

        let world = app.world();
        assert_eq!(world.get::<MovementController>(player).unwrap().state(), MovementState::Idle);
        assert_eq!(*world.get::<Facing>(player).unwrap(), Facing::Right);
        assert_eq!(world.get::<Animator>(player).unwrap().last_trigger(), Some("Swing"));
    }
}
