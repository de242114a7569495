//! Entity spawning functions for arena construction.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::layout::{ArenaEntity, ArenaLayout, EnemyPlacement, OccluderPlacement, PickupPlacement};
use crate::combat::{AttackTargets, CombatController, Health};
use crate::core::{Animator, ConfigError, NavAgent, ALLY_GROUP, ENEMY_GROUP, PLAYER_GROUP, SCENERY_GROUP};
use crate::enemies::{Enemy, EnemyBrain, EnemyRegistry, EnemyType, PriorityTag, Tagged, ViewSensor};
use crate::inventory::ItemPickup;
use crate::player::Occluder;

/// Camera offset from the followed player.
pub const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 14.0, 10.0);

/// Top-down camera that trails the player.
#[derive(Component)]
pub struct ArenaCamera;

pub fn spawn_environment(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    layout: &ArenaLayout,
) {
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.9, 0.9, 1.0),
        brightness: 300.0,
    });

    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::XYZ,
            -std::f32::consts::FRAC_PI_3,
            std::f32::consts::FRAC_PI_6,
            0.0,
        )),
        ArenaEntity,
    ));

    let side = layout.half_size * 2.0;
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(side, 0.2, side))),
        MeshMaterial3d(materials.add(Color::srgb(0.35, 0.45, 0.3))),
        Transform::from_xyz(0.0, -0.1, 0.0),
        RigidBody::Fixed,
        Collider::cuboid(layout.half_size, 0.1, layout.half_size),
        CollisionGroups::new(SCENERY_GROUP, Group::ALL),
        ArenaEntity,
    ));

    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(CAMERA_OFFSET).looking_at(Vec3::ZERO, Vec3::Y),
        ArenaCamera,
        ArenaEntity,
    ));
}

/// Scenery that turns see-through while the player stands behind it.
pub fn spawn_occluder(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    placement: &OccluderPlacement,
) {
    let (width, height, depth) = placement.size;
    let (x, z) = placement.position;

    commands.spawn((
        Occluder,
        Mesh3d(meshes.add(Cuboid::new(width, height, depth))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.45, 0.4, 0.35),
            alpha_mode: AlphaMode::Blend,
            ..default()
        })),
        Transform::from_xyz(x, height * 0.5, z),
        RigidBody::Fixed,
        Collider::cuboid(width * 0.5, height * 0.5, depth * 0.5),
        Sensor,
        CollisionGroups::new(SCENERY_GROUP, PLAYER_GROUP),
        ArenaEntity,
    ));
}

/// A stationary ally that enemies may prefer over the player.
pub fn spawn_tower(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    (x, z): (f32, f32),
) -> Entity {
    commands
        .spawn((
            Tagged(PriorityTag::Tower),
            Health::new(250.0),
            Mesh3d(meshes.add(Cylinder::new(0.8, 3.0))),
            MeshMaterial3d(materials.add(Color::srgb(0.6, 0.6, 0.7))),
            Transform::from_xyz(x, 1.5, z),
            RigidBody::Fixed,
            Collider::cylinder(1.5, 0.8),
            CollisionGroups::new(ALLY_GROUP, Group::ALL),
            ArenaEntity,
        ))
        .id()
}

pub fn spawn_item_pickup(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    placement: &PickupPlacement,
) {
    let (x, z) = placement.position;

    commands.spawn((
        ItemPickup {
            item_id: placement.item_id.clone(),
            quantity: placement.quantity,
        },
        Mesh3d(meshes.add(Sphere::new(0.25))),
        MeshMaterial3d(materials.add(Color::srgb(0.95, 0.8, 0.2))),
        Transform::from_xyz(x, 0.3, z),
        RigidBody::Fixed,
        Collider::ball(0.4),
        Sensor,
        CollisionGroups::new(SCENERY_GROUP, PLAYER_GROUP),
        ArenaEntity,
    ));
}

/// Spawn the placed enemies. Unknown types are skipped with a warning.
pub fn spawn_enemies(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    placements: &[EnemyPlacement],
    enemy_registry: &EnemyRegistry,
) -> Result<(), ConfigError> {
    for placement in placements {
        let Some(definition) = enemy_registry.get(&placement.enemy_type) else {
            warn!("Unknown enemy type in arena layout: {}", placement.enemy_type);
            continue;
        };

        let brain_config = definition.brain_config()?;
        let attack = match &definition.combat {
            Some(combat) => Some((CombatController::from_definition(combat)?, combat.attack_area())),
            None => None,
        };
        let spawn_point = Vec2::new(placement.position.0, placement.position.1);
        let (r, g, b) = definition.color;

        let mut enemy = commands.spawn((
            (
                Enemy,
                EnemyType(placement.enemy_type.clone()),
                EnemyBrain::new(brain_config, spawn_point),
                NavAgent::new(definition.move_speed),
                ViewSensor {
                    radius: definition.view_distance,
                    mask: definition.target_mask,
                },
                Health::new(definition.max_health),
            ),
            Mesh3d(meshes.add(Capsule3d::new(0.35, 0.9))),
            MeshMaterial3d(materials.add(Color::srgb(r, g, b))),
            Transform::from_xyz(spawn_point.x, 0.8, spawn_point.y),
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(0.45, 0.35),
            CollisionGroups::new(ENEMY_GROUP, Group::ALL),
            ArenaEntity,
        ));

        if let Some((combat, area)) = attack {
            enemy.insert((combat, area, AttackTargets::default(), Animator::default()));
        }

        info!(
            "Spawned {} at ({}, {})",
            definition.name, placement.position.0, placement.position.1
        );
    }
    Ok(())
}
