//! Enemy AI systems: sense, think, steer.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::brain::{EnemyBrain, EnemyCommand, EnemyInput, SensedEntity};
use super::components::{Enemy, EnemyState, Tagged};
use crate::combat::{AttackTargets, CombatController};
use crate::core::{
    plane_position, world_position, AnimationSink, Animator, AreaSensor, NavAgent, Navigator,
    RapierAreaSensor, SensorShape, Tick,
};

/// View sensor settings for an enemy.
#[derive(Component, Debug, Clone)]
pub struct ViewSensor {
    pub radius: f32,
    pub mask: u32,
}

/// Randomness source for roaming.
#[derive(Resource)]
pub struct AiRng(pub StdRng);

impl Default for AiRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

/// Sense targets, run the pursuit state machine and issue destinations.
pub fn enemy_think(
    time: Res<Time>,
    mut rng: ResMut<AiRng>,
    rapier_context: Query<&RapierContext>,
    mut enemies: Query<(Entity, &Transform, &ViewSensor, &mut EnemyBrain, &mut NavAgent), With<Enemy>>,
    bodies: Query<(&Transform, Option<&Tagged>)>,
) {
    let Ok(context) = rapier_context.get_single() else {
        return;
    };
    let tick = Tick::from_time(&time);

    for (entity, transform, view, mut brain, mut agent) in enemies.iter_mut() {
        let position = plane_position(transform.translation);

        let sensed: Vec<SensedEntity> = RapierAreaSensor::new(context)
            .excluding(entity)
            .query(
                SensorShape::Ball {
                    center: position,
                    radius: view.radius,
                },
                view.mask,
            )
            .into_iter()
            .filter_map(|hit| {
                let (hit_transform, tagged) = bodies.get(hit).ok()?;
                Some(SensedEntity {
                    entity: hit,
                    tag: tagged.map(|t| t.0),
                    position: plane_position(hit_transform.translation),
                })
            })
            .collect();

        let target_position = brain
            .target()
            .and_then(|target| bodies.get(target.entity).ok())
            .map(|(target_transform, _)| plane_position(target_transform.translation));

        let input = EnemyInput {
            position,
            sensed: &sensed,
            target_position,
        };

        for command in brain.tick(tick, &input, &mut rng.0) {
            match command {
                EnemyCommand::SetDestination(destination) => agent.set_destination(destination),
            }
        }
    }
}

/// Swing at the followed target once it stands inside the attack area.
pub fn enemy_attack(
    time: Res<Time>,
    mut enemies: Query<
        (Entity, &EnemyBrain, &AttackTargets, &mut CombatController, &mut Animator),
        With<Enemy>,
    >,
) {
    let now = Tick::from_time(&time).now;

    for (entity, brain, targets, mut combat, mut animator) in enemies.iter_mut() {
        if brain.state() != EnemyState::FollowTarget {
            continue;
        }
        let Some(target) = brain.target() else {
            continue;
        };
        if !targets.0.contains(&target.entity) {
            continue;
        }

        if let Some(started) = combat.attack_handle(now) {
            debug!("{:?} attacks {:?} with {}", entity, target.entity, started.trigger);
            animator.set_trigger(&started.trigger);
        }
    }
}

/// Move navigation agents toward their destinations on the ground plane.
pub fn steer_nav_agents(time: Res<Time>, mut agents: Query<(&mut Transform, &NavAgent)>) {
    let dt = time.delta_secs();

    for (mut transform, agent) in agents.iter_mut() {
        let position = plane_position(transform.translation);
        let next = agent.step(position, dt);
        if next == position {
            continue;
        }

        let heading = next - position;
        transform.translation = world_position(next, transform.translation.y);
        if heading.x != 0.0 {
            transform.rotation = if heading.x < 0.0 {
                Quat::from_rotation_y(std::f32::consts::PI)
            } else {
                Quat::IDENTITY
            };
        }
    }
}
