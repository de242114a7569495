//! Combat systems - attack sensing, attack timing, damage handling.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use super::cycle::CombatController;
use crate::core::{
    AnimationSink, Animator, AreaSensor, DamageEvent, DeathEvent, GameState,
    HealthCapability, RapierAreaSensor, SensorShape, Tick,
};
use crate::player::{Player, PlayerBindings};

/// System set ordering for combat.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CombatSet {
    Sense,
    Action,
    Damage,
}

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app
        .add_event::<CancelAttackEvent>()

        .configure_sets(
            Update,
            (CombatSet::Sense, CombatSet::Action, CombatSet::Damage)
                .chain()
                .run_if(in_state(GameState::InGame)),
        )

        .add_systems(Update, refresh_attack_targets.in_set(CombatSet::Sense))
        .add_systems(
            Update,
            (player_attack_input, handle_cancel_attack, resolve_attacks)
                .chain()
                .in_set(CombatSet::Action),
        )
        .add_systems(
            Update,
            (apply_damage, check_deaths).chain().in_set(CombatSet::Damage),
        );
}

/// Refresh the attack area snapshot of every attacker.
fn refresh_attack_targets(
    rapier_context: Query<&RapierContext>,
    mut attackers: Query<(Entity, &Transform, &AttackArea, &mut AttackTargets)>,
) {
    let Ok(context) = rapier_context.get_single() else {
        return;
    };

    for (entity, transform, area, mut targets) in attackers.iter_mut() {
        let center = area.center(transform);
        let sensor = RapierAreaSensor::new(context).excluding(entity);
        targets.0 = sensor.query(
            SensorShape::Cuboid {
                center,
                half_extents: area.half_extents,
            },
            area.mask,
        );
    }
}

/// Start player attacks while the attack button is held.
fn player_attack_input(
    time: Res<Time>,
    mouse: Res<ButtonInput<MouseButton>>,
    bindings: Res<PlayerBindings>,
    mut query: Query<(&mut CombatController, &mut Animator), With<Player>>,
) {
    if !mouse.pressed(bindings.attack) {
        return;
    }
    let Ok((mut combat, mut animator)) = query.get_single_mut() else {
        return;
    };

    if let Some(started) = combat.attack_handle(Tick::from_time(&time).now) {
        animator.set_trigger(&started.trigger);
    }
}

fn handle_cancel_attack(
    mut events: EventReader<CancelAttackEvent>,
    mut query: Query<&mut CombatController>,
) {
    for event in events.read() {
        if let Ok(mut combat) = query.get_mut(event.entity) {
            combat.cancel();
        }
    }
}

/// Land in-flight attacks whose wind-up has passed.
fn resolve_attacks(
    time: Res<Time>,
    mut attackers: Query<(Entity, &mut CombatController, &AttackTargets)>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    let now = Tick::from_time(&time).now;

    for (entity, mut combat, targets) in attackers.iter_mut() {
        let Some(resolved) = combat.advance(now, &targets.0) else {
            continue;
        };

        for target in resolved.targets {
            damage_events.send(DamageEvent {
                target,
                source: entity,
                amount: resolved.damage,
            });
        }
    }
}

/// Apply damage to entities through their health capability.
fn apply_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageEvent>,
    mut health_query: Query<&mut Health, Without<Dead>>,
    mut death_events: EventWriter<DeathEvent>,
) {
    // Track entities that died this frame to avoid duplicate death events
    let mut died_this_frame = std::collections::HashSet::new();

    for event in damage_events.read() {
        if died_this_frame.contains(&event.target) {
            continue;
        }
        // Targets without health just ignore the hit.
        let Ok(mut health) = health_query.get_mut(event.target) else {
            continue;
        };

        let dealt = health.take_damage(event.amount, event.source);
        debug!("{:?} took {:.1} damage from {:?}", event.target, dealt, event.source);

        if health.is_dead() {
            died_this_frame.insert(event.target);
            commands.entity(event.target).insert(Dead);
            death_events.send(DeathEvent {
                entity: event.target,
                killed_by: Some(event.source),
            });
        }
    }
}

/// Stop the dead from landing delayed hits and remove non-player bodies.
/// The player stays in place and is respawned after this set.
fn check_deaths(
    mut commands: Commands,
    mut death_events: EventReader<DeathEvent>,
    player_query: Query<Entity, With<Player>>,
    mut cancel_events: EventWriter<CancelAttackEvent>,
) {
    for event in death_events.read() {
        cancel_events.send(CancelAttackEvent {
            entity: event.entity,
        });

        if player_query.get(event.entity).is_ok() {
            info!("Player died, killed by {:?}", event.killed_by);
        } else {
            info!("{:?} died", event.entity);
            commands.entity(event.entity).despawn_recursive();
        }
    }
}
