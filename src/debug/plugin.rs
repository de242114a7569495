//! Gizmo overlays, toggled at runtime.
//!
//! Enemies show their view radius tinted by pursuit state, their spawn point
//! and where they are heading. Attack areas show as boxes that turn red while
//! an attack is in flight.

use std::f32::consts::FRAC_PI_2;

use bevy::math::Isometry3d;
use bevy::prelude::*;

use crate::combat::{AttackArea, CombatController};
use crate::core::{plane_position, world_position, Animator, NavAgent};
use crate::enemies::{EnemyBrain, EnemyState, ViewSensor};
use crate::player::{Player, StaminaPool, IS_DASH_PARAM};

/// Key that shows or hides the overlays.
pub const DEBUG_DRAW_KEY: KeyCode = KeyCode::F3;

const GROUND_Y: f32 = 0.05;
const STAMINA_BAR_WIDTH: f32 = 1.2;
const STAMINA_BAR_HEIGHT: f32 = 1.9;

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DebugDraw {
    pub enabled: bool,
}

/// Debug plugin - gizmo overlays behind [`DEBUG_DRAW_KEY`].
pub struct DebugDrawPlugin;

impl Plugin for DebugDrawPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<DebugDraw>()
            .add_systems(Update, toggle_debug_draw)
            .add_systems(
                Update,
                (
                    draw_view_sensors,
                    draw_attack_areas,
                    draw_player_status,
                    log_animation_triggers,
                )
                    .run_if(debug_draw_enabled),
            );
    }
}

fn debug_draw_enabled(draw: Res<DebugDraw>) -> bool {
    draw.enabled
}

fn toggle_debug_draw(keyboard: Res<ButtonInput<KeyCode>>, mut draw: ResMut<DebugDraw>) {
    if keyboard.just_pressed(DEBUG_DRAW_KEY) {
        draw.enabled = !draw.enabled;
        info!("Debug overlays {}", if draw.enabled { "on" } else { "off" });
    }
}

pub fn state_color(state: EnemyState) -> Color {
    match state {
        EnemyState::Idle => Color::srgb(0.2, 0.8, 0.2),
        EnemyState::FollowTarget => Color::srgb(0.9, 0.1, 0.1),
        EnemyState::WaitToReturn => Color::srgb(0.9, 0.8, 0.1),
        EnemyState::ReturnToSpawn => Color::srgb(0.2, 0.4, 0.9),
    }
}

/// Flat isometry for a circle on the ground plane.
fn ground_circle(position: Vec2) -> Isometry3d {
    Isometry3d::new(
        world_position(position, GROUND_Y),
        Quat::from_rotation_x(FRAC_PI_2),
    )
}

/// World transform of the attack box for an attacker at `transform`.
pub fn attack_box(area: &AttackArea, transform: &Transform) -> Transform {
    Transform {
        translation: world_position(area.center(transform), transform.translation.y),
        rotation: transform.rotation,
        scale: Vec3::new(area.half_extents.x * 2.0, 1.0, area.half_extents.y * 2.0),
    }
}

fn draw_view_sensors(
    mut gizmos: Gizmos,
    enemies: Query<(&Transform, &ViewSensor, &EnemyBrain, &NavAgent)>,
) {
    for (transform, view, brain, agent) in enemies.iter() {
        let color = state_color(brain.state());
        gizmos.sphere(
            Isometry3d::from_translation(transform.translation),
            view.radius,
            color,
        );
        gizmos.circle(ground_circle(brain.spawn_point()), 0.3, Color::WHITE);

        let heading = brain.is_roaming() || brain.state() != EnemyState::Idle;
        if let (true, Some(destination)) = (heading, agent.destination) {
            gizmos.line(
                transform.translation,
                world_position(destination, transform.translation.y),
                color,
            );
        }

        if let (true, Some(target)) = (brain.is_waiting(), brain.target()) {
            gizmos.circle(ground_circle(target.last_position), 0.5, color);
        }
    }
}

fn draw_attack_areas(
    mut gizmos: Gizmos,
    attackers: Query<(&Transform, &AttackArea, Option<&CombatController>)>,
) {
    for (transform, area, combat) in attackers.iter() {
        let color = if combat.is_some_and(|c| c.is_attacking()) {
            Color::srgb(1.0, 0.1, 0.1)
        } else {
            Color::srgb(0.9, 0.9, 0.9)
        };
        gizmos.cuboid(attack_box(area, transform), color);
    }
}

fn draw_player_status(
    mut gizmos: Gizmos,
    players: Query<(&Transform, &StaminaPool, &Animator), With<Player>>,
) {
    for (transform, stamina, animator) in players.iter() {
        let start =
            transform.translation + Vec3::new(-STAMINA_BAR_WIDTH * 0.5, STAMINA_BAR_HEIGHT, 0.0);
        let end = start + Vec3::X * STAMINA_BAR_WIDTH * stamina.fraction();
        gizmos.line(start, end, Color::srgb(0.2, 0.9, 0.3));

        if animator.get_bool(IS_DASH_PARAM) {
            let ring = ground_circle(plane_position(transform.translation));
            gizmos.circle(ring, 0.6, Color::srgb(0.3, 0.8, 1.0));
        }
    }
}

/// Trace the animation triggers fired since the last frame.
fn log_animation_triggers(mut animators: Query<(Entity, &mut Animator)>) {
    for (entity, mut animator) in animators.iter_mut() {
        for trigger in animator.drain_triggers() {
            trace!("{:?} animation trigger {}", entity, trigger);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AnimationSink, ENEMY_GROUP};

    #[test]
    fn every_state_has_its_own_color() {
        let colors = [
            state_color(EnemyState::Idle),
            state_color(EnemyState::FollowTarget),
            state_color(EnemyState::WaitToReturn),
            state_color(EnemyState::ReturnToSpawn),
        ];
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn attack_box_covers_the_area_in_front() {
        let area = AttackArea {
            offset: 1.0,
            half_extents: Vec2::new(0.75, 0.5),
            mask: ENEMY_GROUP.bits(),
        };
        let transform = Transform::from_xyz(2.0, 0.8, -1.0);

        let cuboid = attack_box(&area, &transform);
        assert!(cuboid.translation.abs_diff_eq(Vec3::new(3.0, 0.8, -1.0), 1e-5));
        assert_eq!(cuboid.scale, Vec3::new(1.5, 1.0, 1.0));
    }

    #[test]
    fn key_toggles_overlays() {
        let mut app = App::new();
        app.init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<DebugDraw>()
            .add_systems(Update, toggle_debug_draw);

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(DEBUG_DRAW_KEY);
        app.update();
        assert!(app.world().resource::<DebugDraw>().enabled);

        // Still held, so no second toggle.
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().clear();
        app.update();
        assert!(app.world().resource::<DebugDraw>().enabled);

        let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keyboard.release(DEBUG_DRAW_KEY);
        keyboard.press(DEBUG_DRAW_KEY);
        app.update();
        assert!(!app.world().resource::<DebugDraw>().enabled);
    }

    #[test]
    fn triggers_are_drained_once_logged() {
        let mut app = App::new();
        app.add_systems(Update, log_animation_triggers);

        let mut animator = Animator::default();
        animator.set_trigger("Walk");
        let entity = app.world_mut().spawn(animator).id();

        app.update();
        assert_eq!(app.world().get::<Animator>(entity).unwrap().last_trigger(), None);
    }
}
