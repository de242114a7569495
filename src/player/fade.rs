//! See-through occluders.
//!
//! Scenery tagged [`Occluder`] fades out while the player stands behind it
//! and fades back in when the player leaves.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::Player;
use crate::core::{GameState, PhaseTimer};

/// Alpha while the player overlaps the occluder.
pub const FADED_ALPHA: f32 = 0.75;
pub const FADE_SECONDS: f32 = 0.5;

/// Scenery that may hide the player.
#[derive(Component)]
pub struct Occluder;

/// A running alpha interpolation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlphaFade {
    pub destination: f32,
    timer: PhaseTimer,
}

impl AlphaFade {
    pub fn new(destination: f32, duration: f32) -> Self {
        Self {
            destination,
            timer: PhaseTimer::new(duration),
        }
    }

    /// Next alpha given the `current` one, or `None` once the fade is over.
    ///
    /// Each step lerps from the current alpha (not the starting one) by the
    /// elapsed fraction, so the curve eases out.
    pub fn step(&mut self, current: f32, dt: f32) -> Option<f32> {
        if self.timer.is_finished() {
            return None;
        }
        let alpha = current + (self.destination - current) * self.timer.fraction();
        self.timer.advance(dt);
        Some(alpha)
    }
}

/// Fades in progress, keyed by the occluder entity.
#[derive(Component, Default)]
pub struct ActiveFades(pub Vec<(Entity, AlphaFade)>);

impl ActiveFades {
    /// Start a fade on `target`, replacing any fade already running on it.
    pub fn start(&mut self, target: Entity, destination: f32) {
        self.0.retain(|(entity, _)| *entity != target);
        self.0.push((target, AlphaFade::new(destination, FADE_SECONDS)));
    }
}

pub fn setup_fade_systems(app: &mut App) {
    app.add_systems(
        Update,
        (start_occluder_fades, run_occluder_fades)
            .chain()
            .run_if(in_state(GameState::InGame)),
    );
}

/// Start fades from sensor overlap events between the player and occluders.
fn start_occluder_fades(
    mut collisions: EventReader<CollisionEvent>,
    mut player_query: Query<(Entity, &mut ActiveFades), With<Player>>,
    occluders: Query<(), With<Occluder>>,
) {
    let Ok((player, mut fades)) = player_query.get_single_mut() else {
        return;
    };

    for event in collisions.read() {
        let (a, b, destination) = match event {
            CollisionEvent::Started(a, b, _) => (*a, *b, FADED_ALPHA),
            CollisionEvent::Stopped(a, b, _) => (*a, *b, 1.0),
        };
        let other = if a == player {
            b
        } else if b == player {
            a
        } else {
            continue;
        };

        if occluders.get(other).is_ok() {
            fades.start(other, destination);
        }
    }
}

/// Advance fades and write alpha into occluder materials.
fn run_occluder_fades(
    time: Res<Time>,
    mut player_query: Query<&mut ActiveFades, With<Player>>,
    occluders: Query<&MeshMaterial3d<StandardMaterial>, With<Occluder>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Ok(mut fades) = player_query.get_single_mut() else {
        return;
    };
    let dt = time.delta_secs();

    fades.0.retain_mut(|(entity, fade)| {
        // Occluder despawned or lost its material: drop the fade quietly.
        let Ok(handle) = occluders.get(*entity) else {
            return false;
        };
        let Some(material) = materials.get_mut(&handle.0) else {
            return false;
        };

        match fade.step(material.base_color.alpha(), dt) {
            Some(alpha) => {
                material.base_color.set_alpha(alpha);
                true
            }
            None => false,
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_eases_toward_destination_and_ends() {
        let mut fade = AlphaFade::new(0.5, 0.5);
        let mut alpha = 1.0;
        let mut steps = 0;

        while let Some(next) = fade.step(alpha, 0.1) {
            assert!(next <= alpha);
            alpha = next;
            steps += 1;
        }

        assert_eq!(steps, 5);
        assert!(alpha < 1.0 && alpha > 0.5);
        assert_eq!(fade.step(alpha, 0.1), None);
    }

    #[test]
    fn first_step_keeps_current_alpha() {
        let mut fade = AlphaFade::new(0.0, 1.0);
        assert_eq!(fade.step(0.8, 0.5), Some(0.8));
        assert_eq!(fade.step(0.8, 0.5), Some(0.4));
    }

    #[test]
    fn restarting_a_fade_replaces_the_old_one() {
        let target = Entity::from_raw(7);
        let mut fades = ActiveFades::default();
        fades.start(target, FADED_ALPHA);
        fades.start(target, 1.0);

        assert_eq!(fades.0.len(), 1);
        assert_eq!(fades.0[0].1.destination, 1.0);
    }
}
