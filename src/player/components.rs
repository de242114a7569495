//! Player-related components and tuning.

use bevy::prelude::*;
use serde::Deserialize;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Movement state of a controller. Exactly one is active per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MovementState {
    #[default]
    Idle,
    Walk,
    Sprint,
    Dash,
}

impl MovementState {
    /// Animation trigger name for this state.
    pub fn name(self) -> &'static str {
        match self {
            MovementState::Idle => "Idle",
            MovementState::Walk => "Walk",
            MovementState::Sprint => "Sprint",
            MovementState::Dash => "Dash",
        }
    }

    /// Sprinting and dashing block stamina regeneration.
    pub fn drains_stamina(self) -> bool {
        matches!(self, MovementState::Sprint | MovementState::Dash)
    }
}

/// Horizontal facing derived from input.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Player movement and stamina tuning, loaded from `player.ron`.
#[derive(Resource, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    /// Base movement speed in units per second
    pub walk_speed: f32,
    pub sprint_speed: f32,
    pub dash_speed: f32,
    /// Seconds spent dashing
    pub dash_duration: f32,
    /// Lockout after a dash ends before another can start
    pub dash_cooldown: f32,

    pub max_stamina: f32,
    /// Stamina per second once regeneration kicks in
    pub stamina_regen_rate: f32,
    /// Seconds without draining before regeneration starts
    pub stamina_regen_cooldown: f32,
    /// Stamina per second while sprinting
    pub sprint_stamina_drain: f32,
    /// Flat cost charged when a dash starts
    pub dash_stamina_cost: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            walk_speed: 3.0,
            sprint_speed: 5.0,
            dash_speed: 12.0,
            dash_duration: 0.2,
            dash_cooldown: 0.5,
            max_stamina: 100.0,
            stamina_regen_rate: 10.0,
            stamina_regen_cooldown: 2.0,
            sprint_stamina_drain: 20.0,
            dash_stamina_cost: 25.0,
        }
    }
}

/// Key bindings for the player.
#[derive(Resource, Debug, Clone)]
pub struct PlayerBindings {
    pub up: KeyCode,
    pub down: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub sprint: KeyCode,
    pub dash: KeyCode,
    pub attack: MouseButton,
}

impl Default for PlayerBindings {
    fn default() -> Self {
        Self {
            up: KeyCode::KeyW,
            down: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            sprint: KeyCode::ShiftLeft,
            dash: KeyCode::ControlLeft,
            attack: MouseButton::Left,
        }
    }
}
