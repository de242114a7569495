//! Combat-related components.

use bevy::prelude::*;
use serde::Deserialize;

use super::cycle::AttackPattern;
use crate::core::{plane_position, ConfigError, HealthCapability, ENEMY_GROUP};

/// Component for entities that can take damage.
#[derive(Component, Debug, Clone)]
pub struct Health {
    pub current: f32,
    pub maximum: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            maximum: max,
        }
    }

    pub fn heal(&mut self, amount: f32) -> f32 {
        let actual = amount.min(self.maximum - self.current);
        self.current += actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

impl HealthCapability for Health {
    fn take_damage(&mut self, amount: f32, _source: Entity) -> f32 {
        let actual = amount.min(self.current);
        self.current -= actual;
        actual
    }
}

/// Marker component for entities that have died (prevents multiple death events).
#[derive(Component)]
pub struct Dead;

/// Attack volume in front of an attacker.
#[derive(Component, Debug, Clone)]
pub struct AttackArea {
    /// Distance from the attacker to the centre of the box
    pub offset: f32,
    pub half_extents: Vec2,
    /// Collision groups that can be hit
    pub mask: u32,
}

impl AttackArea {
    /// Ground-plane centre of the box for an attacker at `transform`.
    pub fn center(&self, transform: &Transform) -> Vec2 {
        let forward = plane_position(transform.right().as_vec3()).normalize_or_zero();
        plane_position(transform.translation) + forward * self.offset
    }
}

/// Entities inside the attack area, refreshed every tick.
#[derive(Component, Debug, Default, Clone)]
pub struct AttackTargets(pub Vec<Entity>);

/// Request to abort an entity's in-flight attack.
#[derive(Event, Debug, Clone)]
pub struct CancelAttackEvent {
    pub entity: Entity,
}

/// Combat tuning for one attacker, loaded from `combat.ron`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CombatDefinition {
    pub name: String,
    /// Base damage multiplied by each pattern's power
    pub attack_stat: f32,
    pub attack_offset: f32,
    /// Full width and depth of the attack box
    pub attack_area: (f32, f32),
    pub target_mask: u32,
    pub patterns: Vec<AttackPattern>,
}

impl Default for CombatDefinition {
    fn default() -> Self {
        Self {
            name: "player".to_string(),
            attack_stat: 10.0,
            attack_offset: 1.0,
            attack_area: (1.5, 1.0),
            target_mask: ENEMY_GROUP.bits(),
            patterns: vec![
                AttackPattern::new(1.0, 0.2, 0.4, "AttackState0"),
                AttackPattern::new(1.2, 0.2, 0.4, "AttackState1"),
                AttackPattern::new(2.0, 0.3, 0.8, "AttackState2"),
            ],
        }
    }
}

impl CombatDefinition {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.patterns.is_empty() {
            return Err(ConfigError::EmptyAttackPatterns(self.name.clone()));
        }
        Ok(())
    }

    pub fn attack_area(&self) -> AttackArea {
        AttackArea {
            offset: self.attack_offset,
            half_extents: Vec2::new(self.attack_area.0, self.attack_area.1) * 0.5,
            mask: self.target_mask,
        }
    }
}

/// Loaded combat definition for the player.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerCombat(pub CombatDefinition);
