//! Enemy-related components.

use bevy::prelude::*;
use serde::Deserialize;

/// Marker component for all enemies.
#[derive(Component)]
pub struct Enemy;

/// Enemy type identifier (matches RON file name).
#[derive(Component, Clone, Debug)]
pub struct EnemyType(pub String);

/// Pursuit state machine for enemy behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnemyState {
    /// At home, roaming around the spawn point.
    #[default]
    Idle,
    /// Chasing a sensed target.
    FollowTarget,
    /// Target lost; heading to where it was last seen before giving up.
    WaitToReturn,
    /// Walking back to the spawn point.
    ReturnToSpawn,
}

/// Target classifications, matched in the order an enemy lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum PriorityTag {
    Player,
    Npc,
    Tower,
}

/// Classification of an entity that enemies can target.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tagged(pub PriorityTag);
