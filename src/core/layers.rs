//! Collision group assignments.
//!
//! Sensor masks in data files are raw bit sets over these groups.

use bevy_rapier3d::prelude::Group;

pub const PLAYER_GROUP: Group = Group::GROUP_1;
pub const ENEMY_GROUP: Group = Group::GROUP_2;
/// Friendly NPCs and defended structures.
pub const ALLY_GROUP: Group = Group::GROUP_3;
pub const SCENERY_GROUP: Group = Group::GROUP_4;
