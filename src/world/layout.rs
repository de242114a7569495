//! Arena layout loaded from `arena.ron`.

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::{load_or_default, DATA_DIR};

/// Marker for everything the arena setup spawns, removed on restart.
#[derive(Component)]
pub struct ArenaEntity;

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct OccluderPlacement {
    pub position: (f32, f32),
    /// Width, height and depth
    pub size: (f32, f32, f32),
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct EnemyPlacement {
    /// File stem of the enemy definition
    pub enemy_type: String,
    pub position: (f32, f32),
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PickupPlacement {
    pub item_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub position: (f32, f32),
}

fn default_quantity() -> u32 {
    1
}

/// Positions are on the ground plane as `(x, z)`.
#[derive(Resource, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ArenaLayout {
    /// Half the side length of the square floor
    pub half_size: f32,
    pub player_spawn: (f32, f32),
    pub occluders: Vec<OccluderPlacement>,
    pub towers: Vec<(f32, f32)>,
    pub enemies: Vec<EnemyPlacement>,
    pub pickups: Vec<PickupPlacement>,
}

impl Default for ArenaLayout {
    fn default() -> Self {
        Self {
            half_size: 15.0,
            player_spawn: (0.0, 0.0),
            occluders: vec![OccluderPlacement {
                position: (0.0, -4.0),
                size: (3.0, 3.0, 1.0),
            }],
            towers: vec![(-8.0, 8.0)],
            enemies: vec![EnemyPlacement {
                enemy_type: "goblin".to_string(),
                position: (8.0, -8.0),
            }],
            pickups: Vec::new(),
        }
    }
}

impl ArenaLayout {
    pub fn contains(&self, (x, z): (f32, f32)) -> bool {
        x.abs() <= self.half_size && z.abs() <= self.half_size
    }

    /// Placements that fall off the floor, for warnings.
    pub fn out_of_bounds(&self) -> Vec<(f32, f32)> {
        std::iter::once(self.player_spawn)
            .chain(self.occluders.iter().map(|o| o.position))
            .chain(self.towers.iter().copied())
            .chain(self.enemies.iter().map(|e| e.position))
            .chain(self.pickups.iter().map(|p| p.position))
            .filter(|position| !self.contains(*position))
            .collect()
    }
}

pub fn load_arena_layout(mut commands: Commands) {
    let layout: ArenaLayout = load_or_default(format!("{DATA_DIR}/arena.ron"));
    for position in layout.out_of_bounds() {
        warn!("Arena placement {:?} lies outside the floor", position);
    }
    commands.insert_resource(layout);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parse_ron;

    #[test]
    fn partial_layout_keeps_defaults() {
        let layout: ArenaLayout = parse_ron(
            "arena.ron",
            r#"(
                player_spawn: (2.0, 3.0),
                pickups: [(item_id: "potion", position: (1.0, 1.0))],
            )"#,
        )
        .unwrap();

        assert_eq!(layout.half_size, 15.0);
        assert_eq!(layout.player_spawn, (2.0, 3.0));
        assert_eq!(layout.pickups[0].quantity, 1);
        assert_eq!(layout.enemies.len(), 1);
    }

    #[test]
    fn out_of_bounds_lists_stray_placements() {
        let mut layout = ArenaLayout::default();
        layout.towers.push((20.0, 0.0));
        layout.player_spawn = (0.0, -16.0);

        assert_eq!(layout.out_of_bounds(), vec![(0.0, -16.0), (20.0, 0.0)]);
    }
}
