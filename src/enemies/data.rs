//! Enemy data loading from RON files.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use super::brain::BrainConfig;
use super::components::PriorityTag;
use crate::combat::CombatDefinition;
use crate::core::{load_ron, ConfigError, ALLY_GROUP, DATA_DIR, PLAYER_GROUP};

/// Enemy definition loaded from RON file.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct EnemyDefinition {
    pub name: String,
    pub max_health: f32,
    pub move_speed: f32,
    /// Radius of the target sensor
    pub view_distance: f32,
    /// Collision groups the sensor looks at
    #[serde(default = "default_target_mask")]
    pub target_mask: u32,
    pub priority_tags: Vec<PriorityTag>,
    /// Seconds spent walking to a roam point
    pub roam_duration: f32,
    /// Pause before heading to a roam point
    pub roam_cooldown: f32,
    /// Offset range sampled on both axes around the spawn point
    pub roam_range: (f32, f32),
    #[serde(default = "default_return_delay")]
    pub return_delay: f32,
    #[serde(default = "default_color")]
    pub color: (f32, f32, f32),
    /// Attack chain; enemies without one only chase
    #[serde(default)]
    pub combat: Option<CombatDefinition>,
}

fn default_target_mask() -> u32 {
    (PLAYER_GROUP | ALLY_GROUP).bits()
}

fn default_return_delay() -> f32 {
    3.0
}

fn default_color() -> (f32, f32, f32) {
    (0.7, 0.15, 0.15)
}

impl EnemyDefinition {
    /// Brain tuning, rejecting roam ranges that can't be sampled.
    pub fn brain_config(&self) -> Result<BrainConfig, ConfigError> {
        let (min, max) = self.roam_range;
        if min > max {
            return Err(ConfigError::InvalidRoamRange {
                name: self.name.clone(),
                min,
                max,
            });
        }

        Ok(BrainConfig {
            priority_tags: self.priority_tags.clone(),
            roam_duration: self.roam_duration,
            roam_cooldown: self.roam_cooldown,
            roam_range: self.roam_range,
            return_delay: self.return_delay,
        })
    }
}

/// Resource holding all loaded enemy definitions.
#[derive(Resource, Default)]
pub struct EnemyRegistry {
    pub definitions: HashMap<String, EnemyDefinition>,
}

impl EnemyRegistry {
    /// Get an enemy definition by type name.
    pub fn get(&self, enemy_type: &str) -> Option<&EnemyDefinition> {
        self.definitions.get(enemy_type)
    }
}

/// Load all enemy definitions from the assets/data/enemies/ directory.
pub fn load_enemy_definitions(mut registry: ResMut<EnemyRegistry>) {
    let enemies_dir = Path::new(DATA_DIR).join("enemies");

    if !enemies_dir.exists() {
        warn!("Enemy definitions directory not found: {:?}", enemies_dir);
        return;
    }

    let Ok(entries) = fs::read_dir(&enemies_dir) else {
        warn!("Failed to read enemy definitions directory");
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if path.extension().is_some_and(|ext| ext == "ron") {
            let enemy_type = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown")
                .to_string();

            match load_ron::<EnemyDefinition>(&path) {
                Ok(definition) => {
                    info!("Loaded enemy definition: {} ({})", definition.name, enemy_type);
                    registry.definitions.insert(enemy_type, definition);
                }
                Err(e) => error!("{}", e),
            }
        }
    }

    info!("Loaded {} enemy definitions", registry.definitions.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parse_ron;

    const GOBLIN: &str = r#"(
        name: "Goblin",
        max_health: 30.0,
        move_speed: 2.5,
        view_distance: 6.0,
        priority_tags: [Player, Tower],
        roam_duration: 2.0,
        roam_cooldown: 1.0,
        roam_range: (-3.0, 3.0),
    )"#;

    #[test]
    fn definition_fills_defaults() {
        let definition: EnemyDefinition = parse_ron("goblin.ron", GOBLIN).unwrap();

        assert_eq!(definition.priority_tags, vec![PriorityTag::Player, PriorityTag::Tower]);
        assert_eq!(definition.return_delay, 3.0);
        assert_eq!(definition.target_mask, (PLAYER_GROUP | ALLY_GROUP).bits());

        let config = definition.brain_config().unwrap();
        assert_eq!(config.roam_range, (-3.0, 3.0));
        assert!(definition.combat.is_none());
    }

    #[test]
    fn definition_with_attack_chain() {
        let definition: EnemyDefinition = parse_ron(
            "goblin.ron",
            r#"(
                name: "Goblin",
                max_health: 30.0,
                move_speed: 2.5,
                view_distance: 6.0,
                priority_tags: [Player],
                roam_duration: 2.0,
                roam_cooldown: 1.0,
                roam_range: (-3.0, 3.0),
                combat: Some((
                    name: "Goblin",
                    attack_stat: 5.0,
                    target_mask: 5,
                    patterns: [(power: 1.0, delay: 0.4, cooldown: 1.5, tag: "Claw")],
                )),
            )"#,
        )
        .unwrap();

        let combat = definition.combat.unwrap();
        assert_eq!(combat.attack_stat, 5.0);
        assert_eq!(combat.attack_area().mask, 5);
        assert_eq!(combat.patterns[0].tag, "Claw");
    }

    #[test]
    fn inverted_roam_range_is_rejected() {
        let mut definition: EnemyDefinition = parse_ron("goblin.ron", GOBLIN).unwrap();
        definition.roam_range = (2.0, -2.0);

        assert_eq!(
            definition.brain_config(),
            Err(ConfigError::InvalidRoamRange {
                name: "Goblin".to_string(),
                min: 2.0,
                max: -2.0,
            })
        );
    }
}
