//! Brawler - Entry Point
//!
//! Controls:
//! - WASD: Move
//! - Shift: Sprint
//! - Ctrl: Dash
//! - Left mouse: Attack
//! - Escape: Pause/Unpause
//! - F5: Restart

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Brawler".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())

        .add_plugins(brawler::BrawlerPlugin)

        .run();
}
