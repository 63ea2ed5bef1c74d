//! Wirebound - Entry Point
//!
//! Controls:
//! - WASD: Roll (relative to the camera)
//! - Space: Jump (hold for a higher jump)
//! - Left Shift: Boost the current
//! - R: Restart once the level has ended

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Wirebound".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())

        // Our game plugin
        .add_plugins(wirebound::WireboundPlugin)

        .run();
}
