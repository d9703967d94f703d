//! Standalone UV tools editor with a demo scene.

use bevy::prelude::*;
use bevy_uv_tools::{spawn_demo_scene, UvToolsPlugin};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Bevy UV Tools".to_string(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(UvToolsPlugin)
        .add_systems(Startup, spawn_demo_scene)
        .run();
}
