use avian3d::prelude::PhysicsPlugins;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use super::camera::EditorCameraPlugin;
use super::state::EditorStatePlugin;
use crate::commands::CommandsPlugin;
use crate::scene::ScenePlugin;
use crate::selection::SelectionPlugin;
use crate::tools::UvToolActionsPlugin;
use crate::ui::UiPlugin;

/// Main plugin that bundles the UV tools and the editor shell around them.
pub struct UvToolsPlugin;

impl Plugin for UvToolsPlugin {
    fn build(&self, app: &mut App) {
        app
            // Third-party plugins; physics only provides raycasts for picking
            .add_plugins(EguiPlugin::default())
            .add_plugins(PhysicsPlugins::default())
            // Editor core
            .add_plugins(EditorStatePlugin)
            .add_plugins(EditorCameraPlugin)
            .add_plugins(SelectionPlugin)
            .add_plugins(ScenePlugin)
            .add_plugins(CommandsPlugin)
            .add_plugins(UvToolActionsPlugin)
            // UI
            .add_plugins(UiPlugin)
            .add_systems(Startup, setup_editor_lighting);
    }
}

fn setup_editor_lighting(mut commands: Commands) {
    commands.spawn(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
        affects_lightmapped_meshes: true,
    });
}
