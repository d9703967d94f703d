mod settings;
mod theme;
mod toast;
mod uv_editor_panel;
mod uv_tools_panel;

pub use settings::*;
pub use theme::*;
pub use toast::*;
pub use uv_editor_panel::*;
pub use uv_tools_panel::*;

use bevy::prelude::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(SettingsPlugin)
            .add_plugins(ThemePlugin)
            .add_plugins(UvToolsPanelPlugin)
            .add_plugins(UvEditorPlugin)
            .add_plugins(ToastPlugin);
    }
}
