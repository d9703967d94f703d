mod history;
mod uv_edit;

pub use history::*;
pub use uv_edit::*;

use bevy::prelude::*;

pub struct CommandsPlugin;

impl Plugin for CommandsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(HistoryPlugin);
    }
}
