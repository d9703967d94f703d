//! Mesh selection (viewport picking, kept in pick order) and UV point selection.

mod picking;
mod uv_selection;

pub use picking::*;
pub use uv_selection::*;

use bevy::prelude::*;

pub struct SelectionPlugin;

impl Plugin for SelectionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UvSelection>()
            .add_plugins(PickingPlugin);
    }
}
