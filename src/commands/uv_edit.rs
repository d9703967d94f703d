//! Undoable record of a UV tool action.

use bevy::prelude::*;

use super::EditorCommand;
use crate::modeling::{write_entity_uvs, UvChange};

/// UV arrays of every mesh a tool action touched, before and after.
pub struct UvEditCommand {
    pub description: String,
    pub changes: Vec<UvChange>,
}

impl EditorCommand for UvEditCommand {
    fn execute(&self, world: &mut World) {
        for change in &self.changes {
            write_entity_uvs(world, change.entity, &change.after);
        }
    }

    fn undo(&self, world: &mut World) {
        for change in &self.changes {
            write_entity_uvs(world, change.entity, &change.before);
        }
    }

    fn description(&self) -> &str {
        &self.description
    }
}
