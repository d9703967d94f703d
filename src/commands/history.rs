use bevy::prelude::*;
use bevy_egui::EguiContexts;
use std::collections::VecDeque;

use crate::editor::EditorState;
use crate::utils::should_process_input;

/// Maximum number of undo/redo entries to keep
const MAX_HISTORY: usize = 100;

/// Trait for reversible commands
pub trait EditorCommand: Send + Sync {
    fn execute(&self, world: &mut World);
    fn undo(&self, world: &mut World);
    fn description(&self) -> &str;
}

/// Resource to manage undo/redo history
#[derive(Resource)]
pub struct CommandHistory {
    undo_stack: VecDeque<Box<dyn EditorCommand>>,
    redo_stack: VecDeque<Box<dyn EditorCommand>>,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self {
            undo_stack: VecDeque::with_capacity(MAX_HISTORY),
            redo_stack: VecDeque::with_capacity(MAX_HISTORY),
        }
    }
}

impl CommandHistory {
    /// Record an already-executed command. Clears the redo stack.
    pub fn push(&mut self, command: Box<dyn EditorCommand>) {
        self.redo_stack.clear();
        Self::push_bounded(&mut self.undo_stack, command);
    }

    fn push_bounded(stack: &mut VecDeque<Box<dyn EditorCommand>>, command: Box<dyn EditorCommand>) {
        if stack.len() >= MAX_HISTORY {
            stack.pop_front();
        }
        stack.push_back(command);
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.back().map(|c| c.description())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.back().map(|c| c.description())
    }

    pub fn len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo_stack.is_empty()
    }
}

/// Undo the most recent command. Returns its description.
pub fn undo(world: &mut World) -> Option<String> {
    let command = world.resource_mut::<CommandHistory>().undo_stack.pop_back()?;
    command.undo(world);
    let description = command.description().to_string();
    CommandHistory::push_bounded(&mut world.resource_mut::<CommandHistory>().redo_stack, command);
    Some(description)
}

/// Re-apply the most recently undone command. Returns its description.
pub fn redo(world: &mut World) -> Option<String> {
    let command = world.resource_mut::<CommandHistory>().redo_stack.pop_back()?;
    command.execute(world);
    let description = command.description().to_string();
    CommandHistory::push_bounded(&mut world.resource_mut::<CommandHistory>().undo_stack, command);
    Some(description)
}

/// Event to trigger undo
#[derive(Message)]
pub struct UndoEvent;

/// Event to trigger redo
#[derive(Message)]
pub struct RedoEvent;

pub struct HistoryPlugin;

impl Plugin for HistoryPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CommandHistory>()
            .add_message::<UndoEvent>()
            .add_message::<RedoEvent>()
            .add_systems(Update, (handle_undo_redo_input, handle_undo_redo_events).chain());
    }
}

fn handle_undo_redo_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    editor_state: Res<EditorState>,
    mut undo_events: MessageWriter<UndoEvent>,
    mut redo_events: MessageWriter<RedoEvent>,
    mut contexts: EguiContexts,
) {
    if !should_process_input(&editor_state, &mut contexts) {
        return;
    }

    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);

    if ctrl && keyboard.just_pressed(KeyCode::KeyZ) {
        if keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight) {
            redo_events.write(RedoEvent);
        } else {
            undo_events.write(UndoEvent);
        }
    }

    // Alternative: Ctrl+Y for redo
    if ctrl && keyboard.just_pressed(KeyCode::KeyY) {
        redo_events.write(RedoEvent);
    }
}

fn handle_undo_redo_events(
    mut undo_events: MessageReader<UndoEvent>,
    mut redo_events: MessageReader<RedoEvent>,
    mut commands: Commands,
) {
    for _ in undo_events.read() {
        commands.queue(|world: &mut World| match undo(world) {
            Some(description) => info!("Undo: {description}"),
            None => info!("Nothing to undo"),
        });
    }
    for _ in redo_events.read() {
        commands.queue(|world: &mut World| match redo(world) {
            Some(description) => info!("Redo: {description}"),
            None => info!("Nothing to redo"),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Resource, Default)]
    struct Counter(i32);

    struct AddAmount(i32);

    impl EditorCommand for AddAmount {
        fn execute(&self, world: &mut World) {
            world.resource_mut::<Counter>().0 += self.0;
        }
        fn undo(&self, world: &mut World) {
            world.resource_mut::<Counter>().0 -= self.0;
        }
        fn description(&self) -> &str {
            "Add"
        }
    }

    fn world() -> World {
        let mut world = World::new();
        world.init_resource::<Counter>();
        world.init_resource::<CommandHistory>();
        world
    }

    fn run(world: &mut World, amount: i32) {
        let command = AddAmount(amount);
        command.execute(world);
        world.resource_mut::<CommandHistory>().push(Box::new(command));
    }

    #[test]
    fn undo_then_redo_restores_state() {
        let mut world = world();
        run(&mut world, 2);
        run(&mut world, 5);

        assert_eq!(undo(&mut world).as_deref(), Some("Add"));
        assert_eq!(world.resource::<Counter>().0, 2);
        assert!(world.resource::<CommandHistory>().can_redo());

        redo(&mut world);
        assert_eq!(world.resource::<Counter>().0, 7);
        assert!(!world.resource::<CommandHistory>().can_redo());
    }

    #[test]
    fn new_command_clears_redo() {
        let mut world = world();
        run(&mut world, 1);
        undo(&mut world);
        run(&mut world, 3);
        assert!(redo(&mut world).is_none());
        assert_eq!(world.resource::<Counter>().0, 3);
    }

    #[test]
    fn history_is_bounded() {
        let mut world = world();
        for _ in 0..MAX_HISTORY + 10 {
            run(&mut world, 1);
        }
        assert_eq!(world.resource::<CommandHistory>().len(), MAX_HISTORY);
        assert!(undo(&mut world).is_some());
    }
}
