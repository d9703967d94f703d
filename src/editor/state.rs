use bevy::prelude::*;

/// Editor-wide state resource
#[derive(Debug, Resource)]
pub struct EditorState {
    /// Whether the editor is active (F10 to toggle).
    /// When false, all UI and hotkeys are disabled
    pub editor_active: bool,
    /// Whether the editor UI is enabled
    pub ui_enabled: bool,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            editor_active: true,
            ui_enabled: true,
        }
    }
}

/// Event to toggle the editor on/off (F10)
#[derive(Message)]
pub struct ToggleEditorEvent;

pub struct EditorStatePlugin;

impl Plugin for EditorStatePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EditorState>()
            .add_message::<ToggleEditorEvent>()
            .add_systems(Update, (handle_toggle_key, handle_toggle_editor).chain());
    }
}

fn handle_toggle_key(keyboard: Res<ButtonInput<KeyCode>>, mut events: MessageWriter<ToggleEditorEvent>) {
    if keyboard.just_pressed(KeyCode::F10) {
        events.write(ToggleEditorEvent);
    }
}

fn handle_toggle_editor(
    mut events: MessageReader<ToggleEditorEvent>,
    mut editor_state: ResMut<EditorState>,
) {
    for _ in events.read() {
        editor_state.editor_active = !editor_state.editor_active;
        editor_state.ui_enabled = editor_state.editor_active;
        info!(
            "Editor {}",
            if editor_state.editor_active { "enabled" } else { "disabled" }
        );
    }
}
