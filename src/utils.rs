//! Shared utility functions for the editor

use bevy_egui::EguiContexts;

use crate::editor::EditorState;

/// Check if keyboard input should be processed by editor systems.
///
/// Returns `false` (block input) if:
/// - The editor is disabled (`editor_state.editor_active` is false)
/// - The egui UI wants keyboard input (e.g., text fields are focused)
pub fn should_process_input(editor_state: &EditorState, contexts: &mut EguiContexts) -> bool {
    if !editor_state.editor_active {
        return false;
    }

    if let Ok(ctx) = contexts.ctx_mut() {
        if ctx.wants_keyboard_input() {
            return false;
        }
    }

    true
}
