//! UV tool actions: copy/paste of shells and whole meshes, and snapping.
//!
//! The panels and hotkeys only write messages. The handlers turn each
//! message into an exclusive [`Command`] from [`actions`], which runs the
//! operation against a snapshot of the scene.

mod actions;
mod status;

pub use actions::*;
pub use status::*;

use bevy::prelude::*;
use bevy_egui::EguiContexts;
use uv_transfer::{Clipboard, TransferMode};

use crate::editor::EditorState;
use crate::ui::Settings;
use crate::utils::should_process_input;

/// Copied UV data. Shells and whole meshes are kept apart so copying one
/// never clobbers the other.
#[derive(Resource, Default)]
pub struct UvClipboard {
    pub shell: Clipboard,
    pub mesh: Clipboard,
}

#[derive(Message)]
pub struct CopyShellEvent;

#[derive(Message, Debug, PartialEq)]
pub struct PasteShellEvent {
    pub mode: TransferMode,
}

impl PasteShellEvent {
    /// Paste in the mode the user last chose, from the panel or Settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            mode: settings.paste_mode,
        }
    }
}

#[derive(Message)]
pub struct CopyMeshEvent;

#[derive(Message)]
pub struct PasteMeshEvent;

#[derive(Message)]
pub struct SnapUvsEvent {
    pub threshold: f32,
}

#[derive(Message)]
pub struct SetSnapTargetEvent;

#[derive(Message)]
pub struct SelectShellEvent;

pub struct UvToolActionsPlugin;

impl Plugin for UvToolActionsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UvClipboard>()
            .init_resource::<UvToolStatus>()
            .add_message::<CopyShellEvent>()
            .add_message::<PasteShellEvent>()
            .add_message::<CopyMeshEvent>()
            .add_message::<PasteMeshEvent>()
            .add_message::<SnapUvsEvent>()
            .add_message::<SetSnapTargetEvent>()
            .add_message::<SelectShellEvent>()
            .add_systems(
                Update,
                (
                    handle_shortcuts,
                    (handle_transfer_events, handle_snap_events),
                )
                    .chain(),
            )
            .add_systems(Update, tick_toast);
    }
}

/// Ctrl+Shift+C / Ctrl+Shift+V copy and paste the selected shell.
fn handle_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    editor_state: Res<EditorState>,
    settings: Res<Settings>,
    mut copy_events: MessageWriter<CopyShellEvent>,
    mut paste_events: MessageWriter<PasteShellEvent>,
    mut contexts: EguiContexts,
) {
    if !should_process_input(&editor_state, &mut contexts) {
        return;
    }

    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    let shift = keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);
    if !(ctrl && shift) {
        return;
    }

    if keyboard.just_pressed(KeyCode::KeyC) {
        copy_events.write(CopyShellEvent);
    }
    if keyboard.just_pressed(KeyCode::KeyV) {
        paste_events.write(PasteShellEvent::from_settings(&settings));
    }
}

fn handle_transfer_events(
    mut copy_shell: MessageReader<CopyShellEvent>,
    mut paste_shell: MessageReader<PasteShellEvent>,
    mut copy_mesh: MessageReader<CopyMeshEvent>,
    mut paste_mesh: MessageReader<PasteMeshEvent>,
    mut commands: Commands,
) {
    for _ in copy_shell.read() {
        commands.queue(CopyShellAction);
    }
    for event in paste_shell.read() {
        commands.queue(PasteShellAction { mode: event.mode });
    }
    for _ in copy_mesh.read() {
        commands.queue(CopyMeshAction);
    }
    for _ in paste_mesh.read() {
        commands.queue(PasteMeshAction);
    }
}

fn handle_snap_events(
    mut select_shell: MessageReader<SelectShellEvent>,
    mut set_target: MessageReader<SetSnapTargetEvent>,
    mut snap: MessageReader<SnapUvsEvent>,
    mut commands: Commands,
) {
    for _ in select_shell.read() {
        commands.queue(SelectShellAction);
    }
    for _ in set_target.read() {
        commands.queue(SetSnapTargetAction);
    }
    for event in snap.read() {
        commands.queue(SnapAction {
            threshold: event.threshold,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_paste_mode_follows_settings() {
        let mut settings = Settings::default();
        assert_eq!(
            PasteShellEvent::from_settings(&settings).mode,
            TransferMode::CentroidRelative
        );

        settings.paste_mode = TransferMode::Absolute;
        let reloaded = Settings::from_ron(
            &ron::ser::to_string_pretty(&settings, ron::ser::PrettyConfig::default()).unwrap(),
        )
        .unwrap();
        assert_eq!(
            PasteShellEvent::from_settings(&reloaded),
            PasteShellEvent {
                mode: TransferMode::Absolute
            }
        );
    }
}
