//! Side panel with the UV transfer and snap tools.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use super::settings::{topology_check_combo, transfer_mode_combo, MAX_SNAP_THRESHOLD, MIN_SNAP_THRESHOLD};
use super::theme::{colors, status_color};
use super::{Settings, SettingsWindowState};
use crate::commands::{CommandHistory, RedoEvent, UndoEvent};
use crate::editor::EditorState;
use crate::scene::SceneEntity;
use crate::selection::{Selected, UvSelection};
use crate::tools::{
    CopyMeshEvent, CopyShellEvent, PasteMeshEvent, PasteShellEvent, SetSnapTargetEvent,
    SnapUvsEvent, UvClipboard, UvToolStatus,
};

pub struct UvToolsPanelPlugin;

impl Plugin for UvToolsPanelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(EguiPrimaryContextPass, draw_uv_tools_panel);
    }
}

#[derive(SystemParam)]
struct ToolWriters<'w> {
    copy_shell: MessageWriter<'w, CopyShellEvent>,
    paste_shell: MessageWriter<'w, PasteShellEvent>,
    copy_mesh: MessageWriter<'w, CopyMeshEvent>,
    paste_mesh: MessageWriter<'w, PasteMeshEvent>,
    set_target: MessageWriter<'w, SetSnapTargetEvent>,
    snap: MessageWriter<'w, SnapUvsEvent>,
    undo: MessageWriter<'w, UndoEvent>,
    redo: MessageWriter<'w, RedoEvent>,
}

#[derive(SystemParam)]
struct ToolState<'w> {
    settings: ResMut<'w, Settings>,
    settings_window: ResMut<'w, SettingsWindowState>,
    status: Res<'w, UvToolStatus>,
    clipboard: Res<'w, UvClipboard>,
    uv_selection: Res<'w, UvSelection>,
    history: Res<'w, CommandHistory>,
}

fn draw_uv_tools_panel(
    mut contexts: EguiContexts,
    editor_state: Res<EditorState>,
    objects: Query<(Entity, Option<&Name>, Option<&Mesh3d>, Has<Selected>), With<SceneEntity>>,
    meshes: Res<Assets<Mesh>>,
    mut commands: Commands,
    mut writers: ToolWriters,
    mut state: ToolState,
) -> Result {
    if !editor_state.ui_enabled || !state.settings.show_uv_tools {
        return Ok(());
    }

    let ctx = contexts.ctx_mut()?;
    let shift_held = ctx.input(|i| i.modifiers.shift);

    egui::SidePanel::left("uv_tools_panel")
        .default_width(260.0)
        .show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("UV Tools");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("Settings").clicked() {
                        state.settings_window.open = !state.settings_window.open;
                    }
                });
            });
            ui.separator();

            // Objects
            ui.label(egui::RichText::new("Objects").color(colors::TEXT_SECONDARY));
            let mut rows: Vec<_> = objects.iter().collect();
            rows.sort_by_key(|(_, name, _, _)| name.map(|n| n.as_str().to_lowercase()));
            egui::ScrollArea::vertical()
                .id_salt("uv_tools_objects")
                .max_height(160.0)
                .show(ui, |ui| {
                    for (entity, name, mesh3d, is_selected) in &rows {
                        let label = name
                            .map(|n| n.as_str().to_string())
                            .unwrap_or_else(|| format!("Entity {entity}"));
                        let uv_count = mesh3d
                            .and_then(|m| meshes.get(&m.0))
                            .and_then(|mesh| mesh.attribute(Mesh::ATTRIBUTE_UV_0))
                            .map(|uvs| uvs.len());
                        let suffix = match uv_count {
                            Some(n) => format!("{n} UVs"),
                            None => "no UVs".to_string(),
                        };

                        ui.horizontal(|ui| {
                            if ui.selectable_label(*is_selected, label.as_str()).clicked() {
                                select_object(&mut commands, &rows, *entity, *is_selected, shift_held);
                            }
                            ui.label(egui::RichText::new(suffix).small().color(colors::TEXT_MUTED));
                        });
                    }
                });
            ui.separator();

            // Shell transfer
            ui.label(egui::RichText::new("Shell").color(colors::TEXT_SECONDARY));
            ui.label(
                egui::RichText::new(format!("{} UV points picked", state.uv_selection.points.len()))
                    .small()
                    .color(colors::TEXT_MUTED),
            );
            ui.horizontal(|ui| {
                if ui.button("Copy Shell").on_hover_text("Ctrl+Shift+C").clicked() {
                    writers.copy_shell.write(CopyShellEvent);
                }
                let paste = ui.add_enabled(
                    !state.clipboard.shell.is_empty(),
                    egui::Button::new("Paste Shell"),
                );
                if paste.on_hover_text("Ctrl+Shift+V").clicked() {
                    writers
                        .paste_shell
                        .write(PasteShellEvent::from_settings(&state.settings));
                }
            });
            ui.horizontal(|ui| {
                ui.label("Mode:");
                let mut mode = state.settings.paste_mode;
                transfer_mode_combo(ui, "uv_tools_shell_mode", &mut mode);
                if mode != state.settings.paste_mode {
                    state.settings.paste_mode = mode;
                }
            });
            clipboard_line(ui, state.clipboard.shell.get());
            ui.separator();

            // Mesh transfer
            ui.label(egui::RichText::new("Whole Mesh").color(colors::TEXT_SECONDARY));
            ui.horizontal(|ui| {
                if ui.button("Copy UVs").clicked() {
                    writers.copy_mesh.write(CopyMeshEvent);
                }
                if ui
                    .add_enabled(!state.clipboard.mesh.is_empty(), egui::Button::new("Paste UVs"))
                    .clicked()
                {
                    writers.paste_mesh.write(PasteMeshEvent);
                }
            });
            clipboard_line(ui, state.clipboard.mesh.get());
            ui.horizontal(|ui| {
                ui.label("Topology:");
                let mut check = state.settings.topology_check;
                topology_check_combo(ui, "uv_tools_topology", &mut check);
                if check != state.settings.topology_check {
                    state.settings.topology_check = check;
                }
            });
            ui.separator();

            // Snap
            ui.label(egui::RichText::new("Snap").color(colors::TEXT_SECONDARY));
            let mut threshold = state.settings.snap_threshold;
            ui.add(
                egui::Slider::new(&mut threshold, MIN_SNAP_THRESHOLD..=MAX_SNAP_THRESHOLD)
                    .logarithmic(true)
                    .fixed_decimals(3)
                    .text("Threshold"),
            );
            if threshold != state.settings.snap_threshold {
                state.settings.snap_threshold = threshold;
            }
            ui.horizontal(|ui| {
                if ui
                    .button("Set Target")
                    .on_hover_text("Shells of the picked points become the snap target")
                    .clicked()
                {
                    writers.set_target.write(SetSnapTargetEvent);
                }
                let can_snap = !state.uv_selection.snap_target.is_empty()
                    && !state.uv_selection.points.is_empty();
                if ui.add_enabled(can_snap, egui::Button::new("Snap")).clicked() {
                    writers.snap.write(SnapUvsEvent { threshold });
                }
            });
            ui.label(
                egui::RichText::new(format!(
                    "Target: {} UV points",
                    state.uv_selection.snap_target.len()
                ))
                .small()
                .color(colors::TEXT_MUTED),
            );
            ui.separator();

            // History
            ui.horizontal(|ui| {
                let undo = ui.add_enabled(state.history.can_undo(), egui::Button::new("Undo"));
                if undo
                    .on_hover_text(state.history.undo_description().unwrap_or("Ctrl+Z"))
                    .clicked()
                {
                    writers.undo.write(UndoEvent);
                }
                let redo = ui.add_enabled(state.history.can_redo(), egui::Button::new("Redo"));
                if redo
                    .on_hover_text(state.history.redo_description().unwrap_or("Ctrl+Shift+Z"))
                    .clicked()
                {
                    writers.redo.write(RedoEvent);
                }
            });

            // Status
            if !state.status.line.is_empty() {
                ui.add_space(4.0);
                ui.label(egui::RichText::new(&state.status.line).color(status_color(state.status.level)));
            }
            if let Some(report) = &state.status.last_report {
                if !report.failures.is_empty() {
                    egui::CollapsingHeader::new(format!(
                        "{}: {} skipped",
                        report.title,
                        report.failures.len()
                    ))
                    .id_salt("uv_tools_last_report")
                    .show(ui, |ui| {
                        egui::ScrollArea::vertical()
                            .id_salt("uv_tools_failures")
                            .max_height(120.0)
                            .show(ui, |ui| {
                                for failure in &report.failures {
                                    ui.label(
                                        egui::RichText::new(format!(
                                            "{}: {}",
                                            failure.label, failure.reason
                                        ))
                                        .small()
                                        .color(colors::STATUS_WARNING),
                                    );
                                }
                            });
                    });
                }
            }
        });

    Ok(())
}

/// Click selects one object; shift-click toggles it.
fn select_object(
    commands: &mut Commands,
    rows: &[(Entity, Option<&Name>, Option<&Mesh3d>, bool)],
    entity: Entity,
    is_selected: bool,
    shift_held: bool,
) {
    if shift_held {
        if is_selected {
            commands.entity(entity).remove::<Selected>();
        } else {
            commands.entity(entity).insert(Selected);
        }
        return;
    }

    for (other, _, _, selected) in rows {
        if *selected && *other != entity {
            commands.entity(*other).remove::<Selected>();
        }
    }
    commands.entity(entity).insert(Selected);
}

fn clipboard_line(ui: &mut egui::Ui, snapshot: Option<&uv_transfer::UvSnapshot>) {
    let text = match snapshot {
        Some(s) if s.degraded_count() > 0 => format!(
            "Clipboard: {} ({} UVs, {} unanchored)",
            s.label(),
            s.len(),
            s.degraded_count()
        ),
        Some(s) => format!("Clipboard: {} ({} UVs)", s.label(), s.len()),
        None => "Clipboard: empty".to_string(),
    };
    ui.label(egui::RichText::new(text).small().color(colors::TEXT_MUTED));
}
