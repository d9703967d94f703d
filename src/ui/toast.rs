//! Toast overlay for UV tool feedback.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use super::theme::{colors, status_color};
use crate::editor::EditorState;
use crate::tools::UvToolStatus;

pub struct ToastPlugin;

impl Plugin for ToastPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(EguiPrimaryContextPass, draw_toast);
    }
}

fn draw_toast(
    mut contexts: EguiContexts,
    editor_state: Res<EditorState>,
    status: Res<UvToolStatus>,
) -> Result {
    if !editor_state.ui_enabled {
        return Ok(());
    }
    let Some(toast) = &status.toast else {
        return Ok(());
    };

    let ctx = contexts.ctx_mut()?;
    let alpha = toast.alpha();
    let color = status_color(toast.level).gamma_multiply(alpha);

    egui::Area::new(egui::Id::new("uv_tool_toast"))
        .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -32.0))
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(colors::BG_DARKEST.gamma_multiply(alpha * 0.9))
                .stroke(egui::Stroke::new(1.0, color))
                .corner_radius(6)
                .inner_margin(egui::Margin::symmetric(12, 8))
                .show(ui, |ui| {
                    ui.label(egui::RichText::new(&toast.text).color(color));
                });
        });

    Ok(())
}
