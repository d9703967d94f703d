//! 2D UV editor panel.
//!
//! Shows UV space with a grid background and the wireframe of every
//! selected mesh. Points are picked here: click picks one, shift-click
//! toggles. Snap target points are drawn in orange, picked points in blue.

use bevy::prelude::*;
use bevy_egui::{egui, EguiPrimaryContextPass};
use uv_transfer::UvPoint;

use super::theme::colors;
use super::Settings;
use crate::editor::EditorState;
use crate::modeling::{mesh_id, EditMesh};
use crate::selection::{SelectionOrder, UvSelection};
use crate::tools::SelectShellEvent;

pub struct UvEditorPlugin;

impl Plugin for UvEditorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UvEditorState>()
            .add_systems(EguiPrimaryContextPass, draw_uv_editor_panel);
    }
}

/// Persistent state for the UV editor panel.
#[derive(Resource)]
pub struct UvEditorState {
    /// Pan offset in screen pixels.
    pub pan: egui::Vec2,
    /// Zoom level (pixels per UV unit).
    pub zoom: f32,
}

impl Default for UvEditorState {
    fn default() -> Self {
        Self {
            pan: egui::vec2(24.0, 24.0),
            zoom: 256.0,
        }
    }
}

/// Screen distance within which a click picks a point.
const PICK_RADIUS: f32 = 8.0;

const UV_BG: egui::Color32 = egui::Color32::from_rgb(30, 30, 35);
const UV_GRID_MAJOR: egui::Color32 = egui::Color32::from_rgb(60, 60, 70);
const UV_GRID_MINOR: egui::Color32 = egui::Color32::from_rgb(42, 42, 48);
const UV_BORDER: egui::Color32 = egui::Color32::from_rgb(100, 100, 120);
const UV_WIRE: egui::Color32 = egui::Color32::from_rgb(140, 140, 160);
const UV_POINT: egui::Color32 = egui::Color32::from_rgb(170, 170, 185);

/// What the panel learned from the pointer this frame.
enum PickAction {
    Set(UvPoint),
    Toggle(UvPoint),
    Clear,
}

fn draw_uv_editor_panel(world: &mut World) {
    if !world.resource::<EditorState>().ui_enabled || !world.resource::<Settings>().show_uv_editor {
        return;
    }

    // Gather the selected meshes
    let mut shown: Vec<(Entity, EditMesh)> = Vec::new();
    {
        let order: Vec<Entity> = world.resource::<SelectionOrder>().entities().to_vec();
        let meshes = world.resource::<Assets<Mesh>>();
        for entity in order {
            let Some(mesh3d) = world.get::<Mesh3d>(entity) else {
                continue;
            };
            if let Some(edit) = meshes.get(&mesh3d.0).and_then(EditMesh::from_bevy_mesh) {
                if edit.has_uvs {
                    shown.push((entity, edit));
                }
            }
        }
    }

    let (picked, target) = {
        let selection = world.resource::<UvSelection>();
        (selection.points.clone(), selection.snap_target.clone())
    };
    let (pan, zoom) = {
        let uv_state = world.resource::<UvEditorState>();
        (uv_state.pan, uv_state.zoom)
    };

    let ctx = {
        let Some(mut egui_ctx) = world
            .query::<&mut bevy_egui::EguiContext>()
            .iter_mut(world)
            .next()
        else {
            return;
        };
        egui_ctx.get_mut().clone()
    };

    let mut new_pan = pan;
    let mut new_zoom = zoom;
    let mut pick_action = None;
    let mut select_shell = false;

    egui::Window::new("UV Editor")
        .default_size([420.0, 460.0])
        .resizable(true)
        .collapsible(true)
        .show(&ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!picked.is_empty(), egui::Button::new("Select Shell"))
                    .clicked()
                {
                    select_shell = true;
                }
                if ui
                    .add_enabled(!picked.is_empty(), egui::Button::new("Clear"))
                    .clicked()
                {
                    pick_action = Some(PickAction::Clear);
                }
                ui.label(
                    egui::RichText::new(format!("{} picked, {} target", picked.len(), target.len()))
                        .small()
                        .color(colors::TEXT_MUTED),
                );
            });

            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;
            painter.rect_filled(rect, 0.0, UV_BG);

            if response.dragged_by(egui::PointerButton::Middle)
                || response.dragged_by(egui::PointerButton::Secondary)
            {
                new_pan += response.drag_delta();
            }

            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll.abs() > 0.0 && response.hovered() {
                let factor = 1.0 + scroll * 0.005;
                new_zoom = (new_zoom * factor).clamp(32.0, 2048.0);

                // Keep the UV under the cursor in place
                if let Some(hover) = response.hover_pos() {
                    let cursor_in_rect = hover - rect.left_top();
                    let old_uv = screen_to_uv(cursor_in_rect, new_pan, zoom);
                    let new_screen = uv_to_screen(old_uv, new_pan, new_zoom);
                    new_pan += cursor_in_rect - new_screen;
                }
            }

            // UV y points up, screen y points down
            let to_screen = |uv: Vec2| -> egui::Pos2 {
                rect.left_top() + uv_to_screen(egui::pos2(uv.x, 1.0 - uv.y), new_pan, new_zoom)
            };

            draw_grid(&painter, rect, new_pan, new_zoom);

            let corners = [
                to_screen(Vec2::new(0.0, 0.0)),
                to_screen(Vec2::new(1.0, 0.0)),
                to_screen(Vec2::new(1.0, 1.0)),
                to_screen(Vec2::new(0.0, 1.0)),
            ];
            for i in 0..4 {
                painter.line_segment(
                    [corners[i], corners[(i + 1) % 4]],
                    egui::Stroke::new(1.5, UV_BORDER),
                );
            }

            let mut screen_points = Vec::new();
            for (entity, edit) in &shown {
                for tri in &edit.triangles {
                    for i in 0..3 {
                        let a = tri[i] as usize;
                        let b = tri[(i + 1) % 3] as usize;
                        if a < edit.uvs.len() && b < edit.uvs.len() {
                            painter.line_segment(
                                [to_screen(edit.uvs[a]), to_screen(edit.uvs[b])],
                                egui::Stroke::new(0.5, UV_WIRE),
                            );
                        }
                    }
                }

                let id = mesh_id(*entity);
                for (index, uv) in edit.uvs.iter().enumerate() {
                    screen_points.push((UvPoint::new(id, index as u32), to_screen(*uv)));
                }
            }

            for (point, pos) in &screen_points {
                let (radius, color) = if picked.contains(point) {
                    (3.5, colors::ACCENT_BLUE)
                } else if target.contains(point) {
                    (3.0, colors::ACCENT_ORANGE)
                } else {
                    (1.5, UV_POINT)
                };
                painter.circle_filled(*pos, radius, color);
            }

            if response.clicked() {
                if let Some(cursor) = response.interact_pointer_pos() {
                    let shift = ui.input(|i| i.modifiers.shift);
                    pick_action = match nearest_point(&screen_points, cursor, PICK_RADIUS) {
                        Some(point) if shift => Some(PickAction::Toggle(point)),
                        Some(point) => Some(PickAction::Set(point)),
                        None if shift => None,
                        None => Some(PickAction::Clear),
                    };
                }
            }

            if shown.is_empty() {
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "Select a mesh with UVs",
                    egui::FontId::proportional(14.0),
                    colors::TEXT_MUTED,
                );
            }
        });

    {
        let mut uv_state = world.resource_mut::<UvEditorState>();
        uv_state.pan = new_pan;
        uv_state.zoom = new_zoom;
    }

    if let Some(action) = pick_action {
        let mut selection = world.resource_mut::<UvSelection>();
        match action {
            PickAction::Set(point) => selection.set(point),
            PickAction::Toggle(point) => selection.toggle(point),
            PickAction::Clear => selection.clear(),
        }
    }
    if select_shell {
        world.write_message(SelectShellEvent);
    }
}

/// Closest point to `cursor` within `radius` screen units.
fn nearest_point(
    points: &[(UvPoint, egui::Pos2)],
    cursor: egui::Pos2,
    radius: f32,
) -> Option<UvPoint> {
    points
        .iter()
        .map(|(point, pos)| (*point, pos.distance(cursor)))
        .filter(|(_, distance)| *distance <= radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(point, _)| point)
}

/// Convert UV coordinates to screen-space offset within the painter rect.
fn uv_to_screen(uv: egui::Pos2, pan: egui::Vec2, zoom: f32) -> egui::Vec2 {
    egui::vec2(uv.x * zoom + pan.x, uv.y * zoom + pan.y)
}

/// Convert screen-space offset to UV coordinates.
fn screen_to_uv(screen: egui::Vec2, pan: egui::Vec2, zoom: f32) -> egui::Pos2 {
    egui::pos2((screen.x - pan.x) / zoom, (screen.y - pan.y) / zoom)
}

/// Grid lines get denser as the view zooms in; whole UV units are major.
fn draw_grid(painter: &egui::Painter, rect: egui::Rect, pan: egui::Vec2, zoom: f32) {
    let uv_min = screen_to_uv(egui::Vec2::ZERO, pan, zoom);
    let uv_max = screen_to_uv(rect.size(), pan, zoom);

    let step = if zoom > 128.0 {
        0.125
    } else if zoom > 64.0 {
        0.25
    } else {
        0.5
    };

    let stroke = |value: f32| {
        let major = (value - value.round()).abs() < 1e-4;
        if major {
            egui::Stroke::new(1.0, UV_GRID_MAJOR)
        } else {
            egui::Stroke::new(0.5, UV_GRID_MINOR)
        }
    };

    for ix in (uv_min.x / step).floor() as i32..=(uv_max.x / step).ceil() as i32 {
        let x = ix as f32 * step;
        let sx = x * zoom + pan.x + rect.left();
        if sx >= rect.left() && sx <= rect.right() {
            painter.line_segment(
                [egui::pos2(sx, rect.top()), egui::pos2(sx, rect.bottom())],
                stroke(x),
            );
        }
    }

    for iy in (uv_min.y / step).floor() as i32..=(uv_max.y / step).ceil() as i32 {
        let y = iy as f32 * step;
        let sy = y * zoom + pan.y + rect.top();
        if sy >= rect.top() && sy <= rect.bottom() {
            painter.line_segment(
                [egui::pos2(rect.left(), sy), egui::pos2(rect.right(), sy)],
                stroke(y),
            );
        }
    }
}
