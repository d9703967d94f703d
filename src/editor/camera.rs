use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use super::EditorState;
use crate::ui::Settings;

/// Closest the orbit camera may get to its focus
const MIN_RADIUS: f32 = 1.0;
/// Farthest the orbit camera may get from its focus
const MAX_RADIUS: f32 = 60.0;
/// Radius change per scroll unit, as a fraction of the current radius
const ZOOM_SPEED: f32 = 0.1;

pub struct EditorCameraPlugin;

impl Plugin for EditorCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_editor_camera)
            .add_systems(Update, (camera_orbit, camera_zoom, apply_orbit).chain());
    }
}

/// Marker component for the editor camera
#[derive(Component)]
pub struct EditorCamera;

/// Orbit camera state
#[derive(Component)]
pub struct OrbitCamera {
    pub focus: Vec3,
    pub radius: f32,
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            focus: Vec3::new(0.0, 0.5, 0.5),
            radius: 9.0,
            yaw: 0.0,
            pitch: -std::f32::consts::FRAC_PI_6, // Look slightly down
        }
    }
}

impl OrbitCamera {
    /// Camera transform for the current orbit parameters.
    pub fn transform(&self) -> Transform {
        let rotation = Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0);
        let position = self.focus + rotation * Vec3::new(0.0, 0.0, self.radius);
        Transform::from_translation(position).with_rotation(rotation)
    }
}

fn spawn_editor_camera(mut commands: Commands) {
    let orbit = OrbitCamera::default();
    commands.spawn((EditorCamera, Camera3d::default(), orbit.transform(), orbit));
}

/// Orbit around the focus with right mouse button drag
fn camera_orbit(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    settings: Res<Settings>,
    editor_state: Res<EditorState>,
    mut query: Query<&mut OrbitCamera, With<EditorCamera>>,
    mut contexts: EguiContexts,
) {
    if !editor_state.editor_active || !mouse_button.pressed(MouseButton::Right) {
        return;
    }

    // Don't capture mouse when UI wants pointer input
    if let Ok(ctx) = contexts.ctx_mut() {
        if ctx.wants_pointer_input() || ctx.is_pointer_over_area() {
            return;
        }
    }

    let delta = mouse_motion.delta;
    if delta == Vec2::ZERO {
        return;
    }

    for mut orbit in &mut query {
        orbit.yaw -= delta.x * settings.camera_sensitivity;
        orbit.pitch = (orbit.pitch - delta.y * settings.camera_sensitivity)
            .clamp(-std::f32::consts::FRAC_PI_2 + 0.1, std::f32::consts::FRAC_PI_2 - 0.1);
    }
}

/// Scroll to move toward / away from the focus
fn camera_zoom(
    scroll: Res<AccumulatedMouseScroll>,
    mut query: Query<&mut OrbitCamera, With<EditorCamera>>,
    mut contexts: EguiContexts,
) {
    if let Ok(ctx) = contexts.ctx_mut() {
        if ctx.wants_pointer_input() || ctx.is_pointer_over_area() {
            return;
        }
    }

    let scroll_y = scroll.delta.y;
    if scroll_y == 0.0 {
        return;
    }

    for mut orbit in &mut query {
        orbit.radius = (orbit.radius * (1.0 - scroll_y * ZOOM_SPEED)).clamp(MIN_RADIUS, MAX_RADIUS);
    }
}

fn apply_orbit(mut query: Query<(&OrbitCamera, &mut Transform), Changed<OrbitCamera>>) {
    for (orbit, mut transform) in &mut query {
        *transform = orbit.transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orbit_transform_looks_at_focus() {
        let orbit = OrbitCamera {
            focus: Vec3::new(1.0, 2.0, 3.0),
            radius: 5.0,
            yaw: 0.7,
            pitch: -0.4,
        };
        let transform = orbit.transform();
        assert!((transform.translation.distance(orbit.focus) - 5.0).abs() < 1e-4);
        let to_focus = (orbit.focus - transform.translation).normalize();
        assert!(transform.forward().dot(to_focus) > 0.999);
    }
}
