use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::editor::EditorCamera;
use crate::modeling::mesh_id;
use crate::scene::SceneEntity;

use super::UvSelection;

/// Marker component for selected entities
#[derive(Component, Default)]
pub struct Selected;

/// Resource to track multi-selection state
#[derive(Resource, Default)]
pub struct SelectionState {
    pub multi_select: bool,
}

/// Selected entities in the order they were selected.
///
/// Kept in sync with the `Selected` marker by observers, so "first selected
/// mesh" means the same thing everywhere.
#[derive(Resource, Default, Debug)]
pub struct SelectionOrder(Vec<Entity>);

impl SelectionOrder {
    pub fn from_entities(entities: Vec<Entity>) -> Self {
        Self(entities)
    }

    pub fn entities(&self) -> &[Entity] {
        &self.0
    }

    pub fn first(&self) -> Option<Entity> {
        self.0.first().copied()
    }
}

pub struct PickingPlugin;

impl Plugin for PickingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SelectionState>()
            .init_resource::<SelectionOrder>()
            .add_observer(on_selected_added)
            .add_observer(on_selected_removed)
            .add_systems(
                Update,
                (
                    update_multi_select_state,
                    handle_click_selection,
                    prune_uv_selection,
                ),
            );
    }
}

fn on_selected_added(add: On<Add, Selected>, mut order: ResMut<SelectionOrder>) {
    if !order.0.contains(&add.entity) {
        order.0.push(add.entity);
    }
}

fn on_selected_removed(remove: On<Remove, Selected>, mut order: ResMut<SelectionOrder>) {
    order.0.retain(|e| *e != remove.entity);
}

/// Drop picked UV points whose mesh is no longer selected.
fn prune_uv_selection(order: Res<SelectionOrder>, mut uv_selection: ResMut<UvSelection>) {
    if !order.is_changed() {
        return;
    }
    let live: Vec<_> = order.entities().iter().map(|&e| mesh_id(e)).collect();
    uv_selection.points.retain(|p| live.contains(&p.mesh));
}

/// Track shift key for multi-selection
fn update_multi_select_state(keyboard: Res<ButtonInput<KeyCode>>, mut state: ResMut<SelectionState>) {
    state.multi_select = keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);
}

/// Handle click-to-select using raycasting
fn handle_click_selection(
    mouse_button: Res<ButtonInput<MouseButton>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<EditorCamera>>,
    spatial_query: SpatialQuery,
    scene_entities: Query<Entity, With<SceneEntity>>,
    parent_query: Query<&ChildOf>,
    selected: Query<Entity, With<Selected>>,
    selection_state: Res<SelectionState>,
    mut commands: Commands,
    mut contexts: EguiContexts,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }

    // Clicks on egui windows never reach the scene
    if let Ok(ctx) = contexts.ctx_mut() {
        if ctx.wants_pointer_input() || ctx.is_pointer_over_area() {
            return;
        }
    }

    let Ok(window) = window_query.single() else {
        return;
    };
    let Some(cursor_position) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor_position) else {
        return;
    };

    let hit = spatial_query.cast_ray(
        ray.origin,
        ray.direction,
        100.0,
        true,
        &SpatialQueryFilter::default(),
    );

    let Some(entity) = hit.and_then(|h| find_selectable_parent(h.entity, &scene_entities, &parent_query))
    else {
        if !selection_state.multi_select {
            for entity in selected.iter() {
                commands.entity(entity).remove::<Selected>();
            }
        }
        return;
    };

    if selection_state.multi_select {
        if selected.get(entity).is_ok() {
            commands.entity(entity).remove::<Selected>();
        } else {
            commands.entity(entity).insert(Selected);
        }
    } else {
        for other in selected.iter().filter(|e| *e != entity) {
            commands.entity(other).remove::<Selected>();
        }
        commands.entity(entity).insert(Selected);
    }
}

/// Walk up the parent hierarchy to find an entity with SceneEntity component
fn find_selectable_parent(
    entity: Entity,
    scene_entities: &Query<Entity, With<SceneEntity>>,
    parent_query: &Query<&ChildOf>,
) -> Option<Entity> {
    if scene_entities.get(entity).is_ok() {
        return Some(entity);
    }

    if let Ok(child_of) = parent_query.get(entity) {
        return find_selectable_parent(child_of.parent(), scene_entities, parent_query);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_order_follows_marker() {
        let mut app = App::new();
        app.init_resource::<SelectionOrder>()
            .add_observer(on_selected_added)
            .add_observer(on_selected_removed);

        let a = app.world_mut().spawn_empty().id();
        let b = app.world_mut().spawn_empty().id();
        app.world_mut().entity_mut(b).insert(Selected);
        app.world_mut().entity_mut(a).insert(Selected);
        assert_eq!(app.world().resource::<SelectionOrder>().entities(), &[b, a]);

        app.world_mut().entity_mut(b).remove::<Selected>();
        assert_eq!(app.world().resource::<SelectionOrder>().first(), Some(a));
    }
}
