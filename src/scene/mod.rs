mod demo;

pub use demo::*;

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::modeling::EditMesh;

/// Marker component for entities that are part of the editable scene
#[derive(Component, Default, Reflect)]
#[reflect(Component)]
pub struct SceneEntity;

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<SceneEntity>()
            .add_systems(PostUpdate, attach_pick_colliders);
    }
}

/// Give every scene mesh a static trimesh collider so viewport clicks can
/// raycast against it.
///
/// Meshes whose asset is not loaded yet are retried next frame.
pub fn attach_pick_colliders(world: &mut World) {
    let mut pending: Vec<(Entity, Handle<Mesh>)> = Vec::new();
    {
        let mut query = world
            .query_filtered::<(Entity, &Mesh3d), (With<SceneEntity>, Without<Collider>)>();
        for (entity, mesh3d) in query.iter(world) {
            pending.push((entity, mesh3d.0.clone()));
        }
    }

    for (entity, handle) in pending {
        let Some(edit) = world
            .resource::<Assets<Mesh>>()
            .get(&handle)
            .and_then(EditMesh::from_bevy_mesh)
        else {
            continue;
        };
        let collider = Collider::trimesh(edit.positions, edit.triangles);
        if let Ok(mut entity_mut) = world.get_entity_mut(entity) {
            entity_mut.insert((collider, RigidBody::Static));
        }
    }
}
