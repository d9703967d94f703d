//! [`UvHost`] implementation over the editor's scene meshes.
//!
//! The host is a working copy: it snapshots every `SceneEntity` mesh into an
//! [`EditMesh`], lets the tools read and write UVs in memory, then flushes the
//! changed meshes back to new `Mesh3d` handles in one go.

use bevy::prelude::*;
use std::collections::HashMap;
use uv_transfer::{
    ComponentKind, LookupError, MeshCounts, MeshId, SelectedComponent, UvConnectivity, UvHost,
    UvPoint, VertexId, WriteError,
};

use super::edit_mesh::{mesh_with_uvs, EditMesh};
use crate::scene::SceneEntity;
use crate::selection::{SelectionOrder, UvSelection};

/// Stable host id of a scene entity.
pub fn mesh_id(entity: Entity) -> MeshId {
    MeshId(entity.to_bits())
}

struct HostMesh {
    entity: Entity,
    label: String,
    edit: EditMesh,
    anchors: Vec<Option<VertexId>>,
    counts: MeshCounts,
    connectivity: UvConnectivity,
    original: Vec<Vec2>,
}

/// UVs of one entity before and after a tool action.
#[derive(Debug, Clone, PartialEq)]
pub struct UvChange {
    pub entity: Entity,
    pub before: Vec<Vec2>,
    pub after: Vec<Vec2>,
}

/// Working copy of the scene's UV data.
pub struct SceneUvHost {
    meshes: HashMap<MeshId, HostMesh>,
    /// Scene objects without a triangle mesh, kept so they can be reported
    non_meshes: HashMap<MeshId, String>,
    selected_meshes: Vec<MeshId>,
    uv_selection: Vec<UvPoint>,
}

impl SceneUvHost {
    /// Snapshot every scene mesh and the current selections.
    pub fn capture(world: &mut World) -> Self {
        let mut entries = Vec::new();
        {
            let mut query = world
                .query_filtered::<(Entity, Option<&Mesh3d>, Option<&Name>), With<SceneEntity>>();
            for (entity, mesh3d, name) in query.iter(world) {
                let label = name
                    .map(|n| n.as_str().to_string())
                    .unwrap_or_else(|| format!("Entity {entity}"));
                entries.push((entity, mesh3d.map(|m| m.0.clone()), label));
            }
        }

        let mut meshes = HashMap::new();
        let mut non_meshes = HashMap::new();
        {
            let assets = world.resource::<Assets<Mesh>>();
            for (entity, handle, label) in entries {
                let edit = handle
                    .and_then(|h| assets.get(&h))
                    .and_then(EditMesh::from_bevy_mesh);
                match edit {
                    Some(edit) => {
                        meshes.insert(mesh_id(entity), HostMesh::new(entity, label, edit));
                    }
                    None => {
                        debug!("{label} is not a triangle mesh");
                        non_meshes.insert(mesh_id(entity), label);
                    }
                }
            }
        }

        // Every selected scene object stays a target, meshes or not
        let selected_meshes = world
            .resource::<SelectionOrder>()
            .entities()
            .iter()
            .map(|&e| mesh_id(e))
            .filter(|id| meshes.contains_key(id) || non_meshes.contains_key(id))
            .collect();
        let uv_selection = world.resource::<UvSelection>().points.clone();

        Self {
            meshes,
            non_meshes,
            selected_meshes,
            uv_selection,
        }
    }

    /// Build a host from prepared meshes, without a world.
    pub fn from_meshes(
        meshes: impl IntoIterator<Item = (Entity, String, EditMesh)>,
        selected_meshes: Vec<Entity>,
        uv_selection: Vec<UvPoint>,
    ) -> Self {
        Self {
            meshes: meshes
                .into_iter()
                .map(|(entity, label, edit)| (mesh_id(entity), HostMesh::new(entity, label, edit)))
                .collect(),
            non_meshes: HashMap::new(),
            selected_meshes: selected_meshes.into_iter().map(mesh_id).collect(),
            uv_selection,
        }
    }

    /// Entity behind a host id.
    pub fn entity(&self, mesh: MeshId) -> Option<Entity> {
        self.meshes.get(&mesh).map(|m| m.entity)
    }

    /// UVs of a mesh as they currently stand in the working copy.
    pub fn uvs(&self, mesh: MeshId) -> Option<&[Vec2]> {
        self.meshes.get(&mesh).map(|m| m.edit.uvs.as_slice())
    }

    /// Meshes whose UVs differ from the captured state.
    pub fn changes(&self) -> Vec<UvChange> {
        let mut changes: Vec<UvChange> = self
            .meshes
            .values()
            .filter(|m| m.edit.uvs != m.original)
            .map(|m| UvChange {
                entity: m.entity,
                before: m.original.clone(),
                after: m.edit.uvs.clone(),
            })
            .collect();
        changes.sort_by_key(|c| c.entity);
        changes
    }

    /// Write every changed mesh back to the world and return the changes.
    pub fn flush(self, world: &mut World) -> Vec<UvChange> {
        let changes = self.changes();
        for change in &changes {
            write_entity_uvs(world, change.entity, &change.after);
        }
        changes
    }
}

impl HostMesh {
    fn new(entity: Entity, label: String, edit: EditMesh) -> Self {
        Self {
            entity,
            label,
            anchors: edit.uv_anchors(),
            counts: edit.counts(),
            connectivity: edit.uv_connectivity(),
            original: edit.uvs.clone(),
            edit,
        }
    }
}

/// Replace the UV channel of `entity`'s mesh with `uvs`.
///
/// The mesh asset is cloned and swapped in under a new handle, so other
/// entities sharing the old asset keep their UVs.
pub fn write_entity_uvs(world: &mut World, entity: Entity, uvs: &[Vec2]) {
    let Some(handle) = world.get::<Mesh3d>(entity).map(|m| m.0.clone()) else {
        warn!("Entity {entity} has no mesh, UV write dropped");
        return;
    };
    let Some(mesh) = world
        .resource::<Assets<Mesh>>()
        .get(&handle)
        .map(|m| mesh_with_uvs(m, uvs))
    else {
        warn!("Mesh asset for entity {entity} is not loaded, UV write dropped");
        return;
    };

    let new_handle = world.resource_mut::<Assets<Mesh>>().add(mesh);
    if let Ok(mut entity_mut) = world.get_entity_mut(entity) {
        entity_mut.insert(Mesh3d(new_handle));
    }
}

impl UvHost for SceneUvHost {
    fn current_selection(&self, filter: ComponentKind) -> Vec<SelectedComponent> {
        match filter {
            ComponentKind::Uv => self
                .uv_selection
                .iter()
                .copied()
                .map(SelectedComponent::Uv)
                .collect(),
            ComponentKind::Mesh => self
                .selected_meshes
                .iter()
                .copied()
                .map(SelectedComponent::Mesh)
                .collect(),
        }
    }

    fn connected_region(&self, seed: UvPoint) -> Vec<UvPoint> {
        let Some(mesh) = self.meshes.get(&seed.mesh) else {
            return Vec::new();
        };
        mesh.connectivity
            .region(seed.index)
            .iter()
            .map(|&i| UvPoint::new(seed.mesh, i))
            .collect()
    }

    fn uv_to_vertex(&self, uv: UvPoint) -> Result<VertexId, LookupError> {
        let mesh = self
            .meshes
            .get(&uv.mesh)
            .ok_or(LookupError::MeshNotFound(uv.mesh))?;
        match mesh.anchors.get(uv.index as usize) {
            Some(Some(vertex)) => Ok(*vertex),
            Some(None) => Err(LookupError::Unattached(uv)),
            None => Err(LookupError::OutOfRange(uv)),
        }
    }

    fn read_uv(&self, uv: UvPoint) -> Result<Vec2, LookupError> {
        let mesh = self
            .meshes
            .get(&uv.mesh)
            .ok_or(LookupError::MeshNotFound(uv.mesh))?;
        mesh.edit
            .uvs
            .get(uv.index as usize)
            .copied()
            .ok_or(LookupError::OutOfRange(uv))
    }

    fn write_uv(&mut self, uv: UvPoint, coord: Vec2) -> Result<(), WriteError> {
        if !coord.is_finite() {
            return Err(WriteError::NonFinite(uv));
        }
        let slot = self
            .meshes
            .get_mut(&uv.mesh)
            .and_then(|m| m.edit.uvs.get_mut(uv.index as usize))
            .ok_or(WriteError::Missing(uv))?;
        *slot = coord;
        Ok(())
    }

    fn mesh_counts(&self, mesh: MeshId) -> Option<MeshCounts> {
        let m = self.meshes.get(&mesh)?;
        m.edit.has_uvs.then_some(m.counts)
    }

    fn mesh_label(&self, mesh: MeshId) -> String {
        self.meshes
            .get(&mesh)
            .map(|m| m.label.clone())
            .or_else(|| self.non_meshes.get(&mesh).cloned())
            .unwrap_or_else(|| mesh.to_string())
    }
}
