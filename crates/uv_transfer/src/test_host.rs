//! In-memory [`UvHost`] for unit tests.

use bevy::math::Vec2;
use std::collections::HashSet;

use crate::connectivity::UvConnectivity;
use crate::error::{LookupError, WriteError};
use crate::host::{
    ComponentKind, MeshCounts, MeshId, SelectedComponent, UvHost, UvIndex, UvPoint, VertexId,
};

struct TestMesh {
    uvs: Vec<Vec2>,
    uv_vertex: Vec<Option<VertexId>>,
    vertex_count: usize,
    face_count: usize,
    connectivity: UvConnectivity,
}

#[derive(Default)]
pub struct TestHost {
    meshes: Vec<TestMesh>,
    selection: Vec<SelectedComponent>,
    rejected: HashSet<UvPoint>,
    writes: usize,
}

impl TestHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mesh. `uv_vertex[i]` is the vertex under uv `i`, `None` for an
    /// unattached point. Faces are UV-index triangles.
    pub fn add_mesh(
        &mut self,
        uvs: Vec<Vec2>,
        uv_vertex: Vec<Option<VertexId>>,
        vertex_count: usize,
        faces: Vec<[UvIndex; 3]>,
    ) -> MeshId {
        let connectivity = UvConnectivity::from_triangles(uvs.len(), &faces);
        self.meshes.push(TestMesh {
            uvs,
            uv_vertex,
            vertex_count,
            face_count: faces.len(),
            connectivity,
        });
        MeshId(self.meshes.len() as u64 - 1)
    }

    /// A mesh holding one strip of `quads` quads laid out from `offset`.
    pub fn add_quad_strip(&mut self, quads: usize, offset: Vec2) -> MeshId {
        self.add_strips(&[(quads, offset)])
    }

    /// A mesh holding several disjoint strips, each its own UV shell.
    ///
    /// A strip of `n` quads uses `2 * (n + 1)` consecutive UV indices; UV `i`
    /// sits on vertex `i`.
    pub fn add_strips(&mut self, strips: &[(usize, Vec2)]) -> MeshId {
        let mut uvs = Vec::new();
        let mut faces = Vec::new();

        for &(quads, offset) in strips {
            let base = uvs.len() as UvIndex;
            for i in 0..=quads {
                let x = i as f32 * 0.1;
                uvs.push(offset + Vec2::new(x, 0.0));
                uvs.push(offset + Vec2::new(x + 0.01 * i as f32, 0.1 + 0.02 * i as f32));
            }
            for i in 0..quads as UvIndex {
                let (a, b, c, d) = (base + 2 * i, base + 2 * i + 2, base + 2 * i + 3, base + 2 * i + 1);
                faces.push([a, b, c]);
                faces.push([a, c, d]);
            }
        }

        let uv_vertex = (0..uvs.len() as VertexId).map(Some).collect();
        let vertex_count = uvs.len();
        self.add_mesh(uvs, uv_vertex, vertex_count, faces)
    }

    /// Make the vertex lookup of `point` fail.
    pub fn detach_uv(&mut self, point: UvPoint) {
        if let Some(slot) = self
            .meshes
            .get_mut(point.mesh.0 as usize)
            .and_then(|m| m.uv_vertex.get_mut(point.index as usize))
        {
            *slot = None;
        }
    }

    /// Make every write to `point` fail.
    pub fn reject_writes(&mut self, point: UvPoint) {
        self.rejected.insert(point);
    }

    pub fn uv(&self, point: UvPoint) -> Vec2 {
        self.meshes[point.mesh.0 as usize].uvs[point.index as usize]
    }

    pub fn set_uv(&mut self, point: UvPoint, coord: Vec2) {
        self.meshes[point.mesh.0 as usize].uvs[point.index as usize] = coord;
    }

    pub fn select_uvs(&mut self, points: &[UvPoint]) {
        self.selection = points.iter().copied().map(SelectedComponent::Uv).collect();
    }

    pub fn select_meshes(&mut self, meshes: &[MeshId]) {
        self.selection = meshes.iter().copied().map(SelectedComponent::Mesh).collect();
    }

    /// Accepted writes so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    fn mesh(&self, id: MeshId) -> Result<&TestMesh, LookupError> {
        self.meshes
            .get(id.0 as usize)
            .ok_or(LookupError::MeshNotFound(id))
    }
}

impl UvHost for TestHost {
    fn current_selection(&self, filter: ComponentKind) -> Vec<SelectedComponent> {
        self.selection
            .iter()
            .copied()
            .filter(|c| match (c, filter) {
                (SelectedComponent::Uv(_), ComponentKind::Uv) => true,
                (SelectedComponent::Mesh(_), ComponentKind::Mesh) => true,
                _ => false,
            })
            .collect()
    }

    fn connected_region(&self, seed: UvPoint) -> Vec<UvPoint> {
        let Ok(mesh) = self.mesh(seed.mesh) else {
            return Vec::new();
        };
        mesh.connectivity
            .region(seed.index)
            .iter()
            .map(|&i| UvPoint::new(seed.mesh, i))
            .collect()
    }

    fn uv_to_vertex(&self, uv: UvPoint) -> Result<VertexId, LookupError> {
        let mesh = self.mesh(uv.mesh)?;
        match mesh.uv_vertex.get(uv.index as usize) {
            Some(Some(v)) => Ok(*v),
            Some(None) => Err(LookupError::Unattached(uv)),
            None => Err(LookupError::OutOfRange(uv)),
        }
    }

    fn read_uv(&self, uv: UvPoint) -> Result<Vec2, LookupError> {
        self.mesh(uv.mesh)?
            .uvs
            .get(uv.index as usize)
            .copied()
            .ok_or(LookupError::OutOfRange(uv))
    }

    fn write_uv(&mut self, uv: UvPoint, coord: Vec2) -> Result<(), WriteError> {
        if self.rejected.contains(&uv) {
            return Err(WriteError::Locked(uv.mesh));
        }
        if !coord.is_finite() {
            return Err(WriteError::NonFinite(uv));
        }
        let slot = self
            .meshes
            .get_mut(uv.mesh.0 as usize)
            .and_then(|m| m.uvs.get_mut(uv.index as usize))
            .ok_or(WriteError::Missing(uv))?;
        *slot = coord;
        self.writes += 1;
        Ok(())
    }

    fn mesh_counts(&self, mesh: MeshId) -> Option<MeshCounts> {
        let m = self.mesh(mesh).ok()?;
        Some(MeshCounts {
            vertex_count: m.vertex_count,
            face_count: m.face_count,
            uv_count: m.uvs.len(),
        })
    }
}
