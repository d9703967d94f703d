//! Identity types and the host collaborator interface.
//!
//! The host owns the live scene. The algorithms in this crate only read
//! selections, adjacency and coordinates through [`UvHost`], and write
//! coordinates back through it.

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{LookupError, WriteError};

/// Host-assigned identity of a mesh. Opaque to the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MeshId(pub u64);

impl fmt::Display for MeshId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mesh#{}", self.0)
    }
}

/// Index of a UV point, local to its mesh.
pub type UvIndex = u32;

/// Index of a geometric vertex, local to its mesh.
pub type VertexId = u32;

/// A single UV point: `(mesh, uv index)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UvPoint {
    pub mesh: MeshId,
    pub index: UvIndex,
}

impl UvPoint {
    pub fn new(mesh: MeshId, index: UvIndex) -> Self {
        Self { mesh, index }
    }
}

impl fmt::Display for UvPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.map[{}]", self.mesh, self.index)
    }
}

/// Component filter for selection queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Individual UV points.
    Uv,
    /// Whole mesh objects.
    Mesh,
}

/// One entry of the host's current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectedComponent {
    Uv(UvPoint),
    Mesh(MeshId),
}

/// Topology metrics of a whole mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MeshCounts {
    pub vertex_count: usize,
    pub face_count: usize,
    pub uv_count: usize,
}

/// Everything the transfer algorithms need from the host application.
///
/// Queries are pure: none of them may change the user's selection.
pub trait UvHost {
    /// The current selection, filtered to one component kind, in selection order.
    fn current_selection(&self, filter: ComponentKind) -> Vec<SelectedComponent>;

    /// Every UV point connected to `seed` through shared UV edges, `seed` included.
    ///
    /// Returns an empty set when `seed` does not exist.
    fn connected_region(&self, seed: UvPoint) -> Vec<UvPoint>;

    /// The geometric vertex a UV point sits on.
    fn uv_to_vertex(&self, uv: UvPoint) -> Result<VertexId, LookupError>;

    /// Current coordinate of a UV point.
    fn read_uv(&self, uv: UvPoint) -> Result<Vec2, LookupError>;

    /// Overwrite the coordinate of a UV point.
    fn write_uv(&mut self, uv: UvPoint, coord: Vec2) -> Result<(), WriteError>;

    /// Topology counts of a mesh, or `None` if `mesh` is not a UV-bearing mesh.
    fn mesh_counts(&self, mesh: MeshId) -> Option<MeshCounts>;

    /// Human readable name for reports.
    fn mesh_label(&self, mesh: MeshId) -> String {
        format!("mesh {}", mesh.0)
    }

    /// Selected UV points, in selection order.
    fn selected_uv_points(&self) -> Vec<UvPoint> {
        self.current_selection(ComponentKind::Uv)
            .into_iter()
            .filter_map(|c| match c {
                SelectedComponent::Uv(p) => Some(p),
                SelectedComponent::Mesh(_) => None,
            })
            .collect()
    }

    /// Selected meshes, in selection order.
    fn selected_meshes(&self) -> Vec<MeshId> {
        self.current_selection(ComponentKind::Mesh)
            .into_iter()
            .filter_map(|c| match c {
                SelectedComponent::Mesh(m) => Some(m),
                SelectedComponent::Uv(_) => None,
            })
            .collect()
    }
}
