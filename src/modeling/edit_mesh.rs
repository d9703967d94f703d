//! Core mesh data structure for the UV tools.
//!
//! `EditMesh` is an indexed triangle list, a thin wrapper around Bevy mesh
//! data. Bevy stores one UV per render vertex, so a UV point here is a render
//! vertex index. Its geometric vertex is the welded position: render vertices
//! that share a position (seams, hard edges) share one vertex id.

use bevy::mesh::{Indices, PrimitiveTopology, VertexAttributeValues};
use bevy::prelude::*;
use std::collections::HashMap;
use uv_transfer::{MeshCounts, UvConnectivity, VertexId};

/// Positions within this distance of an earlier vertex weld onto it.
pub const WELD_EPSILON: f32 = 1e-5;

/// Indexed triangle mesh with per-render-vertex UVs.
#[derive(Debug, Clone)]
pub struct EditMesh {
    pub positions: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub triangles: Vec<[u32; 3]>,
    /// Whether the source mesh carried `ATTRIBUTE_UV_0` at all.
    pub has_uvs: bool,
}

impl EditMesh {
    /// Build an `EditMesh` from a Bevy `Mesh`.
    ///
    /// Returns `None` if the mesh lacks positions or uses a non-triangle topology.
    pub fn from_bevy_mesh(mesh: &Mesh) -> Option<Self> {
        if mesh.primitive_topology() != PrimitiveTopology::TriangleList {
            return None;
        }

        let positions: Vec<Vec3> = match mesh.attribute(Mesh::ATTRIBUTE_POSITION)? {
            VertexAttributeValues::Float32x3(v) => v.iter().map(|p| Vec3::from(*p)).collect(),
            _ => return None,
        };

        let (uvs, has_uvs) = match mesh.attribute(Mesh::ATTRIBUTE_UV_0) {
            Some(VertexAttributeValues::Float32x2(v)) => {
                (v.iter().map(|u| Vec2::from(*u)).collect(), true)
            }
            _ => (Vec::new(), false),
        };

        let triangles = match mesh.indices() {
            Some(Indices::U32(indices)) => indices
                .chunks_exact(3)
                .map(|c| [c[0], c[1], c[2]])
                .collect(),
            Some(Indices::U16(indices)) => indices
                .chunks_exact(3)
                .map(|c| [c[0] as u32, c[1] as u32, c[2] as u32])
                .collect(),
            None => (0..positions.len() as u32)
                .collect::<Vec<_>>()
                .chunks_exact(3)
                .map(|c| [c[0], c[1], c[2]])
                .collect(),
        };

        Some(EditMesh {
            positions,
            uvs,
            triangles,
            has_uvs,
        })
    }

    /// Geometric vertex id of every render vertex.
    ///
    /// Ids are assigned in order of first appearance, so the numbering follows
    /// the mesh's own vertex order and is stable across re-selection.
    pub fn weld_vertices(&self) -> Vec<VertexId> {
        // Cells are one epsilon wide, so a match is always in a neighbouring cell
        let mut grid: HashMap<[i64; 3], Vec<(Vec3, VertexId)>> = HashMap::new();
        let mut next: VertexId = 0;
        self.positions
            .iter()
            .map(|&p| {
                let cell = grid_cell(p);
                let existing = neighbour_cells(cell)
                    .filter_map(|c| grid.get(&c))
                    .flatten()
                    .filter(|(q, _)| q.distance(p) <= WELD_EPSILON)
                    .map(|&(_, id)| id)
                    .min();
                existing.unwrap_or_else(|| {
                    let id = next;
                    next += 1;
                    grid.entry(cell).or_default().push((p, id));
                    id
                })
            })
            .collect()
    }

    /// Vertex under each UV point, `None` for points no triangle uses.
    pub fn uv_anchors(&self) -> Vec<Option<VertexId>> {
        let welded = self.weld_vertices();
        let mut used = vec![false; self.uvs.len()];
        for tri in &self.triangles {
            for &i in tri {
                if let Some(flag) = used.get_mut(i as usize) {
                    *flag = true;
                }
            }
        }
        used.iter()
            .enumerate()
            .map(|(i, &u)| if u { welded.get(i).copied() } else { None })
            .collect()
    }

    /// Vertex, face and UV counts compared by the topology gate.
    pub fn counts(&self) -> MeshCounts {
        let vertex_count = self
            .weld_vertices()
            .iter()
            .max()
            .map_or(0, |&max| max as usize + 1);
        MeshCounts {
            vertex_count,
            face_count: self.triangles.len(),
            uv_count: self.uvs.len(),
        }
    }

    /// UV shells: points joined by a shared triangle edge.
    pub fn uv_connectivity(&self) -> UvConnectivity {
        UvConnectivity::from_triangles(self.uvs.len(), &self.triangles)
    }

    /// Number of triangle faces.
    pub fn face_count(&self) -> usize {
        self.triangles.len()
    }
}

fn grid_cell(p: Vec3) -> [i64; 3] {
    let q = |v: f32| (v / WELD_EPSILON).floor() as i64;
    [q(p.x), q(p.y), q(p.z)]
}

fn neighbour_cells(cell: [i64; 3]) -> impl Iterator<Item = [i64; 3]> {
    (-1..=1).flat_map(move |dx| {
        (-1..=1).flat_map(move |dy| {
            (-1..=1).map(move |dz| [cell[0] + dx, cell[1] + dy, cell[2] + dz])
        })
    })
}

/// Copy of `mesh` with its UV channel replaced by `uvs`.
///
/// Tangents depend on UVs, so they are regenerated when the mesh has them.
pub fn mesh_with_uvs(mesh: &Mesh, uvs: &[Vec2]) -> Mesh {
    let mut out = mesh.clone();
    out.insert_attribute(
        Mesh::ATTRIBUTE_UV_0,
        uvs.iter().map(|u| [u.x, u.y]).collect::<Vec<_>>(),
    );
    if out.contains_attribute(Mesh::ATTRIBUTE_TANGENT) {
        if let Err(e) = out.generate_tangents() {
            warn!("Failed to regenerate tangents after UV edit: {e}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube() -> EditMesh {
        let mesh = Mesh::from(Cuboid::default());
        EditMesh::from_bevy_mesh(&mesh).unwrap()
    }

    #[test]
    fn cuboid_welds_to_eight_vertices() {
        let mesh = cube();
        assert_eq!(
            mesh.counts(),
            MeshCounts {
                vertex_count: 8,
                face_count: 12,
                uv_count: 24,
            }
        );
        assert!(mesh.uv_anchors().iter().all(Option::is_some));
    }

    #[test]
    fn cuboid_faces_are_separate_shells() {
        let conn = cube().uv_connectivity();
        assert_eq!(conn.shell_count(), 6);
        assert_eq!(conn.region(0).len(), 4);
    }

    #[test]
    fn weld_ids_follow_first_appearance() {
        let mesh = EditMesh {
            positions: vec![Vec3::X, Vec3::Y, Vec3::X, Vec3::Z],
            uvs: vec![Vec2::ZERO; 5],
            triangles: vec![[0, 1, 3], [2, 1, 3]],
            has_uvs: true,
        };
        assert_eq!(mesh.weld_vertices(), vec![0, 1, 0, 2]);
        // uv 4 has no position and no face
        assert_eq!(
            mesh.uv_anchors(),
            vec![Some(0), Some(1), Some(0), Some(2), None]
        );
        assert_eq!(mesh.counts().vertex_count, 3);
    }

    #[test]
    fn replacing_uvs_keeps_geometry() {
        let mesh = Mesh::from(Cuboid::default());
        let uvs = vec![Vec2::new(0.25, 0.75); 24];
        let edited = EditMesh::from_bevy_mesh(&mesh_with_uvs(&mesh, &uvs)).unwrap();
        assert_eq!(edited.uvs, uvs);
        assert_eq!(edited.positions.len(), 24);
        assert_eq!(edited.face_count(), 12);
    }

    #[test]
    fn mesh_without_uvs_has_zero_uv_count() {
        let mut mesh = Mesh::from(Cuboid::default());
        mesh.remove_attribute(Mesh::ATTRIBUTE_UV_0);
        let edit = EditMesh::from_bevy_mesh(&mesh).unwrap();
        assert!(!edit.has_uvs);
        assert_eq!(edit.counts().uv_count, 0);
    }

    #[test]
    fn close_positions_weld_across_cell_boundaries() {
        // Either side of a grid boundary, well inside the weld distance
        let edge = WELD_EPSILON;
        let mesh = EditMesh {
            positions: vec![
                Vec3::splat(edge - 1e-7),
                Vec3::splat(edge + 1e-7),
                Vec3::new(3.0 * WELD_EPSILON, 0.0, 0.0),
            ],
            uvs: vec![Vec2::ZERO; 3],
            triangles: vec![[0, 1, 2]],
            has_uvs: true,
        };
        assert_eq!(mesh.weld_vertices(), vec![0, 0, 1]);
    }
}
