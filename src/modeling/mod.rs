//! Mesh data for the UV tools: Bevy meshes as indexed triangle lists with
//! welded vertex anchors, and the scene-backed `UvHost`.

pub mod edit_mesh;
pub mod scene_host;

pub use edit_mesh::{mesh_with_uvs, EditMesh, WELD_EPSILON};
pub use scene_host::{mesh_id, write_entity_uvs, SceneUvHost, UvChange};
