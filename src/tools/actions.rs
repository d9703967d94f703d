//! Tool actions run with exclusive world access.
//!
//! Each action snapshots the scene into a [`SceneUvHost`], runs the core
//! operation against it, then flushes changed meshes and records one undo
//! entry for the whole action.

use bevy::prelude::*;
use uv_transfer::{
    copy_mesh, copy_shell, expand_to_shells, paste_mesh, paste_shell, snap_selection, ToolError,
    TransferMode, UvHost,
};

use super::status::{StatusLevel, UvToolStatus};
use super::UvClipboard;
use crate::commands::{CommandHistory, UvEditCommand};
use crate::modeling::SceneUvHost;
use crate::selection::UvSelection;
use crate::ui::Settings;

/// Flush the host and push an undo entry if anything changed.
fn commit(world: &mut World, host: SceneUvHost, description: String) -> usize {
    let changes = host.flush(world);
    let touched = changes.len();
    if touched > 0 {
        world
            .resource_mut::<CommandHistory>()
            .push(Box::new(UvEditCommand {
                description,
                changes,
            }));
    }
    touched
}

pub struct CopyShellAction;

impl Command for CopyShellAction {
    fn apply(self, world: &mut World) {
        let host = SceneUvHost::capture(world);
        match copy_shell(&host) {
            Ok(snapshot) => {
                let text = format!("Copied shell of {}: {} UVs", snapshot.label(), snapshot.len());
                world.resource_mut::<UvClipboard>().shell.replace(snapshot);
                world
                    .resource_mut::<UvToolStatus>()
                    .post(StatusLevel::Success, text);
            }
            Err(e) => world.resource_mut::<UvToolStatus>().error("Copy shell", &e),
        }
    }
}

pub struct PasteShellAction {
    pub mode: TransferMode,
}

impl Command for PasteShellAction {
    fn apply(self, world: &mut World) {
        let check = world.resource::<Settings>().topology_check;
        let Some(source) = world.resource::<UvClipboard>().shell.get().cloned() else {
            world
                .resource_mut::<UvToolStatus>()
                .error("Paste shell", &ToolError::ClipboardEmpty);
            return;
        };

        let mut host = SceneUvHost::capture(world);
        match paste_shell(&mut host, &source, self.mode, check) {
            Ok(report) => {
                commit(
                    world,
                    host,
                    format!("Paste shell ({})", self.mode.display_name()),
                );
                world
                    .resource_mut::<UvToolStatus>()
                    .batch("Paste shell", "shells", &report);
            }
            Err(e) => world.resource_mut::<UvToolStatus>().error("Paste shell", &e),
        }
    }
}

pub struct CopyMeshAction;

impl Command for CopyMeshAction {
    fn apply(self, world: &mut World) {
        let host = SceneUvHost::capture(world);
        match copy_mesh(&host) {
            Ok(snapshot) => {
                let text = format!("Copied UVs of {}: {} UVs", snapshot.label(), snapshot.len());
                world.resource_mut::<UvClipboard>().mesh.replace(snapshot);
                world
                    .resource_mut::<UvToolStatus>()
                    .post(StatusLevel::Success, text);
            }
            Err(e) => world.resource_mut::<UvToolStatus>().error("Copy UVs", &e),
        }
    }
}

pub struct PasteMeshAction;

impl Command for PasteMeshAction {
    fn apply(self, world: &mut World) {
        let check = world.resource::<Settings>().topology_check;
        let Some(source) = world.resource::<UvClipboard>().mesh.get().cloned() else {
            world
                .resource_mut::<UvToolStatus>()
                .error("Paste UVs", &ToolError::ClipboardEmpty);
            return;
        };

        let mut host = SceneUvHost::capture(world);
        match paste_mesh(&mut host, &source, check) {
            Ok(report) => {
                commit(world, host, format!("Paste UVs from {}", source.label()));
                world
                    .resource_mut::<UvToolStatus>()
                    .batch("Paste UVs", "meshes", &report);
            }
            Err(e) => world.resource_mut::<UvToolStatus>().error("Paste UVs", &e),
        }
    }
}

/// Grow the UV selection to whole shells.
pub struct SelectShellAction;

impl Command for SelectShellAction {
    fn apply(self, world: &mut World) {
        let host = SceneUvHost::capture(world);
        let expanded = expand_to_shells(&host, &host.selected_uv_points());
        let count = expanded.len();
        world.resource_mut::<UvSelection>().extend(expanded);
        info!("Selected {count} UVs by shell");
    }
}

/// Make the shells of the selected UV points the snap target.
pub struct SetSnapTargetAction;

impl Command for SetSnapTargetAction {
    fn apply(self, world: &mut World) {
        let host = SceneUvHost::capture(world);
        let picked = host.selected_uv_points();
        if picked.is_empty() {
            world.resource_mut::<UvSelection>().snap_target.clear();
            world
                .resource_mut::<UvToolStatus>()
                .post(StatusLevel::Warning, "Snap target cleared: no UVs selected");
            return;
        }

        let target = expand_to_shells(&host, &picked);
        let text = format!("Snap target set: {} UVs", target.len());
        {
            let mut selection = world.resource_mut::<UvSelection>();
            selection.snap_target = target;
            selection.clear();
        }
        world
            .resource_mut::<UvToolStatus>()
            .post(StatusLevel::Info, text);
    }
}

pub struct SnapAction {
    pub threshold: f32,
}

impl Command for SnapAction {
    fn apply(self, world: &mut World) {
        let target = world.resource::<UvSelection>().snap_target.clone();
        let mut host = SceneUvHost::capture(world);
        match snap_selection(&mut host, &target, self.threshold) {
            Ok(report) => {
                commit(world, host, format!("Snap {} UVs", report.snapped()));
                world.resource_mut::<UvToolStatus>().snap(&report);
            }
            Err(e) => world.resource_mut::<UvToolStatus>().error("Snap", &e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::undo;
    use crate::modeling::{mesh_id, EditMesh};
    use crate::scene::SceneEntity;
    use crate::selection::{Selected, SelectionOrder};
    use uv_transfer::UvPoint;

    /// World with the resources the actions touch and two named cubes.
    fn scene() -> (World, Entity, Entity) {
        let mut world = World::new();
        world.init_resource::<Assets<Mesh>>();
        world.init_resource::<CommandHistory>();
        world.init_resource::<UvClipboard>();
        world.init_resource::<UvToolStatus>();
        world.init_resource::<UvSelection>();
        world.init_resource::<SelectionOrder>();
        world.insert_resource(Settings::default());

        let mut source = Mesh::from(Cuboid::default());
        let shifted: Vec<[f32; 2]> = EditMesh::from_bevy_mesh(&source)
            .unwrap()
            .uvs
            .iter()
            .map(|uv| [uv.x * 0.5, uv.y * 0.5 + 0.5])
            .collect();
        source.insert_attribute(Mesh::ATTRIBUTE_UV_0, shifted);

        let a_mesh = world.resource_mut::<Assets<Mesh>>().add(source);
        let b_mesh = world
            .resource_mut::<Assets<Mesh>>()
            .add(Mesh::from(Cuboid::default()));
        let a = world
            .spawn((Name::new("A"), SceneEntity, Mesh3d(a_mesh)))
            .id();
        let b = world
            .spawn((Name::new("B"), SceneEntity, Mesh3d(b_mesh)))
            .id();
        (world, a, b)
    }

    fn uvs(world: &World, entity: Entity) -> Vec<Vec2> {
        let handle = &world.get::<Mesh3d>(entity).unwrap().0;
        EditMesh::from_bevy_mesh(world.resource::<Assets<Mesh>>().get(handle).unwrap())
            .unwrap()
            .uvs
    }

    #[test]
    fn shell_copy_paste_round_trip_with_undo() {
        let (mut world, a, b) = scene();
        let original_b = uvs(&world, b);

        // First face of A is uv 0..4
        world.resource_mut::<UvSelection>().set(UvPoint::new(mesh_id(a), 0));
        CopyShellAction.apply(&mut world);
        assert_eq!(
            world.resource::<UvClipboard>().shell.get().map(|s| s.len()),
            Some(4)
        );

        world.resource_mut::<UvSelection>().set(UvPoint::new(mesh_id(b), 1));
        PasteShellAction {
            mode: TransferMode::Absolute,
        }
        .apply(&mut world);

        let pasted = uvs(&world, b);
        assert_eq!(&pasted[..4], &uvs(&world, a)[..4]);
        assert_eq!(&pasted[4..], &original_b[4..]);
        assert_eq!(world.resource::<UvToolStatus>().level, StatusLevel::Success);

        undo(&mut world);
        assert_eq!(uvs(&world, b), original_b);
    }

    #[test]
    fn paste_without_copy_reports_empty_clipboard() {
        let (mut world, _, _) = scene();
        PasteMeshAction.apply(&mut world);
        let status = world.resource::<UvToolStatus>();
        assert_eq!(status.level, StatusLevel::Warning);
        assert!(status.line.contains("clipboard is empty"));
        assert!(!world.resource::<CommandHistory>().can_undo());
    }

    #[test]
    fn mesh_copy_paste_follows_selection_order() {
        let (mut world, a, b) = scene();
        world.entity_mut(a).insert(Selected);
        world.entity_mut(b).insert(Selected);
        // No observers in this world; drive the order by hand
        *world.resource_mut::<SelectionOrder>() = SelectionOrder::from_entities(vec![a]);
        CopyMeshAction.apply(&mut world);

        *world.resource_mut::<SelectionOrder>() = SelectionOrder::from_entities(vec![b]);
        PasteMeshAction.apply(&mut world);
        assert_eq!(uvs(&world, b), uvs(&world, a));
        assert_eq!(
            world.resource::<UvToolStatus>().line,
            "Pasted onto 1 meshes"
        );
    }

    #[test]
    fn objects_without_mesh_are_reported_not_dropped() {
        let (mut world, a, b) = scene();
        let empty = world.spawn((Name::new("Empty"), SceneEntity, Selected)).id();

        *world.resource_mut::<SelectionOrder>() = SelectionOrder::from_entities(vec![empty]);
        CopyMeshAction.apply(&mut world);
        assert!(world.resource::<UvClipboard>().mesh.is_empty());
        let status = world.resource::<UvToolStatus>();
        assert_eq!(status.level, StatusLevel::Warning);
        assert_eq!(status.line, "Copy UVs: Empty has no UV data");

        *world.resource_mut::<SelectionOrder>() = SelectionOrder::from_entities(vec![a]);
        CopyMeshAction.apply(&mut world);
        *world.resource_mut::<SelectionOrder>() = SelectionOrder::from_entities(vec![b, empty]);
        PasteMeshAction.apply(&mut world);

        assert_eq!(uvs(&world, b), uvs(&world, a));
        let report = world
            .resource::<UvToolStatus>()
            .last_report
            .clone()
            .unwrap();
        assert_eq!((report.total, report.succeeded), (2, 1));
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].label, "Empty");
        assert_eq!(report.failures[0].reason, "not a UV-bearing object");
    }
}
