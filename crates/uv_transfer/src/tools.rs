//! Top-level tool actions: shell copy/paste, mesh copy/paste and snap.
//!
//! Each action reads the host's current selection, validates it before any
//! mutation and delegates to the engine.

use bevy::log::{info, warn};
use std::collections::HashSet;

use crate::batch::{run_batch, BatchReport, BatchTarget};
use crate::error::{CaptureError, SelectionError, ToolError};
use crate::host::{UvHost, UvPoint};
use crate::shell::extract_shells;
use crate::snap::{snap, SnapReport};
use crate::snapshot::UvSnapshot;
use crate::topology::TopologyCheck;
use crate::transfer::TransferMode;

/// Holds at most one copied snapshot. A new copy replaces the old one.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    snapshot: Option<UvSnapshot>,
}

impl Clipboard {
    /// Store `snapshot`, dropping whatever was there.
    pub fn replace(&mut self, snapshot: UvSnapshot) {
        self.snapshot = Some(snapshot);
    }

    pub fn get(&self) -> Option<&UvSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn clear(&mut self) {
        self.snapshot = None;
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_none()
    }
}

/// Selected UV points, or the reason there are none.
fn require_uv_selection(host: &impl UvHost) -> Result<Vec<UvPoint>, SelectionError> {
    let points = host.selected_uv_points();
    if !points.is_empty() {
        return Ok(points);
    }
    if host.selected_meshes().is_empty() {
        Err(SelectionError::NothingSelected)
    } else {
        Err(SelectionError::WrongComponentKind {
            expected: "UV points",
        })
    }
}

fn require_mesh_selection(host: &impl UvHost) -> Result<Vec<crate::host::MeshId>, SelectionError> {
    let meshes = host.selected_meshes();
    if !meshes.is_empty() {
        return Ok(meshes);
    }
    if host.selected_uv_points().is_empty() {
        Err(SelectionError::NothingSelected)
    } else {
        Err(SelectionError::WrongComponentKind { expected: "meshes" })
    }
}

/// Capture the shell under the current UV selection.
///
/// When the selection spans several shells only the first one (in selection
/// order) is copied.
pub fn copy_shell(host: &impl UvHost) -> Result<UvSnapshot, ToolError> {
    let selected = require_uv_selection(host)?;
    let shells = extract_shells(host, &selected);
    let Some(first) = shells.first() else {
        return Err(SelectionError::NothingSelected.into());
    };
    if shells.len() > 1 {
        warn!(
            "Selection spans {} shells, copying the first one",
            shells.len()
        );
    }

    let snapshot = UvSnapshot::capture_shell(host, first)?;
    info!(
        "Copied shell of {} ({} UVs)",
        snapshot.label(),
        snapshot.len()
    );
    Ok(snapshot)
}

/// Paste `source` onto every shell touched by the current UV selection.
pub fn paste_shell(
    host: &mut impl UvHost,
    source: &UvSnapshot,
    mode: TransferMode,
    check: TopologyCheck,
) -> Result<BatchReport, ToolError> {
    let selected = require_uv_selection(host)?;
    let targets: Vec<BatchTarget> = extract_shells(host, &selected)
        .into_iter()
        .map(BatchTarget::Shell)
        .collect();
    if targets.is_empty() {
        return Err(SelectionError::NothingSelected.into());
    }

    let report = run_batch(host, source, &targets, mode, check);
    info!("{}", report.summary("shells"));
    Ok(report)
}

/// Capture every UV of the first selected mesh.
pub fn copy_mesh(host: &impl UvHost) -> Result<UvSnapshot, ToolError> {
    let meshes = require_mesh_selection(host)?;
    let snapshot = match UvSnapshot::capture_mesh(host, meshes[0]) {
        Ok(snapshot) => snapshot,
        Err(CaptureError::NotUvMesh(label)) => {
            return Err(SelectionError::NotUvMesh(label).into());
        }
        Err(e) => return Err(e.into()),
    };
    info!(
        "Copied UVs of {} ({} UVs)",
        snapshot.label(),
        snapshot.len()
    );
    Ok(snapshot)
}

/// Paste `source` verbatim onto every selected mesh.
pub fn paste_mesh(
    host: &mut impl UvHost,
    source: &UvSnapshot,
    check: TopologyCheck,
) -> Result<BatchReport, ToolError> {
    let targets: Vec<BatchTarget> = require_mesh_selection(host)?
        .into_iter()
        .map(BatchTarget::Mesh)
        .collect();

    let report = run_batch(host, source, &targets, TransferMode::Absolute, check);
    info!("{}", report.summary("meshes"));
    Ok(report)
}

/// Snap the selected UV points (minus `target`) onto `target`.
pub fn snap_selection(
    host: &mut impl UvHost,
    target: &[UvPoint],
    threshold: f32,
) -> Result<SnapReport, ToolError> {
    let selected = require_uv_selection(host)?;
    let target_set: HashSet<UvPoint> = target.iter().copied().collect();
    let source: Vec<UvPoint> = selected
        .into_iter()
        .filter(|p| !target_set.contains(p))
        .collect();
    if source.is_empty() {
        return Err(SelectionError::TooFewPoints {
            required: 1,
            found: 0,
        }
        .into());
    }

    Ok(snap(host, &source, target, threshold)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SnapError;
    use crate::host::MeshId;
    use crate::snapshot::Scope;
    use crate::test_host::TestHost;
    use bevy::math::Vec2;

    #[test]
    fn copy_requires_uv_selection() {
        let mut host = TestHost::new();
        let mesh = host.add_quad_strip(1, Vec2::ZERO);
        assert_eq!(
            copy_shell(&host).unwrap_err(),
            ToolError::Selection(SelectionError::NothingSelected)
        );

        host.select_meshes(&[mesh]);
        assert_eq!(
            copy_shell(&host).unwrap_err(),
            ToolError::Selection(SelectionError::WrongComponentKind {
                expected: "UV points"
            })
        );
    }

    #[test]
    fn copy_takes_the_first_shell_only() {
        let mut host = TestHost::new();
        let mesh = host.add_strips(&[(1, Vec2::ZERO), (2, Vec2::new(1.0, 0.0))]);
        host.select_uvs(&[UvPoint::new(mesh, 6), UvPoint::new(mesh, 0)]);

        let snapshot = copy_shell(&host).unwrap();
        assert_eq!(snapshot.len(), 6);
        assert_eq!(snapshot.scope(), Scope::Shell);
        assert!(snapshot.order().iter().all(|&i| i >= 4));
    }

    #[test]
    fn clipboard_keeps_one_snapshot() {
        let mut host = TestHost::new();
        let mesh = host.add_strips(&[(1, Vec2::ZERO), (2, Vec2::new(1.0, 0.0))]);
        let mut clipboard = Clipboard::default();
        assert!(clipboard.is_empty());

        host.select_uvs(&[UvPoint::new(mesh, 0)]);
        clipboard.replace(copy_shell(&host).unwrap());
        host.select_uvs(&[UvPoint::new(mesh, 5)]);
        clipboard.replace(copy_shell(&host).unwrap());

        assert_eq!(clipboard.get().map(UvSnapshot::len), Some(6));
        clipboard.clear();
        assert!(clipboard.get().is_none());
    }

    /// Pasting in centroid-relative mode onto a translated copy reproduces
    /// the source arrangement around the target's own centroid.
    #[test]
    fn shell_round_trip_reproduces_arrangement() {
        let mut host = TestHost::new();
        // Shell A is uv 0..6, B is 6..12, an unbent copy of A is 12..18
        let mesh = host.add_strips(&[
            (2, Vec2::ZERO),
            (2, Vec2::new(3.0, 1.0)),
            (2, Vec2::new(6.0, 0.0)),
        ]);
        // Bend the source so it differs from the targets
        host.set_uv(UvPoint::new(mesh, 5), Vec2::new(0.35, -0.2));

        host.select_uvs(&[UvPoint::new(mesh, 1)]);
        let source = copy_shell(&host).unwrap();

        host.select_uvs(&[UvPoint::new(mesh, 9)]);
        let before = copy_shell(&host).unwrap();
        let report = paste_shell(
            &mut host,
            &source,
            TransferMode::CentroidRelative,
            TopologyCheck::Strict,
        )
        .unwrap();
        assert_eq!((report.total, report.succeeded), (1, 1));

        let after = copy_shell(&host).unwrap();
        assert!((after.centroid() - before.centroid()).length() < 1e-5);
        for (got, want) in after.offsets().iter().zip(source.offsets()) {
            assert!((*got - *want).length() < 1e-5);
        }

        // And back: B's arrangement pasted onto a fresh A reproduces A
        host.select_uvs(&[UvPoint::new(mesh, 13)]);
        let fresh_before = copy_shell(&host).unwrap();
        paste_shell(
            &mut host,
            &after,
            TransferMode::CentroidRelative,
            TopologyCheck::Strict,
        )
        .unwrap();
        let fresh_after = copy_shell(&host).unwrap();
        assert!((fresh_after.centroid() - fresh_before.centroid()).length() < 1e-5);
        assert_eq!(fresh_after.len(), source.len());
        for (got, want) in fresh_after.offsets().iter().zip(source.offsets()) {
            assert!((*got - *want).length() < 1e-5);
        }
    }

    /// Pairing depends on vertex anchors only, so any selection order of the
    /// target shell gives the same result.
    #[test]
    fn paste_is_invariant_to_selection_order() {
        let mut rng = fastrand::Rng::with_seed(42);
        let mut reference: Option<Vec<Vec2>> = None;

        for _ in 0..10 {
            let mut host = TestHost::new();
            let mesh = host.add_strips(&[(3, Vec2::ZERO), (3, Vec2::new(2.0, 0.0))]);
            host.set_uv(UvPoint::new(mesh, 2), Vec2::new(0.05, 0.3));

            let mut source_pick: Vec<UvPoint> = (0..8).map(|i| UvPoint::new(mesh, i)).collect();
            rng.shuffle(&mut source_pick);
            host.select_uvs(&source_pick[..rng.usize(1..=source_pick.len())]);
            let source = copy_shell(&host).unwrap();

            let mut target_pick: Vec<UvPoint> = (8..16).map(|i| UvPoint::new(mesh, i)).collect();
            rng.shuffle(&mut target_pick);
            host.select_uvs(&target_pick[..rng.usize(1..=target_pick.len())]);
            paste_shell(
                &mut host,
                &source,
                TransferMode::Absolute,
                TopologyCheck::Strict,
            )
            .unwrap();

            let result: Vec<Vec2> = (8..16).map(|i| host.uv(UvPoint::new(mesh, i))).collect();
            match &reference {
                Some(r) => assert_eq!(&result, r),
                None => reference = Some(result),
            }
        }
    }

    #[test]
    fn mesh_copy_paste_copies_exactly() {
        let mut host = TestHost::new();
        let a = host.add_quad_strip(2, Vec2::ZERO);
        let b = host.add_quad_strip(2, Vec2::new(4.0, 4.0));
        let c = host.add_quad_strip(3, Vec2::new(8.0, 8.0));

        host.select_meshes(&[a, c]);
        let source = copy_mesh(&host).unwrap();
        assert_eq!(source.mesh(), a);

        host.select_meshes(&[b, c]);
        let report = paste_mesh(&mut host, &source, TopologyCheck::Strict).unwrap();
        assert_eq!((report.total, report.succeeded), (2, 1));
        for i in 0..6 {
            assert_eq!(host.uv(UvPoint::new(b, i)), host.uv(UvPoint::new(a, i)));
        }
        assert_eq!(report.failed().next().map(|r| r.target), Some(c));
    }

    #[test]
    fn copy_mesh_rejects_meshes_without_uvs() {
        let mut host = TestHost::new();
        let bare = host.add_mesh(Vec::new(), Vec::new(), 4, Vec::new());
        host.select_meshes(&[bare]);
        assert!(matches!(
            copy_mesh(&host),
            Err(ToolError::Selection(SelectionError::NotUvMesh(_)))
        ));

        host.select_uvs(&[UvPoint::new(MeshId(0), 0)]);
        assert_eq!(
            copy_mesh(&host).unwrap_err(),
            ToolError::Selection(SelectionError::WrongComponentKind { expected: "meshes" })
        );
    }

    #[test]
    fn snap_selection_excludes_target_from_source() {
        let mut host = TestHost::new();
        let moving = host.add_mesh(vec![Vec2::new(0.504, 0.5)], vec![Some(0)], 1, Vec::new());
        let fixed = host.add_mesh(
            vec![Vec2::new(0.5, 0.5), Vec2::new(0.9, 0.9)],
            vec![Some(0), Some(1)],
            2,
            Vec::new(),
        );
        let target = [UvPoint::new(fixed, 0), UvPoint::new(fixed, 1)];

        host.select_uvs(&[UvPoint::new(moving, 0), target[0]]);
        let report = snap_selection(&mut host, &target, 0.01).unwrap();
        assert_eq!(report.pairs.len(), 1);
        assert_eq!(host.uv(UvPoint::new(moving, 0)), Vec2::new(0.5, 0.5));

        host.select_uvs(&target);
        assert_eq!(
            snap_selection(&mut host, &target, 0.01).unwrap_err(),
            ToolError::Selection(SelectionError::TooFewPoints {
                required: 1,
                found: 0
            })
        );

        host.select_uvs(&[UvPoint::new(moving, 0)]);
        assert_eq!(
            snap_selection(&mut host, &[], 0.01).unwrap_err(),
            ToolError::Snap(SnapError::EmptyTarget)
        );
    }
}
