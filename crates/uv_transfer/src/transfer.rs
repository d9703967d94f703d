//! Coordinate transfer between paired UV point sequences.

use bevy::log::debug;
use bevy::math::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CaptureError, Mismatch};
use crate::host::{MeshId, UvHost, UvPoint};
use crate::snapshot::UvSnapshot;

/// How source coordinates are applied to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransferMode {
    /// Target point gets the source coordinate verbatim.
    Absolute,
    /// Target point gets its own centroid plus the source point's offset from
    /// the source centroid. Keeps the target where it is in UV space.
    #[default]
    CentroidRelative,
}

impl TransferMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            TransferMode::Absolute => "Absolute",
            TransferMode::CentroidRelative => "Keep Position",
        }
    }
}

/// Why a batch target was skipped.
#[derive(Debug, Clone, PartialEq)]
pub enum FailureReason {
    /// Source and target topology differ.
    Topology(Mismatch),
    /// The target has no UV data.
    NotUvMesh,
    /// The target region could not be captured.
    Capture(CaptureError),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Topology(m) => write!(f, "{m}"),
            FailureReason::NotUvMesh => f.write_str("not a UV-bearing object"),
            FailureReason::Capture(e) => write!(f, "{e}"),
        }
    }
}

/// Outcome of transferring onto one target.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferResult {
    pub target: MeshId,
    /// Display name of the target, e.g. `"Cube (shell 2)"`.
    pub label: String,
    /// Pairs the engine tried to write.
    pub attempted: usize,
    /// Writes the host accepted.
    pub applied: usize,
    /// Writes the host rejected.
    pub failed: usize,
    pub outcome: Result<(), FailureReason>,
}

impl TransferResult {
    /// A target that was skipped before any write.
    pub fn skipped(target: MeshId, label: impl Into<String>, reason: FailureReason) -> Self {
        Self {
            target,
            label: label.into(),
            attempted: 0,
            applied: 0,
            failed: 0,
            outcome: Err(reason),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn failure(&self) -> Option<&FailureReason> {
        self.outcome.as_ref().err()
    }
}

/// Write `source` onto `target`, pairing points by canonical position.
///
/// `target` must be a fresh capture of the region being overwritten; its
/// centroid is the anchor for [`TransferMode::CentroidRelative`]. Exactly
/// `min(source.len(), target.len())` pairs are attempted. Rejected writes are
/// counted and never stop the remaining pairs.
pub fn transfer(
    host: &mut impl UvHost,
    source: &UvSnapshot,
    target: &UvSnapshot,
    mode: TransferMode,
) -> TransferResult {
    let coords = preview(source, target, mode);
    let pairs = coords.len();

    let mut applied = 0;
    let mut failed = 0;

    for (&index, coord) in target.order().iter().zip(coords) {
        let point = UvPoint::new(target.mesh(), index);

        match host.write_uv(point, coord) {
            Ok(()) => applied += 1,
            Err(e) => {
                failed += 1;
                debug!("UV write rejected: {e}");
            }
        }
    }

    TransferResult {
        target: target.mesh(),
        label: target.label().to_string(),
        attempted: pairs,
        applied,
        failed,
        outcome: Ok(()),
    }
}

/// Coordinates the paired target points receive, in canonical order.
fn preview(source: &UvSnapshot, target: &UvSnapshot, mode: TransferMode) -> Vec<Vec2> {
    let pairs = source.len().min(target.len());
    (0..pairs)
        .map(|i| match mode {
            TransferMode::Absolute => source.coords()[i],
            TransferMode::CentroidRelative => target.centroid() + source.offsets()[i],
        })
        .collect()
}
