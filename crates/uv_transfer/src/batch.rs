//! Batch paste: one source onto many targets.
//!
//! Each target is captured, gated on topology and written independently. An
//! incompatible target is recorded and skipped; it never stops the batch.

use bevy::log::{info, warn};

use crate::error::CaptureError;
use crate::host::{MeshId, UvHost};
use crate::shell::UvRegion;
use crate::snapshot::UvSnapshot;
use crate::topology::{compatible, TopologyCheck};
use crate::transfer::{transfer, FailureReason, TransferMode, TransferResult};

/// One destination of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchTarget {
    Shell(UvRegion),
    Mesh(MeshId),
}

impl BatchTarget {
    pub fn mesh(&self) -> MeshId {
        match self {
            BatchTarget::Shell(region) => region.mesh,
            BatchTarget::Mesh(mesh) => *mesh,
        }
    }
}

/// Aggregate outcome of a batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub total: usize,
    pub succeeded: usize,
    /// One entry per target, in input order.
    pub results: Vec<TransferResult>,
}

impl BatchReport {
    /// Targets that were skipped, in input order.
    pub fn failed(&self) -> impl Iterator<Item = &TransferResult> {
        self.results.iter().filter(|r| !r.is_success())
    }

    pub fn failed_count(&self) -> usize {
        self.total - self.succeeded
    }

    /// UV writes accepted across all targets.
    pub fn points_applied(&self) -> usize {
        self.results.iter().map(|r| r.applied).sum()
    }

    /// UV writes rejected across all targets.
    pub fn points_failed(&self) -> usize {
        self.results.iter().map(|r| r.failed).sum()
    }

    /// One-line summary for status bars.
    pub fn summary(&self, noun: &str) -> String {
        let mut line = if self.failed_count() == 0 {
            format!("Pasted onto {} {}", self.succeeded, noun)
        } else {
            format!(
                "Pasted onto {}/{} {} ({} skipped)",
                self.succeeded,
                self.total,
                noun,
                self.failed_count()
            )
        };
        let rejected = self.points_failed();
        if rejected > 0 {
            line.push_str(&format!(", {rejected} UV writes rejected"));
        }
        line
    }
}

/// Paste `source` onto every target in order.
pub fn run_batch(
    host: &mut impl UvHost,
    source: &UvSnapshot,
    targets: &[BatchTarget],
    mode: TransferMode,
    check: TopologyCheck,
) -> BatchReport {
    let mut report = BatchReport {
        total: targets.len(),
        ..Default::default()
    };

    for (n, target) in targets.iter().enumerate() {
        let mesh = target.mesh();
        let label = match target {
            BatchTarget::Shell(_) => format!("{} shell #{}", host.mesh_label(mesh), n + 1),
            BatchTarget::Mesh(_) => host.mesh_label(mesh),
        };

        let captured = match target {
            BatchTarget::Shell(region) => UvSnapshot::capture_shell(host, region),
            BatchTarget::Mesh(mesh) => UvSnapshot::capture_mesh(host, *mesh),
        };

        let target_snapshot = match captured {
            Ok(snapshot) => snapshot,
            Err(CaptureError::NotUvMesh(_)) => {
                warn!("[{}/{}] {}: not a UV-bearing object", n + 1, targets.len(), label);
                report
                    .results
                    .push(TransferResult::skipped(mesh, label, FailureReason::NotUvMesh));
                continue;
            }
            Err(e) => {
                warn!("[{}/{}] {}: {}", n + 1, targets.len(), label, e);
                report
                    .results
                    .push(TransferResult::skipped(mesh, label, FailureReason::Capture(e)));
                continue;
            }
        };

        if let Err(mismatch) = compatible(&source.counts(), &target_snapshot.counts(), check) {
            warn!("[{}/{}] {}: {}", n + 1, targets.len(), label, mismatch);
            report
                .results
                .push(TransferResult::skipped(mesh, label, FailureReason::Topology(mismatch)));
            continue;
        }

        let mut result = transfer(host, source, &target_snapshot, mode);
        result.label = label;
        if result.failed > 0 {
            warn!(
                "[{}/{}] {}: applied {} UVs, {} rejected",
                n + 1,
                targets.len(),
                result.label,
                result.applied,
                result.failed
            );
        } else {
            info!(
                "[{}/{}] {}: applied {} UVs",
                n + 1,
                targets.len(),
                result.label,
                result.applied
            );
        }
        report.succeeded += 1;
        report.results.push(result);
    }

    report
}
