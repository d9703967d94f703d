//! Topology compatibility gate for positional pairing.
//!
//! Pairing the k-th source point with the k-th target point is only
//! meaningful when both sides have the same shape, so every target is checked
//! before any coordinate is written.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Mismatch;
use crate::host::MeshCounts;

/// A compared topology metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    VertexCount,
    FaceCount,
    UvCount,
}

impl Metric {
    pub fn display_name(&self) -> &'static str {
        match self {
            Metric::VertexCount => "vertex count",
            Metric::FaceCount => "face count",
            Metric::UvCount => "UV count",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// How strictly source and target topology must agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TopologyCheck {
    /// Every count must match exactly.
    #[default]
    Strict,
    /// Skip the check and pair as many points as both sides have.
    Lenient,
}

impl TopologyCheck {
    pub fn display_name(&self) -> &'static str {
        match self {
            TopologyCheck::Strict => "Strict",
            TopologyCheck::Lenient => "Lenient",
        }
    }
}

/// Counts compared by [`compatible`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TopologyCounts {
    /// A UV shell: only its size.
    Shell { uv_count: usize },
    /// A whole mesh.
    Mesh(MeshCounts),
}

impl TopologyCounts {
    /// Metrics in comparison order.
    pub fn metrics(&self) -> Vec<(Metric, usize)> {
        match *self {
            TopologyCounts::Shell { uv_count } => vec![(Metric::UvCount, uv_count)],
            TopologyCounts::Mesh(c) => vec![
                (Metric::VertexCount, c.vertex_count),
                (Metric::FaceCount, c.face_count),
                (Metric::UvCount, c.uv_count),
            ],
        }
    }

    pub fn uv_count(&self) -> usize {
        match *self {
            TopologyCounts::Shell { uv_count } => uv_count,
            TopologyCounts::Mesh(c) => c.uv_count,
        }
    }
}

/// Check that `target` can be paired positionally with `source`.
///
/// Reports only the first differing metric, in the order vertex count, face
/// count, UV count. A shell compared with a mesh is compared on UV count.
pub fn compatible(
    source: &TopologyCounts,
    target: &TopologyCounts,
    check: TopologyCheck,
) -> Result<(), Mismatch> {
    if check == TopologyCheck::Lenient {
        return Ok(());
    }

    let (source_metrics, target_metrics) = match (source, target) {
        (TopologyCounts::Mesh(_), TopologyCounts::Mesh(_)) => (source.metrics(), target.metrics()),
        _ => (
            vec![(Metric::UvCount, source.uv_count())],
            vec![(Metric::UvCount, target.uv_count())],
        ),
    };

    for ((metric, source_value), (_, target_value)) in source_metrics.into_iter().zip(target_metrics) {
        if source_value != target_value {
            return Err(Mismatch {
                metric,
                source_value,
                target_value,
            });
        }
    }

    Ok(())
}
