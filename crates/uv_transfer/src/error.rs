//! Error types for UV tool operations.

use thiserror::Error;

use crate::host::{MeshId, UvPoint};
use crate::topology::Metric;

/// Problems with what the user selected. Reported before any mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// Nothing of the required kind is selected.
    #[error("nothing selected")]
    NothingSelected,

    /// Something is selected, but not the component kind the tool needs.
    #[error("select {expected} instead")]
    WrongComponentKind { expected: &'static str },

    /// Fewer points than the operation requires.
    #[error("need at least {required} points, got {found}")]
    TooFewPoints { required: usize, found: usize },

    /// The selected object carries no UV data.
    #[error("{0} has no UV data")]
    NotUvMesh(String),
}

/// A host query failed for one UV point.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("{0} not found")]
    MeshNotFound(MeshId),

    #[error("{0} out of range")]
    OutOfRange(UvPoint),

    /// The UV point is not attached to any face, so it has no vertex.
    #[error("{0} is not used by any face")]
    Unattached(UvPoint),
}

/// The host rejected a coordinate write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriteError {
    #[error("{0} does not exist")]
    Missing(UvPoint),

    #[error("{0} rejected a non-finite coordinate")]
    NonFinite(UvPoint),

    #[error("{0} is locked")]
    Locked(MeshId),
}

/// Snapshotting a region failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("region is empty")]
    Empty,

    #[error("could not read coordinate: {0}")]
    Unreadable(#[from] LookupError),

    #[error("{0} has no UV data")]
    NotUvMesh(String),
}

/// First differing topology metric between a source and a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{metric} mismatch: source {source_value}, target {target_value}")]
pub struct Mismatch {
    pub metric: Metric,
    pub source_value: usize,
    pub target_value: usize,
}

/// Snap call rejected before any write.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SnapError {
    #[error("no source points to snap")]
    EmptySource,

    #[error("no target points to snap to")]
    EmptyTarget,

    /// Source and target share points; nothing was moved.
    #[error("source and target share {shared} points")]
    Overlap { shared: usize },

    #[error("snap threshold must be a non-negative number, got {0}")]
    InvalidThreshold(f32),

    #[error("could not read coordinate: {0}")]
    Unreadable(#[from] LookupError),
}

/// Umbrella error for the top-level tool actions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolError {
    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Snap(#[from] SnapError),

    #[error("clipboard is empty, copy something first")]
    ClipboardEmpty,
}
