//! # uv_transfer
//!
//! Topology-anchored UV correspondence and transfer for editor tools.
//!
//! Two UV point sets (two shells of one mesh, or two whole meshes) are paired
//! by sorting each side by the geometric vertex its points sit on. Once the
//! sets pass a topology check, coordinates are copied position by position,
//! either verbatim ([`TransferMode::Absolute`]) or as offsets from each
//! side's centroid ([`TransferMode::CentroidRelative`]).
//!
//! The crate never talks to a scene directly. Everything it needs from the
//! host application goes through the [`UvHost`] trait.
//!
//! ## Quick Start
//!
//! ```ignore
//! use uv_transfer::prelude::*;
//!
//! fn copy_then_paste(host: &mut impl UvHost, clipboard: &mut Clipboard) -> Result<(), ToolError> {
//!     let snapshot = copy_shell(host)?;
//!     clipboard.replace(snapshot);
//!
//!     // ...user selects the target shells...
//!     let source = clipboard.get().ok_or(ToolError::ClipboardEmpty)?;
//!     let report = paste_shell(host, source, TransferMode::CentroidRelative, TopologyCheck::Strict)?;
//!     info!("pasted onto {}/{} shells", report.succeeded, report.total);
//!     Ok(())
//! }
//! ```

pub mod anchor;
pub mod batch;
pub mod connectivity;
pub mod error;
pub mod host;
pub mod shell;
pub mod snap;
pub mod snapshot;
pub mod tools;
pub mod topology;
pub mod transfer;

#[cfg(test)]
mod test_host;

pub use anchor::{canonical_order, Anchor, VertexAnchorMap};
pub use batch::{run_batch, BatchReport, BatchTarget};
pub use connectivity::UvConnectivity;
pub use error::{
    CaptureError, LookupError, Mismatch, SelectionError, SnapError, ToolError, WriteError,
};
pub use host::{
    ComponentKind, MeshCounts, MeshId, SelectedComponent, UvHost, UvIndex, UvPoint, VertexId,
};
pub use shell::{extract_shells, expand_to_shells, UvRegion};
pub use snap::{snap, SnapOutcome, SnapPair, SnapReport, DEFAULT_SNAP_THRESHOLD};
pub use snapshot::{Scope, UvSnapshot};
pub use tools::{copy_mesh, copy_shell, paste_mesh, paste_shell, snap_selection, Clipboard};
pub use topology::{compatible, Metric, TopologyCheck, TopologyCounts};
pub use transfer::{transfer, FailureReason, TransferMode, TransferResult};

/// Convenient re-exports of commonly used types.
pub mod prelude {
    pub use crate::batch::{run_batch, BatchReport, BatchTarget};
    pub use crate::error::{SelectionError, SnapError, ToolError};
    pub use crate::host::{ComponentKind, MeshCounts, MeshId, UvHost, UvIndex, UvPoint};
    pub use crate::snap::{snap, SnapReport, DEFAULT_SNAP_THRESHOLD};
    pub use crate::snapshot::UvSnapshot;
    pub use crate::tools::{
        copy_mesh, copy_shell, paste_mesh, paste_shell, snap_selection, Clipboard,
    };
    pub use crate::topology::TopologyCheck;
    pub use crate::transfer::{TransferMode, TransferResult};
}
