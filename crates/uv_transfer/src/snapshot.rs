//! Immutable captures of UV regions.
//!
//! A snapshot records everything a later paste needs: the canonical order,
//! the coordinates in that order, and the centroid the relative offsets are
//! measured from. Once built it is never modified.

use bevy::log::debug;
use bevy::math::Vec2;

use crate::anchor::{canonical_order, VertexAnchorMap};
use crate::error::CaptureError;
use crate::host::{MeshCounts, MeshId, UvHost, UvIndex, UvPoint};
use crate::shell::UvRegion;
use crate::topology::TopologyCounts;

/// What a snapshot covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// One connected UV shell.
    Shell,
    /// Every UV point of a mesh.
    Mesh(MeshCounts),
}

/// Captured UV region in canonical (vertex-anchored) order.
#[derive(Debug, Clone, PartialEq)]
pub struct UvSnapshot {
    mesh: MeshId,
    label: String,
    scope: Scope,
    order: Vec<UvIndex>,
    coords: Vec<Vec2>,
    offsets: Vec<Vec2>,
    anchors: VertexAnchorMap,
    centroid: Vec2,
}

impl UvSnapshot {
    /// Capture the given UV points of `mesh`.
    ///
    /// Duplicate ids are collapsed. Fails if the set is empty or any
    /// coordinate cannot be read.
    pub fn capture(
        host: &impl UvHost,
        mesh: MeshId,
        ids: &[UvIndex],
        scope: Scope,
    ) -> Result<Self, CaptureError> {
        let mut unique = ids.to_vec();
        unique.sort_unstable();
        unique.dedup();
        if unique.is_empty() {
            return Err(CaptureError::Empty);
        }

        let anchors = VertexAnchorMap::build(host, mesh, &unique);
        let order = canonical_order(&unique, &anchors);

        let coords = order
            .iter()
            .map(|&id| host.read_uv(UvPoint::new(mesh, id)))
            .collect::<Result<Vec<_>, _>>()?;

        let centroid = centroid(&coords);
        let offsets = coords.iter().map(|&c| c - centroid).collect();

        let degraded = anchors.degraded_count();
        if degraded > 0 {
            debug!(
                "{} of {} UV points on {} ordered by UV index (no vertex)",
                degraded,
                order.len(),
                mesh
            );
        }

        Ok(Self {
            mesh,
            label: host.mesh_label(mesh),
            scope,
            order,
            coords,
            offsets,
            anchors,
            centroid,
        })
    }

    /// Capture one connected shell.
    pub fn capture_shell(host: &impl UvHost, region: &UvRegion) -> Result<Self, CaptureError> {
        Self::capture(host, region.mesh, &region.indices, Scope::Shell)
    }

    /// Capture every UV point of a mesh, with its topology counts.
    pub fn capture_mesh(host: &impl UvHost, mesh: MeshId) -> Result<Self, CaptureError> {
        let counts = host
            .mesh_counts(mesh)
            .filter(|c| c.uv_count > 0)
            .ok_or_else(|| CaptureError::NotUvMesh(host.mesh_label(mesh)))?;
        let ids: Vec<UvIndex> = (0..counts.uv_count as UvIndex).collect();
        Self::capture(host, mesh, &ids, Scope::Mesh(counts))
    }

    pub fn mesh(&self) -> MeshId {
        self.mesh
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// UV indices in canonical order.
    pub fn order(&self) -> &[UvIndex] {
        &self.order
    }

    /// Coordinates, aligned with [`order`](Self::order).
    pub fn coords(&self) -> &[Vec2] {
        &self.coords
    }

    /// Offsets from the centroid, aligned with [`order`](Self::order).
    pub fn offsets(&self) -> &[Vec2] {
        &self.offsets
    }

    pub fn anchors(&self) -> &VertexAnchorMap {
        &self.anchors
    }

    pub fn centroid(&self) -> Vec2 {
        self.centroid
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Points whose order fell back to their UV index.
    pub fn degraded_count(&self) -> usize {
        self.anchors.degraded_count()
    }

    /// Counts used by the topology gate.
    pub fn counts(&self) -> TopologyCounts {
        match self.scope {
            Scope::Shell => TopologyCounts::Shell {
                uv_count: self.order.len(),
            },
            Scope::Mesh(counts) => TopologyCounts::Mesh(counts),
        }
    }

    /// `(uv index, coordinate)` pairs in canonical order.
    pub fn points(&self) -> impl Iterator<Item = (UvIndex, Vec2)> + '_ {
        self.order.iter().copied().zip(self.coords.iter().copied())
    }
}

/// Arithmetic mean of a point set; zero for an empty set.
pub fn centroid(points: &[Vec2]) -> Vec2 {
    if points.is_empty() {
        return Vec2::ZERO;
    }
    points.iter().copied().sum::<Vec2>() / points.len() as f32
}
