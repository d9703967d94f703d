//! Vertex-anchored ordering of UV points.
//!
//! UV indices are not comparable across meshes (or across two shells of one
//! mesh), but the geometric vertex a UV point sits on is stable under
//! re-selection and follows the mesh's own vertex numbering. Sorting by that
//! vertex gives both sides of a transfer the same "k-th point" meaning.

use bevy::log::debug;
use std::collections::HashMap;

use crate::host::{MeshId, UvHost, UvIndex, UvPoint, VertexId};

/// Sort key of one UV point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// The point sits on this geometric vertex.
    Anchored(VertexId),
    /// The vertex lookup failed; the point is keyed by its own UV index.
    Unanchored(UvIndex),
}

impl Anchor {
    /// The value points are ordered by.
    pub fn key(self) -> u32 {
        match self {
            Anchor::Anchored(v) => v,
            Anchor::Unanchored(uv) => uv,
        }
    }

    pub fn is_anchored(self) -> bool {
        matches!(self, Anchor::Anchored(_))
    }
}

/// UV index -> anchor for one mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexAnchorMap {
    anchors: HashMap<UvIndex, Anchor>,
}

impl VertexAnchorMap {
    /// Ask the host for the vertex under every point in `ids`.
    ///
    /// A failed lookup never fails the build: the point becomes
    /// [`Anchor::Unanchored`] instead.
    pub fn build(host: &impl UvHost, mesh: MeshId, ids: &[UvIndex]) -> Self {
        let mut anchors = HashMap::with_capacity(ids.len());
        for &id in ids {
            let anchor = match host.uv_to_vertex(UvPoint::new(mesh, id)) {
                Ok(vertex) => Anchor::Anchored(vertex),
                Err(e) => {
                    debug!("Falling back to self-anchor: {e}");
                    Anchor::Unanchored(id)
                }
            };
            anchors.insert(id, anchor);
        }
        Self { anchors }
    }

    pub fn insert(&mut self, id: UvIndex, anchor: Anchor) {
        self.anchors.insert(id, anchor);
    }

    pub fn get(&self, id: UvIndex) -> Option<Anchor> {
        self.anchors.get(&id).copied()
    }

    /// Anchor of `id`, self-anchored when the map has no entry.
    pub fn anchor_of(&self, id: UvIndex) -> Anchor {
        self.get(id).unwrap_or(Anchor::Unanchored(id))
    }

    /// Number of points that fell back to self-anchoring.
    pub fn degraded_count(&self) -> usize {
        self.anchors.values().filter(|a| !a.is_anchored()).count()
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

impl FromIterator<(UvIndex, Anchor)> for VertexAnchorMap {
    fn from_iter<I: IntoIterator<Item = (UvIndex, Anchor)>>(iter: I) -> Self {
        Self {
            anchors: iter.into_iter().collect(),
        }
    }
}

/// Canonical order of `ids`: ascending anchor key, ties broken by UV index.
///
/// Always a permutation of the input. Duplicate ids are kept.
pub fn canonical_order(ids: &[UvIndex], anchors: &VertexAnchorMap) -> Vec<UvIndex> {
    let mut sorted = ids.to_vec();
    sorted.sort_by_key(|&id| (anchors.anchor_of(id).key(), id));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_host::TestHost;
    use bevy::math::Vec2;

    fn map(entries: &[(UvIndex, Anchor)]) -> VertexAnchorMap {
        entries.iter().copied().collect()
    }

    #[test]
    fn sorts_by_vertex_then_uv_index() {
        let anchors = map(&[
            (10, Anchor::Anchored(2)),
            (11, Anchor::Anchored(0)),
            (12, Anchor::Anchored(1)),
            // Seam: two UVs on vertex 1
            (13, Anchor::Anchored(1)),
        ]);
        assert_eq!(canonical_order(&[10, 11, 12, 13], &anchors), vec![11, 12, 13, 10]);
        assert_eq!(canonical_order(&[13, 10, 12, 11], &anchors), vec![11, 12, 13, 10]);
    }

    #[test]
    fn missing_entries_self_anchor() {
        let anchors = map(&[(5, Anchor::Anchored(0))]);
        // 3 has no entry and keys as 3, which sorts after vertex 0
        assert_eq!(canonical_order(&[3, 5], &anchors), vec![5, 3]);
        assert_eq!(anchors.anchor_of(3), Anchor::Unanchored(3));
    }

    #[test]
    fn order_is_a_permutation_and_idempotent() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..50 {
            let len = rng.usize(0..40);
            let ids: Vec<UvIndex> = (0..len).map(|_| rng.u32(0..30)).collect();
            let mut anchors = VertexAnchorMap::default();
            for &id in &ids {
                if rng.bool() {
                    anchors.insert(id, Anchor::Anchored(rng.u32(0..10)));
                }
            }

            let once = canonical_order(&ids, &anchors);
            let mut a = once.clone();
            let mut b = ids.clone();
            a.sort_unstable();
            b.sort_unstable();
            assert_eq!(a, b);

            assert_eq!(canonical_order(&once, &anchors), once);
        }
    }

    #[test]
    fn build_tags_failed_lookups() {
        let mut host = TestHost::new();
        let mesh = host.add_quad_strip(2, Vec2::ZERO);
        host.detach_uv(UvPoint::new(mesh, 1));

        let anchors = VertexAnchorMap::build(&host, mesh, &[0, 1, 2]);
        assert_eq!(anchors.get(1), Some(Anchor::Unanchored(1)));
        assert!(anchors.get(0).is_some_and(Anchor::is_anchored));
        assert_eq!(anchors.degraded_count(), 1);
    }
}
