//! Shell extraction from a raw UV selection.

use std::collections::HashSet;

use crate::host::{MeshId, UvHost, UvIndex, UvPoint};

/// A connected set of UV points on one mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UvRegion {
    pub mesh: MeshId,
    /// Ascending UV indices.
    pub indices: Vec<UvIndex>,
}

impl UvRegion {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn contains(&self, point: UvPoint) -> bool {
        point.mesh == self.mesh && self.indices.binary_search(&point.index).is_ok()
    }

    pub fn points(&self) -> impl Iterator<Item = UvPoint> + '_ {
        self.indices.iter().map(|&i| UvPoint::new(self.mesh, i))
    }
}

/// Split a selection into the shells it touches, one region per shell.
///
/// Shells appear in the order their first point appears in `selected`.
/// Points whose region is empty (stale selection) are skipped.
pub fn extract_shells(host: &impl UvHost, selected: &[UvPoint]) -> Vec<UvRegion> {
    let mut visited: HashSet<UvPoint> = HashSet::new();
    let mut regions = Vec::new();

    for &point in selected {
        if visited.contains(&point) {
            continue;
        }

        let region = host.connected_region(point);
        if region.is_empty() {
            continue;
        }

        let mut indices: Vec<UvIndex> = region
            .iter()
            .filter(|p| p.mesh == point.mesh)
            .map(|p| p.index)
            .collect();
        indices.sort_unstable();
        indices.dedup();

        visited.extend(region);
        // The seed is always part of its own shell.
        visited.insert(point);

        regions.push(UvRegion {
            mesh: point.mesh,
            indices,
        });
    }

    regions
}

/// Every point of every shell touched by `selected`, in shell order.
pub fn expand_to_shells(host: &impl UvHost, selected: &[UvPoint]) -> Vec<UvPoint> {
    extract_shells(host, selected)
        .iter()
        .flat_map(|r| r.points().collect::<Vec<_>>())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_host::TestHost;
    use bevy::math::Vec2;

    #[test]
    fn one_region_per_shell_in_first_encounter_order() {
        let mut host = TestHost::new();
        // Shell A = uv 0..4, shell B = uv 4..8
        let mesh = host.add_strips(&[(1, Vec2::ZERO), (1, Vec2::new(0.5, 0.0))]);
        let p = |i| UvPoint::new(mesh, i);

        let regions = extract_shells(&host, &[p(5), p(1), p(6), p(0), p(7)]);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].indices, vec![4, 5, 6, 7]);
        assert_eq!(regions[1].indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn shells_on_different_meshes_stay_separate() {
        let mut host = TestHost::new();
        let a = host.add_quad_strip(1, Vec2::ZERO);
        let b = host.add_quad_strip(1, Vec2::ZERO);

        let regions = extract_shells(&host, &[UvPoint::new(a, 0), UvPoint::new(b, 0)]);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].mesh, a);
        assert_eq!(regions[1].mesh, b);
    }

    #[test]
    fn empty_selection_yields_nothing() {
        let host = TestHost::new();
        assert!(extract_shells(&host, &[]).is_empty());
        // Stale point on a mesh that no longer exists
        assert!(extract_shells(&host, &[UvPoint::new(MeshId(3), 0)]).is_empty());
    }

    #[test]
    fn expand_covers_whole_shells() {
        let mut host = TestHost::new();
        let mesh = host.add_strips(&[(2, Vec2::ZERO), (1, Vec2::new(0.5, 0.0))]);
        let expanded = expand_to_shells(&host, &[UvPoint::new(mesh, 7)]);
        assert_eq!(expanded.len(), 4);
        assert!(expanded.iter().all(|p| p.index >= 6));
    }
}
