//! UV shell connectivity.
//!
//! A shell is a maximal set of UV points connected through the UV edges of
//! the mesh's faces. Computed once from face data so that region queries are
//! pure lookups.

use std::collections::VecDeque;

use crate::host::UvIndex;

/// Precomputed UV shells of one mesh.
#[derive(Debug, Clone, Default)]
pub struct UvConnectivity {
    /// Shell id for each UV index.
    shell_of: Vec<u32>,
    /// Members of each shell, ascending.
    shells: Vec<Vec<UvIndex>>,
}

impl UvConnectivity {
    /// Build from faces given as UV-index triangles.
    ///
    /// UV points not referenced by any face form single-point shells. Face
    /// indices outside `uv_count` are ignored.
    pub fn from_triangles(uv_count: usize, triangles: &[[UvIndex; 3]]) -> Self {
        let mut neighbors: Vec<Vec<UvIndex>> = vec![Vec::new(); uv_count];
        for tri in triangles {
            if tri.iter().any(|&i| i as usize >= uv_count) {
                continue;
            }
            for i in 0..3 {
                let a = tri[i];
                let b = tri[(i + 1) % 3];
                if a != b {
                    neighbors[a as usize].push(b);
                    neighbors[b as usize].push(a);
                }
            }
        }

        let mut shell_of = vec![u32::MAX; uv_count];
        let mut shells = Vec::new();

        for start in 0..uv_count {
            if shell_of[start] != u32::MAX {
                continue;
            }

            let shell_id = shells.len() as u32;
            let mut members = Vec::new();
            let mut queue = VecDeque::new();
            shell_of[start] = shell_id;
            queue.push_back(start as UvIndex);

            while let Some(uv) = queue.pop_front() {
                members.push(uv);
                for &n in &neighbors[uv as usize] {
                    if shell_of[n as usize] == u32::MAX {
                        shell_of[n as usize] = shell_id;
                        queue.push_back(n);
                    }
                }
            }

            members.sort_unstable();
            shells.push(members);
        }

        Self { shell_of, shells }
    }

    /// All UV points in the shell containing `seed`, ascending. Empty if
    /// `seed` is out of range.
    pub fn region(&self, seed: UvIndex) -> &[UvIndex] {
        self.shell_of
            .get(seed as usize)
            .map(|&s| self.shells[s as usize].as_slice())
            .unwrap_or(&[])
    }

    /// Shell id of a UV point.
    pub fn shell_id(&self, uv: UvIndex) -> Option<u32> {
        self.shell_of.get(uv as usize).copied()
    }

    pub fn shell_count(&self) -> usize {
        self.shells.len()
    }

    pub fn uv_count(&self) -> usize {
        self.shell_of.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_triangles_sharing_an_edge_form_one_shell() {
        let conn = UvConnectivity::from_triangles(4, &[[0, 1, 2], [1, 3, 2]]);
        assert_eq!(conn.shell_count(), 1);
        assert_eq!(conn.region(3), &[0, 1, 2, 3]);
    }

    #[test]
    fn disjoint_faces_and_orphans_are_separate_shells() {
        let conn = UvConnectivity::from_triangles(7, &[[0, 1, 2], [3, 4, 5]]);
        assert_eq!(conn.shell_count(), 3);
        assert_eq!(conn.region(4), &[3, 4, 5]);
        assert_eq!(conn.region(6), &[6]);
        assert_ne!(conn.shell_id(0), conn.shell_id(3));
    }

    #[test]
    fn out_of_range_seed_is_empty() {
        let conn = UvConnectivity::from_triangles(3, &[[0, 1, 2]]);
        assert!(conn.region(3).is_empty());
        assert_eq!(conn.shell_id(99), None);
    }

    #[test]
    fn malformed_triangles_are_skipped() {
        let conn = UvConnectivity::from_triangles(3, &[[0, 1, 9], [1, 2, 2]]);
        assert_eq!(conn.region(0), &[0]);
        assert_eq!(conn.region(1), &[1, 2]);
    }
}
