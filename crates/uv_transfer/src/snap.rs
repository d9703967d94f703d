//! Snap UV points onto the nearest point of another point set.

use bevy::log::{debug, info};
use bevy::math::Vec2;
use std::collections::HashSet;

use crate::error::SnapError;
use crate::host::{UvHost, UvPoint};

/// Default snap distance in UV units.
pub const DEFAULT_SNAP_THRESHOLD: f32 = 0.01;

/// What happened to one source point.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapOutcome {
    /// Moved onto the target coordinate.
    Snapped,
    /// Nearest target is farther than the threshold; left in place.
    ExceedsThreshold,
    /// Within threshold but the host rejected the write.
    WriteFailed,
}

/// A source point, its nearest target and what was done about it.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapPair {
    pub source: UvPoint,
    pub target: UvPoint,
    pub distance: f32,
    pub outcome: SnapOutcome,
}

/// Result of a snap call, one pair per source point in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapReport {
    pub pairs: Vec<SnapPair>,
    pub threshold: f32,
}

impl SnapReport {
    pub fn snapped(&self) -> usize {
        self.count(SnapOutcome::Snapped)
    }

    pub fn out_of_range(&self) -> usize {
        self.count(SnapOutcome::ExceedsThreshold)
    }

    pub fn write_failures(&self) -> usize {
        self.count(SnapOutcome::WriteFailed)
    }

    fn count(&self, outcome: SnapOutcome) -> usize {
        self.pairs.iter().filter(|p| p.outcome == outcome).count()
    }

    pub fn summary(&self) -> String {
        let mut line = format!("Snapped {}/{} UVs", self.snapped(), self.pairs.len());
        if self.out_of_range() > 0 {
            line.push_str(&format!(
                ", {} beyond {:.3}",
                self.out_of_range(),
                self.threshold
            ));
        }
        if self.write_failures() > 0 {
            line.push_str(&format!(", {} rejected", self.write_failures()));
        }
        line
    }
}

/// Move each source point onto its nearest target point if it lies within
/// `threshold`.
///
/// The two sets must be disjoint: a point cannot both move and anchor. All
/// validation and every target read happens before the first write. Ties
/// keep the target that comes first in `target_points`.
pub fn snap(
    host: &mut impl UvHost,
    source_points: &[UvPoint],
    target_points: &[UvPoint],
    threshold: f32,
) -> Result<SnapReport, SnapError> {
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(SnapError::InvalidThreshold(threshold));
    }
    if source_points.is_empty() {
        return Err(SnapError::EmptySource);
    }
    if target_points.is_empty() {
        return Err(SnapError::EmptyTarget);
    }

    let target_set: HashSet<UvPoint> = target_points.iter().copied().collect();
    let shared = source_points
        .iter()
        .copied()
        .collect::<HashSet<_>>()
        .intersection(&target_set)
        .count();
    if shared > 0 {
        return Err(SnapError::Overlap { shared });
    }

    let targets = target_points
        .iter()
        .map(|&p| host.read_uv(p).map(|c| (p, c)))
        .collect::<Result<Vec<_>, _>>()?;
    let sources = source_points
        .iter()
        .map(|&p| host.read_uv(p).map(|c| (p, c)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut report = SnapReport {
        pairs: Vec::with_capacity(sources.len()),
        threshold,
    };

    for (source, coord) in sources {
        let Some((target, target_coord, distance)) = nearest(coord, &targets) else {
            continue;
        };

        let outcome = if distance > threshold {
            debug!("{source} is {distance:.4} from nearest target, beyond {threshold:.4}");
            SnapOutcome::ExceedsThreshold
        } else {
            match host.write_uv(source, target_coord) {
                Ok(()) => SnapOutcome::Snapped,
                Err(e) => {
                    debug!("Snap write rejected: {e}");
                    SnapOutcome::WriteFailed
                }
            }
        };

        report.pairs.push(SnapPair {
            source,
            target,
            distance,
            outcome,
        });
    }

    info!("{}", report.summary());
    Ok(report)
}

/// Nearest target to `coord`; the first one wins ties.
fn nearest(coord: Vec2, targets: &[(UvPoint, Vec2)]) -> Option<(UvPoint, Vec2, f32)> {
    let mut best: Option<(UvPoint, Vec2, f32)> = None;
    for &(point, target) in targets {
        let d = coord.distance(target);
        if best.is_none_or(|(_, _, best_d)| d < best_d) {
            best = Some((point, target, d));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_host::TestHost;

    /// Source at (0,0) on one mesh, targets at (0.005,0) and (0.5,0.5) on another.
    fn setup() -> (TestHost, UvPoint, Vec<UvPoint>) {
        let mut host = TestHost::new();
        let src = host.add_mesh(vec![Vec2::ZERO], vec![Some(0)], 1, Vec::new());
        let dst = host.add_mesh(
            vec![Vec2::new(0.005, 0.0), Vec2::new(0.5, 0.5)],
            vec![Some(0), Some(1)],
            2,
            Vec::new(),
        );
        (
            host,
            UvPoint::new(src, 0),
            vec![UvPoint::new(dst, 0), UvPoint::new(dst, 1)],
        )
    }

    #[test]
    fn snaps_within_threshold() {
        let (mut host, source, targets) = setup();
        let report = snap(&mut host, &[source], &targets, 0.01).unwrap();
        assert_eq!(report.snapped(), 1);
        assert_eq!(report.pairs[0].target, targets[0]);
        assert_eq!(host.uv(source), Vec2::new(0.005, 0.0));
    }

    #[test]
    fn leaves_points_beyond_threshold() {
        let (mut host, source, targets) = setup();
        let report = snap(&mut host, &[source], &targets, 0.001).unwrap();
        assert_eq!(report.pairs[0].outcome, SnapOutcome::ExceedsThreshold);
        assert!((report.pairs[0].distance - 0.005).abs() < 1e-6);
        assert_eq!(host.uv(source), Vec2::ZERO);
    }

    #[test]
    fn overlapping_sets_are_rejected_before_writing() {
        let (mut host, source, targets) = setup();
        let mut sources = vec![source, targets[1]];
        let err = snap(&mut host, &sources, &targets, 1.0).unwrap_err();
        assert_eq!(err, SnapError::Overlap { shared: 1 });
        assert_eq!(host.uv(source), Vec2::ZERO);
        assert_eq!(host.write_count(), 0);

        sources.pop();
        assert!(snap(&mut host, &sources, &targets, 1.0).is_ok());
    }

    #[test]
    fn ties_keep_first_target() {
        let mut host = TestHost::new();
        let m = host.add_mesh(
            vec![Vec2::ZERO, Vec2::new(0.1, 0.0), Vec2::new(-0.1, 0.0)],
            vec![Some(0), Some(1), Some(2)],
            3,
            Vec::new(),
        );
        let p = |i| UvPoint::new(m, i);
        let report = snap(&mut host, &[p(0)], &[p(2), p(1)], 0.5).unwrap();
        assert_eq!(report.pairs[0].target, p(2));
        assert_eq!(host.uv(p(0)), Vec2::new(-0.1, 0.0));
    }

    #[test]
    fn rejects_empty_and_invalid_input() {
        let (mut host, source, targets) = setup();
        assert_eq!(snap(&mut host, &[], &targets, 0.1), Err(SnapError::EmptySource));
        assert_eq!(snap(&mut host, &[source], &[], 0.1), Err(SnapError::EmptyTarget));
        assert!(matches!(
            snap(&mut host, &[source], &targets, -1.0),
            Err(SnapError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn write_failures_are_reported_per_pair() {
        let (mut host, source, targets) = setup();
        host.reject_writes(source);
        let report = snap(&mut host, &[source], &targets, 0.01).unwrap();
        assert_eq!(report.write_failures(), 1);
        assert_eq!(report.summary(), "Snapped 0/1 UVs, 1 rejected");
    }
}
