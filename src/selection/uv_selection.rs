//! UV point selection made in the UV editor.

use bevy::prelude::*;
use uv_transfer::UvPoint;

/// UV points picked in the UV editor, in pick order, and the snap target.
#[derive(Resource, Default, Debug)]
pub struct UvSelection {
    pub points: Vec<UvPoint>,
    /// Points designated with "Set Target"; snapping moves other points onto these.
    pub snap_target: Vec<UvPoint>,
}

impl UvSelection {
    /// Add `point`, or remove it if it is already picked.
    pub fn toggle(&mut self, point: UvPoint) {
        if let Some(pos) = self.points.iter().position(|p| *p == point) {
            self.points.remove(pos);
        } else {
            self.points.push(point);
        }
    }

    /// Replace the pick with a single point.
    pub fn set(&mut self, point: UvPoint) {
        self.points.clear();
        self.points.push(point);
    }

    /// Append points not already picked, keeping order.
    pub fn extend(&mut self, points: impl IntoIterator<Item = UvPoint>) {
        for point in points {
            if !self.points.contains(&point) {
                self.points.push(point);
            }
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn is_target(&self, point: UvPoint) -> bool {
        self.snap_target.contains(&point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uv_transfer::MeshId;

    #[test]
    fn toggle_keeps_pick_order() {
        let mut sel = UvSelection::default();
        let p = |i| UvPoint::new(MeshId(1), i);
        sel.toggle(p(3));
        sel.toggle(p(1));
        sel.toggle(p(2));
        sel.toggle(p(1));
        assert_eq!(sel.points, vec![p(3), p(2)]);

        sel.extend([p(2), p(0)]);
        assert_eq!(sel.points, vec![p(3), p(2), p(0)]);

        sel.set(p(5));
        assert_eq!(sel.points, vec![p(5)]);
    }
}
