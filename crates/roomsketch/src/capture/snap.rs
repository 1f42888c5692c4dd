//! Snap targets: vertices of completed outlines.

use crate::geom::{Metric, Point, Polygon};

/// Lookup of existing vertices near a candidate point.
///
/// Implementations decide tie-breaks, but must be consistent for a given
/// insertion history.
pub trait SnapIndex {
    fn insert(&mut self, poly: &Polygon);
    fn clear(&mut self);
    /// Some vertex `v` with `metric.distance(p, v) < dist`, if any.
    fn find_within(&self, p: Point, dist: f64, metric: Metric) -> Option<Point>;
}

/// Linear scan over every stored vertex, first hit wins (insertion order).
#[derive(Clone, Debug, Default)]
pub struct LinearSnap {
    polygons: Vec<Polygon>,
}

impl LinearSnap {
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }
}

impl SnapIndex for LinearSnap {
    fn insert(&mut self, poly: &Polygon) {
        self.polygons.push(poly.clone());
    }

    fn clear(&mut self) {
        self.polygons.clear();
    }

    fn find_within(&self, p: Point, dist: f64, metric: Metric) -> Option<Point> {
        self.polygons
            .iter()
            .flat_map(|poly| poly.vertices().iter().copied())
            .find(|&v| metric.distance(p, v) < dist)
    }
}
