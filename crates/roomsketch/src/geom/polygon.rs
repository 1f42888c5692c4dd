use serde::Serialize;

use super::measure::{perimeter, shoelace_area, signed_area};
use super::types::{Measurement, Metric, Point, Segment};

/// Closed outline produced by the capture engine.
///
/// Invariants:
/// - At least three vertices.
/// - The closing edge is implicit (no duplicated first vertex at the end).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// Returns `None` for fewer than three vertices.
    pub fn new(vertices: Vec<Point>) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }
        Some(Self { vertices })
    }

    /// Caller guarantees `vertices.len() >= 3`.
    pub(crate) fn from_loop(vertices: Vec<Point>) -> Self {
        debug_assert!(vertices.len() >= 3);
        Self { vertices }
    }

    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always false; kept for parity with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Edges in vertex order, including the closing edge back to vertex 0.
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| Segment::new(self.vertices[i], self.vertices[(i + 1) % n]))
    }

    pub fn signed_area(&self) -> f64 {
        signed_area(&self.vertices)
    }

    pub fn area(&self) -> f64 {
        shoelace_area(&self.vertices)
    }

    pub fn perimeter(&self, metric: Metric) -> f64 {
        perimeter(&self.vertices, metric)
    }

    pub fn measure(&self, metric: Metric) -> Measurement {
        Measurement {
            area: self.area(),
            perimeter: self.perimeter(metric),
        }
    }
}
