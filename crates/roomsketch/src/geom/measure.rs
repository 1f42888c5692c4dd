use super::types::{Metric, Point};

/// Twice-halved shoelace sum over the closed loop `pts[0] .. pts[n-1] -> pts[0]`.
///
/// Positive for counter-clockwise order (y up), negative for clockwise.
/// Fewer than three points enclose nothing and yield 0.
pub fn signed_area(pts: &[Point]) -> f64 {
    let n = pts.len();
    if n < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for i in 0..n {
        let p = pts[i];
        let q = pts[(i + 1) % n];
        acc += p.x * q.y - q.x * p.y;
    }
    acc / 2.0
}

/// Unsigned shoelace area; independent of winding order.
#[inline]
pub fn shoelace_area(pts: &[Point]) -> f64 {
    signed_area(pts).abs()
}

/// Sum of edge lengths around the closed loop, last vertex wrapping to the first.
pub fn perimeter(pts: &[Point], metric: Metric) -> f64 {
    let n = pts.len();
    if n < 2 {
        return 0.0;
    }
    (0..n)
        .map(|i| metric.distance(pts[i], pts[(i + 1) % n]))
        .sum()
}
