//! In-progress drawing state, kept apart from any surface.

use crate::geom::{Point, Segment};

/// Vertices committed so far (click order) and the live preview edge.
///
/// Invariant: `preview.is_some()` implies `!vertices.is_empty()`.
#[derive(Clone, Debug, Default)]
pub struct DrawState {
    vertices: Vec<Point>,
    preview: Option<Segment>,
}

impl DrawState {
    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    #[inline]
    pub fn preview(&self) -> Option<&Segment> {
        self.preview.as_ref()
    }

    #[inline]
    pub fn first(&self) -> Option<Point> {
        self.vertices.first().copied()
    }

    #[inline]
    pub fn last(&self) -> Option<Point> {
        self.vertices.last().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub(crate) fn push(&mut self, p: Point) {
        self.vertices.push(p);
    }

    /// Recompute the preview from the last vertex to `to`. No-op when empty.
    pub(crate) fn aim(&mut self, to: Point) -> Option<Segment> {
        self.preview = self.last().map(|from| Segment::new(from, to));
        self.preview
    }

    /// Hand over the vertex list and reset to empty.
    pub(crate) fn take(&mut self) -> Vec<Point> {
        self.preview = None;
        std::mem::take(&mut self.vertices)
    }

    pub(crate) fn reset(&mut self) {
        self.vertices.clear();
        self.preview = None;
    }
}
