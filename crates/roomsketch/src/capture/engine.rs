//! The capture state machine.
//!
//! Phases
//! - `Idle`: tool inactive or nothing placed yet.
//! - `Drawing`: at least one vertex committed, preview edge live.
//! - Closing is instantaneous: the outline is emitted and the engine is
//!   back to `Idle` within the same click.
//!
//! Every click resolves to start, append, or close; nothing is rejected.

use serde::{Deserialize, Serialize};

use super::sink::{FnSink, PolygonSink};
use super::snap::{LinearSnap, SnapIndex};
use super::state::DrawState;
use super::tool::ToolMode;
use crate::geom::{Measurement, Metric, Point, Polygon, Segment};
use crate::surface::{Rgba, Style, Surface};

/// Engine configuration.
#[derive(Clone, Copy, Debug)]
pub struct CaptureCfg {
    /// Snap radius in scene units (strict `<`).
    pub snap_dist: f64,
    pub snap_metric: Metric,
    pub perimeter_metric: Metric,
    pub preview_style: Style,
    pub room_style: Style,
}

impl Default for CaptureCfg {
    fn default() -> Self {
        Self {
            snap_dist: 10.0,
            snap_metric: Metric::Manhattan,
            perimeter_metric: Metric::Euclidean,
            preview_style: Style::preview(),
            room_style: Style::room(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    Left,
    Middle,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Drawing,
}

/// How a single event was interpreted.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// Not for the engine (tool inactive, other button, nothing to preview).
    Ignored,
    /// First vertex placed.
    Started(Point),
    /// Another vertex appended.
    Appended(Point),
    /// Preview edge recomputed.
    Previewed(Segment),
    /// Outline closed and reported.
    Closed(Measurement),
}

/// Converts pointer events into closed outlines.
///
/// Generic over the snap lookup so a spatial index can replace the linear
/// scan without changing the event contract.
pub struct CaptureEngine<S: SnapIndex = LinearSnap> {
    cfg: CaptureCfg,
    tool: ToolMode,
    state: DrawState,
    snap: S,
    sinks: Vec<Box<dyn PolygonSink>>,
}

impl CaptureEngine<LinearSnap> {
    pub fn new(cfg: CaptureCfg) -> Self {
        Self::with_index(cfg, LinearSnap::default())
    }
}

impl Default for CaptureEngine<LinearSnap> {
    fn default() -> Self {
        Self::new(CaptureCfg::default())
    }
}

impl<S: SnapIndex> CaptureEngine<S> {
    pub fn with_index(cfg: CaptureCfg, snap: S) -> Self {
        Self {
            cfg,
            tool: ToolMode::None,
            state: DrawState::default(),
            snap,
            sinks: Vec::new(),
        }
    }

    pub fn cfg(&self) -> &CaptureCfg {
        &self.cfg
    }

    pub fn tool(&self) -> ToolMode {
        self.tool
    }

    pub fn phase(&self) -> Phase {
        if self.state.is_empty() {
            Phase::Idle
        } else {
            Phase::Drawing
        }
    }

    pub fn vertices(&self) -> &[Point] {
        self.state.vertices()
    }

    pub fn preview(&self) -> Option<&Segment> {
        self.state.preview()
    }

    pub fn snap_index(&self) -> &S {
        &self.snap
    }

    pub fn subscribe(&mut self, sink: impl PolygonSink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    /// Shorthand for `subscribe(FnSink(f))`.
    pub fn on_completed(&mut self, f: impl FnMut(&Polygon, Measurement) + 'static) {
        self.subscribe(FnSink(f));
    }

    /// Stroke color for subsequent preview edges.
    pub fn set_stroke_color(&mut self, color: Rgba) {
        self.cfg.preview_style.stroke = color;
    }

    /// Switch interaction mode; leaving wall drawing discards the outline in progress.
    pub fn set_tool(&mut self, surface: &mut impl Surface, tool: ToolMode) {
        tracing::debug!(from = %self.tool, to = %tool, "set_tool");
        self.tool = tool;
        if !tool.is_drawing() {
            self.discard(surface);
        }
    }

    /// Drop the outline in progress without reporting it.
    pub fn cancel(&mut self, surface: &mut impl Surface) {
        self.discard(surface);
    }

    /// Remove every completed outline and the preview; background stays.
    pub fn clear(&mut self, surface: &mut impl Surface) {
        surface.remove_polygons();
        self.snap.clear();
        self.discard(surface);
        tracing::debug!("cleared");
    }

    pub fn pointer_down(
        &mut self,
        surface: &mut impl Surface,
        pos: Point,
        button: Button,
    ) -> Outcome {
        if !self.tool.is_drawing() || button != Button::Left {
            return Outcome::Ignored;
        }
        let pos = self.resolve(pos);
        let Some(first) = self.state.first() else {
            self.state.push(pos);
            self.refresh_preview(surface, pos);
            tracing::debug!(x = pos.x, y = pos.y, "outline started");
            return Outcome::Started(pos);
        };
        if self.state.len() >= 3 && self.within_snap(pos, first) {
            return Outcome::Closed(self.finish(surface));
        }
        self.state.push(pos);
        self.refresh_preview(surface, pos);
        tracing::trace!(x = pos.x, y = pos.y, n = self.state.len(), "vertex appended");
        Outcome::Appended(pos)
    }

    pub fn pointer_move(&mut self, surface: &mut impl Surface, pos: Point) -> Outcome {
        if !self.tool.is_drawing() || self.state.is_empty() {
            return Outcome::Ignored;
        }
        let pos = self.resolve(pos);
        match self.refresh_preview(surface, pos) {
            Some(seg) => Outcome::Previewed(seg),
            None => Outcome::Ignored,
        }
    }

    /// Snap `pos` onto a completed outline's vertex, else onto the first
    /// in-progress vertex once the outline can close, else keep it.
    /// Below three vertices the first vertex is not a target, so an early
    /// click near it appends a distinct vertex.
    fn resolve(&self, pos: Point) -> Point {
        if let Some(v) = self
            .snap
            .find_within(pos, self.cfg.snap_dist, self.cfg.snap_metric)
        {
            return v;
        }
        match self.state.first() {
            Some(first) if self.state.len() >= 3 && self.within_snap(pos, first) => first,
            _ => pos,
        }
    }

    #[inline]
    fn within_snap(&self, a: Point, b: Point) -> bool {
        self.cfg.snap_metric.distance(a, b) < self.cfg.snap_dist
    }

    fn refresh_preview(&mut self, surface: &mut impl Surface, to: Point) -> Option<Segment> {
        let seg = self.state.aim(to)?;
        surface.show_preview(seg, &self.cfg.preview_style);
        Some(seg)
    }

    fn finish(&mut self, surface: &mut impl Surface) -> Measurement {
        let poly = Polygon::from_loop(self.state.take());
        let m = poly.measure(self.cfg.perimeter_metric);
        surface.hide_preview();
        surface.add_polygon(&poly, &self.cfg.room_style);
        self.snap.insert(&poly);
        tracing::debug!(
            vertices = poly.len(),
            area = m.area,
            perimeter = m.perimeter,
            "outline closed"
        );
        for sink in &mut self.sinks {
            sink.polygon_completed(&poly, m);
        }
        m
    }

    fn discard(&mut self, surface: &mut impl Surface) {
        if !self.state.is_empty() {
            tracing::debug!(vertices = self.state.len(), "outline discarded");
        }
        self.state.reset();
        surface.hide_preview();
    }
}
