//! Receivers of "polygon completed" notifications.

use std::sync::mpsc::Sender;

use crate::geom::{Measurement, Polygon};

/// Notified synchronously each time an outline is closed.
pub trait PolygonSink {
    fn polygon_completed(&mut self, poly: &Polygon, m: Measurement);
}

/// Adapts a closure into a sink.
pub struct FnSink<F>(pub F);

impl<F> PolygonSink for FnSink<F>
where
    F: FnMut(&Polygon, Measurement),
{
    fn polygon_completed(&mut self, poly: &Polygon, m: Measurement) {
        (self.0)(poly, m)
    }
}

/// Forwards measurements into a channel; a dropped receiver is ignored.
pub struct ChannelSink(pub Sender<Measurement>);

impl PolygonSink for ChannelSink {
    fn polygon_completed(&mut self, _poly: &Polygon, m: Measurement) {
        if self.0.send(m).is_err() {
            tracing::trace!("measurement receiver dropped");
        }
    }
}
