//! Polygon capture: pointer events in, closed room outlines out.
//!
//! Purpose
//! - Turn committing clicks into an in-progress vertex list with a live
//!   preview edge, and close it into a `Polygon` once the user clicks near
//!   the first vertex with at least three vertices placed.
//! - Snap candidate points onto existing vertices so outlines share corners.
//! - Report each completed outline's area and perimeter to registered sinks.
//!
//! The engine owns only drawing state; rendering is delegated to a
//! `surface::Surface` passed into each call.
//!
//! Code cross-refs: `geom::Polygon`, `surface::{Surface, Scene}`

mod engine;
mod sink;
mod snap;
mod state;
mod tool;

pub use engine::{Button, CaptureCfg, CaptureEngine, Outcome, Phase};
pub use sink::{ChannelSink, FnSink, PolygonSink};
pub use snap::{LinearSnap, SnapIndex};
pub use state::DrawState;
pub use tool::ToolMode;

#[cfg(test)]
mod tests;
