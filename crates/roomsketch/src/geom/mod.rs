//! Planar geometry for room outlines.
//!
//! Purpose
//! - Provide the `Polygon` type handed out by the capture engine (always at
//!   least three vertices, immutable once built).
//! - Measure outlines: shoelace area and closed-loop perimeter under a
//!   selectable `Metric`.
//!
//! Code cross-refs: `capture::CaptureEngine`, `units::Scale`

mod measure;
mod polygon;
pub mod rand;
mod types;

pub use measure::{perimeter, shoelace_area, signed_area};
pub use polygon::Polygon;
pub use types::{Measurement, Metric, Point, Segment};
