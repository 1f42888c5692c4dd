//! Room outline capture and measurement.
//!
//! A host surface feeds pointer events into [`capture::CaptureEngine`], which
//! turns clicks into closed polygons (snapping to existing vertices) and
//! reports each finished outline's area and perimeter.
//!
//! Layout
//! - `geom`: points, segments, polygons, shoelace area and perimeter.
//! - `capture`: the drawing state machine, snapping, tool modes, sinks.
//! - `surface`: render-list abstraction plus the headless `Scene`.
//! - `units`: conversion of scene measurements into real-world units.

pub mod capture;
pub mod error;
pub mod geom;
pub mod surface;
pub mod units;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::Vector2 as Vec2;

/// Common exports for hosts wiring the engine to a surface.
pub mod prelude {
    pub use crate::capture::{
        Button, CaptureCfg, CaptureEngine, ChannelSink, FnSink, LinearSnap, Outcome, Phase,
        PolygonSink, SnapIndex, ToolMode,
    };
    pub use crate::error::ParseError;
    pub use crate::geom::{Measurement, Metric, Point, Polygon, Segment};
    pub use crate::surface::{Item, Rgba, Scene, Style, Surface};
    pub use crate::units::{Scale, ScaledMeasurement, Unit, UnitError};
}
