//! Basic 2D types: points, segments, distance metrics, measurements.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// A position in the drawing surface's coordinate space (scene units).
pub type Point = Vector2<f64>;

/// Distance used for perimeters and snap tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Straight-line distance.
    #[default]
    Euclidean,
    /// Axis-aligned distance `|dx| + |dy|`.
    Manhattan,
}

impl Metric {
    #[inline]
    pub fn distance(self, a: Point, b: Point) -> f64 {
        let d = b - a;
        match self {
            Metric::Euclidean => d.norm(),
            Metric::Manhattan => d.x.abs() + d.y.abs(),
        }
    }
}

impl std::str::FromStr for Metric {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "euclidean" | "euclid" => Ok(Metric::Euclidean),
            "manhattan" | "taxicab" => Ok(Metric::Manhattan),
            other => Err(ParseError::Metric(other.to_string())),
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Metric::Euclidean => "euclidean",
            Metric::Manhattan => "manhattan",
        })
    }
}

/// Line from `from` to `to`; used for the live preview edge.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    #[inline]
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }
    #[inline]
    pub fn length(&self, metric: Metric) -> f64 {
        metric.distance(self.from, self.to)
    }
}

/// Area and perimeter of a completed outline, in scene units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub area: f64,
    pub perimeter: f64,
}
