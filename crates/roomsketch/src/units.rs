//! Real-world units for scene measurements.
//!
//! The room designer lets the user state how many scene units make one
//! real unit (e.g. 12 px per ft). Lengths divide by that ratio, areas by its
//! square.

use serde::Serialize;
use thiserror::Error;

use crate::geom::Measurement;

/// Accepted scale range, scene units per real unit.
pub const SCALE_RANGE: std::ops::RangeInclusive<f64> = 0.01..=10_000.0;

#[derive(Debug, Error, PartialEq)]
pub enum UnitError {
    #[error("unknown unit `{0}` (expected px, in, ft, cm or m)")]
    Unknown(String),
    #[error("scale {0} outside 0.01..=10000")]
    ScaleOutOfRange(f64),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Raw scene units.
    #[default]
    Px,
    In,
    Ft,
    Cm,
    M,
}

impl Unit {
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Px => "px",
            Unit::In => "in",
            Unit::Ft => "ft",
            Unit::Cm => "cm",
            Unit::M => "m",
        }
    }
}

impl std::str::FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "px" | "px/unit" => Ok(Unit::Px),
            "in" => Ok(Unit::In),
            "ft" => Ok(Unit::Ft),
            "cm" => Ok(Unit::Cm),
            "m" => Ok(Unit::M),
            other => Err(UnitError::Unknown(other.to_string())),
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Scene units per real unit, tagged with the unit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Scale {
    per_unit: f64,
    unit: Unit,
}

impl Default for Scale {
    fn default() -> Self {
        Self {
            per_unit: 1.0,
            unit: Unit::Px,
        }
    }
}

impl Scale {
    pub fn new(per_unit: f64, unit: Unit) -> Result<Self, UnitError> {
        if !SCALE_RANGE.contains(&per_unit) {
            return Err(UnitError::ScaleOutOfRange(per_unit));
        }
        Ok(Self { per_unit, unit })
    }

    pub fn per_unit(&self) -> f64 {
        self.per_unit
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn length(&self, scene: f64) -> f64 {
        scene / self.per_unit
    }

    pub fn area(&self, scene: f64) -> f64 {
        scene / (self.per_unit * self.per_unit)
    }
}

/// Measurement converted to real units (`area` in unit², `perimeter` in unit).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ScaledMeasurement {
    pub area: f64,
    pub perimeter: f64,
    pub unit: Unit,
}

impl Measurement {
    pub fn in_units(&self, scale: &Scale) -> ScaledMeasurement {
        ScaledMeasurement {
            area: scale.area(self.area),
            perimeter: scale.length(self.perimeter),
            unit: scale.unit(),
        }
    }
}

impl std::fmt::Display for ScaledMeasurement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "area {:.2} sq {u}, perimeter {:.2} {u}",
            self.area,
            self.perimeter,
            u = self.unit
        )
    }
}
