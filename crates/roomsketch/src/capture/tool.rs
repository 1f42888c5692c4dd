//! Interaction modes offered by the room designer toolbar.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolMode {
    #[default]
    None,
    /// Click-to-place wall outline drawing.
    #[serde(alias = "line")]
    Wall,
    /// Curve drawing is not supported; selecting it only deactivates walls.
    Curve,
}

impl ToolMode {
    /// Whether pointer events feed the capture engine.
    #[inline]
    pub fn is_drawing(self) -> bool {
        matches!(self, ToolMode::Wall)
    }
}

impl std::str::FromStr for ToolMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "" => Ok(ToolMode::None),
            // the toolbar labels the wall tool "Line"
            "wall" | "line" => Ok(ToolMode::Wall),
            "curve" => Ok(ToolMode::Curve),
            other => Err(ParseError::Tool(other.to_string())),
        }
    }
}

impl std::fmt::Display for ToolMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ToolMode::None => "none",
            ToolMode::Wall => "wall",
            ToolMode::Curve => "curve",
        })
    }
}
