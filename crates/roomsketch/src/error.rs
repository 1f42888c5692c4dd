//! Errors from parsing user-facing names.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown metric `{0}` (expected euclidean or manhattan)")]
    Metric(String),
    #[error("unknown tool `{0}` (expected none, wall or curve)")]
    Tool(String),
}
