use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use std::process::Command;

use roomsketch::geom::Measurement;
use roomsketch::units::{Scale, ScaledMeasurement};

/// One closed outline as it appears in a report.
#[derive(Debug, Serialize)]
pub struct RoomEntry {
    /// Zero-based position of the closing event in the script.
    pub event: usize,
    pub vertices: Vec<[f64; 2]>,
    pub measurement: Measurement,
    pub scaled: ScaledMeasurement,
}

impl RoomEntry {
    pub fn new(event: usize, vertices: Vec<[f64; 2]>, m: Measurement, scale: &Scale) -> Self {
        Self {
            event,
            vertices,
            measurement: m,
            scaled: m.in_units(scale),
        }
    }
}

/// Assemble the report document: code revision, params, rooms.
pub fn document(params: Value, rooms: &[RoomEntry]) -> Result<Value> {
    Ok(json!({
        "code_rev": current_git_rev(),
        "version": roomsketch::VERSION,
        "params": params,
        "rooms": serde_json::to_value(rooms)?,
    }))
}

/// Write `doc` as pretty JSON to `out`, creating parent directories.
pub fn write_report<P: AsRef<Path>>(out: P, doc: &Value) -> Result<()> {
    let out = out.as_ref();
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating report dir {}", parent.display()))?;
        }
    }
    fs::write(out, serde_json::to_vec_pretty(doc)?)
        .with_context(|| format!("writing {}", out.display()))?;
    Ok(())
}

pub fn current_git_rev() -> String {
    if let Some(from_env) = option_env!("GIT_COMMIT") {
        if !from_env.is_empty() {
            return from_env.to_string();
        }
    }
    if let Ok(env_override) = std::env::var("GIT_COMMIT") {
        if !env_override.is_empty() {
            return env_override;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
