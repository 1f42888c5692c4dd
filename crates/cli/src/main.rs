mod report;
mod script;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

use roomsketch::geom::rand::{draw_rooms, RoomCfg, VertexCount};
use roomsketch::geom::{Metric, Polygon};
use roomsketch::prelude::{CaptureCfg, Scale, Unit};

use report::RoomEntry;

#[derive(Parser)]
#[command(name = "roomsketch-cli")]
#[command(about = "Replay room outline drawings and measure them")]
struct Cmd {
    /// Snap radius in scene units
    #[arg(long, default_value_t = 10.0)]
    snap_dist: f64,
    /// Perimeter metric: euclidean or manhattan
    #[arg(long, default_value_t = Metric::Euclidean)]
    perimeter_metric: Metric,
    /// Real-world unit: px, in, ft, cm, m
    #[arg(long, default_value_t = Unit::Px)]
    unit: Unit,
    /// Scene units per real unit
    #[arg(long, default_value_t = 1.0)]
    scale: f64,
    /// Raise log level (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Replay a JSON event script through the capture engine
    Replay {
        #[arg(long)]
        script: PathBuf,
        /// Optional JSON report path
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Measure a literal outline, e.g. --points "0,0 0,10 10,10 10,0"
    Measure {
        #[arg(long)]
        points: String,
    },
    /// Measure random room outlines
    Sample {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 5)]
        count: u64,
        #[arg(long, default_value_t = 4)]
        vertices_min: usize,
        #[arg(long, default_value_t = 10)]
        vertices_max: usize,
    },
    /// Print version and code revision JSON
    Report,
}

impl Cmd {
    fn capture_cfg(&self) -> CaptureCfg {
        CaptureCfg {
            snap_dist: self.snap_dist,
            perimeter_metric: self.perimeter_metric,
            ..CaptureCfg::default()
        }
    }

    fn params(&self) -> serde_json::Value {
        json!({
            "snap_dist": self.snap_dist,
            "perimeter_metric": self.perimeter_metric.to_string(),
            "unit": self.unit.to_string(),
            "scale": self.scale,
        })
    }
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = match cmd.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    let scale = Scale::new(cmd.scale, cmd.unit)?;
    match &cmd.action {
        Action::Replay { script, out } => replay(&cmd, &scale, script, out.as_deref()),
        Action::Measure { points } => measure(&cmd, &scale, points),
        Action::Sample {
            seed,
            count,
            vertices_min,
            vertices_max,
        } => sample(&cmd, &scale, *seed, *count, *vertices_min, *vertices_max),
        Action::Report => print_report(),
    }
}

fn replay(cmd: &Cmd, scale: &Scale, path: &Path, out: Option<&Path>) -> Result<()> {
    tracing::info!(script = %path.display(), "replay");
    let script = script::Script::load(path)?;
    let r = script::replay(&script, cmd.capture_cfg());
    tracing::info!(
        events = script.events.len(),
        closed = r.closed.len(),
        remaining = r.scene.polygons().count(),
        in_progress = r.in_progress,
        "replay_done"
    );

    let rooms: Vec<RoomEntry> = r
        .closed
        .iter()
        .map(|c| {
            let vertices = c.polygon.vertices().iter().map(|p| [p.x, p.y]).collect();
            RoomEntry::new(c.event, vertices, c.measurement, scale)
        })
        .collect();
    for room in &rooms {
        println!(
            "event {:>4}: {} vertices, {}",
            room.event,
            room.vertices.len(),
            room.scaled
        );
    }

    if let Some(out) = out {
        let mut params = cmd.params();
        params["script"] = json!(path.to_string_lossy());
        let doc = report::document(params, &rooms)?;
        report::write_report(out, &doc)?;
        tracing::info!(out = %out.display(), "report_written");
    }
    Ok(())
}

fn measure(cmd: &Cmd, scale: &Scale, points: &str) -> Result<()> {
    let pts = script::parse_points(points)?;
    let n = pts.len();
    let poly = Polygon::new(pts).with_context(|| format!("need at least 3 points, got {n}"))?;
    let m = poly.measure(cmd.perimeter_metric);
    tracing::debug!(vertices = n, area = m.area, perimeter = m.perimeter, "measured");
    println!("{}", m.in_units(scale));
    Ok(())
}

fn sample(
    cmd: &Cmd,
    scale: &Scale,
    seed: u64,
    count: u64,
    vertices_min: usize,
    vertices_max: usize,
) -> Result<()> {
    tracing::info!(seed, count, "sample");
    let cfg = RoomCfg {
        vertex_count: VertexCount::Uniform {
            min: vertices_min,
            max: vertices_max,
        },
        ..RoomCfg::default()
    };
    for (k, room) in draw_rooms(cfg, seed, count).enumerate() {
        let m = room.measure(cmd.perimeter_metric);
        println!("room {k}: {} vertices, {}", room.len(), m.in_units(scale));
    }
    Ok(())
}

fn print_report() -> Result<()> {
    let obj = json!({
        "code_rev": report::current_git_rev(),
        "version": roomsketch::VERSION,
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
