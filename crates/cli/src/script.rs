//! Recorded pointer-event scripts and their replay through the engine.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use nalgebra::Vector2;
use serde::Deserialize;

use roomsketch::prelude::*;

/// Sequence of host events, as a drawing surface would deliver them.
#[derive(Debug, Deserialize)]
pub struct Script {
    pub events: Vec<Event>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Event {
    Tool { tool: ToolMode },
    Down {
        at: [f64; 2],
        #[serde(default = "left")]
        button: Button,
    },
    Move { at: [f64; 2] },
    Cancel,
    Clear,
    Background { path: PathBuf },
    Color { rgba: [u8; 4] },
}

fn left() -> Button {
    Button::Left
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_slice(&raw)
            .with_context(|| format!("parsing script {}", path.display()))
    }
}

/// An outline closed during replay.
#[derive(Debug, Clone)]
pub struct Closed {
    pub event: usize,
    pub polygon: Polygon,
    pub measurement: Measurement,
}

/// Final state after replaying a script.
#[derive(Debug)]
pub struct Replay {
    pub closed: Vec<Closed>,
    pub scene: Scene,
    pub in_progress: usize,
}

#[inline]
fn point(at: [f64; 2]) -> Point {
    Vector2::new(at[0], at[1])
}

/// Feed every event to a fresh engine over a fresh scene.
pub fn replay(script: &Script, cfg: CaptureCfg) -> Replay {
    let mut scene = Scene::new();
    let mut eng = CaptureEngine::new(cfg);
    let closed: Rc<RefCell<Vec<(Polygon, Measurement)>>> = Rc::default();
    let sink = Rc::clone(&closed);
    eng.on_completed(move |poly, m| sink.borrow_mut().push((poly.clone(), m)));

    let mut out = Vec::new();
    for (k, ev) in script.events.iter().enumerate() {
        let outcome = match ev {
            Event::Tool { tool } => {
                eng.set_tool(&mut scene, *tool);
                None
            }
            Event::Down { at, button } => {
                Some(eng.pointer_down(&mut scene, point(*at), *button))
            }
            Event::Move { at } => Some(eng.pointer_move(&mut scene, point(*at))),
            Event::Cancel => {
                eng.cancel(&mut scene);
                None
            }
            Event::Clear => {
                eng.clear(&mut scene);
                None
            }
            Event::Background { path } => {
                scene.set_background(path);
                None
            }
            Event::Color { rgba } => {
                eng.set_stroke_color(Rgba(rgba[0], rgba[1], rgba[2], rgba[3]));
                None
            }
        };
        tracing::trace!(event = k, ?outcome, "replayed");
        if let Some(Outcome::Closed(_)) = outcome {
            if let Some((polygon, measurement)) = closed.borrow_mut().pop() {
                out.push(Closed {
                    event: k,
                    polygon,
                    measurement,
                });
            }
        }
    }
    Replay {
        closed: out,
        in_progress: eng.vertices().len(),
        scene,
    }
}

/// Parse `"x,y x,y ..."`: numbers separated by commas, `;` or whitespace,
/// taken two at a time.
pub fn parse_points(s: &str) -> Result<Vec<Point>> {
    let nums = s
        .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .filter(|tok| !tok.is_empty())
        .map(|tok| {
            tok.parse::<f64>()
                .with_context(|| format!("bad coordinate `{tok}`"))
        })
        .collect::<Result<Vec<f64>>>()?;
    if nums.len() % 2 != 0 {
        bail!("odd number of coordinates ({}), expected x,y pairs", nums.len());
    }
    Ok(nums
        .chunks_exact(2)
        .map(|xy| Vector2::new(xy[0], xy[1]))
        .collect())
}
