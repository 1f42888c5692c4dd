//! Trace an L-shaped room with slightly sloppy clicks and print what the
//! engine reports.
//!
//! Usage:
//!   cargo run -p roomsketch --example trace_room

use nalgebra::vector;
use roomsketch::prelude::*;

fn main() {
    let mut scene = Scene::new();
    scene.set_background("floorplan.png");
    let mut eng = CaptureEngine::default();
    eng.on_completed(|poly, m| {
        println!("closed outline with {} vertices: {m:?}", poly.len());
    });
    eng.set_tool(&mut scene, ToolMode::Wall);

    let clicks = [
        (0.0, 0.0),
        (240.0, 0.0),
        (240.0, 120.0),
        (120.0, 120.0),
        (120.0, 240.0),
        (0.0, 240.0),
        (3.0, -2.0),
    ];
    for (x, y) in clicks {
        let out = eng.pointer_down(&mut scene, vector![x, y], Button::Left);
        println!("click ({x:>5.1}, {y:>5.1}) -> {out:?}");
    }

    // 12 scene units per foot
    let scale = match Scale::new(12.0, Unit::Ft) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };
    for poly in scene.polygons() {
        let m = poly.measure(eng.cfg().perimeter_metric);
        println!("{}", m.in_units(&scale));
    }
}
