use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::sync::mpsc;

use nalgebra::vector;

use super::*;
use crate::geom::rand::{draw_rooms, RoomCfg, VertexCount};
use crate::geom::{Measurement, Metric, Point, Polygon};
use crate::surface::{Rgba, Scene};

fn wall_engine(scene: &mut Scene) -> CaptureEngine {
    let mut eng = CaptureEngine::default();
    eng.set_tool(scene, ToolMode::Wall);
    eng
}

fn click(eng: &mut CaptureEngine, scene: &mut Scene, x: f64, y: f64) -> Outcome {
    eng.pointer_down(scene, vector![x, y], Button::Left)
}

fn draw_square(
    eng: &mut CaptureEngine,
    scene: &mut Scene,
    x0: f64,
    y0: f64,
    side: f64,
) -> Outcome {
    click(eng, scene, x0, y0);
    click(eng, scene, x0, y0 + side);
    click(eng, scene, x0 + side, y0 + side);
    click(eng, scene, x0 + side, y0);
    click(eng, scene, x0 + 1.0, y0 + 1.0)
}

#[test]
fn square_closes_with_area_and_perimeter() {
    let mut scene = Scene::new();
    let mut eng = wall_engine(&mut scene);
    let out = draw_square(&mut eng, &mut scene, 0.0, 0.0, 10.0);
    let Outcome::Closed(m) = out else {
        panic!("expected close, got {out:?}");
    };
    assert!((m.area - 100.0).abs() < 1e-12);
    assert!((m.perimeter - 40.0).abs() < 1e-12);
    assert_eq!(eng.phase(), Phase::Idle);
    assert!(eng.vertices().is_empty());
    assert!(eng.preview().is_none());
    // closing click is not stored as a duplicate vertex
    let polys: Vec<&Polygon> = scene.polygons().collect();
    assert_eq!(polys.len(), 1);
    assert_eq!(polys[0].len(), 4);
    assert!(scene.preview().is_none());
}

#[test]
fn transitions_report_each_step() {
    let mut scene = Scene::new();
    let mut eng = wall_engine(&mut scene);
    assert_eq!(eng.phase(), Phase::Idle);
    assert_eq!(click(&mut eng, &mut scene, 0.0, 0.0), Outcome::Started(vector![0.0, 0.0]));
    assert_eq!(eng.phase(), Phase::Drawing);
    assert_eq!(click(&mut eng, &mut scene, 50.0, 0.0), Outcome::Appended(vector![50.0, 0.0]));
    assert_eq!(
        click(&mut eng, &mut scene, 50.0, 50.0),
        Outcome::Appended(vector![50.0, 50.0])
    );
    let Outcome::Closed(m) = click(&mut eng, &mut scene, 2.0, 3.0) else {
        panic!("expected close");
    };
    assert!((m.area - 1250.0).abs() < 1e-9);
    assert!((m.perimeter - (100.0 + 50.0 * 2f64.sqrt())).abs() < 1e-9);
    assert_eq!(eng.phase(), Phase::Idle);
}

#[test]
fn near_first_with_two_vertices_appends_instead_of_closing() {
    let mut scene = Scene::new();
    let mut eng = wall_engine(&mut scene);
    click(&mut eng, &mut scene, 0.0, 0.0);
    click(&mut eng, &mut scene, 100.0, 0.0);
    let out = click(&mut eng, &mut scene, 2.0, 2.0);
    assert_eq!(out, Outcome::Appended(vector![2.0, 2.0]));
    assert_eq!(eng.vertices().len(), 3);
    assert_eq!(scene.polygons().count(), 0);
    // with three in place the next near-first click closes
    let out = click(&mut eng, &mut scene, 1.0, -1.0);
    assert!(matches!(out, Outcome::Closed(_)));
    assert_eq!(scene.polygons().count(), 1);
}

#[test]
fn click_near_existing_vertex_reuses_its_coordinates() {
    let mut scene = Scene::new();
    let mut eng = wall_engine(&mut scene);
    draw_square(&mut eng, &mut scene, 0.0, 0.0, 100.0);
    let out = click(&mut eng, &mut scene, 103.0, 104.0);
    assert_eq!(out, Outcome::Started(vector![100.0, 100.0]));
    assert_eq!(eng.vertices(), &[vector![100.0, 100.0]]);
    // far from any vertex: raw position kept
    click(&mut eng, &mut scene, 200.0, 150.0);
    assert_eq!(eng.vertices()[1], vector![200.0, 150.0]);
}

#[test]
fn adjacent_rooms_share_snapped_corners() {
    let mut scene = Scene::new();
    let mut eng = wall_engine(&mut scene);
    draw_square(&mut eng, &mut scene, 0.0, 0.0, 100.0);
    // second room to the right, corners clicked sloppily
    click(&mut eng, &mut scene, 101.0, 2.0);
    click(&mut eng, &mut scene, 200.0, 0.0);
    click(&mut eng, &mut scene, 200.0, 100.0);
    click(&mut eng, &mut scene, 98.0, 99.0);
    let Outcome::Closed(m) = click(&mut eng, &mut scene, 100.5, 0.5) else {
        panic!("expected close");
    };
    assert!((m.area - 10_000.0).abs() < 1e-9);
    let second = scene.polygons().nth(1).unwrap();
    assert_eq!(second.vertices()[0], vector![100.0, 0.0]);
    assert_eq!(second.vertices()[3], vector![100.0, 100.0]);
}

#[test]
fn pointer_move_updates_preview_without_committing() {
    let mut scene = Scene::new();
    let mut eng = wall_engine(&mut scene);
    assert_eq!(eng.pointer_move(&mut scene, vector![5.0, 5.0]), Outcome::Ignored);
    click(&mut eng, &mut scene, 0.0, 0.0);
    click(&mut eng, &mut scene, 40.0, 0.0);
    for x in [10.0, 20.0, 30.0] {
        let out = eng.pointer_move(&mut scene, vector![x, 60.0]);
        let Outcome::Previewed(seg) = out else {
            panic!("expected preview");
        };
        assert_eq!(seg.from, vector![40.0, 0.0]);
        assert_eq!(seg.to, vector![x, 60.0]);
    }
    assert_eq!(eng.vertices().len(), 2);
    assert_eq!(scene.preview().unwrap().to, vector![30.0, 60.0]);
    // only one preview item on the surface
    assert_eq!(scene.items().len(), 1);
}

#[test]
fn preview_snaps_to_first_vertex_once_closable() {
    let mut scene = Scene::new();
    let mut eng = wall_engine(&mut scene);
    click(&mut eng, &mut scene, 0.0, 0.0);
    click(&mut eng, &mut scene, 50.0, 0.0);
    let Outcome::Previewed(seg) = eng.pointer_move(&mut scene, vector![3.0, 3.0]) else {
        panic!("expected preview");
    };
    assert_eq!(seg.to, vector![3.0, 3.0]);
    click(&mut eng, &mut scene, 50.0, 50.0);
    let Outcome::Previewed(seg) = eng.pointer_move(&mut scene, vector![3.0, 3.0]) else {
        panic!("expected preview");
    };
    assert_eq!(seg.to, vector![0.0, 0.0]);
}

#[test]
fn deactivating_tool_discards_outline_in_progress() {
    let mut scene = Scene::new();
    let mut eng = wall_engine(&mut scene);
    click(&mut eng, &mut scene, 0.0, 0.0);
    click(&mut eng, &mut scene, 50.0, 0.0);
    eng.set_tool(&mut scene, ToolMode::None);
    assert!(eng.vertices().is_empty());
    assert!(eng.preview().is_none());
    assert!(scene.preview().is_none());
    assert_eq!(scene.polygons().count(), 0);
    // clicks are ignored while inactive
    assert_eq!(click(&mut eng, &mut scene, 1.0, 1.0), Outcome::Ignored);
    eng.set_tool(&mut scene, ToolMode::Wall);
    assert_eq!(
        click(&mut eng, &mut scene, 300.0, 300.0),
        Outcome::Started(vector![300.0, 300.0])
    );
    assert_eq!(eng.vertices().len(), 1);
}

#[test]
fn curve_mode_and_cancel_also_discard() {
    let mut scene = Scene::new();
    let mut eng = wall_engine(&mut scene);
    click(&mut eng, &mut scene, 0.0, 0.0);
    eng.set_tool(&mut scene, ToolMode::Curve);
    assert_eq!(eng.phase(), Phase::Idle);
    assert_eq!(click(&mut eng, &mut scene, 0.0, 0.0), Outcome::Ignored);

    eng.set_tool(&mut scene, ToolMode::Wall);
    click(&mut eng, &mut scene, 0.0, 0.0);
    click(&mut eng, &mut scene, 50.0, 0.0);
    eng.cancel(&mut scene);
    assert!(eng.vertices().is_empty());
    assert!(scene.items().is_empty());
}

#[test]
fn reselecting_wall_keeps_outline() {
    let mut scene = Scene::new();
    let mut eng = wall_engine(&mut scene);
    click(&mut eng, &mut scene, 0.0, 0.0);
    eng.set_tool(&mut scene, ToolMode::Wall);
    assert_eq!(eng.vertices().len(), 1);
}

#[test]
fn non_left_buttons_are_ignored() {
    let mut scene = Scene::new();
    let mut eng = wall_engine(&mut scene);
    assert_eq!(
        eng.pointer_down(&mut scene, vector![0.0, 0.0], Button::Right),
        Outcome::Ignored
    );
    assert_eq!(
        eng.pointer_down(&mut scene, vector![0.0, 0.0], Button::Middle),
        Outcome::Ignored
    );
    assert!(eng.vertices().is_empty());
}

#[test]
fn clear_keeps_background_and_is_idempotent() {
    let mut scene = Scene::new();
    let mut eng = wall_engine(&mut scene);
    scene.set_background("living-room.jpg");
    draw_square(&mut eng, &mut scene, 0.0, 0.0, 100.0);
    draw_square(&mut eng, &mut scene, 300.0, 300.0, 50.0);
    click(&mut eng, &mut scene, 600.0, 600.0);
    eng.pointer_move(&mut scene, vector![650.0, 620.0]);
    assert_eq!(scene.polygons().count(), 2);
    assert!(scene.preview().is_some());

    eng.clear(&mut scene);
    let once: Vec<_> = scene.items().to_vec();
    assert_eq!(scene.polygons().count(), 0);
    assert!(scene.preview().is_none());
    assert_eq!(scene.background(), Some(Path::new("living-room.jpg")));
    assert_eq!(eng.phase(), Phase::Idle);
    assert!(eng.snap_index().polygons().is_empty());

    eng.clear(&mut scene);
    assert_eq!(scene.items(), once.as_slice());
    assert_eq!(eng.phase(), Phase::Idle);

    // old corners no longer attract clicks
    assert_eq!(
        click(&mut eng, &mut scene, 101.0, 101.0),
        Outcome::Started(vector![101.0, 101.0])
    );
}

#[test]
fn sinks_receive_each_completed_outline() {
    let mut scene = Scene::new();
    let mut eng = wall_engine(&mut scene);
    let seen: Rc<RefCell<Vec<(usize, Measurement)>>> = Rc::default();
    let log = Rc::clone(&seen);
    eng.on_completed(move |poly, m| log.borrow_mut().push((poly.len(), m)));
    let (tx, rx) = mpsc::channel();
    eng.subscribe(ChannelSink(tx));

    draw_square(&mut eng, &mut scene, 0.0, 0.0, 100.0);
    draw_square(&mut eng, &mut scene, 500.0, 0.0, 20.0);

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].0, 4);
    assert!((seen[1].1.area - 400.0).abs() < 1e-9);
    let got: Vec<Measurement> = rx.try_iter().collect();
    assert_eq!(got.len(), 2);
    assert!((got[0].perimeter - 400.0).abs() < 1e-9);
}

#[test]
fn dropped_channel_receiver_is_harmless() {
    let mut scene = Scene::new();
    let mut eng = wall_engine(&mut scene);
    let (tx, rx) = mpsc::channel();
    drop(rx);
    eng.subscribe(ChannelSink(tx));
    assert!(matches!(draw_square(&mut eng, &mut scene, 0.0, 0.0, 100.0), Outcome::Closed(_)));
}

#[test]
fn manhattan_perimeter_when_configured() {
    let mut scene = Scene::new();
    let cfg = CaptureCfg {
        perimeter_metric: Metric::Manhattan,
        ..CaptureCfg::default()
    };
    let mut eng = CaptureEngine::new(cfg);
    eng.set_tool(&mut scene, ToolMode::Wall);
    click(&mut eng, &mut scene, 0.0, 0.0);
    click(&mut eng, &mut scene, 30.0, 0.0);
    click(&mut eng, &mut scene, 0.0, 40.0);
    let Outcome::Closed(m) = click(&mut eng, &mut scene, 0.0, 0.0) else {
        panic!("expected close");
    };
    assert!((m.area - 600.0).abs() < 1e-12);
    assert!((m.perimeter - 140.0).abs() < 1e-12);
}

#[test]
fn stroke_color_applies_to_preview() {
    let mut scene = Scene::new();
    let mut eng = wall_engine(&mut scene);
    eng.set_stroke_color(Rgba(200, 10, 10, 255));
    click(&mut eng, &mut scene, 0.0, 0.0);
    match &scene.items()[0] {
        crate::surface::Item::Preview { style, .. } => {
            assert_eq!(style.stroke, Rgba(200, 10, 10, 255))
        }
        other => panic!("expected preview, got {other:?}"),
    }
}

/// Index that never snaps; checks the engine only talks to the trait.
#[derive(Default)]
struct NoSnap {
    inserted: usize,
}

impl SnapIndex for NoSnap {
    fn insert(&mut self, _poly: &Polygon) {
        self.inserted += 1;
    }
    fn clear(&mut self) {
        self.inserted = 0;
    }
    fn find_within(&self, _p: Point, _dist: f64, _metric: Metric) -> Option<Point> {
        None
    }
}

#[test]
fn custom_snap_index_plugs_in() {
    let mut scene = Scene::new();
    let mut eng = CaptureEngine::with_index(CaptureCfg::default(), NoSnap::default());
    eng.set_tool(&mut scene, ToolMode::Wall);
    for (x, y) in [(0.0, 0.0), (0.0, 100.0), (100.0, 100.0), (100.0, 0.0), (1.0, 1.0)] {
        eng.pointer_down(&mut scene, vector![x, y], Button::Left);
    }
    assert_eq!(eng.snap_index().inserted, 1);
    // no snapping onto the finished square
    let out = eng.pointer_down(&mut scene, vector![101.0, 101.0], Button::Left);
    assert_eq!(out, Outcome::Started(vector![101.0, 101.0]));
    eng.clear(&mut scene);
    assert_eq!(eng.snap_index().inserted, 0);
}

#[test]
fn replayed_random_rooms_measure_like_their_outline() {
    let cfg = RoomCfg {
        vertex_count: VertexCount::Fixed(6),
        ..RoomCfg::default()
    };
    for room in draw_rooms(cfg, 11, 16) {
        let mut scene = Scene::new();
        let mut eng = wall_engine(&mut scene);
        for v in room.vertices() {
            eng.pointer_down(&mut scene, *v, Button::Left);
        }
        let first = room.vertices()[0];
        let out = eng.pointer_down(&mut scene, first + vector![0.5, -0.5], Button::Left);
        let Outcome::Closed(m) = out else {
            panic!("expected close, got {out:?}");
        };
        assert!((m.area - room.area()).abs() < 1e-9 * room.area());
        assert!((m.perimeter - room.perimeter(Metric::Euclidean)).abs() < 1e-9 * m.perimeter);
    }
}

#[test]
fn preview_tracks_surface_invariant() {
    // preview exists iff vertices are non-empty and the tool is active
    let mut scene = Scene::new();
    let mut eng = wall_engine(&mut scene);
    assert!(scene.preview().is_none());
    click(&mut eng, &mut scene, 0.0, 0.0);
    assert!(scene.preview().is_some() && eng.preview().is_some());
    eng.set_tool(&mut scene, ToolMode::None);
    assert!(scene.preview().is_none() && eng.preview().is_none());
}

#[test]
fn reversed_random_rooms_measure_the_same() {
    let cfg = RoomCfg {
        vertex_count: VertexCount::Fixed(7),
        ..RoomCfg::default()
    };
    for room in draw_rooms(cfg, 23, 16) {
        let mut cw: Vec<Point> = room.vertices().to_vec();
        cw.reverse();
        let mut scene = Scene::new();
        let mut eng = wall_engine(&mut scene);
        for v in &cw {
            eng.pointer_down(&mut scene, *v, Button::Left);
        }
        let Outcome::Closed(m) = eng.pointer_down(&mut scene, cw[0], Button::Left) else {
            panic!("expected close");
        };
        assert!(m.area > 0.0);
        assert!((m.area - room.area()).abs() < 1e-9 * room.area());
        assert!((m.perimeter - room.perimeter(Metric::Euclidean)).abs() < 1e-9 * m.perimeter);
    }
}

#[test]
fn existing_corner_wins_over_closing_near_first_vertex() {
    let mut scene = Scene::new();
    let mut eng = wall_engine(&mut scene);
    draw_square(&mut eng, &mut scene, 0.0, 0.0, 100.0);
    // start just outside the square's (100,0) snap radius
    assert_eq!(
        click(&mut eng, &mut scene, 115.0, 0.0),
        Outcome::Started(vector![115.0, 0.0])
    );
    click(&mut eng, &mut scene, 200.0, 0.0);
    click(&mut eng, &mut scene, 200.0, 100.0);
    // within snap distance of vertex 0, but the square's corner is found
    // first and lies outside the close radius
    assert_eq!(
        click(&mut eng, &mut scene, 108.0, 0.0),
        Outcome::Appended(vector![100.0, 0.0])
    );
    assert_eq!(eng.vertices().len(), 4);
    assert_eq!(scene.polygons().count(), 1);
}

#[test]
fn tool_names_parse() {
    assert_eq!("line".parse::<ToolMode>(), Ok(ToolMode::Wall));
    assert_eq!("Wall".parse::<ToolMode>(), Ok(ToolMode::Wall));
    assert_eq!("curve".parse::<ToolMode>(), Ok(ToolMode::Curve));
    assert_eq!("none".parse::<ToolMode>(), Ok(ToolMode::None));
    assert_eq!(
        "eraser".parse::<ToolMode>(),
        Err(crate::error::ParseError::Tool("eraser".into()))
    );
}
