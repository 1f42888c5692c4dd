//! Random room outlines (radial jitter + replay tokens).
//!
//! Purpose
//! - Deterministic sampler for simple polygons used by property tests, the
//!   capture bench, and the CLI `sample` command.
//!
//! Model
//! - Start from `n` equally spaced angles on [0, 2π), add bounded angular and
//!   radial jitter, then place vertices around `center` in angle order. The
//!   result is star-shaped about `center`, hence simple.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Point, Polygon};

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Radial-jitter sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct RoomCfg {
    pub vertex_count: VertexCount,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Radii = `radius * (1 + u)`, `u ∈ [-radial_jitter, radial_jitter]`.
    /// Clamped to [0, 0.9].
    pub radial_jitter: f64,
    /// Mean distance of vertices from `center`, in scene units.
    pub radius: f64,
    pub center: Point,
}

impl Default for RoomCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Uniform { min: 4, max: 10 },
            angle_jitter_frac: 0.3,
            radial_jitter: 0.25,
            radius: 200.0,
            center: Point::new(400.0, 300.0),
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a random star-shaped room outline, counter-clockwise.
pub fn draw_room(cfg: RoomCfg, tok: ReplayToken) -> Polygon {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertex_count.sample(&mut rng);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let rj = cfg.radial_jitter.clamp(0.0, 0.9);
    let r0 = cfg.radius.max(1e-9);
    let delta = std::f64::consts::TAU / (n as f64);
    let phase = rng.gen::<f64>() * std::f64::consts::TAU;
    let pts: Vec<Point> = (0..n)
        .map(|k| {
            // jitter stays below Δ/2, so angles remain strictly increasing
            let jitter = (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            let theta = phase + (k as f64) * delta + jitter;
            let r = r0 * (1.0 + (rng.gen::<f64>() * 2.0 - 1.0) * rj);
            cfg.center + Point::new(theta.cos(), theta.sin()) * r
        })
        .collect();
    Polygon::from_loop(pts)
}

/// Iterator over `count` rooms drawn with consecutive replay indices.
pub fn draw_rooms(cfg: RoomCfg, seed: u64, count: u64) -> impl Iterator<Item = Polygon> {
    (0..count).map(move |index| draw_room(cfg, ReplayToken { seed, index }))
}
