//! Synthetic elbow snapshots (seeded, replayable).
//!
//! Purpose
//! - Provide deterministic, plausible snapshots for benchmarks, randomized
//!   tests and the CLI `demo` command without any segmentation model.
//!
//! Model
//! - Humerus: a jittered octagon around the image centre, taller than wide.
//! - Fossa: a jittered quadrilateral centred in the lower part of the humerus.
//! - Epicondyles: one each side of the fossa, slightly below its bottom edge.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::geom2::{Point2, Polygon};
use crate::snapshot::{AnatomicalSnapshot, EpicondyleCandidate};

/// Generator configuration (pixels unless noted).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SynthCfg {
    pub image_width: f64,
    pub image_height: f64,
    /// Humerus width as a fraction of the image width.
    pub humerus_width_frac: f64,
    /// Relative jitter applied to outline vertices, in `[0, 0.3]`.
    pub outline_jitter: f64,
    /// Probability of dropping the humerus outline.
    pub p_missing_humerus: f64,
}

impl Default for SynthCfg {
    fn default() -> Self {
        Self {
            image_width: 640.0,
            image_height: 480.0,
            humerus_width_frac: 0.5,
            outline_jitter: 0.08,
            p_missing_humerus: 0.0,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        StdRng::seed_from_u64(mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15))))
    }
}

fn jitter<R: Rng>(rng: &mut R, amount: f64) -> f64 {
    if amount <= 0.0 {
        0.0
    } else {
        rng.gen_range(-amount..=amount)
    }
}

/// Draw one snapshot.
pub fn draw_snapshot(cfg: &SynthCfg, tok: ReplayToken) -> AnatomicalSnapshot {
    let mut rng = tok.to_std_rng();
    let j = cfg.outline_jitter.clamp(0.0, 0.3);

    let cx = 0.5 * cfg.image_width;
    let hw = 0.5 * cfg.humerus_width_frac.clamp(0.1, 0.95) * cfg.image_width;
    let top = 0.05 * cfg.image_height;
    let bottom = 0.9 * cfg.image_height;
    let h = bottom - top;

    // Octagon, clockwise on screen starting at the top-left shoulder.
    let shape = [
        (-0.6, 0.0),
        (0.6, 0.0),
        (0.8, 0.5),
        (1.0, 0.8),
        (0.7, 1.0),
        (-0.7, 1.0),
        (-1.0, 0.8),
        (-0.8, 0.5),
    ];
    let humerus_pts: Vec<Point2> = shape
        .iter()
        .map(|&(u, v)| {
            let x = cx + hw * (u + jitter(&mut rng, j));
            let y = top + h * (v + jitter(&mut rng, 0.5 * j)).clamp(0.0, 1.0);
            Point2::new(x, y)
        })
        .collect();

    let fossa_cx = cx + hw * jitter(&mut rng, 0.1);
    let fossa_cy = top + 0.72 * h;
    let fw = 0.3 * hw;
    let fh = 0.12 * h;
    let fossa_pts: Vec<Point2> = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)]
        .iter()
        .map(|&(u, v)| {
            Point2::new(
                fossa_cx + fw * (u + jitter(&mut rng, j)),
                fossa_cy + fh * (v + jitter(&mut rng, j)),
            )
        })
        .collect();

    let epi_y = fossa_cy + fh * 1.4;
    let epicondyles = [-0.8, 0.8]
        .iter()
        .map(|&u| EpicondyleCandidate {
            centroid: Point2::new(
                cx + hw * (u + jitter(&mut rng, j)),
                epi_y + fh * jitter(&mut rng, 0.5),
            ),
            confidence: rng.gen_range(0.6..=0.99),
        })
        .collect();

    let fossa_confidence = rng.gen_range(0.3..=0.99);
    let keep_humerus = !rng.gen_bool(cfg.p_missing_humerus.clamp(0.0, 1.0));

    AnatomicalSnapshot {
        epicondyles,
        fossa: Polygon::new(fossa_pts).ok(),
        fossa_confidence,
        humerus: if keep_humerus {
            Polygon::new(humerus_pts).ok()
        } else {
            None
        },
    }
}
