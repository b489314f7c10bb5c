//! Plan quality metrics derived from wire endpoints.
//!
//! - `divergence_angle_deg`: angle between the first two wires.
//! - `crossing_height_ratio` (cross only): where the base wires cross, as the
//!   fraction of humerus height measured up from its distal (bottom) end.
//! - `entry_spread_ratio`: horizontal spread of entry points over humerus width.
//!
//! Pure reads; nothing here re-runs planning logic.

use crate::geom2::{angle_between, infinite_line_intersection, Polygon};
use crate::planner::{Formation, PlanMetrics, Wire};

/// Compute all metrics. Warnings are left empty for the planner to fill.
pub fn measure(wires: &[Wire], formation: &Formation, humerus: Option<&Polygon>) -> PlanMetrics {
    PlanMetrics {
        divergence_angle_deg: divergence_angle_deg(wires),
        crossing_height_ratio: match formation {
            Formation::Cross { .. } => crossing_height_ratio(wires, humerus),
            Formation::OneSided { .. } => None,
        },
        entry_spread_ratio: entry_spread_ratio(wires, formation, humerus),
        warnings: Default::default(),
    }
}

pub fn divergence_angle_deg(wires: &[Wire]) -> Option<f64> {
    match wires {
        [a, b, ..] => angle_between(a.start, a.end, b.start, b.end),
        _ => None,
    }
}

pub fn crossing_height_ratio(wires: &[Wire], humerus: Option<&Polygon>) -> Option<f64> {
    let humerus = humerus?;
    let [a, b, ..] = wires else {
        return None;
    };
    let cross = infinite_line_intersection(a.start, a.end, b.start, b.end)?;
    let bounds = humerus.bounds();
    if bounds.height <= 0.0 {
        return None;
    }
    Some((bounds.max_y - cross.y) / bounds.height)
}

pub fn entry_spread_ratio(
    wires: &[Wire],
    formation: &Formation,
    humerus: Option<&Polygon>,
) -> Option<f64> {
    let width = humerus?.bounds().width;
    if width <= 0.0 {
        return None;
    }
    let spread = match formation {
        Formation::Cross { .. } => {
            let [a, b, ..] = wires else {
                return None;
            };
            (a.start.x - b.start.x).abs()
        }
        Formation::OneSided { .. } => {
            if wires.is_empty() {
                return None;
            }
            let (lo, hi) = wires
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), w| {
                    (lo.min(w.start.x), hi.max(w.start.x))
                });
            hi - lo
        }
    };
    Some(spread / width)
}
