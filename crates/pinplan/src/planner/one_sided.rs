//! One-sided (lateral or medial) pinning: a fan of wires from one epicondyle
//! towards stacked levels above the fossa.

use crate::geom2::{extend_line, Point2};
use crate::snapshot::EpicondyleCandidate;

use super::cfg::PlanCfg;
use super::types::{PinCount, Side, Wire, WireRole};
use super::Anatomy;

/// Entry centroid by x only: lateral is the largest x, medial the smallest.
///
/// Ties keep the first candidate in input order. Requires at least one candidate.
pub(crate) fn entry_centroid(epicondyles: &[EpicondyleCandidate], side: Side) -> Point2 {
    let mut best = epicondyles[0].centroid;
    for e in &epicondyles[1..] {
        let c = e.centroid;
        let better = match side {
            Side::Lateral => c.x > best.x,
            Side::Medial => c.x < best.x,
        };
        if better {
            best = c;
        }
    }
    best
}

/// `(role, level index, x nudge in units of the jitter)` per wire, low level first.
fn levels(pin_count: PinCount) -> &'static [(WireRole, u8, f64)] {
    match pin_count {
        PinCount::Two => &[(WireRole::OneSidedLow, 0, -1.0), (WireRole::OneSidedTop, 1, 1.0)],
        PinCount::Three => &[
            (WireRole::OneSidedLow, 0, -1.0),
            (WireRole::OneSidedMid, 1, 0.0),
            (WireRole::OneSidedTop, 2, 1.0),
        ],
    }
}

/// Wires with their extended (pre-cortex) ends.
pub(crate) fn plan_one_sided(
    anatomy: &Anatomy<'_>,
    side: Side,
    pin_count: PinCount,
    entry_offset: i32,
    cfg: &PlanCfg,
) -> (Vec<Wire>, String) {
    let fossa = anatomy.fossa;
    let centroid = fossa.centroid();
    let fossa_top = fossa.top();
    let fossa_bottom = fossa.bottom();
    let fossa_mid = 0.5 * (fossa_top + fossa_bottom);
    let delta = cfg.level_spacing(fossa_bottom - fossa_top);

    let entry = entry_centroid(anatomy.epicondyles, side);
    let entry_y = entry.y + f64::from(entry_offset);

    let wires = levels(pin_count)
        .iter()
        .map(|&(role, level, nudge)| {
            let start = Point2::new(entry.x + nudge * cfg.entry_jitter_px, entry_y);
            let target = Point2::new(centroid.x, fossa_top - f64::from(level) * delta);
            Wire {
                start,
                end: extend_line(start, target, cfg.extension_ratio).1,
                role,
            }
        })
        .collect();

    tracing::debug!(fossa_top, fossa_mid, delta, "one-sided levels");
    let side_name = match side {
        Side::Lateral => "Lateral",
        Side::Medial => "Medial",
    };
    let info = format!(
        "{side_name} one-sided formation, {} pins: entry at ({:.1}, {:.1}), level spacing {:.1}",
        pin_count.get(),
        entry.x,
        entry_y,
        delta
    );
    (wires, info)
}
