//! Crossed pinning: one wire from each side meeting just above the fossa,
//! optionally a third wire from a chosen side aimed one level higher.

use crate::geom2::{extend_line, Point2};
use crate::snapshot::EpicondyleCandidate;

use super::cfg::PlanCfg;
use super::types::{ExtraSide, PinCount, Wire, WireRole};
use super::Anatomy;

/// Leftmost and rightmost centroids after a stable sort by x.
///
/// Equal x keeps input order. Requires at least one candidate.
pub(crate) fn outermost(epicondyles: &[EpicondyleCandidate]) -> (Point2, Point2) {
    let mut centroids: Vec<Point2> = epicondyles.iter().map(|e| e.centroid).collect();
    centroids.sort_by(|a, b| a.x.total_cmp(&b.x));
    (centroids[0], centroids[centroids.len() - 1])
}

/// Wires with their extended (pre-cortex) ends.
pub(crate) fn plan_cross(
    anatomy: &Anatomy<'_>,
    pin_count: PinCount,
    entry_offset: i32,
    extra_side: ExtraSide,
    cfg: &PlanCfg,
) -> (Vec<Wire>, String) {
    let (left, right) = outermost(anatomy.epicondyles);
    let dy = f64::from(entry_offset);
    let start_left = Point2::new(left.x, left.y + dy);
    let start_right = Point2::new(right.x, right.y + dy);

    let fossa_top = anatomy.fossa.top();
    let mid_x = 0.5 * (left.x + right.x);
    let target = Point2::new(mid_x, fossa_top - cfg.cross_target_lift);

    let aim = |start: Point2, target: Point2, role: WireRole| Wire {
        start,
        end: extend_line(start, target, cfg.extension_ratio).1,
        role,
    };

    let mut wires = vec![
        aim(start_left, target, WireRole::CrossLeft),
        aim(start_right, target, WireRole::CrossRight),
    ];

    if pin_count == PinCount::Three {
        let fossa_height = anatomy.fossa.bottom() - fossa_top;
        let high = Point2::new(mid_x, fossa_top - cfg.level_spacing(fossa_height));
        let wire = match extra_side {
            ExtraSide::Left => aim(start_left, high, WireRole::CrossExtraLeft),
            ExtraSide::Right => aim(start_right, high, WireRole::CrossExtraRight),
        };
        wires.push(wire);
    }

    let info = format!(
        "Cross formation, {} pins: crossing target at ({:.1}, {:.1})",
        pin_count.get(),
        target.x,
        target.y
    );
    (wires, info)
}
