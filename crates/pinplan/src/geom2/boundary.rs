use super::lines::segment_intersection;
use super::types::{Point2, Polygon};

/// Push the far endpoint `t` of the ray `s→t` out to the polygon boundary.
///
/// Every edge (including the wrap-around edge) is intersected with the
/// infinite line through `s, t`. Only hits at or beyond `t` (line parameter
/// `>= 1`) qualify; the one with the largest parameter wins. Returns `t`
/// unchanged if nothing qualifies.
pub fn extend_to_polygon_boundary(s: Point2, t: Point2, polygon: &Polygon) -> Point2 {
    let mut best: Option<(f64, Point2)> = None;
    for (p, q) in polygon.edges() {
        let Some(hit) = segment_intersection(s, t, p, q) else {
            continue;
        };
        if hit.t < 1.0 {
            continue;
        }
        if best.as_ref().is_none_or(|(bt, _)| hit.t > *bt) {
            best = Some((hit.t, hit.point));
        }
    }
    match best {
        Some((param, point)) => {
            tracing::trace!(param, x = point.x, y = point.y, "boundary hit");
            point
        }
        None => t,
    }
}
