//! Line primitives: extension, line/segment and line/line intersection, angles.
//!
//! All functions are total: degenerate inputs map to `None` or to the input
//! unchanged, never to a panic or a NaN.

use super::types::{Point2, EPS_DET};

/// 2D cross product (z-component of the 3D cross product).
#[inline]
pub(crate) fn cross(a: Point2, b: Point2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Extend segment `a→b` by `ratio * |ab|` past both endpoints.
///
/// Returns `(a', b')` with `a' = a - ratio (b - a)` and `b' = b + ratio (b - a)`.
/// A zero-length segment is returned unchanged.
pub fn extend_line(a: Point2, b: Point2, ratio: f64) -> (Point2, Point2) {
    let d = b - a;
    if d.norm() == 0.0 {
        return (a, b);
    }
    (a - d * ratio, b + d * ratio)
}

/// Intersection of the infinite line `s→t` with the segment `p→q`.
///
/// `t` parametrizes the line (`point = s + t (t_pt - s)`, unrestricted),
/// `u` parametrizes the segment (`point = p + u (q - p)`, in `[0, 1]`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineHit {
    pub t: f64,
    pub u: f64,
    pub point: Point2,
}

/// Intersect the infinite line through `s, t` with the finite segment `p, q`.
///
/// `None` when the directions are parallel or collinear (`|r × w| <= 1e-12`)
/// or when the hit lies outside the segment.
pub fn segment_intersection(s: Point2, t: Point2, p: Point2, q: Point2) -> Option<LineHit> {
    let r = t - s;
    let w = q - p;
    let denom = cross(r, w);
    if denom.abs() <= EPS_DET {
        return None;
    }
    let sp = p - s;
    let t_par = cross(sp, w) / denom;
    let u_par = cross(sp, r) / denom;
    if !(0.0..=1.0).contains(&u_par) {
        return None;
    }
    Some(LineHit {
        t: t_par,
        u: u_par,
        point: s + r * t_par,
    })
}

/// Intersection point of the infinite lines through `(p1, p2)` and `(p3, p4)`.
pub fn infinite_line_intersection(
    p1: Point2,
    p2: Point2,
    p3: Point2,
    p4: Point2,
) -> Option<Point2> {
    let denom = (p1.x - p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x - p4.x);
    if denom.abs() <= EPS_DET {
        return None;
    }
    let a = p1.x * p2.y - p1.y * p2.x;
    let b = p3.x * p4.y - p3.y * p4.x;
    let x = (a * (p3.x - p4.x) - (p1.x - p2.x) * b) / denom;
    let y = (a * (p3.y - p4.y) - (p1.y - p2.y) * b) / denom;
    Some(Point2::new(x, y))
}

/// Unsigned angle in degrees between `p2 - p1` and `p4 - p3`, in `[0, 180]`.
///
/// `None` if either vector has zero length.
pub fn angle_between(p1: Point2, p2: Point2, p3: Point2, p4: Point2) -> Option<f64> {
    let v1 = p2 - p1;
    let v2 = p4 - p3;
    let n1 = v1.norm();
    let n2 = v2.norm();
    if n1 == 0.0 || n2 == 0.0 {
        return None;
    }
    let cos = (v1.dot(&v2) / (n1 * n2)).clamp(-1.0, 1.0);
    Some(cos.acos().to_degrees())
}
