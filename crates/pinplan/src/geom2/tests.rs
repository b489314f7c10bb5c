use super::*;
use nalgebra::vector;
use proptest::prelude::*;

fn square(x0: f64, y0: f64, side: f64) -> Polygon {
    Polygon::from_xy(&[
        (x0, y0),
        (x0 + side, y0),
        (x0 + side, y0 + side),
        (x0, y0 + side),
    ])
    .unwrap()
}

#[test]
fn polygon_rejects_short_and_non_finite_rings() {
    assert_eq!(
        Polygon::from_xy(&[(0.0, 0.0), (1.0, 0.0)]),
        Err(PolygonError::TooFewVertices { got: 2 })
    );
    assert_eq!(
        Polygon::from_xy(&[(0.0, 0.0), (f64::NAN, 0.0), (1.0, 1.0)]),
        Err(PolygonError::NonFinite { index: 1 })
    );
}

#[test]
fn polygon_edges_include_wrap_around() {
    let sq = square(0.0, 0.0, 1.0);
    let edges: Vec<_> = sq.edges().collect();
    assert_eq!(edges.len(), 4);
    assert_eq!(edges[3], (vector![0.0, 1.0], vector![0.0, 0.0]));
}

#[test]
fn bounds_top_bottom_of_rectangle() {
    let r = Polygon::from_xy(&[(50.0, 50.0), (350.0, 50.0), (350.0, 400.0), (50.0, 400.0)])
        .unwrap();
    let b = r.bounds();
    assert_eq!((b.min_x, b.max_x, b.min_y, b.max_y), (50.0, 350.0, 50.0, 400.0));
    assert_eq!((b.width, b.height), (300.0, 350.0));
    assert_eq!(r.top(), 50.0);
    assert_eq!(r.bottom(), 400.0);
}

#[test]
fn centroid_area_weighted_and_fallback() {
    // Triangle: area-weighted centroid equals the vertex mean.
    let tri = Polygon::from_xy(&[(0.0, 0.0), (6.0, 0.0), (0.0, 3.0)]).unwrap();
    let c = tri.centroid();
    assert!((c - vector![2.0, 1.0]).norm() < 1e-12);

    // Extra collinear vertex on one side pulls the mean but not the moment centroid.
    let sq = Polygon::from_xy(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)])
        .unwrap();
    assert!((sq.centroid() - vector![1.0, 1.0]).norm() < 1e-12);
    assert!((sq.vertex_mean() - vector![1.0, 0.8]).norm() < 1e-12);

    // Zero area: all vertices collinear.
    let flat = Polygon::from_xy(&[(0.0, 0.0), (1.0, 1.0), (3.0, 3.0)]).unwrap();
    assert_eq!(flat.signed_area(), 0.0);
    let c = flat.centroid();
    assert!(c.x.is_finite() && c.y.is_finite());
    assert!((c - vector![4.0 / 3.0, 4.0 / 3.0]).norm() < 1e-12);
}

#[test]
fn extend_line_both_ends_and_degenerate() {
    let (a, b) = extend_line(vector![0.0, 0.0], vector![10.0, 0.0], 0.3);
    assert!((a - vector![-3.0, 0.0]).norm() < 1e-12);
    assert!((b - vector![13.0, 0.0]).norm() < 1e-12);

    let p = vector![4.0, 5.0];
    assert_eq!(extend_line(p, p, 0.3), (p, p));
}

#[test]
fn segment_intersection_parameters() {
    let hit = segment_intersection(
        vector![0.0, 0.0],
        vector![1.0, 0.0],
        vector![3.0, -1.0],
        vector![3.0, 1.0],
    )
    .expect("crossing");
    assert!((hit.t - 3.0).abs() < 1e-12);
    assert!((hit.u - 0.5).abs() < 1e-12);
    assert!((hit.point - vector![3.0, 0.0]).norm() < 1e-12);

    // Behind the start: t is negative, not filtered here.
    let behind = segment_intersection(
        vector![0.0, 0.0],
        vector![1.0, 0.0],
        vector![-2.0, -1.0],
        vector![-2.0, 1.0],
    )
    .unwrap();
    assert!(behind.t < 0.0);

    // Segment misses the line.
    assert!(segment_intersection(
        vector![0.0, 0.0],
        vector![1.0, 0.0],
        vector![3.0, 1.0],
        vector![3.0, 2.0],
    )
    .is_none());

    // Parallel and collinear.
    assert!(segment_intersection(
        vector![0.0, 0.0],
        vector![1.0, 0.0],
        vector![0.0, 1.0],
        vector![5.0, 1.0],
    )
    .is_none());
    assert!(segment_intersection(
        vector![0.0, 0.0],
        vector![1.0, 0.0],
        vector![2.0, 0.0],
        vector![5.0, 0.0],
    )
    .is_none());
}

#[test]
fn infinite_lines_meet_or_not() {
    let p = infinite_line_intersection(
        vector![100.0, 200.0],
        vector![200.0, 145.0],
        vector![300.0, 210.0],
        vector![200.0, 145.0],
    )
    .unwrap();
    assert!((p - vector![200.0, 145.0]).norm() < 1e-9);

    assert!(infinite_line_intersection(
        vector![0.0, 0.0],
        vector![1.0, 1.0],
        vector![0.0, 1.0],
        vector![1.0, 2.0],
    )
    .is_none());
}

#[test]
fn angle_between_basic_cases() {
    let o = vector![0.0, 0.0];
    let ex = vector![1.0, 0.0];
    let ey = vector![0.0, 2.0];
    assert!((angle_between(o, ex, o, ey).unwrap() - 90.0).abs() < 1e-12);
    assert!((angle_between(o, ex, ex, o).unwrap() - 180.0).abs() < 1e-12);
    assert!(angle_between(o, ex, o, ex).unwrap().abs() < 1e-12);
    assert!(angle_between(o, o, o, ex).is_none());
    assert!(angle_between(o, ex, ey, ey).is_none());
}

#[test]
fn boundary_extension_picks_exit_edge() {
    let humerus = Polygon::from_xy(&[(50.0, 50.0), (350.0, 50.0), (350.0, 400.0), (50.0, 400.0)])
        .unwrap();
    // Straight up from inside: exits through the top edge.
    let end = extend_to_polygon_boundary(vector![200.0, 300.0], vector![200.0, 200.0], &humerus);
    assert!((end - vector![200.0, 50.0]).norm() < 1e-9);

    // Far endpoint already outside: nothing at t >= 1, endpoint unchanged.
    let t = vector![200.0, 10.0];
    assert_eq!(extend_to_polygon_boundary(vector![200.0, 300.0], t, &humerus), t);
}

#[test]
fn boundary_extension_keeps_largest_parameter() {
    // Concave "U" opening downwards: the upward ray enters through the gap,
    // crosses the notch floor at y=10 and exits through the top edge at y=0.
    let u_shape = Polygon::from_xy(&[
        (0.0, 0.0),
        (10.0, 0.0),
        (10.0, 20.0),
        (6.0, 20.0),
        (6.0, 10.0),
        (4.0, 10.0),
        (4.0, 20.0),
        (0.0, 20.0),
    ])
    .unwrap();
    let end = extend_to_polygon_boundary(vector![5.0, 30.0], vector![5.0, 25.0], &u_shape);
    assert!((end - vector![5.0, 0.0]).norm() < 1e-9);
}

fn coord() -> impl Strategy<Value = f64> {
    -500.0..500.0f64
}

fn point() -> impl Strategy<Value = Point2> {
    (coord(), coord()).prop_map(|(x, y)| Point2::new(x, y))
}

proptest! {
    #[test]
    fn extend_line_zero_ratio_is_identity(a in point(), b in point()) {
        prop_assert_eq!(extend_line(a, b, 0.0), (a, b));
    }

    #[test]
    fn extend_line_moves_by_ratio_length(a in point(), b in point(), ratio in 0.0..2.0f64) {
        let (a2, b2) = extend_line(a, b, ratio);
        let len = (b - a).norm();
        let tol = 1e-9 * (1.0 + len);
        prop_assert!(((a2 - a).norm() - ratio * len).abs() < tol);
        prop_assert!(((b2 - b).norm() - ratio * len).abs() < tol);
    }

    #[test]
    fn angle_between_in_range_and_negation_invariant(
        p1 in point(), p2 in point(), p3 in point(), p4 in point()
    ) {
        let a = angle_between(p1, p2, p3, p4);
        let neg = angle_between(p2, p1, p4, p3);
        match (a, neg) {
            (Some(a), Some(n)) => {
                prop_assert!((0.0..=180.0).contains(&a));
                prop_assert!((a - n).abs() < 1e-6);
            }
            (None, None) => {}
            other => prop_assert!(false, "mismatched definedness: {:?}", other),
        }
    }

    #[test]
    fn boundary_extension_is_identity_or_on_edge(
        cx in -50.0..50.0f64, cy in -50.0..50.0f64, half in 5.0..100.0f64,
        sx in coord(), sy in coord(), tx in coord(), ty in coord(),
    ) {
        let poly = Polygon::from_xy(&[
            (cx - half, cy - half),
            (cx + half, cy - half),
            (cx + half, cy + half),
            (cx - half, cy + half),
        ]).unwrap();
        let s = Point2::new(sx, sy);
        let t = Point2::new(tx, ty);
        let out = extend_to_polygon_boundary(s, t, &poly);
        if out != t {
            let on_edge = poly.edges().any(|(p, q)| {
                let e = q - p;
                let d = out - p;
                let len = e.norm();
                let dist = (e.x * d.y - e.y * d.x).abs() / len;
                let along = e.dot(&d) / (len * len);
                dist < 1e-6 && (-1e-9..=1.0 + 1e-9).contains(&along)
            });
            prop_assert!(on_edge);
            // Beyond t along s→t.
            let r = t - s;
            let param = (out - s).dot(&r) / r.norm_squared();
            prop_assert!(param >= 1.0 - 1e-9);
        }
    }
}
