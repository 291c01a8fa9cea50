//! Property-based tests for loop closing and the boolean engine.
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use floorcut::config::ToleranceConfig;
use floorcut::geometry::{Aabb2, Loop, Polygon};
use floorcut::math::Point2;
use floorcut::operations::boolean::{boolean_execute, BooleanOp};
use floorcut::operations::close_curves::make_curves_closed;

const TOL: f64 = 1e-3;

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

/// Polygon vertices spread far enough apart that no curve is degenerate.
fn arb_polygon() -> impl Strategy<Value = Vec<Point2>> {
    prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 3..10).prop_filter_map(
        "consecutive vertices too close",
        |coords| {
            let points: Vec<Point2> = coords.into_iter().map(|(x, y)| Point2::new(x, y)).collect();
            let n = points.len();
            (0..n)
                .all(|i| (points[i] - points[(i + 1) % n]).norm() > 0.1)
                .then_some(points)
        },
    )
}

fn arb_rect() -> impl Strategy<Value = Aabb2> {
    (-50.0f64..50.0, -50.0f64..50.0, 0.5f64..50.0, 0.5f64..50.0).prop_map(|(x, y, w, h)| {
        Aabb2::from_corners(&Point2::new(x, y), &Point2::new(x + w, y + h))
    })
}

fn rect_polygon(bbox: &Aabb2) -> Polygon {
    Polygon::new(Loop::rectangle(bbox))
}

/// `true` if no edge coordinate of `a` nearly coincides with one of `b`.
fn in_general_position(a: &Aabb2, b: &Aabb2) -> bool {
    let xs = [a.min.x, a.max.x];
    let ys = [a.min.y, a.max.y];
    xs.iter()
        .all(|x| (x - b.min.x).abs() > 0.01 && (x - b.max.x).abs() > 0.01)
        && ys
            .iter()
            .all(|y| (y - b.min.y).abs() > 0.01 && (y - b.max.y).abs() > 0.01)
}

// ---------------------------------------------------------------------------
// 1. Closing any subset of a polygon's curves yields a closed loop
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn closing_always_closes(
        points in arb_polygon(),
        mask in prop::collection::vec(any::<bool>(), 10),
    ) {
        let curves: Vec<_> = Loop::from_points(&points)
            .into_curves()
            .into_iter()
            .enumerate()
            .filter(|(i, _)| mask[*i] || *i == 0)
            .map(|(_, c)| c)
            .collect();
        let closed = make_curves_closed(&curves, TOL).unwrap();
        prop_assert!(Loop::new(closed.clone()).is_closed(TOL));
        prop_assert!(closed.len() <= 2 * curves.len());
    }
}

// ---------------------------------------------------------------------------
// 2. Closing a closed loop changes nothing
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn closing_is_idempotent(points in arb_polygon()) {
        let lp = Loop::from_points(&points);
        let once = make_curves_closed(lp.curves(), TOL).unwrap();
        prop_assert_eq!(&once, &lp.curves().to_vec());
        let twice = make_curves_closed(&once, TOL).unwrap();
        prop_assert_eq!(once, twice);
    }
}

// ---------------------------------------------------------------------------
// 3. difference(A, A) is empty
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn self_difference_is_empty(rect in arb_rect()) {
        let a = rect_polygon(&rect);
        let outcome =
            boolean_execute(&a, &a, BooleanOp::Difference, &ToleranceConfig::default()).unwrap();
        prop_assert!(outcome.is_empty());
    }
}

// ---------------------------------------------------------------------------
// 4. Union and intersection areas of rectangles add up
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn rectangle_union_area(ra in arb_rect(), rb in arb_rect()) {
        prop_assume!(in_general_position(&ra, &rb));
        let tol = ToleranceConfig::default();
        let (a, b) = (rect_polygon(&ra), rect_polygon(&rb));

        let w = (ra.max.x.min(rb.max.x) - ra.min.x.max(rb.min.x)).max(0.0);
        let h = (ra.max.y.min(rb.max.y) - ra.min.y.max(rb.min.y)).max(0.0);
        let overlap = w * h;

        let union = boolean_execute(&a, &b, BooleanOp::Union, &tol).unwrap();
        let expected = ra.area() + rb.area() - overlap;
        prop_assert!((union.total_area() - expected).abs() < 1e-6 * expected.max(1.0),
            "union={} expected={}", union.total_area(), expected);

        let inter = boolean_execute(&a, &b, BooleanOp::Intersect, &tol).unwrap();
        prop_assert!((inter.total_area() - overlap).abs() < 1e-6 * expected.max(1.0),
            "intersection={} expected={}", inter.total_area(), overlap);
    }
}
