use crate::geometry::{Curve, Curve2d, Loop};
use crate::math::is_same_point;

/// Re-joins adjacent collinear lines of a closed loop.
///
/// Splitting leaves straight edges in several pieces; two consecutive lines
/// running in the same direction become one. The joint between the last and
/// first curve is merged too.
#[must_use]
pub fn merge_collinear_lines(lp: &Loop, angle_eps: f64, tol: f64) -> Loop {
    let mut curves: Vec<Curve> = Vec::with_capacity(lp.len());
    for curve in lp.curves() {
        if let Some(last) = curves.last_mut() {
            if let Some(joined) = join(last, curve, angle_eps, tol) {
                *last = joined;
                continue;
            }
        }
        curves.push(*curve);
    }

    while curves.len() > 2 {
        let n = curves.len();
        let Some(joined) = join(&curves[n - 1], &curves[0], angle_eps, tol) else {
            break;
        };
        curves[0] = joined;
        curves.pop();
    }

    Loop::new(curves)
}

fn join(a: &Curve, b: &Curve, angle_eps: f64, tol: f64) -> Option<Curve> {
    let (Curve::Line(la), Curve::Line(lb)) = (a, b) else {
        return None;
    };
    if !is_same_point(&la.end(), &lb.start(), tol) || !a.parallel_to(b, angle_eps) {
        return None;
    }
    if la.direction().dot(&lb.direction()) <= 0.0 {
        return None;
    }
    Some(Curve::line(la.start(), lb.end()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Point2;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn split_edges_are_rejoined() {
        let lp = Loop::from_points(&[
            p(0.0, 0.0),
            p(0.0, 1.0),
            p(0.0, 2.0),
            p(2.0, 2.0),
            p(2.0, 0.0),
            p(1.0, 0.0),
        ]);
        let merged = merge_collinear_lines(&lp, 1e-3, 1e-3);
        assert_eq!(merged.len(), 4);
        assert!(merged.is_closed(1e-3));
        assert!((merged.area() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn wrap_around_joint_is_merged() {
        let lp = Loop::from_points(&[
            p(0.0, 1.0),
            p(0.0, 2.0),
            p(2.0, 2.0),
            p(2.0, 0.0),
            p(0.0, 0.0),
        ]);
        let merged = merge_collinear_lines(&lp, 1e-3, 1e-3);
        assert_eq!(merged.len(), 4);
        assert!(merged.is_closed(1e-3));
    }

    #[test]
    fn corners_are_kept() {
        let lp = Loop::from_points(&[p(0.0, 0.0), p(0.0, 1.0), p(1.0, 1.0)]);
        assert_eq!(merge_collinear_lines(&lp, 1e-3, 1e-3).len(), 3);
    }
}
