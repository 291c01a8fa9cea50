use crate::geometry::{Curve, Curve2d};

/// Which operand a fragment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    A,
    B,
}

/// A piece of an operand's boundary between two consecutive split points.
#[derive(Debug, Clone)]
pub struct Fragment {
    pub curve: Curve,
    pub source: Operand,
}

/// Splits every curve of `curves` where it meets a curve of `others`.
///
/// Split points are isolated intersections plus the end points of `others`
/// lying on the curve (collinear overlaps and T-junctions). Split points
/// closer than `tol` to each other or to a curve end are merged.
#[must_use]
pub fn split_curves(curves: &[Curve], others: &[Curve], source: Operand, tol: f64) -> Vec<Fragment> {
    let mut fragments = Vec::with_capacity(curves.len());
    for curve in curves {
        let mut params: Vec<f64> = Vec::new();
        let bbox = curve.bounding_box();
        for other in others {
            if !bbox.overlaps(&other.bounding_box(), tol) {
                continue;
            }
            params.extend(curve.intersections(other, tol).iter().map(|h| h.t_self));
            params.extend(curve.overlap_params(other, tol));
        }
        for piece in split_at(curve, params, tol) {
            fragments.push(Fragment {
                curve: piece,
                source,
            });
        }
    }
    fragments
}

/// Cuts `curve` at `params`, ignoring parameters that would leave a piece
/// shorter than `min_len`.
#[must_use]
pub fn split_at(curve: &Curve, mut params: Vec<f64>, min_len: f64) -> Vec<Curve> {
    let len = curve.length();
    if len <= min_len {
        return vec![*curve];
    }
    params.retain(|t| t.is_finite());
    params.sort_by(f64::total_cmp);

    let mut cuts = vec![0.0];
    for t in params {
        let last = cuts[cuts.len() - 1];
        if (t - last) * len > min_len && (1.0 - t) * len > min_len {
            cuts.push(t);
        }
    }
    cuts.push(1.0);

    cuts.windows(2)
        .map(|w| {
            if w[0] <= 0.0 && w[1] >= 1.0 {
                *curve
            } else {
                curve.sub_curve(w[0], w[1])
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::Point2;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn crossing_lines_split_both() {
        let a = [Curve::line(p(0.0, 0.0), p(2.0, 0.0))];
        let b = [Curve::line(p(1.0, -1.0), p(1.0, 1.0))];
        let frags = split_curves(&a, &b, Operand::A, 1e-3);
        assert_eq!(frags.len(), 2);
        assert_relative_eq!(frags[0].curve.end().x, 1.0);
        assert_eq!(split_curves(&b, &a, Operand::B, 1e-3).len(), 2);
    }

    #[test]
    fn collinear_overlap_splits_at_inner_ends() {
        let a = [Curve::line(p(0.0, 0.0), p(4.0, 0.0))];
        let b = [Curve::line(p(3.0, 0.0), p(1.0, 0.0))];
        let frags = split_curves(&a, &b, Operand::A, 1e-3);
        assert_eq!(frags.len(), 3);
        assert_relative_eq!(frags[1].curve.start().x, 1.0);
        assert_relative_eq!(frags[1].curve.end().x, 3.0);
    }

    #[test]
    fn touching_at_end_does_not_split() {
        let a = [Curve::line(p(0.0, 0.0), p(2.0, 0.0))];
        let b = [Curve::line(p(2.0, 0.0), p(2.0, 2.0))];
        assert_eq!(split_curves(&a, &b, Operand::A, 1e-3).len(), 1);
    }

    #[test]
    fn close_params_collapse() {
        let c = Curve::line(p(0.0, 0.0), p(1.0, 0.0));
        let pieces = split_at(&c, vec![0.5, 0.5004, 0.9999], 1e-3);
        assert_eq!(pieces.len(), 2);
    }
}
