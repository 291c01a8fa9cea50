use crate::geometry::{Curve, Line2d};

use super::split::split_at;

/// Subdivides `base` curves where end points of overlapping `cutters` project
/// onto them.
///
/// Each straight base curve is walked in a canonical direction (increasing x,
/// then increasing y) while cut points are collected, so the outcome does not
/// depend on how either curve is oriented. Pieces shorter than `min_len` are
/// never produced. Arcs are passed through.
#[must_use]
pub fn subdivide_at_overlaps(base: &[Curve], cutters: &[Curve], tol: f64, min_len: f64) -> Vec<Curve> {
    let mut out = Vec::with_capacity(base.len());
    for curve in base {
        let Curve::Line(line) = curve else {
            out.push(*curve);
            continue;
        };
        let (canonical, flipped) = canonical_direction(line);
        let canonical_curve = Curve::Line(canonical);

        let params: Vec<f64> = cutters
            .iter()
            .filter(|c| canonical_curve.overlaps(c, tol))
            .flat_map(|c| canonical_curve.overlap_params(c, tol))
            .collect();
        if params.is_empty() {
            out.push(*curve);
            continue;
        }

        let mut pieces = split_at(&canonical_curve, params, min_len);
        if flipped {
            pieces = pieces.iter().rev().map(Curve::reversed).collect();
        }
        out.extend(pieces);
    }
    out
}

fn canonical_direction(line: &Line2d) -> (Line2d, bool) {
    let d = line.vector();
    let flip = d.x < -f64::EPSILON || (d.x.abs() <= f64::EPSILON && d.y < 0.0);
    if flip {
        (line.reversed(), true)
    } else {
        (*line, false)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::Curve2d;
    use crate::math::Point2;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn splits_at_overlap_ends_in_original_direction() {
        let base = [Curve::line(p(4.0, 0.0), p(0.0, 0.0))];
        let cutter = [Curve::line(p(1.0, 0.0), p(3.0, 0.0))];
        let out = subdivide_at_overlaps(&base, &cutter, 1e-3, 1e-3);
        assert_eq!(out.len(), 3);
        assert_relative_eq!(out[0].start().x, 4.0);
        assert_relative_eq!(out[0].end().x, 3.0);
        assert_relative_eq!(out[2].end().x, 0.0);
    }

    #[test]
    fn orientation_does_not_change_cut_points() {
        let cutter = [Curve::line(p(1.0, 0.0), p(3.0, 0.0))];
        let fwd = subdivide_at_overlaps(&[Curve::line(p(0.0, 0.0), p(4.0, 0.0))], &cutter, 1e-3, 1e-3);
        let bwd = subdivide_at_overlaps(&[Curve::line(p(4.0, 0.0), p(0.0, 0.0))], &cutter, 1e-3, 1e-3);
        let rebuilt: Vec<Curve> = bwd.iter().rev().map(Curve::reversed).collect();
        assert_eq!(fwd.len(), rebuilt.len());
        for (a, b) in fwd.iter().zip(&rebuilt) {
            assert!((a.start() - b.start()).norm() < 1e-12);
            assert!((a.end() - b.end()).norm() < 1e-12);
        }
    }

    #[test]
    fn short_pieces_are_not_produced() {
        let base = [Curve::line(p(0.0, 0.0), p(4.0, 0.0))];
        let cutter = [Curve::line(p(1.0, 0.0), p(3.9995, 0.0))];
        let out = subdivide_at_overlaps(&base, &cutter, 1e-4, 1e-3);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn non_overlapping_cutters_are_ignored() {
        let base = [Curve::line(p(0.0, 0.0), p(4.0, 0.0))];
        let cutter = [Curve::line(p(2.0, 0.0), p(2.0, 3.0))];
        assert_eq!(subdivide_at_overlaps(&base, &cutter, 1e-3, 1e-3).len(), 1);
    }
}
