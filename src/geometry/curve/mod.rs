mod arc;
mod line;

pub use arc::Arc2d;
pub use line::Line2d;

use crate::geometry::bbox::Aabb2;
use crate::math::distance_2d::{closest_on_segment, point_to_arc_dist, point_to_segment_dist};
use crate::math::intersect_2d::{
    arc_arc_intersect_2d, line_arc_intersect_2d, segment_segment_intersect_2d,
};
use crate::math::{cross, Point2, Vector2, TOLERANCE};

/// Common queries of a bounded 2D curve parameterised over `[0, 1]`.
pub trait Curve2d {
    /// Point at `t = 0`.
    fn start(&self) -> Point2;

    /// Point at `t = 1`.
    fn end(&self) -> Point2;

    fn length(&self) -> f64;

    /// Evaluates the curve; `t` is clamped to `[0, 1]`.
    fn point_at(&self, t: f64) -> Point2;

    /// Unit tangent in the direction of increasing `t`.
    fn tangent_at(&self, t: f64) -> Vector2;

    /// Parameter of the point on the curve closest to `p`.
    fn param_at(&self, p: &Point2) -> f64;

    fn closest_point(&self, p: &Point2) -> Point2;

    fn bounding_box(&self) -> Aabb2;

    fn tangent_at_start(&self) -> Vector2 {
        self.tangent_at(0.0)
    }

    fn tangent_at_end(&self) -> Vector2 {
        self.tangent_at(1.0)
    }

    fn midpoint(&self) -> Point2 {
        self.point_at(0.5)
    }

    fn distance_to_point(&self, p: &Point2) -> f64 {
        (p - self.closest_point(p)).norm()
    }
}

/// One intersection between two curves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveHit {
    pub point: Point2,
    /// Parameter on the curve the query was made on.
    pub t_self: f64,
    /// Parameter on the other curve.
    pub t_other: f64,
}

/// A boundary edge: a straight segment or a circular arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    Line(Line2d),
    Arc(Arc2d),
}

impl From<Line2d> for Curve {
    fn from(line: Line2d) -> Self {
        Self::Line(line)
    }
}

impl From<Arc2d> for Curve {
    fn from(arc: Arc2d) -> Self {
        Self::Arc(arc)
    }
}

impl Curve {
    /// Shorthand for a straight curve between two points.
    #[must_use]
    pub fn line(start: Point2, end: Point2) -> Self {
        Self::Line(Line2d::new(start, end))
    }

    #[must_use]
    pub fn is_line(&self) -> bool {
        matches!(self, Self::Line(_))
    }

    #[must_use]
    pub fn as_line(&self) -> Option<&Line2d> {
        match self {
            Self::Line(l) => Some(l),
            Self::Arc(_) => None,
        }
    }

    #[must_use]
    pub fn as_arc(&self) -> Option<&Arc2d> {
        match self {
            Self::Line(_) => None,
            Self::Arc(a) => Some(a),
        }
    }

    #[must_use]
    pub fn reversed(&self) -> Self {
        match self {
            Self::Line(l) => Self::Line(l.reversed()),
            Self::Arc(a) => Self::Arc(a.reversed()),
        }
    }

    #[must_use]
    pub fn translated(&self, offset: &Vector2) -> Self {
        match self {
            Self::Line(l) => Self::Line(l.translated(offset)),
            Self::Arc(a) => Self::Arc(a.translated(offset)),
        }
    }

    #[must_use]
    pub fn scaled_about(&self, origin: &Point2, factor: f64) -> Self {
        match self {
            Self::Line(l) => Self::Line(l.scaled_about(origin, factor)),
            Self::Arc(a) => Self::Arc(a.scaled_about(origin, factor)),
        }
    }

    /// Returns `true` if every coordinate is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        let finite = |p: Point2| p.x.is_finite() && p.y.is_finite();
        match self {
            Self::Line(l) => finite(l.start()) && finite(l.end()),
            Self::Arc(a) => finite(a.start()) && finite(a.end()) && finite(a.center()),
        }
    }

    /// The piece of the curve between `t0` and `t1`.
    #[must_use]
    pub fn sub_curve(&self, t0: f64, t1: f64) -> Self {
        match self {
            Self::Line(l) => Self::Line(l.sub_line(t0, t1)),
            Self::Arc(a) => Self::Arc(a.sub_arc(t0, t1)),
        }
    }

    /// Contribution of this curve to the signed area of a closed loop.
    #[must_use]
    pub fn area_term(&self) -> f64 {
        match self {
            Self::Line(l) => 0.5 * cross(&l.start().coords, &l.end().coords),
            Self::Arc(a) => a.area_term(),
        }
    }

    /// Polyline approximation: start included, end excluded.
    #[must_use]
    pub fn flatten(&self, chord_tolerance: f64) -> Vec<Point2> {
        match self {
            Self::Line(l) => vec![l.start()],
            Self::Arc(a) => a.flatten(chord_tolerance),
        }
    }

    /// Returns `true` if both curves are straight and their directions are
    /// collinear within `angle_eps` radians (either orientation).
    #[must_use]
    pub fn parallel_to(&self, other: &Self, angle_eps: f64) -> bool {
        let (Self::Line(a), Self::Line(b)) = (self, other) else {
            return false;
        };
        let (da, db) = (a.direction(), b.direction());
        if da.norm_squared() < 0.5 || db.norm_squared() < 0.5 {
            return false;
        }
        cross(&da, &db).abs() <= angle_eps.sin()
    }

    /// Minimum distance between two curves.
    ///
    /// `None` for arc-to-arc pairs, which are not supported.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> Option<f64> {
        match (self, other) {
            (Self::Line(a), Self::Line(b)) => Some(line_line_distance(a, b)),
            (Self::Line(l), Self::Arc(arc)) | (Self::Arc(arc), Self::Line(l)) => {
                Some(line_arc_distance(l, arc))
            }
            (Self::Arc(_), Self::Arc(_)) => None,
        }
    }

    /// Returns `true` if `p` lies on the curve within `tol`.
    #[must_use]
    pub fn contains_point(&self, p: &Point2, tol: f64) -> bool {
        self.distance_to_point(p) <= tol
    }

    /// Isolated intersection points with `other`.
    ///
    /// `tol` is a length slack so that endpoints touching within `tol` count.
    /// Overlapping collinear or co-circular stretches produce no hits here; use
    /// [`Curve::overlap_params`] for those.
    #[must_use]
    pub fn intersections(&self, other: &Self, tol: f64) -> Vec<CurveHit> {
        match (self, other) {
            (Self::Line(a), Self::Line(b)) => {
                let eps_a = tol / a.length().max(TOLERANCE);
                let eps_b = tol / b.length().max(TOLERANCE);
                segment_segment_intersect_2d(&a.start(), &a.end(), &b.start(), &b.end(), eps_a, eps_b)
                    .map(|(point, t_self, t_other)| CurveHit {
                        point,
                        t_self,
                        t_other,
                    })
                    .into_iter()
                    .collect()
            }
            (Self::Line(l), Self::Arc(arc)) => line_arc_hits(l, arc, tol)
                .into_iter()
                .map(|(point, t_line, t_arc)| CurveHit {
                    point,
                    t_self: t_line,
                    t_other: t_arc,
                })
                .collect(),
            (Self::Arc(arc), Self::Line(l)) => line_arc_hits(l, arc, tol)
                .into_iter()
                .map(|(point, t_line, t_arc)| CurveHit {
                    point,
                    t_self: t_arc,
                    t_other: t_line,
                })
                .collect(),
            (Self::Arc(a), Self::Arc(b)) => arc_arc_intersect_2d(
                &a.center(),
                a.radius(),
                a.start_angle(),
                a.sweep(),
                &b.center(),
                b.radius(),
                b.start_angle(),
                b.sweep(),
            )
            .into_iter()
            .map(|(point, t_self, t_other)| CurveHit {
                point,
                t_self,
                t_other,
            })
            .collect(),
        }
    }

    /// Parameters on `self` where an end point of `other` lies on `self`
    /// within `tol`, excluding this curve's own end points.
    ///
    /// These are the split points of collinear or co-circular overlaps and of
    /// T-junctions.
    #[must_use]
    pub fn overlap_params(&self, other: &Self, tol: f64) -> Vec<f64> {
        let len = self.length().max(TOLERANCE);
        let mut params = Vec::new();
        for p in [other.start(), other.end()] {
            if !self.contains_point(&p, tol) {
                continue;
            }
            let t = self.param_at(&p);
            if t * len > tol && (1.0 - t) * len > tol {
                params.push(t);
            }
        }
        params
    }

    /// Returns `true` if `other` runs along `self` (same support and overlapping
    /// extent of at least `tol`).
    #[must_use]
    pub fn overlaps(&self, other: &Self, tol: f64) -> bool {
        match (self, other) {
            (Self::Line(a), Self::Line(b)) => {
                if a.support_distance(&b.start()) > tol || a.support_distance(&b.end()) > tol {
                    return false;
                }
                let t0 = a.unclamped_param_at(&b.start());
                let t1 = a.unclamped_param_at(&b.end());
                let (lo, hi) = (t0.min(t1).max(0.0), t0.max(t1).min(1.0));
                (hi - lo) * a.length() > tol
            }
            (Self::Arc(a), Self::Arc(b)) => {
                (a.center() - b.center()).norm() <= tol
                    && (a.radius() - b.radius()).abs() <= tol
                    && self.contains_point(&other.midpoint(), tol)
            }
            _ => false,
        }
    }
}

impl Curve2d for Curve {
    fn start(&self) -> Point2 {
        match self {
            Self::Line(l) => l.start(),
            Self::Arc(a) => a.start(),
        }
    }

    fn end(&self) -> Point2 {
        match self {
            Self::Line(l) => l.end(),
            Self::Arc(a) => a.end(),
        }
    }

    fn length(&self) -> f64 {
        match self {
            Self::Line(l) => l.length(),
            Self::Arc(a) => a.length(),
        }
    }

    fn point_at(&self, t: f64) -> Point2 {
        match self {
            Self::Line(l) => l.point_at(t),
            Self::Arc(a) => a.point_at(t),
        }
    }

    fn tangent_at(&self, t: f64) -> Vector2 {
        match self {
            Self::Line(l) => l.tangent_at(t),
            Self::Arc(a) => a.tangent_at(t),
        }
    }

    fn param_at(&self, p: &Point2) -> f64 {
        match self {
            Self::Line(l) => l.param_at(p),
            Self::Arc(a) => a.param_at(p),
        }
    }

    fn closest_point(&self, p: &Point2) -> Point2 {
        match self {
            Self::Line(l) => l.closest_point(p),
            Self::Arc(a) => a.closest_point(p),
        }
    }

    fn bounding_box(&self) -> Aabb2 {
        match self {
            Self::Line(l) => l.bounding_box(),
            Self::Arc(a) => a.bounding_box(),
        }
    }
}

fn line_arc_hits(line: &Line2d, arc: &Arc2d, tol: f64) -> Vec<(Point2, f64, f64)> {
    let mut hits = line_arc_intersect_2d(
        &line.start(),
        &line.end(),
        tol / line.length().max(TOLERANCE),
        &arc.center(),
        arc.radius(),
        arc.start_angle(),
        arc.sweep(),
    );
    // Arc end points touching the line within tolerance.
    for (t_arc, p) in [(0.0, arc.start()), (1.0, arc.end())] {
        if hits.iter().any(|(q, _, _)| (q - p).norm() <= tol) {
            continue;
        }
        if line.contains_projected_pt(&p, tol) {
            hits.push((p, line.param_at(&p), t_arc));
        }
    }
    hits
}

fn line_line_distance(a: &Line2d, b: &Line2d) -> f64 {
    if segment_segment_intersect_2d(&a.start(), &a.end(), &b.start(), &b.end(), 0.0, 0.0).is_some()
    {
        return 0.0;
    }
    [
        point_to_segment_dist(&a.start(), &b.start(), &b.end()),
        point_to_segment_dist(&a.end(), &b.start(), &b.end()),
        point_to_segment_dist(&b.start(), &a.start(), &a.end()),
        point_to_segment_dist(&b.end(), &a.start(), &a.end()),
    ]
    .into_iter()
    .fold(f64::INFINITY, f64::min)
}

/// Exact minimum over the critical pairs: segment ends against the arc, arc
/// ends against the segment, and the foot of the center on the segment.
fn line_arc_distance(line: &Line2d, arc: &Arc2d) -> f64 {
    if !line_arc_hits(line, arc, 0.0).is_empty() {
        return 0.0;
    }
    let (center, radius) = (arc.center(), arc.radius());
    let (sa, sweep) = (arc.start_angle(), arc.sweep());
    let mut best = point_to_arc_dist(&line.start(), &center, radius, sa, sweep)
        .min(point_to_arc_dist(&line.end(), &center, radius, sa, sweep))
        .min(point_to_segment_dist(&arc.start(), &line.start(), &line.end()))
        .min(point_to_segment_dist(&arc.end(), &line.start(), &line.end()));

    let foot = closest_on_segment(&center, &line.start(), &line.end());
    let d = foot - center;
    if d.norm() > TOLERANCE && arc.param_of_angle(d.y.atan2(d.x)).is_some() {
        best = best.min((d.norm() - radius).abs());
    }
    best
}
