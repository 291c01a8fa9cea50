use crate::geometry::bbox::Aabb2;
use crate::math::distance_2d::closest_on_segment;
use crate::math::{cross, Point2, Vector2, TOLERANCE};

use super::Curve2d;

/// A straight segment from `start` to `end`.
///
/// The parametric form is `P(t) = start + t * (end - start)` with `t` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line2d {
    start: Point2,
    end: Point2,
}

impl Line2d {
    /// Creates a segment between two points.
    ///
    /// Zero-length segments are allowed; they report a zero direction.
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// Vector from start to end.
    #[must_use]
    pub fn vector(&self) -> Vector2 {
        self.end - self.start
    }

    /// Unit direction, or the zero vector for a degenerate segment.
    #[must_use]
    pub fn direction(&self) -> Vector2 {
        let v = self.vector();
        let len = v.norm();
        if len < TOLERANCE {
            Vector2::zeros()
        } else {
            v / len
        }
    }

    /// Parameter of the projection of `p` onto the supporting line, not clamped.
    #[must_use]
    pub fn unclamped_param_at(&self, p: &Point2) -> f64 {
        let v = self.vector();
        let len_sq = v.norm_squared();
        if len_sq < TOLERANCE * TOLERANCE {
            return 0.0;
        }
        (p - self.start).dot(&v) / len_sq
    }

    /// Perpendicular distance from `p` to the infinite supporting line.
    #[must_use]
    pub fn support_distance(&self, p: &Point2) -> f64 {
        let d = self.direction();
        if d.norm_squared() < 0.5 {
            return (p - self.start).norm();
        }
        cross(&d, &(p - self.start)).abs()
    }

    /// Returns `true` if `p` projects onto the segment (within `tol` along it)
    /// and lies within `tol` of it.
    #[must_use]
    pub fn contains_projected_pt(&self, p: &Point2, tol: f64) -> bool {
        let len = self.vector().norm();
        if len < TOLERANCE {
            return (p - self.start).norm() <= tol;
        }
        let t = self.unclamped_param_at(p);
        let slack = tol / len;
        t >= -slack && t <= 1.0 + slack && self.support_distance(p) <= tol
    }

    /// The sub-segment between parameters `t0` and `t1` (order preserved).
    #[must_use]
    pub fn sub_line(&self, t0: f64, t1: f64) -> Self {
        Self::new(self.point_at(t0), self.point_at(t1))
    }

    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }

    #[must_use]
    pub fn translated(&self, offset: &Vector2) -> Self {
        Self::new(self.start + offset, self.end + offset)
    }

    /// Uniform scale about `origin`.
    #[must_use]
    pub fn scaled_about(&self, origin: &Point2, factor: f64) -> Self {
        Self::new(
            origin + (self.start - origin) * factor,
            origin + (self.end - origin) * factor,
        )
    }
}

impl Curve2d for Line2d {
    fn start(&self) -> Point2 {
        self.start
    }

    fn end(&self) -> Point2 {
        self.end
    }

    fn length(&self) -> f64 {
        self.vector().norm()
    }

    fn point_at(&self, t: f64) -> Point2 {
        if t <= 0.0 {
            return self.start;
        }
        if t >= 1.0 {
            return self.end;
        }
        self.start + self.vector() * t
    }

    fn tangent_at(&self, _t: f64) -> Vector2 {
        self.direction()
    }

    fn param_at(&self, p: &Point2) -> f64 {
        self.unclamped_param_at(p).clamp(0.0, 1.0)
    }

    fn closest_point(&self, p: &Point2) -> Point2 {
        closest_on_segment(p, &self.start, &self.end)
    }

    fn bounding_box(&self) -> Aabb2 {
        Aabb2::from_corners(&self.start, &self.end)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn line() -> Line2d {
        Line2d::new(Point2::new(0.0, 0.0), Point2::new(4.0, 0.0))
    }

    #[test]
    fn evaluate_and_length() {
        let l = line();
        assert_relative_eq!(l.length(), 4.0);
        let p = l.point_at(0.25);
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(l.tangent_at_start().x, 1.0);
    }

    #[test]
    fn param_at_clamps_to_segment() {
        let l = line();
        assert_relative_eq!(l.param_at(&Point2::new(2.0, 3.0)), 0.5);
        assert_relative_eq!(l.param_at(&Point2::new(-2.0, 0.0)), 0.0);
        assert_relative_eq!(l.unclamped_param_at(&Point2::new(-2.0, 0.0)), -0.5);
    }

    #[test]
    fn projected_containment_respects_tolerance() {
        let l = line();
        assert!(l.contains_projected_pt(&Point2::new(4.0005, 0.0005), 1e-3));
        assert!(!l.contains_projected_pt(&Point2::new(2.0, 0.01), 1e-3));
        assert!(!l.contains_projected_pt(&Point2::new(4.1, 0.0), 1e-3));
    }

    #[test]
    fn sub_line_and_reverse() {
        let sub = line().sub_line(0.75, 0.25);
        assert_relative_eq!(sub.start().x, 3.0);
        assert_relative_eq!(sub.end().x, 1.0);
        let rev = line().reversed();
        assert_relative_eq!(rev.start().x, 4.0);
    }

    #[test]
    fn support_distance_ignores_extent() {
        let l = line();
        assert_relative_eq!(l.support_distance(&Point2::new(10.0, -2.0)), 2.0);
    }
}
