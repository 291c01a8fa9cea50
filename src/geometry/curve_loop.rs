use crate::error::{LoopError, Result};
use crate::math::polygon_2d::point_in_polygon;
use crate::math::{is_same_point, Point2, Vector2};

use super::bbox::Aabb2;
use super::curve::{Curve, Curve2d};

/// An ordered sequence of curves meant to join end-to-start.
///
/// Nothing forces a `Loop` to be closed; [`Loop::is_closed`] and
/// [`Loop::ensure_closed`] check it. Area and winding are only meaningful
/// for closed loops.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Loop {
    curves: Vec<Curve>,
}

impl Loop {
    #[must_use]
    pub fn new(curves: Vec<Curve>) -> Self {
        Self { curves }
    }

    /// A closed polyline through `points`, last point joined back to the first.
    #[must_use]
    pub fn from_points(points: &[Point2]) -> Self {
        let n = points.len();
        let curves = (0..n)
            .map(|i| Curve::line(points[i], points[(i + 1) % n]))
            .collect();
        Self { curves }
    }

    /// Clockwise rectangle covering `bbox`.
    #[must_use]
    pub fn rectangle(bbox: &Aabb2) -> Self {
        Self::from_points(&bbox.corners_clockwise())
    }

    #[must_use]
    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    #[must_use]
    pub fn into_curves(self) -> Vec<Curve> {
        self.curves
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Curve `i`, wrapping around the loop.
    #[must_use]
    pub fn curve_wrapped(&self, i: usize) -> &Curve {
        &self.curves[i % self.curves.len()]
    }

    /// Indices `i` whose end point misses the start of curve `i + 1` (wrapping).
    #[must_use]
    pub fn gaps(&self, tol: f64) -> Vec<usize> {
        let n = self.curves.len();
        (0..n)
            .filter(|&i| {
                !is_same_point(&self.curves[i].end(), &self.curves[(i + 1) % n].start(), tol)
            })
            .collect()
    }

    /// Returns `true` if the loop is non-empty and every joint meets within `tol`.
    #[must_use]
    pub fn is_closed(&self, tol: f64) -> bool {
        !self.curves.is_empty() && self.gaps(tol).is_empty()
    }

    /// Checks closure, reporting the offending joints.
    ///
    /// # Errors
    ///
    /// Returns [`LoopError::Empty`] for an empty loop and
    /// [`LoopError::Malformed`] if any joint is open.
    pub fn ensure_closed(&self, tol: f64) -> Result<()> {
        if self.curves.is_empty() {
            return Err(LoopError::Empty.into());
        }
        let gaps = self.gaps(tol);
        if gaps.is_empty() {
            Ok(())
        } else {
            Err(LoopError::Malformed { gaps }.into())
        }
    }

    /// Signed enclosed area, positive when anticlockwise.
    ///
    /// Arcs contribute exactly, no flattening involved.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        self.curves.iter().map(Curve::area_term).sum()
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    #[must_use]
    pub fn is_anticlockwise(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// The same boundary walked the other way.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            curves: self.curves.iter().rev().map(Curve::reversed).collect(),
        }
    }

    /// This loop with the requested winding.
    #[must_use]
    pub fn oriented(&self, clockwise: bool) -> Self {
        if self.is_anticlockwise() == clockwise {
            self.reversed()
        } else {
            self.clone()
        }
    }

    #[must_use]
    pub fn translated(&self, offset: &Vector2) -> Self {
        Self {
            curves: self.curves.iter().map(|c| c.translated(offset)).collect(),
        }
    }

    #[must_use]
    pub fn scaled_about(&self, origin: &Point2, factor: f64) -> Self {
        Self {
            curves: self
                .curves
                .iter()
                .map(|c| c.scaled_about(origin, factor))
                .collect(),
        }
    }

    #[must_use]
    pub fn bounding_box(&self) -> Option<Aabb2> {
        let mut iter = self.curves.iter().map(Curve2d::bounding_box);
        let first = iter.next()?;
        Some(iter.fold(first, |acc, b| acc.union(&b)))
    }

    /// Polyline approximation of the boundary.
    #[must_use]
    pub fn to_points(&self, chord_tolerance: f64) -> Vec<Point2> {
        self.curves
            .iter()
            .flat_map(|c| c.flatten(chord_tolerance))
            .collect()
    }

    /// Returns `true` if `p` lies on some curve within `tol`.
    #[must_use]
    pub fn on_boundary(&self, p: &Point2, tol: f64) -> bool {
        self.curves.iter().any(|c| c.contains_point(p, tol))
    }

    /// Strict interior test; boundary points may go either way.
    #[must_use]
    pub fn contains_point(&self, p: &Point2, chord_tolerance: f64) -> bool {
        point_in_polygon(p, &self.to_points(chord_tolerance))
    }

    /// Returns `true` if every point of `other`'s flattened boundary is inside
    /// this loop or on it.
    #[must_use]
    pub fn contains_loop(&self, other: &Self, tol: f64, chord_tolerance: f64) -> bool {
        let pts = self.to_points(chord_tolerance);
        let mut samples = other.to_points(chord_tolerance);
        samples.extend(other.curves.iter().map(Curve2d::midpoint));
        samples
            .iter()
            .all(|p| self.on_boundary(p, tol) || point_in_polygon(p, &pts))
    }
}
