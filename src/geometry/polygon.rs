use crate::math::Point2;

use super::bbox::Aabb2;
use super::curve_loop::Loop;

/// A planar region: one outer loop and any number of hole loops.
///
/// Regions produced by the boolean engine have a clockwise outer loop and
/// anticlockwise holes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    outer: Loop,
    holes: Vec<Loop>,
}

impl Polygon {
    #[must_use]
    pub fn new(outer: Loop) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_holes(outer: Loop, holes: Vec<Loop>) -> Self {
        Self { outer, holes }
    }

    #[must_use]
    pub fn outer(&self) -> &Loop {
        &self.outer
    }

    #[must_use]
    pub fn holes(&self) -> &[Loop] {
        &self.holes
    }

    #[must_use]
    pub fn into_outer(self) -> Loop {
        self.outer
    }

    /// Unsigned area of the outer loop.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.outer.area()
    }

    /// Outer area minus hole areas.
    #[must_use]
    pub fn net_area(&self) -> f64 {
        self.outer.area() - self.holes.iter().map(Loop::area).sum::<f64>()
    }

    /// Number of curves on the outer loop.
    #[must_use]
    pub fn curve_count(&self) -> usize {
        self.outer.len()
    }

    #[must_use]
    pub fn bounding_box(&self) -> Option<Aabb2> {
        self.outer.bounding_box()
    }

    /// Inside the outer loop and outside every hole.
    #[must_use]
    pub fn contains_point(&self, p: &Point2, chord_tolerance: f64) -> bool {
        self.outer.contains_point(p, chord_tolerance)
            && !self
                .holes
                .iter()
                .any(|h| h.contains_point(p, chord_tolerance))
    }

    #[must_use]
    pub fn scaled_about(&self, origin: &Point2, factor: f64) -> Self {
        Self {
            outer: self.outer.scaled_about(origin, factor),
            holes: self
                .holes
                .iter()
                .map(|h| h.scaled_about(origin, factor))
                .collect(),
        }
    }
}

impl From<Loop> for Polygon {
    fn from(outer: Loop) -> Self {
        Self::new(outer)
    }
}
