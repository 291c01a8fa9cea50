use crate::error::{OperationError, Result};
use crate::geometry::{Curve2d, Line2d};
use crate::math::Point2;

/// Result of resolving an [`Association`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssociationResult {
    /// Index of the chosen reference line.
    pub index: usize,
    /// The point moved onto that line.
    pub point: Point2,
    /// Parameter of `point` on the chosen line.
    pub parameter: f64,
    /// How far the point had to move.
    pub distance: f64,
}

/// Binds a movable point to the nearest of several reference lines.
///
/// Nothing is cached: every [`Association::resolve`] call projects the point
/// again, so moved lines or a moved point are picked up on the next call.
pub struct Association<'a> {
    point: Point2,
    candidates: &'a [Line2d],
}

impl<'a> Association<'a> {
    #[must_use]
    pub fn new(point: Point2, candidates: &'a [Line2d]) -> Self {
        Self { point, candidates }
    }

    /// Moves the bound point.
    pub fn set_point(&mut self, point: Point2) {
        self.point = point;
    }

    /// Projects the point onto the nearest candidate line.
    ///
    /// Candidates closer than `tol` to each other in distance count as equally
    /// near; the lowest index wins.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if there are no candidates.
    pub fn resolve(&self, tol: f64) -> Result<AssociationResult> {
        let mut best: Option<AssociationResult> = None;
        for (index, line) in self.candidates.iter().enumerate() {
            let point = line.closest_point(&self.point);
            let distance = (self.point - point).norm();
            match best {
                Some(current) if current.distance <= distance + tol => {}
                _ => {
                    best = Some(AssociationResult {
                        index,
                        point,
                        parameter: line.param_at(&point),
                        distance,
                    });
                }
            }
        }
        best.ok_or_else(|| {
            OperationError::InvalidInput("association has no candidate lines".into()).into()
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn walls() -> Vec<Line2d> {
        vec![
            Line2d::new(p(0.0, 0.0), p(4.0, 0.0)),
            Line2d::new(p(4.0, 0.0), p(4.0, 3.0)),
            Line2d::new(p(0.0, 3.0), p(4.0, 3.0)),
        ]
    }

    #[test]
    fn snaps_to_nearest_line() {
        let walls = walls();
        let result = Association::new(p(3.5, 1.5), &walls).resolve(1e-3).unwrap();
        assert_eq!(result.index, 1);
        assert!((result.point - p(4.0, 1.5)).norm() < 1e-12);
        assert!((result.distance - 0.5).abs() < 1e-12);
        assert!((result.parameter - 0.5).abs() < 1e-12);
    }

    #[test]
    fn projection_is_clamped_to_the_segment() {
        let walls = walls();
        let result = Association::new(p(6.0, -1.0), &walls).resolve(1e-3).unwrap();
        assert_eq!(result.index, 0);
        assert!((result.point - p(4.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn ties_go_to_the_lowest_index() {
        let walls = walls();
        let result = Association::new(p(2.0, 1.5), &walls).resolve(1e-3).unwrap();
        assert_eq!(result.index, 0);
    }

    #[test]
    fn moving_the_point_recomputes() {
        let walls = walls();
        let mut assoc = Association::new(p(2.0, 0.2), &walls);
        assert_eq!(assoc.resolve(1e-3).unwrap().index, 0);
        assoc.set_point(p(2.0, 2.9));
        assert_eq!(assoc.resolve(1e-3).unwrap().index, 2);
    }

    #[test]
    fn no_candidates_is_an_error() {
        assert!(Association::new(p(0.0, 0.0), &[]).resolve(1e-3).is_err());
    }
}
