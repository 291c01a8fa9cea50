use tracing::debug;

use crate::error::{LoopError, Result};
use crate::geometry::{Curve, Curve2d, Loop};
use crate::math::is_same_point;

/// Repairs an open curve sequence into a closed loop.
///
/// The input is cloned, never touched. At every gap between consecutive
/// curves (and between the last and the first) a straight connector is
/// inserted, one gap at a time, until the sequence is closed. At most one
/// connector per input curve is inserted; needing more means the input
/// cannot be closed and is reported as [`LoopError::Malformed`].
pub struct MakeCurvesClosed<'a> {
    curves: &'a [Curve],
    tol: f64,
}

impl<'a> MakeCurvesClosed<'a> {
    /// Creates a new `MakeCurvesClosed` operation.
    ///
    /// `tol` is the same-point tolerance used for the closure test.
    #[must_use]
    pub fn new(curves: &'a [Curve], tol: f64) -> Self {
        Self { curves, tol }
    }

    /// Executes the operation, returning the closed curve list.
    ///
    /// # Errors
    ///
    /// Returns [`LoopError::Empty`] for an empty input and
    /// [`LoopError::Malformed`] (with the gap indices of the input) if the
    /// iteration bound is exceeded, which happens for non-finite coordinates.
    pub fn execute(&self) -> Result<Vec<Curve>> {
        if self.curves.is_empty() {
            return Err(LoopError::Empty.into());
        }

        let input_gaps = || Loop::new(self.curves.to_vec()).gaps(self.tol);
        if self.curves.iter().any(|c| !c.is_finite()) {
            return Err(LoopError::Malformed { gaps: input_gaps() }.into());
        }

        let max_iterations = self.curves.len();
        let mut curves = self.curves.to_vec();

        for _ in 0..=max_iterations {
            let Some(gap) = first_gap(&curves, self.tol) else {
                return Ok(curves);
            };
            let next = (gap + 1) % curves.len();
            let connector = Curve::line(curves[gap].end(), curves[next].start());
            debug!(gap, "inserting connector");
            curves.insert(gap + 1, connector);
        }

        Err(LoopError::Malformed { gaps: input_gaps() }.into())
    }
}

/// Free-function form of [`MakeCurvesClosed`].
///
/// # Errors
///
/// See [`MakeCurvesClosed::execute`].
pub fn make_curves_closed(curves: &[Curve], tol: f64) -> Result<Vec<Curve>> {
    MakeCurvesClosed::new(curves, tol).execute()
}

fn first_gap(curves: &[Curve], tol: f64) -> Option<usize> {
    let n = curves.len();
    (0..n).find(|&i| !is_same_point(&curves[i].end(), &curves[(i + 1) % n].start(), tol))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::FloorcutError;
    use crate::math::Point2;

    const TOL: f64 = 1e-3;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn closed_input_is_returned_unchanged() {
        let lp = Loop::from_points(&[p(0.0, 0.0), p(0.0, 1.0), p(1.0, 1.0)]);
        let out = make_curves_closed(lp.curves(), TOL).unwrap();
        assert_eq!(out, lp.curves());
    }

    #[test]
    fn u_shape_gets_one_connector() {
        let curves = vec![
            Curve::line(p(0.0, 0.0), p(0.0, 2.0)),
            Curve::line(p(0.0, 2.0), p(1.0, 2.0)),
            Curve::line(p(1.0, 2.0), p(1.0, 0.0)),
        ];
        let out = make_curves_closed(&curves, TOL).unwrap();
        assert_eq!(out.len(), 4);
        assert_eq!(out[3], Curve::line(p(1.0, 0.0), p(0.0, 0.0)));
        assert!(Loop::new(out).is_closed(TOL));
    }

    #[test]
    fn every_gap_is_bridged_in_order() {
        let curves = vec![
            Curve::line(p(0.0, 0.0), p(1.0, 0.0)),
            Curve::line(p(1.0, 1.0), p(0.0, 1.0)),
        ];
        let out = make_curves_closed(&curves, TOL).unwrap();
        assert_eq!(out.len(), 4);
        assert_eq!(out[1], Curve::line(p(1.0, 0.0), p(1.0, 1.0)));
        assert_eq!(out[3], Curve::line(p(0.0, 1.0), p(0.0, 0.0)));
    }

    #[test]
    fn input_is_not_mutated() {
        let curves = vec![Curve::line(p(0.0, 0.0), p(1.0, 0.0))];
        let snapshot = curves.clone();
        let out = make_curves_closed(&curves, TOL).unwrap();
        assert_eq!(curves, snapshot);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(
            make_curves_closed(&[], TOL),
            Err(FloorcutError::Loop(LoopError::Empty))
        ));
    }

    #[test]
    fn non_finite_input_is_malformed() {
        let curves = vec![
            Curve::line(p(0.0, 0.0), p(f64::NAN, 0.0)),
            Curve::line(p(1.0, 0.0), p(0.0, 0.0)),
        ];
        let err = make_curves_closed(&curves, TOL).unwrap_err();
        assert!(matches!(
            err,
            FloorcutError::Loop(LoopError::Malformed { ref gaps }) if gaps == &vec![0]
        ));
    }
}
