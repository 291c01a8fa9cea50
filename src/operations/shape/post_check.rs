use tracing::debug;

use crate::config::ToleranceConfig;
use crate::geometry::{Curve, Curve2d, Loop};
use crate::operations::close_curves::make_curves_closed;

/// Numeric slack so that a distance exactly at the threshold passes.
const THRESHOLD_SLACK: f64 = 1e-9;

/// Validates a candidate window before it is accepted as a feature.
///
/// Rejects the window if two straight, parallel curves sit closer than
/// `threshold` (the same wall seen twice), or if the window closed into a
/// loop runs anticlockwise (extracted with inverted orientation).
///
/// Index pairs listed in `exempt` skip the distance test.
#[must_use]
pub fn post_check(
    curves: &[Curve],
    threshold: f64,
    exempt: &[(usize, usize)],
    tol: &ToleranceConfig,
) -> bool {
    for (i, a) in curves.iter().enumerate() {
        for (j, b) in curves.iter().enumerate().skip(i + 1) {
            if exempt.contains(&(i, j)) || !a.parallel_to(b, tol.angle_eps) {
                continue;
            }
            let (Some(la), Some(_)) = (a.as_line(), b.as_line()) else {
                continue;
            };
            let distance = la.support_distance(&b.midpoint());
            if distance < threshold - THRESHOLD_SLACK {
                debug!(distance, threshold, "parallel curves too close");
                return false;
            }
        }
    }

    match make_curves_closed(curves, tol.length_eps) {
        Ok(closed) => !Loop::new(closed).is_anticlockwise(),
        Err(_) => false,
    }
}
