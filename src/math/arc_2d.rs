/// 2D circular-arc math utilities.
///
/// Arcs are described by `center`, `radius`, `start_angle` and a signed
/// `sweep`: `sweep > 0` runs counter-clockwise, `sweep < 0` clockwise.
use std::f64::consts::{PI, TAU};

use super::{Point2, Vector2, TOLERANCE};

/// Returns the signed sweep from `start_angle` to `end_angle` in the requested
/// direction, in `(0, 2π]` for counter-clockwise and `[-2π, 0)` for clockwise.
///
/// Coincident angles produce a full turn.
#[must_use]
pub fn sweep_between(start_angle: f64, end_angle: f64, clockwise: bool) -> f64 {
    let mut sweep = end_angle - start_angle;
    if clockwise {
        while sweep >= -TOLERANCE {
            sweep -= TAU;
        }
        while sweep < -TAU - TOLERANCE {
            sweep += TAU;
        }
    } else {
        while sweep <= TOLERANCE {
            sweep += TAU;
        }
        while sweep > TAU + TOLERANCE {
            sweep -= TAU;
        }
    }
    sweep
}

/// Evaluates a point on an arc at parameter `t` in `[0, 1]`.
#[must_use]
pub fn arc_point_at(center: &Point2, radius: f64, start_angle: f64, sweep: f64, t: f64) -> Point2 {
    let angle = start_angle + sweep * t;
    Point2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
}

/// Computes the unit tangent direction on an arc at parameter `t` in `[0, 1]`.
///
/// The tangent points in the direction of increasing `t`.
#[must_use]
pub fn arc_tangent_at(start_angle: f64, sweep: f64, t: f64) -> Vector2 {
    let angle = start_angle + sweep * t;
    let sign = if sweep >= 0.0 { 1.0 } else { -1.0 };
    Vector2::new(-sign * angle.sin(), sign * angle.cos())
}

/// Converts an absolute angle to an arc parameter `t` in `[0, 1]`.
///
/// Returns `None` if the angle is not within the arc's angular range.
#[must_use]
pub fn angle_to_arc_param(angle: f64, start_angle: f64, sweep: f64) -> Option<f64> {
    if sweep.abs() < TOLERANCE {
        return None;
    }
    let eps = TOLERANCE * 100.0;
    let mut delta = angle - start_angle;

    if sweep > 0.0 {
        while delta < -eps {
            delta += 2.0 * PI;
        }
        while delta > 2.0 * PI + eps {
            delta -= 2.0 * PI;
        }
    } else {
        while delta > eps {
            delta -= 2.0 * PI;
        }
        while delta < -2.0 * PI - eps {
            delta += 2.0 * PI;
        }
    }

    let t = delta / sweep;
    if t >= -eps && t <= 1.0 + eps {
        Some(t.clamp(0.0, 1.0))
    } else {
        None
    }
}

/// Contribution of an arc to the shoelace sum `½∮(x dy − y dx)`.
///
/// Adding this for every arc and `½(x0·y1 − x1·y0)` for every line of a closed
/// loop gives the exact signed area.
#[must_use]
pub fn arc_area_term(center: &Point2, radius: f64, start_angle: f64, sweep: f64) -> f64 {
    let end_angle = start_angle + sweep;
    0.5 * (radius * radius * sweep
        + radius * center.x * (end_angle.sin() - start_angle.sin())
        - radius * center.y * (end_angle.cos() - start_angle.cos()))
}

/// Computes the number of chords needed to approximate an arc within the
/// given tolerance.
#[must_use]
pub fn arc_subdivision_count(radius: f64, abs_sweep: f64, tolerance: f64) -> u32 {
    if radius < 1e-12 || abs_sweep < 1e-12 || tolerance <= 0.0 {
        return 1;
    }
    // sagitta = r * (1 - cos(θ/2))
    let max_angle = if tolerance >= radius {
        PI
    } else {
        2.0 * (1.0 - tolerance / radius).acos()
    };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n = (abs_sweep / max_angle).ceil() as u32;
    n.max(1)
}
