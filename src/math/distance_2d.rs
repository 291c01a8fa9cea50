use super::arc_2d::{angle_to_arc_param, arc_point_at};
use super::Point2;

/// Returns the minimum distance from point `p` to the segment `a → b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    (p - closest_on_segment(p, a, b)).norm()
}

/// Returns the closest point to `p` on the segment `a → b`.
#[must_use]
pub fn closest_on_segment(p: &Point2, a: &Point2, b: &Point2) -> Point2 {
    let d = b - a;
    let len_sq = d.norm_squared();
    if len_sq < 1e-20 {
        return *a;
    }
    let t = ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0);
    a + d * t
}

/// Returns the minimum distance from point `p` to a circular arc.
///
/// If the point's angle (relative to the center) falls within the arc range,
/// the distance is `||p - center| - radius|`; otherwise it is the distance to
/// the nearer arc endpoint.
#[must_use]
pub fn point_to_arc_dist(
    p: &Point2,
    center: &Point2,
    radius: f64,
    start_angle: f64,
    sweep: f64,
) -> f64 {
    let d = p - center;
    let angle = d.y.atan2(d.x);
    if angle_to_arc_param(angle, start_angle, sweep).is_some() {
        return (d.norm() - radius).abs();
    }

    let e0 = arc_point_at(center, radius, start_angle, sweep, 0.0);
    let e1 = arc_point_at(center, radius, start_angle, sweep, 1.0);
    (p - e0).norm().min((p - e1).norm())
}
