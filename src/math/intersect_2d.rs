use super::arc_2d::angle_to_arc_param;
use super::{cross, Point2, Vector2, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let denom = cross(d1, d2);
    if denom.abs() < TOLERANCE {
        return None;
    }
    let delta = p2 - p1;
    let t = cross(&delta, d2) / denom;
    let u = cross(&delta, d1) / denom;
    Some((t, u))
}

/// Bounded segment-segment intersection in 2D.
///
/// `eps_a` / `eps_b` are parameter-space slacks for the two segments, so that
/// touching endpoints count as hits. Returns `(point, t, u)` with both
/// parameters clamped to `[0, 1]`. Parallel segments never intersect here;
/// collinear overlap is handled by the caller.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
    eps_a: f64,
    eps_b: f64,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;
    let (t, u) = line_line_intersect_2d(a0, &da, b0, &db)?;

    if t >= -eps_a && t <= 1.0 + eps_a && u >= -eps_b && u <= 1.0 + eps_b {
        let t = t.clamp(0.0, 1.0);
        Some((a0 + da * t, t, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}

/// Intersection of a line segment with a circular arc in 2D.
///
/// Returns `(point, t_seg, t_arc)` for each hit, with both parameters in `[0, 1]`.
#[must_use]
pub fn line_arc_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    eps_seg: f64,
    center: &Point2,
    radius: f64,
    start_angle: f64,
    sweep: f64,
) -> Vec<(Point2, f64, f64)> {
    let mut results = Vec::new();
    if radius < TOLERANCE || sweep.abs() < TOLERANCE {
        return results;
    }

    let d = a1 - a0;
    let a = d.norm_squared();
    if a < TOLERANCE * TOLERANCE {
        return results;
    }

    // |a0 + t·d - c|² = r²
    let f = a0 - center;
    let b = 2.0 * f.dot(&d);
    let c = f.norm_squared() - radius * radius;
    let discriminant = b * b - 4.0 * a * c;

    // Relative slack so near-tangent lines still register as one hit.
    let disc_eps = 1e-9 * b.abs().max(a).max(1.0).powi(2);
    if discriminant < -disc_eps {
        return results;
    }
    let disc_sqrt = discriminant.max(0.0).sqrt();

    let t_roots = if disc_sqrt < 1e-7 * b.abs().max(a).max(1.0) {
        vec![-b / (2.0 * a)]
    } else {
        vec![(-b - disc_sqrt) / (2.0 * a), (-b + disc_sqrt) / (2.0 * a)]
    };

    for t_seg in t_roots {
        if t_seg < -eps_seg || t_seg > 1.0 + eps_seg {
            continue;
        }
        let t_seg = t_seg.clamp(0.0, 1.0);
        let p = a0 + d * t_seg;
        let angle = (p.y - center.y).atan2(p.x - center.x);
        if let Some(t_arc) = angle_to_arc_param(angle, start_angle, sweep) {
            results.push((p, t_seg, t_arc));
        }
    }

    results
}

/// Intersection of two circular arcs in 2D.
///
/// Returns `(point, t1, t2)` where `t1` and `t2` are arc parameters in `[0, 1]`.
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn arc_arc_intersect_2d(
    c1: &Point2,
    r1: f64,
    start1: f64,
    sweep1: f64,
    c2: &Point2,
    r2: f64,
    start2: f64,
    sweep2: f64,
) -> Vec<(Point2, f64, f64)> {
    let mut results = Vec::new();
    if r1 < TOLERANCE || r2 < TOLERANCE {
        return results;
    }

    let delta = c2 - c1;
    let dist_sq = delta.norm_squared();
    let dist = dist_sq.sqrt();

    if dist < TOLERANCE {
        // Concentric: no isolated intersection points.
        return results;
    }

    let eps = 1e-9 * (r1 + r2);
    if dist > r1 + r2 + eps || dist < (r1 - r2).abs() - eps {
        return results;
    }

    // Distance from c1 along c1→c2 to the radical line.
    let a = (r1 * r1 - r2 * r2 + dist_sq) / (2.0 * dist);
    let h = (r1 * r1 - a * a).max(0.0).sqrt();

    let axis = delta / dist;
    let mid = c1 + axis * a;
    let perp = Vector2::new(-axis.y, axis.x);

    let candidates = if h < 1e-9 * r1.max(1.0) {
        vec![mid]
    } else {
        vec![mid + perp * h, mid - perp * h]
    };

    for p in candidates {
        let angle1 = (p.y - c1.y).atan2(p.x - c1.x);
        let angle2 = (p.y - c2.y).atan2(p.x - c2.x);
        if let (Some(t1), Some(t2)) = (
            angle_to_arc_param(angle1, start1, sweep1),
            angle_to_arc_param(angle2, start2, sweep2),
        ) {
            results.push((p, t1, t2));
        }
    }

    results
}
