use crate::config::KernelConfig;
use crate::error::{GeometryError, Result};
use crate::geometry::{Curve, Curve2d, Line2d, Loop, Polygon};
use crate::math::polygon_2d::{left_normal, right_normal, try_unit};
use crate::math::{Point2, Vector2};
use crate::operations::boolean::{boolean_execute, BooleanOp};

use super::opening::OpeningHostInfo;

/// Local frame of a passageway: the opening's midpoint on the wall, the wall
/// direction, the direction into the room and the clearance extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassagewayFrame {
    pub origin: Point2,
    /// Unit vector along the host wall, from overlap start to overlap end.
    pub along: Vector2,
    /// Unit vector pointing into the room.
    pub normal: Vector2,
    /// Clearance extent towards `-along`.
    pub extent_before: f64,
    /// Clearance extent towards `+along`.
    pub extent_after: f64,
    pub depth: f64,
}

impl PassagewayFrame {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.extent_before + self.extent_after
    }

    #[must_use]
    pub fn with_depth(self, depth: f64) -> Self {
        Self { depth, ..self }
    }

    /// Segment from the opening midpoint to the far end of the passageway.
    #[must_use]
    pub fn centerline(&self) -> Line2d {
        Line2d::new(self.origin, self.origin + self.normal * self.depth)
    }

    /// Clockwise clearance rectangle, or `None` when it has no extent.
    #[must_use]
    pub fn rectangle(&self, tol: f64) -> Option<Loop> {
        if self.depth <= tol || self.width() <= tol {
            return None;
        }
        let a = self.origin - self.along * self.extent_before;
        let b = self.origin + self.along * self.extent_after;
        let reach = self.normal * self.depth;
        Some(Loop::from_points(&[a, b, b + reach, a + reach]).oriented(true))
    }
}

/// Frame of the passageway in front of a resolved opening.
///
/// The depth is the distance along the interior normal to the nearest
/// boundary curve, capped at `search_depth`. Sliding openings, and openings
/// wider than `sliding_width_threshold`, get the shallow sliding depth and a
/// margin on both sides. Returns `None` for unresolved openings; the flag is
/// `true` for sliding-style clearances.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroVector`] if the host curve has no tangent at
/// the opening.
pub fn opening_frame(
    boundary: &Loop,
    clockwise: bool,
    info: &OpeningHostInfo,
    config: &KernelConfig,
) -> Result<Option<(PassagewayFrame, bool)>> {
    let (Some(index), Some(overlap)) = (info.host_curve_index, info.overlap) else {
        return Ok(None);
    };
    let Some(host) = boundary.curves().get(index) else {
        return Ok(None);
    };
    let settings = &config.passageway;
    let eps = config.tolerance.length_eps;

    let origin = overlap.midpoint();
    let tangent =
        try_unit(&host.tangent_at(host.param_at(&origin))).ok_or(GeometryError::ZeroVector)?;
    let normal = if clockwise {
        right_normal(&tangent)
    } else {
        left_normal(&tangent)
    };
    let chord = overlap.end() - overlap.start();
    let along = try_unit(&chord).unwrap_or(tangent);
    let width = chord.norm();

    let depth = ray_depth(boundary, &origin, &normal, settings.search_depth, eps);
    let sliding = info.sliding || width > settings.sliding_width_threshold;
    let frame = if sliding {
        let extent = 0.5 * width + settings.sliding_width_margin;
        PassagewayFrame {
            origin,
            along,
            normal,
            extent_before: extent,
            extent_after: extent,
            depth: depth.min(settings.sliding_depth),
        }
    } else {
        PassagewayFrame {
            origin,
            along,
            normal,
            extent_before: 0.5 * width,
            extent_after: 0.5 * width,
            depth,
        }
    };
    Ok(Some((frame, sliding)))
}

/// Distance from `origin` along `dir` to the first boundary curve, at most
/// `max_depth`. Hits within `eps` of the origin are the host wall itself.
#[must_use]
pub fn ray_depth(boundary: &Loop, origin: &Point2, dir: &Vector2, max_depth: f64, eps: f64) -> f64 {
    let ray = Curve::line(*origin, origin + dir * max_depth);
    boundary
        .curves()
        .iter()
        .flat_map(|curve| ray.intersections(curve, eps))
        .map(|hit| hit.t_self * max_depth)
        .filter(|d| *d > eps)
        .fold(max_depth, f64::min)
}

/// Clearance region of a frame: its rectangle clipped to the floor.
///
/// # Errors
///
/// Propagates boolean engine errors.
pub fn build_clearance(
    frame: &PassagewayFrame,
    floor: &Polygon,
    config: &KernelConfig,
) -> Result<Option<Polygon>> {
    let tol = &config.tolerance;
    let Some(rect) = frame.rectangle(tol.length_eps) else {
        return Ok(None);
    };
    Ok(boolean_execute(&Polygon::new(rect), floor, BooleanOp::Intersect, tol)?.into_largest())
}
