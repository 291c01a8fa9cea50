use std::f64::consts::FRAC_PI_2;

use crate::error::{GeometryError, Result};
use crate::geometry::bbox::Aabb2;
use crate::math::arc_2d::{
    angle_to_arc_param, arc_area_term, arc_point_at, arc_subdivision_count, arc_tangent_at,
    sweep_between,
};
use crate::math::{Point2, Vector2, LENGTH_EPS, TOLERANCE};

use super::Curve2d;

/// A circular arc between two end points.
///
/// The arc runs from `start` to `end` around `center`, clockwise or
/// counter-clockwise. Angles and sweep are derived from the end points, so
/// `point_at(0.0)` and `point_at(1.0)` return the stored end points exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc2d {
    start: Point2,
    end: Point2,
    center: Point2,
    radius: f64,
    clockwise: bool,
}

impl Arc2d {
    /// Creates an arc from its end points, center and direction.
    ///
    /// Coincident end points describe a full circle.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if the radius is zero or the end
    /// point is not on the circle through `start`.
    pub fn new(start: Point2, end: Point2, center: Point2, clockwise: bool) -> Result<Self> {
        let radius = (start - center).norm();
        if radius < TOLERANCE {
            return Err(GeometryError::Degenerate("arc radius must be positive".into()).into());
        }
        let end_radius = (end - center).norm();
        if (end_radius - radius).abs() > LENGTH_EPS.max(radius * 1e-6) {
            return Err(GeometryError::Degenerate(format!(
                "arc end is off the circle: radius {radius}, end radius {end_radius}"
            ))
            .into());
        }
        Ok(Self {
            start,
            end,
            center,
            radius,
            clockwise,
        })
    }

    /// Creates an arc from a center, radius, start angle and signed sweep
    /// (negative sweep runs clockwise).
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] for a non-positive radius or a
    /// zero sweep.
    pub fn from_angles(center: Point2, radius: f64, start_angle: f64, sweep: f64) -> Result<Self> {
        if radius < TOLERANCE || sweep.abs() < TOLERANCE {
            return Err(GeometryError::Degenerate("arc needs a radius and a sweep".into()).into());
        }
        Ok(Self {
            start: arc_point_at(&center, radius, start_angle, sweep, 0.0),
            end: arc_point_at(&center, radius, start_angle, sweep, 1.0),
            center,
            radius,
            clockwise: sweep < 0.0,
        })
    }

    #[must_use]
    pub fn center(&self) -> Point2 {
        self.center
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[must_use]
    pub fn is_clockwise(&self) -> bool {
        self.clockwise
    }

    #[must_use]
    pub fn start_angle(&self) -> f64 {
        let d = self.start - self.center;
        d.y.atan2(d.x)
    }

    #[must_use]
    pub fn end_angle(&self) -> f64 {
        let d = self.end - self.center;
        d.y.atan2(d.x)
    }

    /// Signed sweep: positive counter-clockwise, negative clockwise.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        sweep_between(self.start_angle(), self.end_angle(), self.clockwise)
    }

    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
            center: self.center,
            radius: self.radius,
            clockwise: !self.clockwise,
        }
    }

    #[must_use]
    pub fn translated(&self, offset: &Vector2) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
            center: self.center + offset,
            radius: self.radius,
            clockwise: self.clockwise,
        }
    }

    /// Uniform scale about `origin`; a positive `factor` keeps the direction.
    #[must_use]
    pub fn scaled_about(&self, origin: &Point2, factor: f64) -> Self {
        Self {
            start: origin + (self.start - origin) * factor,
            end: origin + (self.end - origin) * factor,
            center: origin + (self.center - origin) * factor,
            radius: self.radius * factor.abs(),
            clockwise: self.clockwise,
        }
    }

    /// The piece of this arc between `t0` and `t1`.
    ///
    /// When `t1 < t0` the piece runs backwards along the arc.
    #[must_use]
    pub fn sub_arc(&self, t0: f64, t1: f64) -> Self {
        Self {
            start: self.point_at(t0),
            end: self.point_at(t1),
            center: self.center,
            radius: self.radius,
            clockwise: if t1 >= t0 {
                self.clockwise
            } else {
                !self.clockwise
            },
        }
    }

    /// Contribution of this arc to the loop area integral.
    #[must_use]
    pub fn area_term(&self) -> f64 {
        arc_area_term(&self.center, self.radius, self.start_angle(), self.sweep())
    }

    /// Points along the arc within `chord_tolerance`, start included, end excluded.
    #[must_use]
    pub fn flatten(&self, chord_tolerance: f64) -> Vec<Point2> {
        let sweep = self.sweep();
        let n = arc_subdivision_count(self.radius, sweep.abs(), chord_tolerance).max(2);
        let start_angle = self.start_angle();
        (0..n)
            .map(|i| {
                let t = f64::from(i) / f64::from(n);
                if i == 0 {
                    self.start
                } else {
                    arc_point_at(&self.center, self.radius, start_angle, sweep, t)
                }
            })
            .collect()
    }

    /// Arc parameter of an absolute angle, `None` outside the arc's range.
    #[must_use]
    pub fn param_of_angle(&self, angle: f64) -> Option<f64> {
        angle_to_arc_param(angle, self.start_angle(), self.sweep())
    }
}

impl Curve2d for Arc2d {
    fn start(&self) -> Point2 {
        self.start
    }

    fn end(&self) -> Point2 {
        self.end
    }

    fn length(&self) -> f64 {
        self.radius * self.sweep().abs()
    }

    fn point_at(&self, t: f64) -> Point2 {
        if t <= 0.0 {
            return self.start;
        }
        if t >= 1.0 {
            return self.end;
        }
        arc_point_at(&self.center, self.radius, self.start_angle(), self.sweep(), t)
    }

    fn tangent_at(&self, t: f64) -> Vector2 {
        arc_tangent_at(self.start_angle(), self.sweep(), t.clamp(0.0, 1.0))
    }

    fn param_at(&self, p: &Point2) -> f64 {
        let d = p - self.center;
        if d.norm() < TOLERANCE {
            return 0.0;
        }
        if let Some(t) = self.param_of_angle(d.y.atan2(d.x)) {
            return t;
        }
        if (p - self.start).norm() <= (p - self.end).norm() {
            0.0
        } else {
            1.0
        }
    }

    fn closest_point(&self, p: &Point2) -> Point2 {
        self.point_at(self.param_at(p))
    }

    fn bounding_box(&self) -> Aabb2 {
        let mut bbox = Aabb2::from_corners(&self.start, &self.end);
        for k in 0..4 {
            let angle = f64::from(k) * FRAC_PI_2;
            if self.param_of_angle(angle).is_some() {
                bbox.include(&Point2::new(
                    self.center.x + self.radius * angle.cos(),
                    self.center.y + self.radius * angle.sin(),
                ));
            }
        }
        bbox
    }
}
