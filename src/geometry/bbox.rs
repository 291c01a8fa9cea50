use crate::math::Point2;

/// An axis-aligned bounding box in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb2 {
    /// Minimum corner of the bounding box.
    pub min: Point2,
    /// Maximum corner of the bounding box.
    pub max: Point2,
}

impl Aabb2 {
    /// Creates a box from two opposite corners in any order.
    #[must_use]
    pub fn from_corners(a: &Point2, b: &Point2) -> Self {
        Self {
            min: Point2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Smallest box containing all `points`; `None` when empty.
    #[must_use]
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point2>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bbox = Self {
            min: *first,
            max: *first,
        };
        for p in iter {
            bbox.include(p);
        }
        Some(bbox)
    }

    /// Grows the box to contain `p`.
    pub fn include(&mut self, p: &Point2) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Smallest box containing both boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut out = *self;
        out.include(&other.min);
        out.include(&other.max);
        out
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    #[must_use]
    pub fn center(&self) -> Point2 {
        Point2::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }

    /// Returns `true` if the boxes overlap or touch within `tol`.
    #[must_use]
    pub fn overlaps(&self, other: &Self, tol: f64) -> bool {
        self.min.x <= other.max.x + tol
            && other.min.x <= self.max.x + tol
            && self.min.y <= other.max.y + tol
            && other.min.y <= self.max.y + tol
    }

    /// Corners in clockwise order starting at the minimum corner.
    #[must_use]
    pub fn corners_clockwise(&self) -> [Point2; 4] {
        [
            self.min,
            Point2::new(self.min.x, self.max.y),
            self.max,
            Point2::new(self.max.x, self.min.y),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_and_area() {
        let pts = [
            Point2::new(1.0, 2.0),
            Point2::new(-1.0, 0.5),
            Point2::new(3.0, -1.0),
        ];
        let Some(bbox) = Aabb2::from_points(&pts) else {
            panic!("non-empty input");
        };
        assert!((bbox.width() - 4.0).abs() < 1e-12);
        assert!((bbox.height() - 3.0).abs() < 1e-12);
        assert!((bbox.area() - 12.0).abs() < 1e-12);
        assert!(Aabb2::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn overlap_with_tolerance() {
        let a = Aabb2::from_corners(&Point2::new(0.0, 0.0), &Point2::new(1.0, 1.0));
        let b = Aabb2::from_corners(&Point2::new(1.0005, 0.0), &Point2::new(2.0, 1.0));
        assert!(!a.overlaps(&b, 0.0));
        assert!(a.overlaps(&b, 1e-3));
    }

    #[test]
    fn corners_are_clockwise() {
        let bbox = Aabb2::from_corners(&Point2::new(2.0, 3.0), &Point2::new(0.0, 0.0));
        let area = crate::math::polygon_2d::signed_area_2d(&bbox.corners_clockwise());
        assert!((area + 6.0).abs() < 1e-12);
    }
}
