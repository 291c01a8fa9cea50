use std::ops::RangeInclusive;

use super::construct::{concave_u, convex_u, corner_box, l_corner, wing, ConstructFn};
use super::side_tag::SideTag::{self, L, LR, R};
use super::ShapeType;

/// Openings found on the body walls of a window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BodyOpenings {
    pub door: bool,
    pub sliding: bool,
}

impl BodyOpenings {
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            door: self.door || other.door,
            sliding: self.sliding || other.sliding,
        }
    }
}

/// What a rule demands of the openings on its body walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpeningFit {
    /// No door and no sliding opening; plain windows are fine.
    Plain,
    /// At least one sliding opening.
    Sliding,
    /// At least one door.
    Door,
}

impl OpeningFit {
    #[must_use]
    pub fn admits(self, found: BodyOpenings) -> bool {
        match self {
            Self::Plain => !found.door && !found.sliding,
            Self::Sliding => found.sliding,
            Self::Door => found.door,
        }
    }
}

/// One entry of the shape table: what a window must look like and how its
/// region is built.
pub struct ShapeRule {
    pub shape_type: ShapeType,
    /// Turn tag at the end of each window curve.
    pub pattern: &'static [SideTag],
    /// Minimum distance between parallel straight curves of the window.
    pub threshold: f64,
    /// Window curve pairs left out of the distance test.
    pub exempt: &'static [(usize, usize)],
    /// Window curves that bound the feature itself.
    pub body: RangeInclusive<usize>,
    pub openings: OpeningFit,
    pub construct: ConstructFn,
}

impl ShapeRule {
    #[must_use]
    pub fn len(&self) -> usize {
        self.pattern.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }
}

// U shapes share their connector walls with the rest of the room, so
// curves 0 and 4 are usually collinear.
const CONNECTORS: &[(usize, usize)] = &[(0, 4)];

static RULES: [ShapeRule; 8] = [
    ShapeRule {
        shape_type: ShapeType::ConcaveU,
        pattern: &[L, R, R, L, LR],
        threshold: 0.48,
        exempt: CONNECTORS,
        body: 1..=3,
        openings: OpeningFit::Plain,
        construct: concave_u,
    },
    ShapeRule {
        shape_type: ShapeType::ConvexU,
        pattern: &[R, R, R, R, LR],
        threshold: 0.48,
        exempt: CONNECTORS,
        body: 1..=3,
        openings: OpeningFit::Plain,
        construct: convex_u,
    },
    ShapeRule {
        shape_type: ShapeType::ConvexRightHalfU,
        pattern: &[R, R, L],
        threshold: 0.30,
        exempt: &[],
        body: 1..=2,
        openings: OpeningFit::Plain,
        construct: corner_box,
    },
    ShapeRule {
        shape_type: ShapeType::ConvexLeftHalfU,
        pattern: &[L, R, R],
        threshold: 0.30,
        exempt: &[],
        body: 1..=2,
        openings: OpeningFit::Plain,
        construct: corner_box,
    },
    ShapeRule {
        shape_type: ShapeType::ConvexL,
        pattern: &[R, L],
        threshold: 0.30,
        exempt: &[],
        body: 0..=1,
        openings: OpeningFit::Plain,
        construct: l_corner,
    },
    ShapeRule {
        shape_type: ShapeType::ConvexHallway,
        pattern: &[LR, R, R, LR],
        threshold: 0.60,
        exempt: &[],
        body: 1..=2,
        openings: OpeningFit::Plain,
        construct: corner_box,
    },
    ShapeRule {
        shape_type: ShapeType::ConvexBalcony,
        pattern: &[L, R, R, L],
        threshold: 0.48,
        exempt: &[],
        body: 1..=3,
        openings: OpeningFit::Sliding,
        construct: wing,
    },
    ShapeRule {
        shape_type: ShapeType::ConvexDoorHall,
        pattern: &[L, R, R, L],
        threshold: 0.48,
        exempt: &[],
        body: 1..=3,
        openings: OpeningFit::Door,
        construct: wing,
    },
];

/// Shape rules in precedence order, most specific first.
#[must_use]
pub fn shape_rules() -> &'static [ShapeRule] {
    &RULES
}
