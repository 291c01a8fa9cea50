//! Shape feature classification of room boundaries.

mod classifier;
mod construct;
mod floorcutter;
mod post_check;
mod registry;
mod side_tag;

pub use classifier::ShapeClassifier;
pub use construct::{ConstructContext, ConstructFn};
pub use floorcutter::{FeatureHostInfo, FloorCut, FloorCutter, FloorResult};
pub use post_check::post_check;
pub use registry::{shape_rules, BodyOpenings, OpeningFit, ShapeRule};
pub use side_tag::{joint_tag, loop_tags, matches_pattern, SideTag};

use std::fmt;

use crate::error::Result;
use crate::geometry::{Curve, Loop, Polygon};
use crate::operations::close_curves::make_curves_closed;

/// Architectural shape kinds recognised by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeType {
    /// A niche pushed out of the room between two reflex corners.
    ConcaveU,
    /// A room end closed by three walls and two convex corners.
    ConvexU,
    /// Corner block with the reflex corner after the window.
    ConvexRightHalfU,
    /// Corner block with the reflex corner before the window.
    ConvexLeftHalfU,
    /// Block in a convex corner between two reflex ones.
    ConvexL,
    /// A strip between two convex corners.
    ConvexHallway,
    /// A wing between reflex corners with a sliding opening in it.
    ConvexBalcony,
    /// A wing between reflex corners with a door in it.
    ConvexDoorHall,
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ConcaveU => "ConcaveU",
            Self::ConvexU => "ConvexU",
            Self::ConvexRightHalfU => "ConvexRightHalfU",
            Self::ConvexLeftHalfU => "ConvexLeftHalfU",
            Self::ConvexL => "ConvexL",
            Self::ConvexHallway => "ConvexHallway",
            Self::ConvexBalcony => "ConvexBalcony",
            Self::ConvexDoorHall => "ConvexDoorHall",
        };
        f.write_str(name)
    }
}

/// A classified feature: its kind, its region and the curves it came from.
///
/// Built through [`FeatureCandidate::close_if_needed`]; immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    shape_type: ShapeType,
    polygon: Polygon,
    source_curves: Vec<Curve>,
    curve_indices: Vec<usize>,
}

impl Feature {
    #[must_use]
    pub fn shape_type(&self) -> ShapeType {
        self.shape_type
    }

    /// The feature's own region; its outer loop is closed and clockwise.
    #[must_use]
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    #[must_use]
    pub fn source_curves(&self) -> &[Curve] {
        &self.source_curves
    }

    /// Indices of the source curves in the classified boundary.
    #[must_use]
    pub fn curve_indices(&self) -> &[usize] {
        &self.curve_indices
    }
}

/// A constructed region that may still need closing.
#[derive(Debug, Clone)]
pub struct FeatureCandidate {
    pub shape_type: ShapeType,
    pub raw: Polygon,
    pub source_curves: Vec<Curve>,
    pub curve_indices: Vec<usize>,
}

impl FeatureCandidate {
    /// Second construction phase: closes the outer loop if needed and
    /// orients it clockwise.
    ///
    /// # Errors
    ///
    /// Returns a loop error if the outer loop cannot be closed.
    pub fn close_if_needed(self, tol: f64) -> Result<Feature> {
        let outer = self.raw.outer();
        let outer = if outer.is_closed(tol) {
            outer.clone()
        } else {
            Loop::new(make_curves_closed(outer.curves(), tol)?)
        };
        let holes = self.raw.holes().iter().map(|h| h.oriented(false)).collect();
        Ok(Feature {
            shape_type: self.shape_type,
            polygon: Polygon::with_holes(outer.oriented(true), holes),
            source_curves: self.source_curves,
            curve_indices: self.curve_indices,
        })
    }
}

/// Outcome for one boundary window.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowClassification {
    Feature(Feature),
    /// No shape matched the window starting at this curve.
    Unsupported { start_index: usize },
}

impl WindowClassification {
    #[must_use]
    pub fn feature(&self) -> Option<&Feature> {
        match self {
            Self::Feature(f) => Some(f),
            Self::Unsupported { .. } => None,
        }
    }

    #[must_use]
    pub fn into_feature(self) -> Option<Feature> {
        match self {
            Self::Feature(f) => Some(f),
            Self::Unsupported { .. } => None,
        }
    }

    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;

    #[test]
    fn candidate_is_closed_and_oriented() {
        let open = Loop::new(vec![
            Curve::line(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)),
            Curve::line(Point2::new(1.0, 0.0), Point2::new(1.0, 1.0)),
        ]);
        let candidate = FeatureCandidate {
            shape_type: ShapeType::ConvexHallway,
            raw: Polygon::new(open),
            source_curves: Vec::new(),
            curve_indices: Vec::new(),
        };
        let feature = candidate.close_if_needed(1e-3).unwrap();
        let outer = feature.polygon().outer();
        assert!(outer.is_closed(1e-3));
        assert!(!outer.is_anticlockwise());
        assert_eq!(outer.len(), 3);
    }

    #[test]
    fn display_names() {
        assert_eq!(ShapeType::ConcaveU.to_string(), "ConcaveU");
        assert_eq!(ShapeType::ConvexDoorHall.to_string(), "ConvexDoorHall");
    }
}
