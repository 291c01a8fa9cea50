use tracing::{debug, instrument, warn};

use crate::config::ToleranceConfig;
use crate::error::Result;
use crate::geometry::{Curve, Loop, Polygon};
use crate::operations::passageway::{resolve_hosts, Opening, OpeningKind};

use super::construct::ConstructContext;
use super::post_check::post_check;
use super::registry::{shape_rules, BodyOpenings, ShapeRule};
use super::side_tag::{loop_tags, matches_pattern, SideTag};
use super::{FeatureCandidate, WindowClassification};

/// Classifies every window of a room boundary into a shape feature.
///
/// A window starts at each curve of the loop and wraps past the end. Rules
/// are tried in precedence order and the first one whose pattern matches,
/// whose post-check passes and whose region can be built wins. Failures are
/// contained to their window, which is then reported as unsupported.
///
/// Anticlockwise boundaries are classified walking clockwise; reported
/// curve indices always refer to the boundary as given.
///
/// Doors and sliding openings on a window's body walls decide between the
/// plain shapes, balconies and door halls.
pub struct ShapeClassifier<'a> {
    boundary: &'a Loop,
    openings: &'a [Opening],
    tolerance: ToleranceConfig,
}

impl<'a> ShapeClassifier<'a> {
    #[must_use]
    pub fn new(boundary: &'a Loop, tolerance: &ToleranceConfig) -> Self {
        Self {
            boundary,
            openings: &[],
            tolerance: *tolerance,
        }
    }

    #[must_use]
    pub fn with_openings(mut self, openings: &'a [Opening]) -> Self {
        self.openings = openings;
        self
    }

    /// Classifies all windows, one result per boundary curve.
    ///
    /// # Errors
    ///
    /// Returns a loop error if the boundary is empty or not closed.
    #[instrument(skip_all, fields(curves = self.boundary.len()))]
    pub fn classify(&self) -> Result<Vec<WindowClassification>> {
        self.boundary.ensure_closed(self.tolerance.length_eps)?;

        let reversed = self.boundary.is_anticlockwise();
        let walk = if reversed {
            self.boundary.reversed()
        } else {
            self.boundary.clone()
        };
        let n = walk.len();
        let input_index = |j: usize| if reversed { n - 1 - j } else { j };

        let floor = Polygon::new(walk.clone());
        let tags = loop_tags(walk.curves(), self.tolerance.angle_eps);
        let marks = self.opening_marks(&walk);

        let results = (0..n)
            .map(|start| {
                let classification =
                    self.classify_window(&walk, &floor, &tags, &marks, start, &input_index);
                if classification.is_unsupported() {
                    debug!(start = input_index(start), "window unsupported");
                }
                classification
            })
            .collect();
        Ok(results)
    }

    fn classify_window(
        &self,
        walk: &Loop,
        floor: &Polygon,
        tags: &[SideTag],
        marks: &[BodyOpenings],
        start: usize,
        input_index: &dyn Fn(usize) -> usize,
    ) -> WindowClassification {
        let n = walk.len();
        for rule in shape_rules() {
            if n < rule.len() || !matches_pattern(tags, start, rule.pattern) {
                continue;
            }
            let found = rule
                .body
                .clone()
                .filter_map(|k| marks.get((start + k) % n))
                .fold(BodyOpenings::default(), |acc, m| acc.merge(*m));
            if !rule.openings.admits(found) {
                continue;
            }
            let window: Vec<Curve> = (0..rule.len())
                .map(|k| *walk.curve_wrapped(start + k))
                .collect();
            if !post_check(&window, rule.threshold, rule.exempt, &self.tolerance) {
                debug!(start, shape = %rule.shape_type, "post-check rejected window");
                continue;
            }
            let indices = (0..rule.len()).map(|k| input_index((start + k) % n)).collect();
            match self.build(rule, window, floor, indices) {
                Ok(Some(classification)) => return classification,
                Ok(None) => debug!(start, shape = %rule.shape_type, "feature not constructible"),
                Err(e) => warn!(start, shape = %rule.shape_type, error = %e, "feature construction failed"),
            }
        }
        WindowClassification::Unsupported {
            start_index: input_index(start),
        }
    }

    /// Doors and sliding openings hosted by each curve of `walk`.
    fn opening_marks(&self, walk: &Loop) -> Vec<BodyOpenings> {
        let mut marks = vec![BodyOpenings::default(); walk.len()];
        for info in resolve_hosts(walk, self.openings, &self.tolerance) {
            let Some(mark) = info.host_curve_index.and_then(|i| marks.get_mut(i)) else {
                continue;
            };
            mark.door |= info.kind == OpeningKind::Door;
            mark.sliding |= info.sliding;
        }
        marks
    }

    fn build(
        &self,
        rule: &ShapeRule,
        window: Vec<Curve>,
        floor: &Polygon,
        curve_indices: Vec<usize>,
    ) -> Result<Option<WindowClassification>> {
        let ctx = ConstructContext {
            window: &window,
            floor,
            tolerance: &self.tolerance,
        };
        let Some(raw) = (rule.construct)(&ctx)? else {
            return Ok(None);
        };
        let feature = FeatureCandidate {
            shape_type: rule.shape_type,
            raw,
            source_curves: window,
            curve_indices,
        }
        .close_if_needed(self.tolerance.length_eps)?;
        Ok(Some(WindowClassification::Feature(feature)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::{FloorcutError, LoopError};
    use crate::geometry::{Aabb2, Curve2d};
    use crate::math::Point2;
    use crate::operations::shape::{Feature, ShapeType};

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn l_room() -> Loop {
        Loop::from_points(&[
            p(0.0, 0.0),
            p(0.0, 4.0),
            p(2.0, 4.0),
            p(2.0, 2.0),
            p(5.0, 2.0),
            p(5.0, 0.0),
        ])
    }

    #[test]
    fn one_result_per_curve() {
        let room = l_room();
        let out = ShapeClassifier::new(&room, &ToleranceConfig::default())
            .classify()
            .unwrap();
        assert_eq!(out.len(), room.len());
    }

    #[test]
    fn l_room_corner_is_right_half_u() {
        let room = l_room();
        let out = ShapeClassifier::new(&room, &ToleranceConfig::default())
            .classify()
            .unwrap();
        let feature = out[0].feature().unwrap();
        assert_eq!(feature.shape_type(), ShapeType::ConvexRightHalfU);
        assert_eq!(feature.curve_indices(), &[0, 1, 2]);
        assert_relative_eq!(feature.polygon().area(), 4.0, epsilon = 1e-9);
        assert!(!feature.polygon().outer().is_anticlockwise());
    }

    #[test]
    fn anticlockwise_input_keeps_input_indices() {
        let room = l_room();
        let reversed = room.reversed();
        let out = ShapeClassifier::new(&reversed, &ToleranceConfig::default())
            .classify()
            .unwrap();
        // Curve 0 of the clockwise walk is curve 5 of the reversed input.
        let feature = out[0].feature().unwrap();
        assert_eq!(feature.shape_type(), ShapeType::ConvexRightHalfU);
        assert_eq!(feature.curve_indices(), &[5, 4, 3]);
        assert!(out.iter().all(|w| match w {
            WindowClassification::Feature(f) => f.curve_indices().iter().all(|&i| i < 6),
            WindowClassification::Unsupported { start_index } => *start_index < 6,
        }));
    }

    #[test]
    fn rectangle_windows_are_hallways() {
        let room = Loop::from_points(&[p(0.0, 0.0), p(0.0, 3.0), p(4.0, 3.0), p(4.0, 0.0)]);
        let out = ShapeClassifier::new(&room, &ToleranceConfig::default())
            .classify()
            .unwrap();
        for w in &out {
            let f = w.feature().unwrap();
            assert_eq!(f.shape_type(), ShapeType::ConvexHallway);
            assert_relative_eq!(f.polygon().area(), 12.0, epsilon = 1e-9);
            assert!(f.source_curves().iter().all(|c| c.length() > 0.0));
        }
    }

    #[test]
    fn open_boundary_aborts() {
        let open = Loop::new(vec![Curve::line(p(0.0, 0.0), p(1.0, 0.0))]);
        let err = ShapeClassifier::new(&open, &ToleranceConfig::default())
            .classify()
            .unwrap_err();
        assert!(matches!(err, FloorcutError::Loop(LoopError::Malformed { .. })));
    }

    /// Clockwise room with a 2 x 1.5 niche in its straight bottom wall.
    fn straight_niche_room() -> Loop {
        Loop::from_points(&[
            p(6.0, 0.0),
            p(4.0, 0.0),
            p(4.0, -1.5),
            p(2.0, -1.5),
            p(2.0, 0.0),
            p(0.0, 0.0),
            p(0.0, 5.0),
            p(6.0, 5.0),
        ])
    }

    /// An opening in the back wall of the niche.
    fn niche_opening(kind: OpeningKind) -> Opening {
        let footprint = Polygon::new(Loop::rectangle(&Aabb2::from_corners(
            &p(2.6, -1.6),
            &p(3.4, -1.4),
        )));
        Opening::new("o", kind, footprint, 0.0, 2.1)
    }

    fn classify_with(room: &Loop, openings: &[Opening]) -> Vec<WindowClassification> {
        ShapeClassifier::new(room, &ToleranceConfig::default())
            .with_openings(openings)
            .classify()
            .unwrap()
    }

    fn first_feature(room: &Loop, openings: &[Opening]) -> Feature {
        classify_with(room, openings)[0].feature().unwrap().clone()
    }

    #[test]
    fn niche_in_a_straight_wall_is_concave_u() {
        let feature = first_feature(&straight_niche_room(), &[]);
        assert_eq!(feature.shape_type(), ShapeType::ConcaveU);
        assert_eq!(feature.curve_indices(), &[0, 1, 2, 3, 4]);
        assert_relative_eq!(feature.polygon().area(), 3.0, epsilon = 1e-9);
        let bbox = feature.polygon().bounding_box().unwrap();
        assert_relative_eq!(bbox.max.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn l_room_has_no_concave_u() {
        let out = classify_with(&l_room(), &[]);
        assert!(out
            .iter()
            .filter_map(WindowClassification::feature)
            .all(|f| f.shape_type() != ShapeType::ConcaveU));
    }

    #[test]
    fn room_end_is_convex_u() {
        let out = classify_with(&l_room(), &[]);
        // Walls 3..=1 wrap the wide end of the L; the base is the bottom wall.
        let wide = out[3].feature().unwrap();
        assert_eq!(wide.shape_type(), ShapeType::ConvexU);
        assert_eq!(wide.curve_indices(), &[3, 4, 5, 0, 1]);
        assert_relative_eq!(wide.polygon().area(), 10.0, epsilon = 1e-9);
        // Walls 4..=2: the base is the left wall, as deep as the top wall.
        let tall = out[4].feature().unwrap();
        assert_eq!(tall.shape_type(), ShapeType::ConvexU);
        assert_relative_eq!(tall.polygon().area(), 8.0, epsilon = 1e-9);
        assert!(!tall.polygon().outer().is_anticlockwise());
    }

    #[test]
    fn convex_corner_before_a_reflex_one_is_convex_l() {
        let out = classify_with(&l_room(), &[]);
        let feature = out[1].feature().unwrap();
        assert_eq!(feature.shape_type(), ShapeType::ConvexL);
        assert_eq!(feature.curve_indices(), &[1, 2]);
        assert_relative_eq!(feature.polygon().area(), 4.0, epsilon = 1e-9);
        let bbox = feature.polygon().bounding_box().unwrap();
        assert_relative_eq!(bbox.min.y, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn door_in_the_niche_makes_a_door_hall() {
        let feature = first_feature(&straight_niche_room(), &[niche_opening(OpeningKind::Door)]);
        assert_eq!(feature.shape_type(), ShapeType::ConvexDoorHall);
        assert_eq!(feature.curve_indices(), &[0, 1, 2, 3]);
        assert_relative_eq!(feature.polygon().area(), 3.0, epsilon = 1e-9);
    }

    #[test]
    fn sliding_door_in_the_niche_makes_a_balcony() {
        let opening = niche_opening(OpeningKind::Door).sliding();
        let feature = first_feature(&straight_niche_room(), &[opening]);
        assert_eq!(feature.shape_type(), ShapeType::ConvexBalcony);
        assert_relative_eq!(feature.polygon().area(), 3.0, epsilon = 1e-9);
    }

    #[test]
    fn plain_window_keeps_the_niche_concave() {
        let feature = first_feature(&straight_niche_room(), &[niche_opening(OpeningKind::Window)]);
        assert_eq!(feature.shape_type(), ShapeType::ConcaveU);
    }

    #[test]
    fn wing_without_openings_is_unsupported() {
        // The niche is too narrow for a U or a hallway; a bare wing is not a
        // feature either.
        let room = Loop::from_points(&[
            p(6.0, 0.0),
            p(4.0, 0.0),
            p(4.0, -1.5),
            p(3.8, -1.5),
            p(3.8, 0.0),
            p(0.0, 0.0),
            p(0.0, 5.0),
            p(6.0, 5.0),
        ]);
        let out = classify_with(&room, &[]);
        assert!(out[0].is_unsupported());
    }
}
