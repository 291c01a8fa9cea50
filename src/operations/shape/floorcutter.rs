use tracing::{debug, instrument};

use crate::config::{KernelConfig, ToleranceConfig};
use crate::error::Result;
use crate::geometry::{Curve, Curve2d, Loop, Polygon};
use crate::operations::boolean::{boolean_execute, BooleanOp};
use crate::operations::passageway::{host_overlap, Opening, PositionParams};

use super::{Feature, ShapeClassifier, ShapeType, WindowClassification};

/// Where a cut feature meets a floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureHostInfo {
    pub shape_type: ShapeType,
    /// Position of the cut in cutting order.
    pub cut_index: usize,
    pub host_curve_index: usize,
    pub params: PositionParams,
    /// The stretch of the host curve shared with the feature.
    pub overlap: Curve,
    pub host_length: f64,
}

impl FeatureHostInfo {
    fn locate(
        feature: &Feature,
        cut_index: usize,
        floor: &Loop,
        min_overlap: f64,
        tol: &ToleranceConfig,
    ) -> Option<Self> {
        let hit = host_overlap(floor, feature.polygon(), tol)?;
        if hit.overlap.length() <= min_overlap {
            return None;
        }
        Some(Self {
            shape_type: feature.shape_type(),
            cut_index,
            host_curve_index: hit.curve_index,
            params: hit.params,
            overlap: hit.overlap,
            host_length: hit.host_length,
        })
    }
}

/// One accepted cut: the feature removed and the floor left after it.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorCut {
    pub feature: Feature,
    pub remaining: Polygon,
    /// Where the feature meets `remaining`; `None` when they share no more
    /// than `min_overlap_length`, in which case the cut is not reported.
    pub host: Option<FeatureHostInfo>,
}

/// A floor left by the cutter with the features still standing against it.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorResult {
    pub floor: Loop,
    pub features: Vec<FeatureHostInfo>,
}

/// Repeatedly classifies a floor and cuts accepted features off it.
///
/// A feature overlapping a forbidden area is not cut; its region becomes
/// forbidden as well. A cut is accepted only if the floor left keeps more
/// than `area_threshold_ratio` of the original area. The floor is
/// reclassified after every cut.
///
/// As a region divider both checks are off and the floor is cut until it
/// gets too simple or nothing more can be built.
pub struct FloorCutter {
    boundary: Loop,
    forbidden: Vec<Polygon>,
    openings: Vec<Opening>,
    divide: bool,
    config: KernelConfig,
}

impl FloorCutter {
    /// Creates a new `FloorCutter`.
    ///
    /// Forbidden areas are shrunk by `forbidden_area_scale` about the centre
    /// of their bounding box so that regions merely touching them stay legal.
    #[must_use]
    pub fn new(boundary: &Loop, forbidden: &[Polygon], config: &KernelConfig) -> Self {
        let scale = config.floor_cutter.forbidden_area_scale;
        let forbidden = forbidden
            .iter()
            .map(|f| match f.bounding_box() {
                Some(bbox) => f.scaled_about(&bbox.center(), scale),
                None => f.clone(),
            })
            .collect();
        Self {
            boundary: boundary.oriented(true),
            forbidden,
            openings: Vec::new(),
            divide: false,
            config: *config,
        }
    }

    /// Openings in the room, used to tell balconies and door halls apart.
    #[must_use]
    pub fn with_openings(mut self, openings: &[Opening]) -> Self {
        self.openings = openings.to_vec();
        self
    }

    /// Turns off the forbidden-area and remaining-area checks.
    #[must_use]
    pub fn as_region_divider(mut self) -> Self {
        self.divide = true;
        self
    }

    /// Executes the cutter, returning the accepted cuts in order.
    ///
    /// # Errors
    ///
    /// Returns a loop error if the boundary is not closed, or a boolean error
    /// if the floor itself becomes degenerate.
    #[instrument(skip_all, fields(curves = self.boundary.len(), divide = self.divide))]
    pub fn execute(&self) -> Result<Vec<FloorCut>> {
        let settings = &self.config.floor_cutter;
        let tol = &self.config.tolerance;
        self.boundary.ensure_closed(tol.length_eps)?;

        let original_area = self.boundary.area();
        let mut current = Polygon::new(self.boundary.clone());
        let mut forbidden = self.forbidden.clone();
        let mut cuts: Vec<FloorCut> = Vec::new();

        for iteration in 0..settings.max_iterations {
            if current.curve_count() < settings.min_curve_count {
                debug!(iteration, curves = current.curve_count(), "floor too simple to cut");
                break;
            }

            let windows = ShapeClassifier::new(current.outer(), tol)
                .with_openings(&self.openings)
                .classify()?;
            let mut cut = None;
            for feature in windows
                .into_iter()
                .filter_map(WindowClassification::into_feature)
            {
                if !self.divide && overlaps_any(feature.polygon(), &forbidden, &self.config)? {
                    debug!(shape = %feature.shape_type(), "feature overlaps a forbidden area");
                    forbidden.push(feature.polygon().clone());
                    continue;
                }
                let Some(remaining) =
                    boolean_execute(&current, feature.polygon(), BooleanOp::Difference, tol)?
                        .into_largest()
                else {
                    continue;
                };
                if !self.divide
                    && remaining.net_area() <= settings.area_threshold_ratio * original_area
                {
                    debug!(shape = %feature.shape_type(), "cut would leave too little floor");
                    break;
                }
                let host = FeatureHostInfo::locate(
                    &feature,
                    cuts.len(),
                    remaining.outer(),
                    settings.min_overlap_length,
                    tol,
                );
                cut = Some(FloorCut {
                    feature,
                    remaining,
                    host,
                });
                break;
            }

            let Some(cut) = cut else {
                debug!(iteration, "nothing left to cut");
                break;
            };
            debug!(iteration, shape = %cut.feature.shape_type(), reported = cut.host.is_some(), "feature cut");
            current = cut.remaining.clone();
            cuts.push(cut);
        }

        Ok(cuts)
    }

    /// Executes the cutter and groups the reported cuts per floor.
    ///
    /// Reported cuts are sorted by host curve, position along it and cutting
    /// order. Result `i` holds the floor left by the `i`-th sorted cut,
    /// together with those of the first `i + 1` sorted cuts that still share
    /// a wall with it.
    ///
    /// # Errors
    ///
    /// See [`FloorCutter::execute`].
    pub fn results(&self) -> Result<Vec<FloorResult>> {
        let cuts = self.execute()?;
        Ok(floor_results(&cuts, &self.config))
    }
}

fn floor_results(cuts: &[FloorCut], config: &KernelConfig) -> Vec<FloorResult> {
    let mut reported: Vec<(&FloorCut, FeatureHostInfo)> = cuts
        .iter()
        .filter_map(|cut| cut.host.map(|host| (cut, host)))
        .collect();
    reported.sort_by(|(_, a), (_, b)| {
        a.host_curve_index
            .cmp(&b.host_curve_index)
            .then(a.params.center.total_cmp(&b.params.center))
            .then(a.cut_index.cmp(&b.cut_index))
    });

    let mut results = Vec::with_capacity(reported.len());
    for end in 1..=reported.len() {
        let prefix = &reported[..end];
        let Some((last, _)) = prefix.last() else {
            continue;
        };
        let floor = last.remaining.outer();
        results.push(FloorResult {
            floor: floor.clone(),
            features: adjacent_features(prefix, floor, config),
        });
    }
    results
}

/// Keeps the features that share a wall with `floor`, re-located on it.
///
/// A feature whose shared stretch with `floor` is too short keeps the host
/// info it got when it was cut.
fn adjacent_features(
    prefix: &[(&FloorCut, FeatureHostInfo)],
    floor: &Loop,
    config: &KernelConfig,
) -> Vec<FeatureHostInfo> {
    if prefix.len() < 2 {
        return prefix.iter().map(|(_, host)| *host).collect();
    }
    let tol = &config.tolerance;
    let min_overlap = config.floor_cutter.min_overlap_length;
    prefix
        .iter()
        .filter(|(cut, _)| host_overlap(floor, cut.feature.polygon(), tol).is_some())
        .map(|(cut, host)| {
            FeatureHostInfo::locate(&cut.feature, host.cut_index, floor, min_overlap, tol)
                .unwrap_or(*host)
        })
        .collect()
}

fn overlaps_any(region: &Polygon, forbidden: &[Polygon], config: &KernelConfig) -> Result<bool> {
    let tol = &config.tolerance;
    for area in forbidden {
        let overlap = boolean_execute(region, area, BooleanOp::Intersect, tol)?;
        if overlap.total_area() > tol.min_area {
            return Ok(true);
        }
    }
    Ok(false)
}
