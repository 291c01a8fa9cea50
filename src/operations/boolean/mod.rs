//! Boolean operations on loop-bounded regions.
//!
//! The pipeline follows the classic boundary-evaluation scheme: split both
//! boundaries at their mutual intersections, classify each fragment against
//! the other region, select fragments per operation, then chain the
//! survivors back into loops.

mod assemble;
mod classify;
mod engine;
mod merge;
mod select;
mod split;
mod subdivide;

pub use classify::FragmentClass;
pub use engine::boolean_execute;
pub use merge::merge_collinear_lines;
pub use select::{BooleanOp, KeepDecision};

use crate::config::ToleranceConfig;
use crate::error::Result;
use crate::geometry::Polygon;

/// Result of a boolean operation.
///
/// "No overlap" is a valid geometric answer and is represented by
/// [`BooleanOutcome::Empty`], never by an error.
#[derive(Debug, Clone, PartialEq)]
pub enum BooleanOutcome {
    Empty,
    /// Non-empty regions, largest first.
    Regions(Vec<Polygon>),
}

impl BooleanOutcome {
    #[must_use]
    pub fn from_regions(regions: Vec<Polygon>) -> Self {
        if regions.is_empty() {
            Self::Empty
        } else {
            Self::Regions(regions)
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    #[must_use]
    pub fn regions(&self) -> &[Polygon] {
        match self {
            Self::Empty => &[],
            Self::Regions(r) => r,
        }
    }

    #[must_use]
    pub fn into_regions(self) -> Vec<Polygon> {
        match self {
            Self::Empty => Vec::new(),
            Self::Regions(r) => r,
        }
    }

    #[must_use]
    pub fn largest(&self) -> Option<&Polygon> {
        self.regions()
            .iter()
            .max_by(|a, b| a.net_area().total_cmp(&b.net_area()))
    }

    #[must_use]
    pub fn into_largest(self) -> Option<Polygon> {
        self.into_regions()
            .into_iter()
            .max_by(|a, b| a.net_area().total_cmp(&b.net_area()))
    }

    /// Sum of the net areas of all regions.
    #[must_use]
    pub fn total_area(&self) -> f64 {
        self.regions().iter().map(Polygon::net_area).sum()
    }
}

/// Parameters of [`Polygon::cut`].
#[derive(Debug, Clone, Copy)]
pub struct CutConfig<'a> {
    pub op: BooleanOp,
    /// Regions combined with the base, one after another.
    pub targets: &'a [Polygon],
    pub tolerance: ToleranceConfig,
}

impl<'a> CutConfig<'a> {
    /// Creates a cut configuration with default tolerances.
    #[must_use]
    pub fn new(op: BooleanOp, targets: &'a [Polygon]) -> Self {
        Self {
            op,
            targets,
            tolerance: ToleranceConfig::default(),
        }
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: ToleranceConfig) -> Self {
        self.tolerance = tolerance;
        self
    }
}

impl Polygon {
    /// Combines this region with every target in turn.
    ///
    /// With no targets, union and both differences return this region
    /// unchanged and intersection returns [`BooleanOutcome::Empty`].
    ///
    /// # Errors
    ///
    /// Propagates [`boolean_execute`] errors.
    pub fn cut(&self, config: &CutConfig<'_>) -> Result<BooleanOutcome> {
        let tol = &config.tolerance;
        if config.targets.is_empty() && config.op == BooleanOp::Intersect {
            return Ok(BooleanOutcome::Empty);
        }

        let mut regions = vec![self.clone()];
        for target in config.targets {
            regions = match config.op {
                BooleanOp::Union => union_into(regions, target, tol)?,
                op => {
                    let mut next = Vec::new();
                    for region in &regions {
                        next.extend(boolean_execute(region, target, op, tol)?.into_regions());
                    }
                    next
                }
            };
            if regions.is_empty() {
                break;
            }
        }
        regions.sort_by(|a, b| b.area().total_cmp(&a.area()));
        Ok(BooleanOutcome::from_regions(regions))
    }
}

/// Unions `target` into a set of disjoint regions, absorbing every region it
/// touches.
fn union_into(regions: Vec<Polygon>, target: &Polygon, tol: &ToleranceConfig) -> Result<Vec<Polygon>> {
    let mut merged = target.clone();
    let mut separate = Vec::new();
    for region in regions {
        match boolean_execute(&region, &merged, BooleanOp::Union, tol)? {
            BooleanOutcome::Regions(mut r) if r.len() == 1 => {
                if let Some(joined) = r.pop() {
                    merged = joined;
                }
            }
            _ => separate.push(region),
        }
    }
    separate.push(merged);
    Ok(separate)
}
