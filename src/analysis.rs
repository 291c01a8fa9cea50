//! Whole-room analysis: one call from raw boundary curves to shape features
//! and passageways.

use tracing::{debug, instrument};

use crate::config::KernelConfig;
use crate::error::Result;
use crate::geometry::{Curve, Line2d, Loop};
use crate::operations::close_curves::make_curves_closed;
use crate::operations::passageway::{
    Opening, OpeningHostInfo, PassagewayExtractor, PassagewayInfo,
};
use crate::operations::shape::{Feature, ShapeClassifier, WindowClassification};

/// Everything derived from one room.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomReport {
    /// The boundary after closing; window and host indices refer to it.
    pub boundary: Loop,
    /// One classification per boundary curve.
    pub windows: Vec<WindowClassification>,
    pub openings: Vec<OpeningHostInfo>,
    pub passageways: Vec<PassagewayInfo>,
}

impl RoomReport {
    /// The accepted features, in window order.
    pub fn features(&self) -> impl Iterator<Item = &Feature> {
        self.windows.iter().filter_map(WindowClassification::feature)
    }
}

/// Analyses one room: closes its boundary, classifies every window and
/// extracts the passageways of its openings.
///
/// Inputs are only read; the report holds fresh values.
pub struct RoomAnalysis<'a> {
    boundary: &'a [Curve],
    openings: &'a [Opening],
    incisions: &'a [Line2d],
    config: KernelConfig,
}

impl<'a> RoomAnalysis<'a> {
    #[must_use]
    pub fn new(boundary: &'a [Curve], config: &KernelConfig) -> Self {
        Self {
            boundary,
            openings: &[],
            incisions: &[],
            config: *config,
        }
    }

    #[must_use]
    pub fn with_openings(mut self, openings: &'a [Opening]) -> Self {
        self.openings = openings;
        self
    }

    #[must_use]
    pub fn with_incisions(mut self, incisions: &'a [Line2d]) -> Self {
        self.incisions = incisions;
        self
    }

    /// Executes the analysis.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::LoopError::Malformed`] (with the offending
    /// curve indices) or [`crate::error::LoopError::Empty`] if the boundary
    /// cannot be closed. Problems confined to one window or one opening are
    /// logged and reported in the result instead.
    #[instrument(skip_all, fields(curves = self.boundary.len(), openings = self.openings.len()))]
    pub fn execute(&self) -> Result<RoomReport> {
        let tol = &self.config.tolerance;
        let boundary = Loop::new(make_curves_closed(self.boundary, tol.length_eps)?);
        if boundary.len() != self.boundary.len() {
            debug!(added = boundary.len() - self.boundary.len(), "boundary closed with connectors");
        }

        let windows = ShapeClassifier::new(&boundary, tol)
            .with_openings(self.openings)
            .classify()?;
        let extraction = PassagewayExtractor::new(&boundary, self.openings, &self.config)
            .with_incisions(self.incisions)
            .execute()?;

        Ok(RoomReport {
            boundary,
            windows,
            openings: extraction.hosts,
            passageways: extraction.passageways,
        })
    }
}
