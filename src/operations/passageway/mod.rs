//! Openings on the room boundary and the passageways in front of them.
//!
//! Each opening is first placed on its host curve. Resolved openings that
//! can be walked through then get a clearance region reaching into the room
//! and a centerline. Overlapping clearances on one wall are merged, crossing
//! passageways are cut off in favour of the nearer opening, and hinged
//! passageways can be widened up to caller-supplied incision lines.

mod clearance;
mod cutoff;
mod host;
mod incision;
mod opening;

pub use clearance::{build_clearance, opening_frame, ray_depth, PassagewayFrame};
pub use cutoff::{clearances_overlap, crossing_point};
pub use host::{host_overlap, resolve_hosts, HostOverlap};
pub use incision::{expanded_frame, passageways_crossed_by};
pub use opening::{Opening, OpeningHostInfo, OpeningKind, PositionParams};

use slotmap::SlotMap;
use tracing::{debug, instrument, warn};

use crate::config::KernelConfig;
use crate::error::Result;
use crate::geometry::{Line2d, Loop, Polygon};
use crate::math::Point2;

slotmap::new_key_type! {
    /// Key of a passageway record during extraction.
    pub struct PassagewayId;
}

/// How a passageway ended up after the merge and cutoff passes.
#[derive(Debug, Clone, PartialEq)]
pub enum PassagewayStatus {
    Computed,
    /// Folded into the passageway of the named opening.
    Merged { into: String },
    /// Shortened to end where it crossed a nearer passageway.
    CutOff { at: Point2 },
}

/// A passageway in front of one opening.
#[derive(Debug, Clone, PartialEq)]
pub struct PassagewayInfo {
    pub host: OpeningHostInfo,
    pub frame: PassagewayFrame,
    pub clearance: Option<Polygon>,
    pub centerline: Option<Line2d>,
    /// Shallow sliding-door clearance; never widened to incisions.
    pub as_sliding: bool,
    pub status: PassagewayStatus,
}

impl PassagewayInfo {
    /// `false` once the record has been merged into another.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self.status, PassagewayStatus::Merged { .. })
    }

    #[must_use]
    pub fn opening_id(&self) -> &str {
        &self.host.opening_id
    }
}

/// Result of [`PassagewayExtractor::execute`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassagewayExtraction {
    /// Every opening, sorted by host curve and position along it.
    pub hosts: Vec<OpeningHostInfo>,
    /// Passageways in the same order; unresolved openings and high windows
    /// have none.
    pub passageways: Vec<PassagewayInfo>,
}

/// Extracts the passageways of a room's openings.
pub struct PassagewayExtractor<'a> {
    boundary: &'a Loop,
    openings: &'a [Opening],
    incisions: &'a [Line2d],
    config: KernelConfig,
}

impl<'a> PassagewayExtractor<'a> {
    #[must_use]
    pub fn new(boundary: &'a Loop, openings: &'a [Opening], config: &KernelConfig) -> Self {
        Self {
            boundary,
            openings,
            incisions: &[],
            config: *config,
        }
    }

    /// Incision lines that hinged passageways may widen up to.
    #[must_use]
    pub fn with_incisions(mut self, incisions: &'a [Line2d]) -> Self {
        self.incisions = incisions;
        self
    }

    /// Executes the extraction.
    ///
    /// A failure while building one opening's passageway is logged and that
    /// opening gets none; the other openings are unaffected.
    ///
    /// # Errors
    ///
    /// Returns a loop error if the boundary is empty or not closed.
    #[instrument(skip_all, fields(openings = self.openings.len(), incisions = self.incisions.len()))]
    pub fn execute(&self) -> Result<PassagewayExtraction> {
        let tol = &self.config.tolerance;
        self.boundary.ensure_closed(tol.length_eps)?;

        let clockwise = !self.boundary.is_anticlockwise();
        let floor = Polygon::new(self.boundary.oriented(true));
        let hosts = resolve_hosts(self.boundary, self.openings, tol);

        // Hosts are already in key order, so insertion order is key order.
        let mut arena: SlotMap<PassagewayId, PassagewayInfo> = SlotMap::with_key();
        let mut order = Vec::new();
        for info in &hosts {
            if !info.is_resolved() {
                continue;
            }
            if info.kind == OpeningKind::Window
                && info.z_bottom > self.config.passageway.walkable_sill_height
            {
                debug!(opening = %info.opening_id, "window above sill height");
                continue;
            }
            match self.compute(info, clockwise, &floor) {
                Ok(Some(record)) => order.push(arena.insert(record)),
                Ok(None) => debug!(opening = %info.opening_id, "opening has no clearance"),
                Err(err) => {
                    warn!(opening = %info.opening_id, %err, "passageway construction failed");
                }
            }
        }

        cutoff::merge_overlapping(&mut arena, &order, &self.config);
        cutoff::resolve_crossings(&mut arena, &order, &floor, &self.config);
        if !self.incisions.is_empty() {
            incision::expand_to_incisions(&mut arena, &order, self.incisions, &floor, &self.config);
            cutoff::resolve_crossings(&mut arena, &order, &floor, &self.config);
        }

        let passageways = order.iter().filter_map(|id| arena.remove(*id)).collect();
        Ok(PassagewayExtraction { hosts, passageways })
    }

    fn compute(
        &self,
        info: &OpeningHostInfo,
        clockwise: bool,
        floor: &Polygon,
    ) -> Result<Option<PassagewayInfo>> {
        let Some((frame, as_sliding)) = opening_frame(self.boundary, clockwise, info, &self.config)?
        else {
            return Ok(None);
        };
        let clearance = build_clearance(&frame, floor, &self.config)?;
        let centerline = (frame.depth > self.config.tolerance.length_eps).then(|| frame.centerline());
        debug!(opening = %info.opening_id, depth = frame.depth, as_sliding, "passageway computed");
        Ok(Some(PassagewayInfo {
            host: info.clone(),
            frame,
            clearance,
            centerline,
            as_sliding,
            status: PassagewayStatus::Computed,
        }))
    }
}
