//! Kernel configuration.
//!
//! Every field has a default, so a partial JSON document (or none at all) is a
//! valid configuration.

use serde::Deserialize;

/// Tolerances shared by every stage of the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ToleranceConfig {
    /// Points closer than this are the same vertex (length units).
    pub length_eps: f64,
    /// Angular tolerance for parallel tests (radians).
    pub angle_eps: f64,
    /// Sub-segments shorter than this are dropped by raw-difference subdivision.
    pub min_segment_length: f64,
    /// Regions with less area than this are treated as empty.
    pub min_area: f64,
    /// Maximum chord deviation when arcs are flattened for containment tests.
    pub arc_chord_tolerance: f64,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            length_eps: 1e-3,
            angle_eps: 1e-3,
            min_segment_length: 1e-3,
            min_area: 1e-6,
            arc_chord_tolerance: 1e-4,
        }
    }
}

/// Parameters of the opening and passageway extractor.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PassagewayConfig {
    /// How far a passageway ray searches for the opposite boundary.
    pub search_depth: f64,
    /// Openings wider than this are handled like sliding doors.
    pub sliding_width_threshold: f64,
    /// Clearance depth used for sliding (or very wide) openings.
    pub sliding_depth: f64,
    /// Extra width added on each side of a sliding clearance.
    pub sliding_width_margin: f64,
    /// Windows whose bottom is above this height get no passageway.
    pub walkable_sill_height: f64,
    /// Maximum sideways growth when a passageway snaps to an incision line.
    pub incision_max_expansion: f64,
}

impl Default for PassagewayConfig {
    fn default() -> Self {
        Self {
            search_depth: 6.0,
            sliding_width_threshold: 1.5,
            sliding_depth: 0.6,
            sliding_width_margin: 0.2,
            walkable_sill_height: 0.1,
            incision_max_expansion: 0.6,
        }
    }
}

/// Parameters of the iterative floor cutter.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FloorCutterConfig {
    /// Cutting stops once the remaining floor has fewer curves than this.
    pub min_curve_count: usize,
    /// Hard bound on cutting rounds.
    pub max_iterations: usize,
    /// A cut is accepted only if the remaining floor keeps more than this
    /// fraction of the original area.
    pub area_threshold_ratio: f64,
    /// Forbidden areas are shrunk by this factor about their centre.
    pub forbidden_area_scale: f64,
    /// A cut feature is reported only if it shares a longer stretch than
    /// this with the floor left after it.
    pub min_overlap_length: f64,
}

impl Default for FloorCutterConfig {
    fn default() -> Self {
        Self {
            min_curve_count: 5,
            max_iterations: 100,
            area_threshold_ratio: 0.5,
            forbidden_area_scale: 0.99,
            min_overlap_length: 0.5,
        }
    }
}

/// Complete kernel configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    pub tolerance: ToleranceConfig,
    pub passageway: PassagewayConfig,
    pub floor_cutter: FloorCutterConfig,
}
