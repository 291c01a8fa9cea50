use std::fmt;

use serde::Deserialize;

use crate::geometry::{Curve, Polygon};

/// What kind of hole in the wall an opening is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpeningKind {
    Door,
    Window,
}

impl fmt::Display for OpeningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Door => f.write_str("door"),
            Self::Window => f.write_str("window"),
        }
    }
}

/// A door or window placed in the room, as supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Opening {
    pub id: String,
    pub kind: OpeningKind,
    /// Sliding openings get a shallow, widened clearance.
    pub sliding: bool,
    /// Plan footprint of the opening; it straddles the wall it sits in.
    pub footprint: Polygon,
    pub z_bottom: f64,
    pub z_top: f64,
}

impl Opening {
    /// Creates a hinged opening spanning `z_bottom..z_top`.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        kind: OpeningKind,
        footprint: Polygon,
        z_bottom: f64,
        z_top: f64,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            sliding: false,
            footprint,
            z_bottom,
            z_top,
        }
    }

    /// Marks the opening as sliding.
    #[must_use]
    pub fn sliding(mut self) -> Self {
        self.sliding = true;
        self
    }
}

/// Position of an opening along its host curve, normalised to `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PositionParams {
    pub min: f64,
    pub max: f64,
    pub center: f64,
}

impl PositionParams {
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        Self {
            min,
            max,
            center: 0.5 * (min + max),
        }
    }
}

/// Where an opening sits on the room boundary.
///
/// `host_curve_index` is `None` when no boundary curve overlaps the
/// footprint; such openings are kept here but never get a passageway.
#[derive(Debug, Clone, PartialEq)]
pub struct OpeningHostInfo {
    pub opening_id: String,
    pub kind: OpeningKind,
    pub sliding: bool,
    pub host_curve_index: Option<usize>,
    /// Sequential index among the openings sharing the same host curve.
    pub opening_index: usize,
    pub params: PositionParams,
    /// The stretch of the host curve covered by the opening.
    pub overlap: Option<Curve>,
    pub host_length: f64,
    pub z_bottom: f64,
    pub z_top: f64,
}

impl OpeningHostInfo {
    /// An opening that sits on no boundary curve.
    #[must_use]
    pub fn unresolved(opening: &Opening) -> Self {
        Self {
            opening_id: opening.id.clone(),
            kind: opening.kind,
            sliding: opening.sliding,
            host_curve_index: None,
            opening_index: 0,
            params: PositionParams::default(),
            overlap: None,
            host_length: 0.0,
            z_bottom: opening.z_bottom,
            z_top: opening.z_top,
        }
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.host_curve_index.is_some()
    }

    /// Deterministic processing key: host curve, position along it, then id.
    ///
    /// Unresolved openings sort after every resolved one.
    #[must_use]
    pub fn key(&self) -> (usize, usize, &str) {
        (
            self.host_curve_index.unwrap_or(usize::MAX),
            self.opening_index,
            self.opening_id.as_str(),
        )
    }
}
