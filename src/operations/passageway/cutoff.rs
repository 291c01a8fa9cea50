use slotmap::SlotMap;
use tracing::{debug, warn};

use crate::config::KernelConfig;
use crate::error::Result;
use crate::geometry::{Curve, Polygon};
use crate::math::Point2;
use crate::operations::boolean::{boolean_execute, BooleanOp};

use super::clearance::build_clearance;
use super::{PassagewayId, PassagewayInfo, PassagewayStatus};

/// Point where the centerlines of two passageways meet, if they do.
#[must_use]
pub fn crossing_point(a: &PassagewayInfo, b: &PassagewayInfo, tol: f64) -> Option<Point2> {
    let (Some(la), Some(lb)) = (a.centerline, b.centerline) else {
        return None;
    };
    Curve::Line(la)
        .intersections(&Curve::Line(lb), tol)
        .first()
        .map(|hit| hit.point)
}

/// Returns `true` if two clearance regions share a positive area.
///
/// # Errors
///
/// Propagates boolean engine errors.
pub fn clearances_overlap(a: &Polygon, b: &Polygon, config: &KernelConfig) -> Result<bool> {
    let tol = &config.tolerance;
    Ok(boolean_execute(a, b, BooleanOp::Intersect, tol)?.total_area() > tol.min_area)
}

/// Merges overlapping passageways that share a host curve.
///
/// Records are visited in key order; the earlier record receives the union
/// of both clearances and the later one is marked merged.
pub(super) fn merge_overlapping(
    arena: &mut SlotMap<PassagewayId, PassagewayInfo>,
    order: &[PassagewayId],
    config: &KernelConfig,
) {
    for (i, &first) in order.iter().enumerate() {
        for &second in &order[i + 1..] {
            if let Err(err) = merge_pair(arena, first, second, config) {
                warn!(%err, "passageway merge failed");
            }
        }
    }
}

fn merge_pair(
    arena: &mut SlotMap<PassagewayId, PassagewayInfo>,
    first: PassagewayId,
    second: PassagewayId,
    config: &KernelConfig,
) -> Result<()> {
    let (Some(a), Some(b)) = (arena.get(first), arena.get(second)) else {
        return Ok(());
    };
    if !a.is_active() || !b.is_active() || a.host.host_curve_index != b.host.host_curve_index {
        return Ok(());
    }
    let (Some(ca), Some(cb)) = (&a.clearance, &b.clearance) else {
        return Ok(());
    };
    if crossing_point(a, b, config.tolerance.length_eps).is_some()
        || !clearances_overlap(ca, cb, config)?
    {
        return Ok(());
    }

    let union = boolean_execute(ca, cb, BooleanOp::Union, &config.tolerance)?.into_largest();
    let into = a.host.opening_id.clone();
    debug!(winner = %into, merged = %b.host.opening_id, "passageways merged");

    if let Some(a) = arena.get_mut(first) {
        if union.is_some() {
            a.clearance = union;
        }
    }
    if let Some(b) = arena.get_mut(second) {
        b.clearance = None;
        b.status = PassagewayStatus::Merged { into };
    }
    Ok(())
}

/// Cuts off crossing passageways until no pair crosses.
///
/// Of two crossing passageways the one whose centerline meets the crossing
/// point farther from its own opening is shortened to end there, and the
/// other's clearance is removed from its rebuilt clearance. Within
/// `length_eps` the record later in key order is cut.
///
/// Returns the number of rounds that cut something, at most `n² + 1`.
pub(super) fn resolve_crossings(
    arena: &mut SlotMap<PassagewayId, PassagewayInfo>,
    order: &[PassagewayId],
    floor: &Polygon,
    config: &KernelConfig,
) -> usize {
    let max_rounds = order.len() * order.len() + 1;
    for round in 0..max_rounds {
        let mut changed = false;
        for (i, &first) in order.iter().enumerate() {
            for &second in &order[i + 1..] {
                match cut_pair(arena, first, second, floor, config) {
                    Ok(cut) => changed |= cut,
                    Err(err) => warn!(%err, "passageway cutoff failed"),
                }
            }
        }
        if !changed {
            debug!(round, "passageway crossings resolved");
            return round;
        }
    }
    warn!(max_rounds, "passageway crossings did not settle");
    max_rounds
}

fn cut_pair(
    arena: &mut SlotMap<PassagewayId, PassagewayInfo>,
    first: PassagewayId,
    second: PassagewayId,
    floor: &Polygon,
    config: &KernelConfig,
) -> Result<bool> {
    let eps = config.tolerance.length_eps;
    let (Some(a), Some(b)) = (arena.get(first), arena.get(second)) else {
        return Ok(false);
    };
    if !a.is_active() || !b.is_active() {
        return Ok(false);
    }
    let Some(at) = crossing_point(a, b, eps) else {
        return Ok(false);
    };
    let (Some(ca), Some(cb)) = (&a.clearance, &b.clearance) else {
        return Ok(false);
    };
    if !clearances_overlap(ca, cb, config)? {
        return Ok(false);
    }

    let da = (at - a.frame.origin).norm();
    let db = (at - b.frame.origin).norm();
    let (loser, winner_clearance, depth) = if da > db + eps {
        (first, cb.clone(), da)
    } else {
        (second, ca.clone(), db)
    };

    let Some(record) = arena.get_mut(loser) else {
        return Ok(false);
    };
    let frame = record.frame.with_depth(depth);
    let clearance = match build_clearance(&frame, floor, config)? {
        Some(region) => {
            boolean_execute(&region, &winner_clearance, BooleanOp::Difference, &config.tolerance)?
                .into_largest()
        }
        None => None,
    };
    debug!(opening = %record.host.opening_id, depth, "passageway cut off");

    record.frame = frame;
    record.centerline = (depth > eps).then(|| frame.centerline());
    record.clearance = clearance;
    record.status = PassagewayStatus::CutOff { at };
    Ok(true)
}
