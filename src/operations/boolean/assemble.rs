use tracing::{debug, warn};

use crate::error::{BooleanError, Result};
use crate::geometry::{Curve, Curve2d, Loop, Polygon};
use crate::math::{cross, is_same_point, Vector2};
use crate::operations::close_curves::make_curves_closed;

use super::select::KeepDecision;
use super::split::Fragment;

/// Chains kept fragments into loops and groups them into regions.
///
/// At a junction with several continuations the rightmost turn is taken,
/// which keeps the region on the right and separates loops that touch at a
/// vertex. Clockwise loops become outer boundaries; anticlockwise loops are
/// holes of the smallest outer that contains them. Loops with less than
/// `min_area` are dropped.
///
/// # Errors
///
/// Returns [`BooleanError::Degenerate`] if an open chain cannot be closed or
/// a hole has no enclosing outer loop.
pub fn assemble_regions(
    fragments: &[(Fragment, KeepDecision)],
    tol: f64,
    chord_tolerance: f64,
    min_area: f64,
) -> Result<Vec<Polygon>> {
    let pieces: Vec<Curve> = fragments
        .iter()
        .filter_map(|(frag, decision)| match decision {
            KeepDecision::Keep => Some(frag.curve),
            KeepDecision::KeepFlipped => Some(frag.curve.reversed()),
            KeepDecision::Discard => None,
        })
        .collect();

    let mut outers: Vec<Loop> = Vec::new();
    let mut holes: Vec<Loop> = Vec::new();
    for chain in chain_pieces(&pieces, tol) {
        let lp = Loop::new(chain);
        let lp = if lp.is_closed(tol) {
            lp
        } else {
            debug!(curves = lp.len(), "closing open chain");
            let closed = make_curves_closed(lp.curves(), tol).map_err(|e| {
                BooleanError::Degenerate(format!("open chain could not be closed: {e}"))
            })?;
            Loop::new(closed)
        };

        if lp.area() < min_area {
            continue;
        }
        if lp.is_anticlockwise() {
            holes.push(lp);
        } else {
            outers.push(lp);
        }
    }

    let mut hole_lists: Vec<Vec<Loop>> = vec![Vec::new(); outers.len()];
    for hole in holes {
        let container = outers
            .iter()
            .enumerate()
            .filter(|(_, outer)| outer.contains_loop(&hole, tol, chord_tolerance))
            .min_by(|(_, a), (_, b)| a.area().total_cmp(&b.area()))
            .map(|(i, _)| i);
        let Some(i) = container else {
            warn!(area = hole.area(), "hole without an enclosing outer loop");
            return Err(BooleanError::Degenerate("hole without an enclosing outer loop".into()).into());
        };
        hole_lists[i].push(hole);
    }

    let mut regions: Vec<Polygon> = outers
        .into_iter()
        .zip(hole_lists)
        .map(|(outer, holes)| Polygon::with_holes(outer, holes))
        .collect();
    regions.sort_by(|a, b| b.area().total_cmp(&a.area()));
    Ok(regions)
}

/// Greedy endpoint chaining.
///
/// Every piece is used exactly once. A chain stops when it returns to its
/// first point or no unused piece continues it.
fn chain_pieces(pieces: &[Curve], tol: f64) -> Vec<Vec<Curve>> {
    let n = pieces.len();
    let mut used = vec![false; n];
    let mut chains = Vec::new();

    for start in 0..n {
        if used[start] {
            continue;
        }
        used[start] = true;
        let first_point = pieces[start].start();
        let mut chain = vec![pieces[start]];

        loop {
            let Some(current) = chain.last() else { break };
            let returned = is_same_point(&current.end(), &first_point, tol);
            if returned && (chain.len() > 1 || current.length() > 2.0 * tol) {
                break;
            }
            let end = current.end();
            let incoming = current.tangent_at_end();

            let next = (0..n)
                .filter(|&i| !used[i] && is_same_point(&pieces[i].start(), &end, tol))
                .min_by(|&i, &j| {
                    turn_angle(&incoming, &pieces[i])
                        .total_cmp(&turn_angle(&incoming, &pieces[j]))
                });
            let Some(next) = next else { break };
            used[next] = true;
            chain.push(pieces[next]);
        }
        chains.push(chain);
    }
    chains
}

/// Signed turn from `incoming` onto `next`; negative turns right.
fn turn_angle(incoming: &Vector2, next: &Curve) -> f64 {
    let out = next.tangent_at_start();
    cross(incoming, &out).atan2(incoming.dot(&out))
}
