use tracing::{debug, instrument};

use crate::config::ToleranceConfig;
use crate::error::{BooleanError, Result};
use crate::geometry::{Curve, Loop, Polygon};

use super::assemble::assemble_regions;
use super::classify::classify_fragment;
use super::merge::merge_collinear_lines;
use super::select::{should_keep_fragment, BooleanOp, KeepDecision};
use super::split::{split_curves, Fragment, Operand};
use super::subdivide::subdivide_at_overlaps;
use super::BooleanOutcome;

/// Executes a boolean operation on two regions.
///
/// Orchestrates the full pipeline: normalisation, splitting, classification,
/// selection, assembly and collinear merging.
///
/// # Errors
///
/// Returns [`BooleanError::OpenOperand`] if an operand loop is not closed and
/// [`BooleanError::Degenerate`] if the kept fragments cannot be assembled
/// into valid regions. An empty answer is [`BooleanOutcome::Empty`].
#[instrument(skip_all, fields(?op))]
pub fn boolean_execute(
    a: &Polygon,
    b: &Polygon,
    op: BooleanOp,
    tol: &ToleranceConfig,
) -> Result<BooleanOutcome> {
    let eps = tol.length_eps;

    // Step 1: Closed, consistently wound operands
    let a = normalize(a, eps)?;
    let b = normalize(b, eps)?;

    // Step 2: Degenerate operands behave as empty sets
    let a_empty = a.net_area() < tol.min_area;
    let b_empty = b.net_area() < tol.min_area;
    if a_empty || b_empty {
        return Ok(handle_empty(a, b, a_empty, b_empty, op));
    }

    // Step 3: AABB early-out
    let overlap = match (a.bounding_box(), b.bounding_box()) {
        (Some(ba), Some(bb)) => ba.overlaps(&bb, eps),
        _ => false,
    };
    if !overlap {
        return Ok(handle_disjoint(a, b, op));
    }

    // Step 4: Split both boundaries at mutual intersections
    let b_curves = boundary_curves(&b);
    let mut a_curves = boundary_curves(&a);
    if op == BooleanOp::RawDifference {
        a_curves = subdivide_at_overlaps(&a_curves, &b_curves, eps, tol.min_segment_length);
    }
    let a_fragments = split_curves(&a_curves, &b_curves, Operand::A, eps);
    let b_fragments = split_curves(&b_curves, &a_curves, Operand::B, eps);

    // Step 5: Classify against the other operand and select
    let mut selected: Vec<(Fragment, KeepDecision)> =
        Vec::with_capacity(a_fragments.len() + b_fragments.len());
    for frag in a_fragments {
        let class = classify_fragment(&frag.curve, &b, eps, tol.arc_chord_tolerance);
        let decision = should_keep_fragment(frag.source, class, op);
        selected.push((frag, decision));
    }
    for frag in b_fragments {
        let class = classify_fragment(&frag.curve, &a, eps, tol.arc_chord_tolerance);
        let decision = should_keep_fragment(frag.source, class, op);
        selected.push((frag, decision));
    }

    let kept = selected
        .iter()
        .filter(|(_, d)| *d != KeepDecision::Discard)
        .count();
    debug!(fragments = selected.len(), kept, "fragments selected");
    if kept == 0 {
        return Ok(BooleanOutcome::Empty);
    }

    // Step 6: Assemble loops into regions
    let regions = assemble_regions(&selected, eps, tol.arc_chord_tolerance, tol.min_area)?;

    // Step 7: Merge collinear pieces (raw difference keeps its subdivisions)
    let regions = if op == BooleanOp::RawDifference {
        regions
    } else {
        regions
            .iter()
            .map(|r| {
                Polygon::with_holes(
                    merge_collinear_lines(r.outer(), tol.angle_eps, eps),
                    r.holes()
                        .iter()
                        .map(|h| merge_collinear_lines(h, tol.angle_eps, eps))
                        .collect(),
                )
            })
            .collect()
    };

    Ok(BooleanOutcome::from_regions(regions))
}

/// Clockwise outer, anticlockwise holes.
fn normalize(p: &Polygon, eps: f64) -> Result<Polygon> {
    let all_closed = std::iter::once(p.outer())
        .chain(p.holes())
        .all(|lp| lp.is_closed(eps));
    if !all_closed {
        return Err(BooleanError::OpenOperand.into());
    }
    Ok(Polygon::with_holes(
        p.outer().oriented(true),
        p.holes().iter().map(|h| h.oriented(false)).collect(),
    ))
}

fn boundary_curves(p: &Polygon) -> Vec<Curve> {
    std::iter::once(p.outer())
        .chain(p.holes())
        .flat_map(Loop::curves)
        .copied()
        .collect()
}

fn handle_empty(a: Polygon, b: Polygon, a_empty: bool, b_empty: bool, op: BooleanOp) -> BooleanOutcome {
    match op {
        BooleanOp::Union => match (a_empty, b_empty) {
            (true, true) => BooleanOutcome::Empty,
            (true, false) => BooleanOutcome::Regions(vec![b]),
            (false, _) => BooleanOutcome::Regions(vec![a]),
        },
        BooleanOp::Difference | BooleanOp::RawDifference => {
            if a_empty {
                BooleanOutcome::Empty
            } else {
                BooleanOutcome::Regions(vec![a])
            }
        }
        BooleanOp::Intersect => BooleanOutcome::Empty,
    }
}

fn handle_disjoint(a: Polygon, b: Polygon, op: BooleanOp) -> BooleanOutcome {
    match op {
        BooleanOp::Union => {
            let mut regions = vec![a, b];
            regions.sort_by(|x, y| y.area().total_cmp(&x.area()));
            BooleanOutcome::Regions(regions)
        }
        BooleanOp::Difference | BooleanOp::RawDifference => BooleanOutcome::Regions(vec![a]),
        BooleanOp::Intersect => BooleanOutcome::Empty,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::{Aabb2, Arc2d, Curve2d};
    use crate::math::Point2;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon {
        Polygon::new(Loop::rectangle(&Aabb2::from_corners(&p(x0, y0), &p(x1, y1))))
    }

    fn run(a: &Polygon, b: &Polygon, op: BooleanOp) -> BooleanOutcome {
        boolean_execute(a, b, op, &ToleranceConfig::default()).unwrap()
    }

    #[test]
    fn overlapping_squares() {
        let a = rect(0.0, 0.0, 2.0, 2.0);
        let b = rect(1.0, 1.0, 3.0, 3.0);

        let union = run(&a, &b, BooleanOp::Union);
        assert_eq!(union.regions().len(), 1);
        assert_relative_eq!(union.total_area(), 7.0, epsilon = 1e-9);
        assert_eq!(union.regions()[0].curve_count(), 8);

        let diff = run(&a, &b, BooleanOp::Difference);
        assert_relative_eq!(diff.total_area(), 3.0, epsilon = 1e-9);
        assert_eq!(diff.regions()[0].curve_count(), 6);

        let inter = run(&a, &b, BooleanOp::Intersect);
        assert_relative_eq!(inter.total_area(), 1.0, epsilon = 1e-9);
        assert_eq!(inter.regions()[0].curve_count(), 4);
    }

    #[test]
    fn results_are_clockwise() {
        let a = rect(0.0, 0.0, 2.0, 2.0);
        let b = Polygon::new(rect(1.0, 1.0, 3.0, 3.0).outer().reversed());
        for op in [BooleanOp::Union, BooleanOp::Difference, BooleanOp::Intersect] {
            for region in run(&a, &b, op).regions() {
                assert!(!region.outer().is_anticlockwise(), "{op:?}");
                assert!(region.outer().is_closed(1e-3));
            }
        }
    }

    #[test]
    fn difference_with_itself_is_empty() {
        let a = rect(0.0, 0.0, 2.0, 1.0);
        assert!(run(&a, &a, BooleanOp::Difference).is_empty());
        let union = run(&a, &a, BooleanOp::Union);
        assert_relative_eq!(union.total_area(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn disjoint_operands() {
        let a = rect(0.0, 0.0, 1.0, 1.0);
        let b = rect(5.0, 5.0, 7.0, 6.0);
        assert!(run(&a, &b, BooleanOp::Intersect).is_empty());
        assert_eq!(run(&a, &b, BooleanOp::Union).regions().len(), 2);
        assert_relative_eq!(run(&a, &b, BooleanOp::Difference).total_area(), 1.0);
    }

    #[test]
    fn contained_operand_becomes_hole() {
        let a = rect(0.0, 0.0, 4.0, 4.0);
        let b = rect(1.0, 1.0, 2.0, 2.0);
        let diff = run(&a, &b, BooleanOp::Difference);
        assert_eq!(diff.regions().len(), 1);
        assert_eq!(diff.regions()[0].holes().len(), 1);
        assert_relative_eq!(diff.regions()[0].net_area(), 15.0, epsilon = 1e-9);
        assert!(run(&b, &a, BooleanOp::Difference).is_empty());
    }

    #[test]
    fn shared_edge_union_drops_the_seam() {
        let a = rect(0.0, 0.0, 1.0, 1.0);
        let b = rect(1.0, 0.0, 2.0, 1.0);
        let union = run(&a, &b, BooleanOp::Union);
        assert_eq!(union.regions().len(), 1);
        assert_eq!(union.regions()[0].curve_count(), 4);
        assert_relative_eq!(union.total_area(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn raw_difference_keeps_subdivisions() {
        // B covers the middle of A's bottom edge from outside.
        let a = rect(0.0, 0.0, 4.0, 2.0);
        let b = rect(1.0, -1.0, 3.0, 0.0);
        let raw = run(&a, &b, BooleanOp::RawDifference);
        let plain = run(&a, &b, BooleanOp::Difference);
        assert_relative_eq!(raw.total_area(), 8.0, epsilon = 1e-9);
        assert_relative_eq!(plain.total_area(), 8.0, epsilon = 1e-9);
        assert_eq!(plain.regions()[0].curve_count(), 4);
        assert_eq!(raw.regions()[0].curve_count(), 6);
    }

    #[test]
    fn arc_operand_is_clipped() {
        // Half disc of radius 1 standing on the x axis, minus the right half.
        let arc = Arc2d::new(p(-1.0, 0.0), p(1.0, 0.0), Point2::origin(), true).unwrap();
        let half_disc = Polygon::new(Loop::new(vec![
            Curve::line(p(1.0, 0.0), p(-1.0, 0.0)),
            arc.into(),
        ]));
        let right = rect(0.0, -1.0, 2.0, 2.0);
        let diff = run(&half_disc, &right, BooleanOp::Difference);
        assert_eq!(diff.regions().len(), 1);
        assert_relative_eq!(
            diff.total_area(),
            std::f64::consts::FRAC_PI_4,
            epsilon = 1e-9
        );
        let outer = diff.regions()[0].outer();
        assert!(outer.curves().iter().any(|c| !c.is_line()));
        assert!(outer.curves().iter().all(|c| c.length() > 1e-3));
    }

    #[test]
    fn open_operand_is_rejected() {
        let open = Polygon::new(Loop::new(vec![Curve::line(p(0.0, 0.0), p(1.0, 0.0))]));
        let err = boolean_execute(
            &open,
            &rect(0.0, 0.0, 1.0, 1.0),
            BooleanOp::Union,
            &ToleranceConfig::default(),
        );
        assert!(err.is_err());
    }
}
