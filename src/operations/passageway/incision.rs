use slotmap::SlotMap;
use tracing::{debug, warn};

use crate::config::KernelConfig;
use crate::geometry::{Curve, Curve2d, Line2d, Polygon};
use crate::math::cross;

use super::clearance::{build_clearance, PassagewayFrame};
use super::{PassagewayId, PassagewayInfo};

/// Widens a frame so its sides sit on the nearest incision lines.
///
/// An incision qualifies for one side when it runs parallel to the
/// passageway, lies beyond the natural extent on that side by at most
/// `incision_max_expansion`, and overlaps the passageway's depth. Returns
/// `None` when no incision qualifies.
#[must_use]
pub fn expanded_frame(
    frame: &PassagewayFrame,
    incisions: &[Line2d],
    config: &KernelConfig,
) -> Option<PassagewayFrame> {
    let eps = config.tolerance.length_eps;
    let max_gap = config.passageway.incision_max_expansion;
    let sin_eps = config.tolerance.angle_eps.sin();

    let mut before: Option<f64> = None;
    let mut after: Option<f64> = None;
    for incision in incisions {
        if incision.length() <= eps || cross(&incision.direction(), &frame.normal).abs() > sin_eps {
            continue;
        }
        let h0 = (incision.start() - frame.origin).dot(&frame.normal);
        let h1 = (incision.end() - frame.origin).dot(&frame.normal);
        if h0.max(h1).min(frame.depth) - h0.min(h1).max(0.0) <= eps {
            continue;
        }

        let offset = (incision.midpoint() - frame.origin).dot(&frame.along);
        let (natural, slot) = if offset < 0.0 {
            (frame.extent_before, &mut before)
        } else {
            (frame.extent_after, &mut after)
        };
        let distance = offset.abs();
        if distance <= natural + eps || distance > natural + max_gap + eps {
            continue;
        }
        match *slot {
            Some(current) if current <= distance => {}
            _ => *slot = Some(distance),
        }
    }

    if before.is_none() && after.is_none() {
        return None;
    }
    Some(PassagewayFrame {
        extent_before: before.unwrap_or(frame.extent_before),
        extent_after: after.unwrap_or(frame.extent_after),
        ..*frame
    })
}

/// Applies incision expansion to every hinged, unmerged passageway and
/// rebuilds the clearances that changed.
pub(super) fn expand_to_incisions(
    arena: &mut SlotMap<PassagewayId, PassagewayInfo>,
    order: &[PassagewayId],
    incisions: &[Line2d],
    floor: &Polygon,
    config: &KernelConfig,
) {
    for &id in order {
        let Some(record) = arena.get_mut(id) else {
            continue;
        };
        if record.as_sliding || !record.is_active() {
            continue;
        }
        let Some(frame) = expanded_frame(&record.frame, incisions, config) else {
            continue;
        };
        match build_clearance(&frame, floor, config) {
            Ok(clearance) => {
                debug!(opening = %record.host.opening_id, width = frame.width(), "widened to incisions");
                record.frame = frame;
                record.clearance = clearance;
            }
            Err(err) => {
                warn!(opening = %record.host.opening_id, %err, "incision expansion failed");
            }
        }
    }
}

/// Passageways whose clearance an incision line runs through.
///
/// Sliding passageways are never reported.
#[must_use]
pub fn passageways_crossed_by<'a>(
    passageways: &'a [PassagewayInfo],
    incision: &Line2d,
    config: &KernelConfig,
) -> Vec<&'a PassagewayInfo> {
    let tol = &config.tolerance;
    let line = Curve::Line(*incision);
    passageways
        .iter()
        .filter(|record| !record.as_sliding)
        .filter(|record| {
            record.clearance.as_ref().is_some_and(|region| {
                region.contains_point(&incision.midpoint(), tol.arc_chord_tolerance)
                    || region
                        .outer()
                        .curves()
                        .iter()
                        .any(|edge| !line.intersections(edge, tol.length_eps).is_empty())
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Aabb2, Loop};
    use crate::math::{Point2, Vector2};
    use crate::operations::passageway::{Opening, OpeningHostInfo, OpeningKind, PassagewayStatus};

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    /// Door of width 0.9 at (2, 0) opening upward, wall running to -x.
    fn door_frame() -> PassagewayFrame {
        PassagewayFrame {
            origin: p(2.0, 0.0),
            along: Vector2::new(-1.0, 0.0),
            normal: Vector2::new(0.0, 1.0),
            extent_before: 0.45,
            extent_after: 0.45,
            depth: 4.0,
        }
    }

    #[test]
    fn snaps_to_nearest_incision_on_each_side() {
        let config = KernelConfig::default();
        let incisions = [
            Line2d::new(p(2.8, 0.5), p(2.8, 3.5)),
            Line2d::new(p(2.9, 0.5), p(2.9, 3.5)),
            Line2d::new(p(1.2, 1.0), p(1.2, 2.0)),
        ];
        let frame = expanded_frame(&door_frame(), &incisions, &config).unwrap();
        assert!((frame.extent_before - 0.8).abs() < 1e-9);
        assert!((frame.extent_after - 0.8).abs() < 1e-9);
        assert!((frame.depth - 4.0).abs() < 1e-12);
    }

    #[test]
    fn ignores_far_skewed_and_out_of_depth_incisions() {
        let config = KernelConfig::default();
        let incisions = [
            // 1.5 away from the centerline: beyond the expansion limit.
            Line2d::new(p(3.5, 0.5), p(3.5, 3.5)),
            // Not parallel.
            Line2d::new(p(2.7, 0.5), p(3.0, 3.5)),
            // Behind the wall.
            Line2d::new(p(2.8, -2.0), p(2.8, -0.5)),
            // Inside the natural width.
            Line2d::new(p(2.2, 0.5), p(2.2, 3.5)),
        ];
        assert!(expanded_frame(&door_frame(), &incisions, &config).is_none());
    }

    #[test]
    fn crossing_query_skips_sliding_passageways() {
        let config = KernelConfig::default();
        let region = Polygon::new(Loop::rectangle(&Aabb2::from_corners(
            &p(1.55, 0.0),
            &p(2.45, 4.0),
        )));
        let opening = Opening::new("d", OpeningKind::Door, region.clone(), 0.0, 2.1);
        let hinged = PassagewayInfo {
            host: OpeningHostInfo::unresolved(&opening),
            frame: door_frame(),
            clearance: Some(region),
            centerline: Some(door_frame().centerline()),
            as_sliding: false,
            status: PassagewayStatus::Computed,
        };
        let sliding = PassagewayInfo {
            as_sliding: true,
            ..hinged.clone()
        };
        let records = [hinged, sliding];

        let across = Line2d::new(p(1.0, 2.0), p(3.0, 2.0));
        let hits = passageways_crossed_by(&records, &across, &config);
        assert_eq!(hits.len(), 1);
        assert!(!hits[0].as_sliding);

        let elsewhere = Line2d::new(p(4.0, 1.0), p(4.0, 3.0));
        assert!(passageways_crossed_by(&records, &elsewhere, &config).is_empty());
    }
}
