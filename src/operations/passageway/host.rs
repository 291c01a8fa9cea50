use tracing::debug;

use crate::config::ToleranceConfig;
use crate::geometry::{Curve, Curve2d, Loop, Polygon};

use super::opening::{Opening, OpeningHostInfo, PositionParams};

/// Resolves the host curve of every opening.
///
/// The host is the boundary curve with the longest overlap with the
/// opening's footprint; on equal overlaps the lower curve index wins. The
/// result is sorted by host curve and position along it (unresolved openings
/// last) and `opening_index` numbers the openings of each host in that order.
#[must_use]
pub fn resolve_hosts(
    boundary: &Loop,
    openings: &[Opening],
    tol: &ToleranceConfig,
) -> Vec<OpeningHostInfo> {
    let mut infos: Vec<OpeningHostInfo> = openings
        .iter()
        .map(|opening| resolve_one(boundary, opening, tol))
        .collect();

    infos.sort_by(|a, b| {
        let ha = a.host_curve_index.unwrap_or(usize::MAX);
        let hb = b.host_curve_index.unwrap_or(usize::MAX);
        ha.cmp(&hb)
            .then(a.params.center.total_cmp(&b.params.center))
            .then_with(|| a.opening_id.cmp(&b.opening_id))
    });

    let mut current_host = None;
    let mut next_index = 0;
    for info in &mut infos {
        if info.host_curve_index != current_host {
            current_host = info.host_curve_index;
            next_index = 0;
        }
        info.opening_index = next_index;
        next_index += 1;
    }
    infos
}

fn resolve_one(boundary: &Loop, opening: &Opening, tol: &ToleranceConfig) -> OpeningHostInfo {
    let Some(hit) = host_overlap(boundary, &opening.footprint, tol) else {
        debug!(opening = %opening.id, "opening overlaps no boundary curve");
        return OpeningHostInfo::unresolved(opening);
    };
    debug!(opening = %opening.id, host = hit.curve_index, length = hit.overlap.length(), "host curve resolved");

    OpeningHostInfo {
        host_curve_index: Some(hit.curve_index),
        params: hit.params,
        overlap: Some(hit.overlap),
        host_length: hit.host_length,
        ..OpeningHostInfo::unresolved(opening)
    }
}

/// The stretch of a boundary curve covered by a footprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostOverlap {
    pub curve_index: usize,
    pub params: PositionParams,
    pub overlap: Curve,
    pub host_length: f64,
}

/// Finds the boundary curve with the longest overlap with `footprint`.
///
/// On equal overlaps the lower curve index wins.
#[must_use]
pub fn host_overlap(boundary: &Loop, footprint: &Polygon, tol: &ToleranceConfig) -> Option<HostOverlap> {
    let mut best: Option<(usize, f64, f64, f64)> = None;
    for (index, curve) in boundary.curves().iter().enumerate() {
        let Some((t0, t1)) = overlap_interval(curve, footprint, tol) else {
            continue;
        };
        let length = (t1 - t0) * curve.length();
        match best {
            Some((_, _, _, best_len)) if length <= best_len + tol.length_eps => {}
            _ => best = Some((index, t0, t1, length)),
        }
    }

    let (index, t0, t1, _) = best?;
    let host = boundary.curves().get(index)?;
    Some(HostOverlap {
        curve_index: index,
        params: PositionParams::new(t0, t1),
        overlap: host.sub_curve(t0, t1),
        host_length: host.length(),
    })
}

/// Longest parameter interval of `curve` lying inside or on `footprint`.
fn overlap_interval(curve: &Curve, footprint: &Polygon, tol: &ToleranceConfig) -> Option<(f64, f64)> {
    let eps = tol.length_eps;
    let len = curve.length();
    if len <= eps {
        return None;
    }
    if let Some(bbox) = footprint.bounding_box() {
        if !bbox.overlaps(&curve.bounding_box(), eps) {
            return None;
        }
    }

    let mut cuts = vec![0.0, 1.0];
    for edge in footprint.outer().curves() {
        cuts.extend(curve.intersections(edge, eps).iter().map(|hit| hit.t_self));
        cuts.extend(curve.overlap_params(edge, eps));
    }
    cuts.sort_by(f64::total_cmp);
    cuts.dedup_by(|next, prev| (*next - *prev) * len <= eps);

    let covered = |t: f64| {
        let p = curve.point_at(t);
        footprint.outer().on_boundary(&p, eps)
            || footprint.outer().contains_point(&p, tol.arc_chord_tolerance)
    };

    let mut best: Option<(f64, f64)> = None;
    let mut run: Option<(f64, f64)> = None;
    for pair in cuts.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if covered(0.5 * (a + b)) {
            run = Some(run.map_or((a, b), |(start, _)| (start, b)));
        } else if let Some(done) = run.take() {
            best = longer(best, done);
        }
    }
    if let Some(done) = run {
        best = longer(best, done);
    }
    best.filter(|(a, b)| (b - a) * len > eps)
}

fn longer(best: Option<(f64, f64)>, candidate: (f64, f64)) -> Option<(f64, f64)> {
    match best {
        Some(b) if b.1 - b.0 >= candidate.1 - candidate.0 => Some(b),
        _ => Some(candidate),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Aabb2;
    use crate::math::Point2;
    use crate::operations::passageway::OpeningKind;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    /// Clockwise 5 x 4 room; curve 0 is the bottom wall running to -x.
    fn room() -> Loop {
        Loop::from_points(&[p(5.0, 0.0), p(0.0, 0.0), p(0.0, 4.0), p(5.0, 4.0)])
    }

    fn door(id: &str, min: Point2, max: Point2) -> Opening {
        let footprint = Polygon::new(Loop::rectangle(&Aabb2::from_corners(&min, &max)));
        Opening::new(id, OpeningKind::Door, footprint, 0.0, 2.1)
    }

    #[test]
    fn bottom_door_resolves_to_curve_zero() {
        let openings = [door("d", p(1.55, -0.1), p(2.45, 0.1))];
        let infos = resolve_hosts(&room(), &openings, &ToleranceConfig::default());
        let info = &infos[0];
        assert_eq!(info.host_curve_index, Some(0));
        assert!((info.params.min - 0.51).abs() < 1e-9);
        assert!((info.params.max - 0.69).abs() < 1e-9);
        assert!((info.host_length - 5.0).abs() < 1e-9);
        let overlap = info.overlap.unwrap();
        assert!((overlap.length() - 0.9).abs() < 1e-9);
        assert!((overlap.midpoint() - p(2.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn footprint_away_from_walls_is_unresolved() {
        let openings = [door("x", p(2.0, 2.0), p(3.0, 2.2))];
        let infos = resolve_hosts(&room(), &openings, &ToleranceConfig::default());
        assert_eq!(infos[0].host_curve_index, None);
        assert!(infos[0].overlap.is_none());
    }

    #[test]
    fn corner_footprint_picks_longer_overlap() {
        // Covers 0.3 of the bottom wall and 0.8 of the left wall.
        let openings = [door("c", p(-0.1, -0.1), p(0.3, 0.8))];
        let infos = resolve_hosts(&room(), &openings, &ToleranceConfig::default());
        assert_eq!(infos[0].host_curve_index, Some(1));
    }

    #[test]
    fn equal_overlaps_pick_lower_index() {
        let openings = [door("c", p(-0.1, -0.1), p(0.5, 0.5))];
        let infos = resolve_hosts(&room(), &openings, &ToleranceConfig::default());
        assert_eq!(infos[0].host_curve_index, Some(0));
    }

    #[test]
    fn openings_are_numbered_along_their_host() {
        let openings = [
            door("far", p(0.6, -0.1), p(1.4, 0.1)),
            door("left", p(1.9, -0.1), p(2.2, 0.1)),
            door("none", p(2.0, 2.0), p(3.0, 2.2)),
            door("near", p(3.6, -0.1), p(4.4, 0.1)),
        ];
        let infos = resolve_hosts(&room(), &openings, &ToleranceConfig::default());
        let ids: Vec<&str> = infos.iter().map(|i| i.opening_id.as_str()).collect();
        // Curve 0 runs from x = 5 to x = 0.
        assert_eq!(ids, ["near", "left", "far", "none"]);
        let indices: Vec<usize> = infos.iter().take(3).map(|i| i.opening_index).collect();
        assert_eq!(indices, [0, 1, 2]);
    }

    #[test]
    fn result_does_not_depend_on_input_order() {
        let mut openings = vec![
            door("a", p(0.6, -0.1), p(1.4, 0.1)),
            door("b", p(-0.1, 1.0), p(0.1, 2.0)),
            door("c", p(3.6, -0.1), p(4.4, 0.1)),
        ];
        let tol = ToleranceConfig::default();
        let forward = resolve_hosts(&room(), &openings, &tol);
        openings.reverse();
        let backward = resolve_hosts(&room(), &openings, &tol);
        assert_eq!(forward, backward);
    }

    #[test]
    fn region_sharing_a_wall_overlaps_that_wall() {
        // A block standing on the left wall, lying inside the room.
        let block = Polygon::new(Loop::rectangle(&Aabb2::from_corners(&p(0.0, 1.0), &p(1.0, 3.0))));
        let hit = host_overlap(&room(), &block, &ToleranceConfig::default()).unwrap();
        assert_eq!(hit.curve_index, 1);
        assert!((hit.overlap.length() - 2.0).abs() < 1e-9);
        assert!((hit.params.center - 0.5).abs() < 1e-9);
        assert!((hit.host_length - 4.0).abs() < 1e-9);
    }
}
