use crate::config::ToleranceConfig;
use crate::error::Result;
use crate::geometry::{Aabb2, Curve, Curve2d, Loop, Polygon};
use crate::math::polygon_2d::{right_normal, try_unit};
use crate::math::Point2;
use crate::operations::boolean::{boolean_execute, BooleanOp};
use crate::operations::close_curves::make_curves_closed;

/// Inputs shared by every construction rule.
pub struct ConstructContext<'a> {
    /// The candidate window, in loop order.
    pub window: &'a [Curve],
    /// The whole room the window was taken from.
    pub floor: &'a Polygon,
    pub tolerance: &'a ToleranceConfig,
}

/// Signature of a construction rule; `Ok(None)` means "not constructible".
pub type ConstructFn = fn(&ConstructContext<'_>) -> Result<Option<Polygon>>;

/// U body (curves 1..=3) minus the rectangle spanned by the two connector
/// curves (0 and 4).
///
/// # Errors
///
/// Propagates loop-closing and boolean errors.
pub fn concave_u(ctx: &ConstructContext<'_>) -> Result<Option<Polygon>> {
    let tol = ctx.tolerance;
    let [first, body @ .., last] = ctx.window else {
        return Ok(None);
    };
    let u_loop = Loop::new(make_curves_closed(body, tol.length_eps)?).oriented(true);
    if u_loop.area() < tol.min_area {
        return Ok(None);
    }
    let u_shape = Polygon::new(u_loop);

    let connector_ends = [first.start(), first.end(), last.start(), last.end()];
    let Some(rect) = Aabb2::from_points(&connector_ends) else {
        return Ok(None);
    };
    if rect.area() < tol.min_area {
        return Ok(Some(u_shape));
    }
    let rect = Polygon::new(Loop::rectangle(&rect));
    Ok(boolean_execute(&u_shape, &rect, BooleanOp::Difference, tol)?.into_largest())
}

/// Rectangle standing on the base wall (curve 2), as deep as the shorter
/// of the two side walls (curves 1 and 3), clipped to the room.
///
/// # Errors
///
/// Propagates boolean errors.
pub fn convex_u(ctx: &ConstructContext<'_>) -> Result<Option<Polygon>> {
    let tol = ctx.tolerance;
    let [_, side_a, base, side_b, _] = ctx.window else {
        return Ok(None);
    };
    let Some(base) = base.as_line() else {
        return Ok(None);
    };
    let Some(dir) = try_unit(&base.vector()) else {
        return Ok(None);
    };
    let depth = side_a.length().min(side_b.length());
    if depth <= tol.length_eps {
        return Ok(None);
    }
    // The walk is clockwise, so the room lies to the right of every wall.
    let reach = right_normal(&dir) * depth;
    let rect = Loop::from_points(&[
        base.start(),
        base.end(),
        base.end() + reach,
        base.start() + reach,
    ])
    .oriented(true);
    clip_to_floor(ctx, Polygon::new(rect))
}

/// Rectangle spanned by the end points of the first three curves, clipped
/// to the room.
///
/// # Errors
///
/// Propagates boolean errors.
pub fn corner_box(ctx: &ConstructContext<'_>) -> Result<Option<Polygon>> {
    let ends: Vec<_> = ctx.window.iter().take(3).map(Curve2d::end).collect();
    box_in_floor(ctx, &ends)
}

/// Rectangle spanned by the two walls meeting at a convex corner.
///
/// # Errors
///
/// Propagates boolean errors.
pub fn l_corner(ctx: &ConstructContext<'_>) -> Result<Option<Polygon>> {
    let [first, second, ..] = ctx.window else {
        return Ok(None);
    };
    box_in_floor(ctx, &[first.start(), first.end(), second.end()])
}

/// Body walls (every curve after the first) closed by a chord, clipped to
/// the room.
///
/// # Errors
///
/// Propagates loop-closing and boolean errors.
pub fn wing(ctx: &ConstructContext<'_>) -> Result<Option<Polygon>> {
    let tol = ctx.tolerance;
    let [_, body @ ..] = ctx.window else {
        return Ok(None);
    };
    if body.len() < 2 {
        return Ok(None);
    }
    let body = Loop::new(make_curves_closed(body, tol.length_eps)?).oriented(true);
    if body.area() < tol.min_area {
        return Ok(None);
    }
    clip_to_floor(ctx, Polygon::new(body))
}

fn box_in_floor(ctx: &ConstructContext<'_>, points: &[Point2]) -> Result<Option<Polygon>> {
    let Some(bbox) = Aabb2::from_points(points) else {
        return Ok(None);
    };
    if bbox.area() < ctx.tolerance.min_area {
        return Ok(None);
    }
    clip_to_floor(ctx, Polygon::new(Loop::rectangle(&bbox)))
}

fn clip_to_floor(ctx: &ConstructContext<'_>, region: Polygon) -> Result<Option<Polygon>> {
    Ok(boolean_execute(&region, ctx.floor, BooleanOp::Intersect, ctx.tolerance)?.into_largest())
}
