pub mod arc_2d;
pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Numeric tolerance for degenerate-denominator checks.
pub const TOLERANCE: f64 = 1e-10;

/// Default length tolerance: points closer than this are the same vertex.
pub const LENGTH_EPS: f64 = 1e-3;

/// Returns `true` when `a` and `b` coincide within `tol`.
///
/// Every "same vertex" decision in the kernel goes through this predicate;
/// coordinates are never compared with `==`.
#[must_use]
pub fn is_same_point(a: &Point2, b: &Point2, tol: f64) -> bool {
    (a - b).norm_squared() <= tol * tol
}

/// 2D cross product (z component of the 3D cross product).
#[must_use]
pub fn cross(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}
