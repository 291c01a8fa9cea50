pub mod bbox;
pub mod curve;
pub mod curve_loop;
pub mod polygon;

pub use bbox::Aabb2;
pub use curve::{Arc2d, Curve, Curve2d, CurveHit, Line2d};
pub use curve_loop::Loop;
pub use polygon::Polygon;
