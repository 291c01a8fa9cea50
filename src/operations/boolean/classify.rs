use crate::geometry::{Curve, Curve2d, Polygon};

/// Classification of a boundary fragment relative to the other operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentClass {
    Inside,
    Outside,
    /// Runs along the other boundary in the same direction.
    OnSame,
    /// Runs along the other boundary in the opposite direction.
    OnOpposite,
}

/// Classifies a fragment by its midpoint.
///
/// Fragments are split at every crossing, so the midpoint is representative
/// of the whole piece.
#[must_use]
pub fn classify_fragment(
    fragment: &Curve,
    other: &Polygon,
    tol: f64,
    chord_tolerance: f64,
) -> FragmentClass {
    let mid = fragment.midpoint();
    let boundary = std::iter::once(other.outer()).chain(other.holes());
    for lp in boundary {
        for curve in lp.curves() {
            if !curve.contains_point(&mid, tol) {
                continue;
            }
            let along = curve.tangent_at(curve.param_at(&mid));
            return if fragment.tangent_at(0.5).dot(&along) >= 0.0 {
                FragmentClass::OnSame
            } else {
                FragmentClass::OnOpposite
            };
        }
    }
    if other.contains_point(&mid, chord_tolerance) {
        FragmentClass::Inside
    } else {
        FragmentClass::Outside
    }
}
