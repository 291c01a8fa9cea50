use std::fmt;

use crate::geometry::{Curve, Curve2d};
use crate::math::cross;

/// Turn direction at the end of a boundary curve, seen while walking the loop.
///
/// In a clockwise room a right turn is a convex corner and a left turn a
/// reflex one. A collinear joint is `LR`, and `LR` in a pattern accepts any
/// tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SideTag {
    L,
    R,
    LR,
}

impl SideTag {
    /// Pattern compatibility: `LR` on either side matches anything.
    #[must_use]
    pub fn accepts(self, actual: Self) -> bool {
        self == Self::LR || actual == Self::LR || self == actual
    }
}

impl fmt::Display for SideTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::L => write!(f, "L"),
            Self::R => write!(f, "R"),
            Self::LR => write!(f, "LR"),
        }
    }
}

/// Tag of the joint from `current` onto `next`.
#[must_use]
pub fn joint_tag(current: &Curve, next: &Curve, angle_eps: f64) -> SideTag {
    let turn = cross(&current.tangent_at_end(), &next.tangent_at_start());
    let limit = angle_eps.sin();
    if turn > limit {
        SideTag::L
    } else if turn < -limit {
        SideTag::R
    } else {
        SideTag::LR
    }
}

/// Tags of every curve of a closed loop; tag `i` is the joint after curve `i`.
#[must_use]
pub fn loop_tags(curves: &[Curve], angle_eps: f64) -> Vec<SideTag> {
    let n = curves.len();
    (0..n)
        .map(|i| joint_tag(&curves[i], &curves[(i + 1) % n], angle_eps))
        .collect()
}

/// Returns `true` if the tags starting at `start` (wrapping) fit `pattern`.
#[must_use]
pub fn matches_pattern(tags: &[SideTag], start: usize, pattern: &[SideTag]) -> bool {
    let n = tags.len();
    if n < pattern.len() {
        return false;
    }
    pattern
        .iter()
        .enumerate()
        .all(|(k, slot)| slot.accepts(tags[(start + k) % n]))
}
