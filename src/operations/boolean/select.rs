use super::classify::FragmentClass;
use super::split::Operand;

/// The type of boolean operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    Union,
    Difference,
    Intersect,
    /// Difference that first subdivides the base curves where the other
    /// operand's overlapping curves end, and keeps those subdivisions.
    RawDifference,
}

/// Decision about whether to keep a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepDecision {
    Keep,
    KeepFlipped,
    Discard,
}

/// Determines whether a boundary fragment survives the operation.
///
/// Both operands are clockwise with anticlockwise holes, so a fragment
/// running along the other boundary in the same direction has the other
/// region on the same side.
///
/// | Fragment | vs other    | Union   | Difference (A-B) | Intersect |
/// |----------|-------------|---------|------------------|-----------|
/// | from A   | outside B   | keep    | keep             | discard   |
/// | from A   | inside B    | discard | discard          | keep      |
/// | from A   | on, same    | keep    | discard          | keep      |
/// | from A   | on, opposite| discard | keep             | discard   |
/// | from B   | outside A   | keep    | discard          | discard   |
/// | from B   | inside A    | discard | keep (flip)      | keep      |
/// | from B   | on          | discard | discard          | discard   |
#[allow(clippy::match_same_arms)]
#[must_use]
pub fn should_keep_fragment(source: Operand, class: FragmentClass, op: BooleanOp) -> KeepDecision {
    let op = match op {
        BooleanOp::RawDifference => BooleanOp::Difference,
        other => other,
    };
    match (source, class, op) {
        (Operand::A, FragmentClass::Outside, BooleanOp::Intersect) => KeepDecision::Discard,
        (Operand::A, FragmentClass::Outside, _) => KeepDecision::Keep,

        (Operand::A, FragmentClass::Inside, BooleanOp::Intersect) => KeepDecision::Keep,
        (Operand::A, FragmentClass::Inside, _) => KeepDecision::Discard,

        (Operand::A, FragmentClass::OnSame, BooleanOp::Difference) => KeepDecision::Discard,
        (Operand::A, FragmentClass::OnSame, _) => KeepDecision::Keep,

        (Operand::A, FragmentClass::OnOpposite, BooleanOp::Difference) => KeepDecision::Keep,
        (Operand::A, FragmentClass::OnOpposite, _) => KeepDecision::Discard,

        (Operand::B, FragmentClass::Outside, BooleanOp::Union) => KeepDecision::Keep,
        (Operand::B, FragmentClass::Outside, _) => KeepDecision::Discard,

        (Operand::B, FragmentClass::Inside, BooleanOp::Union) => KeepDecision::Discard,
        (Operand::B, FragmentClass::Inside, BooleanOp::Difference) => KeepDecision::KeepFlipped,
        (Operand::B, FragmentClass::Inside, _) => KeepDecision::Keep,

        (Operand::B, FragmentClass::OnSame | FragmentClass::OnOpposite, _) => {
            KeepDecision::Discard
        }
    }
}
