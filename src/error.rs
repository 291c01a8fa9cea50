use thiserror::Error;

/// Top-level error type for the floorcut kernel.
#[derive(Debug, Error)]
pub enum FloorcutError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Loop(#[from] LoopError),

    #[error(transparent)]
    Boolean(#[from] BooleanError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors raised when a curve sequence cannot be treated as a closed loop.
#[derive(Debug, Error)]
pub enum LoopError {
    /// The loop still has gaps after the bounded closing attempt.
    ///
    /// `gaps` lists the indices `i` whose end point does not meet the start of
    /// curve `i + 1` (wrapping).
    #[error("loop is not closed: gaps after curves {gaps:?}")]
    Malformed { gaps: Vec<usize> },

    #[error("loop has no curves")]
    Empty,
}

/// Errors raised by the boolean engine.
///
/// A geometrically valid "no overlap" answer is not an error; see
/// [`crate::operations::boolean::BooleanOutcome::Empty`].
#[derive(Debug, Error)]
pub enum BooleanError {
    #[error("boolean operand is not a closed loop")]
    OpenOperand,

    #[error("degenerate boolean result: {0}")]
    Degenerate(String),
}

/// Errors related to kernel operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`FloorcutError`].
pub type Result<T> = std::result::Result<T, FloorcutError>;
