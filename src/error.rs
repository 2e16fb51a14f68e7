//! Error types for script parsing

use thiserror::Error;

/// Result type for parse operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Categorical parse errors.
///
/// Each variant is a stable code: callers decide whether to reject a script or
/// fall back to a legacy reinterpretation based on the specific variant, so
/// these never collapse into a generic parse failure. Evaluation itself never
/// produces errors; bad reads and division by zero degrade to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Hex-looking text with no recognized memory prefix
    #[error("invalid memory operand")]
    InvalidMemoryOperand,
    /// A constant prefix (`v`/`h`) with no parseable digits
    #[error("invalid constant operand")]
    InvalidConstOperand,
    /// A malformed floating-point literal (e.g. a second decimal point)
    #[error("invalid floating-point operand")]
    InvalidFpOperand,
    /// An unrecognized or misplaced operator
    #[error("invalid operator")]
    InvalidOperator,
    /// A malformed hit target, or a hit target on a condition that cannot carry one
    #[error("invalid required hit count")]
    InvalidRequiredHits,
    /// An unrecognized condition flag letter
    #[error("invalid condition type")]
    InvalidConditionType,
    /// A Measured comparison whose target is not a constant
    #[error("invalid measured target")]
    InvalidMeasuredTarget,
    /// Multiple Measured conditions declaring different targets
    #[error("conflicting measured targets")]
    MultipleMeasuredTargets,
}
