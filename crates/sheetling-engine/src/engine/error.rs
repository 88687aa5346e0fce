//! Error types for the sheetling engine.

use thiserror::Error;

/// Raised when candidate text does not match the grammar of the value
/// variant it was offered to.
///
/// Unlike evaluation errors, a `FormatError` always escapes to the caller
/// of the write or `set_value` that triggered it; the previous cell
/// contents are left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{text:?} is not a valid {expected}")]
pub struct FormatError {
    pub expected: &'static str,
    pub text: String,
}

impl FormatError {
    pub fn new(expected: &'static str, text: &str) -> FormatError {
        FormatError {
            expected,
            text: text.to_string(),
        }
    }
}

/// Failures surfaced while evaluating a formula expression.
///
/// These never escape a grid write: the owning formula catches them and
/// records `error = true, result = 0.0` instead. The only way a caller
/// observes one is through the formula's error flag or the `#ERROR`
/// display sentinel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("an operator is missing one of its operands")]
    MissingOperand,

    #[error("empty brackets")]
    EmptyBrackets,

    #[error("closing bracket without a matching opening bracket")]
    UnbalancedBrackets,

    #[error("division by zero")]
    DivideByZero,

    #[error("reference to a formula in error state")]
    ErroringReference,

    #[error("unrecognized token: {0}")]
    UnrecognizedToken(String),
}
