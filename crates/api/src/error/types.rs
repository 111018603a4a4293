//! Error type definitions for symbolic algebra operations

use thiserror::Error as ThisError;

/// Index of a boolean variable `x_i`.
pub type Var = usize;

/// Primary error type for the algebra engine and its driver
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// A lane bit, state lane or table entry was addressed outside its fixed range
    #[error("{context}: index {index} out of range (len {len})")]
    IndexOutOfRange {
        context: &'static str,
        index: usize,
        len: usize,
    },

    /// Two lanes of different width were combined, or a lane of the wrong
    /// width was stored into a state
    #[error("{context}: lane width mismatch (expected {expected}, got {actual})")]
    LaneWidth {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A variable already holding a recorded value was assigned a different one
    #[error("variable x{var} already assigned {recorded}, refusing {requested}")]
    ConflictingAssignment {
        var: Var,
        recorded: bool,
        requested: bool,
    },

    /// The linear solver was handed a polynomial with nonlinear terms
    #[error("{context}: polynomial #{index} is not linear")]
    UnsupportedSystem { context: &'static str, index: usize },

    /// A concrete value was requested from a bit that still carries variables
    #[error("{context}: bit {index} is not constant")]
    NonConstant { context: &'static str, index: usize },

    /// Invalid parameter error
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Result type for algebra operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Shorthand to create an InvalidParameter error
    pub fn param(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Replace the context string of an error that carries one
    pub fn with_context(self, context: &'static str) -> Self {
        match self {
            Self::IndexOutOfRange { index, len, .. } => Self::IndexOutOfRange {
                context,
                index,
                len,
            },
            Self::LaneWidth {
                expected, actual, ..
            } => Self::LaneWidth {
                context,
                expected,
                actual,
            },
            Self::UnsupportedSystem { index, .. } => Self::UnsupportedSystem { context, index },
            Self::NonConstant { index, .. } => Self::NonConstant { context, index },
            other => other,
        }
    }
}
