//! Error taxonomy shared by every routine in the crate.
//!
//! Failures fall into two kinds:
//!
//! - [`ErrorKind::Type`] — the input is not a numeric sequence at all, or
//!   one of its elements is not a finite number.
//! - [`ErrorKind::Value`] — the input is well-typed but the requested
//!   computation is undefined for it (empty data, mismatched lengths,
//!   unknown method, zero spread, results beyond the `f64` range).

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, StatsError>;

/// Coarse classification of a [`StatsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Structurally invalid input.
    Type,
    /// Well-typed input for which the computation is undefined.
    Value,
}

/// Error returned by the statistics routines.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    /// Dynamic input was not an array of values.
    #[error("Data must be a list of numbers, got {found}")]
    NotASequence { found: &'static str },

    /// Dynamic paired input where `x` or `y` was not an array of values.
    #[error("x_data and y_data must be lists, got {found}")]
    PairNotSequences { found: &'static str },

    /// An element was not a finite number.
    #[error("All data values must be numeric: element {index} is {found}")]
    NonNumeric { index: usize, found: String },

    /// The dataset had no elements.
    #[error("Data cannot be empty")]
    Empty,

    /// Paired datasets differ in length.
    #[error("x_data and y_data must have the same length ({x_len} != {y_len})")]
    LengthMismatch { x_len: usize, y_len: usize },

    /// A method selector string was not recognized.
    #[error("Method must be one of {expected}, got '{given}'")]
    UnknownMethod {
        given: String,
        expected: &'static str,
    },

    /// The data has zero spread where a non-zero spread is required.
    #[error("{subject} has no variance")]
    NoVariance { subject: &'static str },

    /// A tuning parameter was out of range.
    #[error("invalid option {name} = {value}: must be finite and positive")]
    InvalidOption { name: &'static str, value: f64 },

    /// A result does not fit in the `f64` range.
    #[error("{operation} result is outside the representable range")]
    Overflow { operation: &'static str },
}

impl StatsError {
    /// Returns whether this is a type error or a value error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StatsError::NotASequence { .. }
            | StatsError::PairNotSequences { .. }
            | StatsError::NonNumeric { .. } => ErrorKind::Type,
            StatsError::Empty
            | StatsError::LengthMismatch { .. }
            | StatsError::UnknownMethod { .. }
            | StatsError::NoVariance { .. }
            | StatsError::InvalidOption { .. }
            | StatsError::Overflow { .. } => ErrorKind::Value,
        }
    }

    /// `true` for [`ErrorKind::Type`].
    pub fn is_type_error(&self) -> bool {
        self.kind() == ErrorKind::Type
    }

    /// `true` for [`ErrorKind::Value`].
    pub fn is_value_error(&self) -> bool {
        self.kind() == ErrorKind::Value
    }
}
