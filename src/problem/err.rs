//! Errors raised while building or loading an instance.

use std::num::ParseIntError;

/// Failure to build a [`Problem`](super::Problem) from raw data or text.
#[derive(Debug)]
pub enum ProblemError {
    /// The instance file could not be read.
    Io(std::io::Error),

    /// The input ended before the named field was read.
    MissingToken {
        /// Which field was expected next (e.g. `"profit 3"`).
        field: String,
    },

    /// A token could not be parsed as an integer.
    InvalidInteger {
        /// Which field was being read.
        field: String,
        /// The offending token.
        token: String,
        /// Underlying parse error.
        source: ParseIntError,
    },

    /// The header declares zero items or zero dimensions.
    EmptyInstance {
        /// Declared item count.
        n: i64,
        /// Declared dimension count.
        m: i64,
    },

    /// A vector or matrix row does not have the expected length.
    DimensionMismatch {
        /// Which vector was malformed.
        what: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        found: usize,
    },

    /// A constraint coefficient is negative.
    NegativeWeight {
        /// Knapsack dimension.
        dimension: usize,
        /// Item index.
        item: usize,
        /// Offending value.
        value: i64,
    },

    /// A capacity is negative.
    NegativeCapacity {
        /// Knapsack dimension.
        dimension: usize,
        /// Offending value.
        value: i64,
    },
}

impl std::fmt::Display for ProblemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProblemError::Io(e) => write!(f, "could not read instance: {e}"),
            ProblemError::MissingToken { field } => {
                write!(f, "unexpected end of input while reading {field}")
            }
            ProblemError::InvalidInteger { field, token, .. } => {
                write!(f, "invalid integer {token:?} for {field}")
            }
            ProblemError::EmptyInstance { n, m } => {
                write!(f, "instance must have at least one item and one knapsack (n={n}, m={m})")
            }
            ProblemError::DimensionMismatch {
                what,
                expected,
                found,
            } => write!(f, "{what} has length {found}, expected {expected}"),
            ProblemError::NegativeWeight {
                dimension,
                item,
                value,
            } => write!(
                f,
                "constraint coefficient of item {item} in knapsack {dimension} is negative ({value})"
            ),
            ProblemError::NegativeCapacity { dimension, value } => {
                write!(f, "capacity of knapsack {dimension} is negative ({value})")
            }
        }
    }
}

impl std::error::Error for ProblemError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProblemError::Io(e) => Some(e),
            ProblemError::InvalidInteger { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ProblemError {
    fn from(e: std::io::Error) -> Self {
        ProblemError::Io(e)
    }
}
