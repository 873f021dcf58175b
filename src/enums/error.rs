//! # Error Module - Custom *Lexmap* Error Type
//!
//! Defines the unified error type for index construction and group mapping.
//!
//! ## Features
//! - Covers key/argument length mismatches, malformed indexes, arity and
//! signature violations, unsupported or inconsistent result shapes, and
//! self-consistency failures after parallel dispatch.
//! - Implements `Display` for readable output and `Error` for integration
//! with standard Rust error handling.
//!
//! All failures are raised synchronously, before any parallel work starts,
//! except `ShapeMismatch` for groups other than the first and
//! `ConsistencyViolation`, which surface after the join point.

use std::error::Error;
use std::fmt;

use crate::enums::record_shape::RecordShape;

/// Result alias used across the crate.
pub type LexResult<T> = Result<T, LexError>;

/// Catch all error type for `Lexmap`
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    /// A key column does not have the same length as the first key column.
    ColumnLengthMismatch {
        col: usize,
        expected: usize,
        found: usize,
    },
    /// An argument column does not cover the indexed rows.
    ArgumentLengthMismatch {
        arg: usize,
        expected: usize,
        found: usize,
    },
    /// No key columns, no rows, or an input without the expected rank.
    EmptyInput {
        message: String,
    },
    /// Offsets do not start at 0, end at the row count, or strictly increase.
    MalformedIndex {
        message: String,
    },
    /// Row `row` sorts before row `row - 1`.
    NotSorted {
        row: usize,
    },
    ArityExceeded {
        max: usize,
        found: usize,
    },
    SignatureMismatch {
        message: String,
    },
    UnsupportedResult {
        message: String,
    },
    ShapeMismatch {
        group: usize,
        expected: RecordShape,
        found: RecordShape,
    },
    /// A caller-supplied output container does not hold one record per group.
    OutputLengthMismatch {
        expected: usize,
        found: usize,
    },
    /// The parallel result for `group` differs from its out-of-band evaluation.
    ConsistencyViolation {
        group: usize,
    },
    ThreadPool {
        message: String,
    },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::ColumnLengthMismatch { col, expected, found } => {
                write!(
                    f,
                    "Key column length mismatch in column {}: expected {}, found {}.",
                    col, expected, found
                )
            }
            LexError::ArgumentLengthMismatch { arg, expected, found } => {
                write!(
                    f,
                    "Argument length mismatch in argument {}: expected {} rows, found {}.",
                    arg, expected, found
                )
            }
            LexError::EmptyInput { message } => write!(f, "Empty input: {}", message),
            LexError::MalformedIndex { message } => write!(f, "Malformed index: {}", message),
            LexError::NotSorted { row } => {
                write!(f, "Not lexicographically sorted: row {} sorts before row {}.", row, row - 1)
            }
            LexError::ArityExceeded { max, found } => {
                write!(
                    f,
                    "Arity exceeded: at most {} argument columns are supported, got {}.",
                    max, found
                )
            }
            LexError::SignatureMismatch { message } => write!(f, "Signature mismatch: {}", message),
            LexError::UnsupportedResult { message } => write!(f, "Unsupported result: {}", message),
            LexError::ShapeMismatch { group, expected, found } => {
                write!(
                    f,
                    "Shape mismatch in group {}: expected a {} record, found a {} record.",
                    group, expected, found
                )
            }
            LexError::OutputLengthMismatch { expected, found } => {
                write!(
                    f,
                    "Output length mismatch: expected one record per group ({}), found {}.",
                    expected, found
                )
            }
            LexError::ConsistencyViolation { group } => {
                write!(
                    f,
                    "Consistency violation: parallel result for group {} \
                     differs from its first evaluation.",
                    group
                )
            }
            LexError::ThreadPool { message } => write!(f, "Thread pool error: {}", message),
        }
    }
}

impl Error for LexError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = LexError::ColumnLengthMismatch { col: 1, expected: 4, found: 3 };
        assert_eq!(e.to_string(), "Key column length mismatch in column 1: expected 4, found 3.");

        let e = LexError::NotSorted { row: 7 };
        assert_eq!(e.to_string(), "Not lexicographically sorted: row 7 sorts before row 6.");

        let e = LexError::ArityExceeded { max: 10, found: 11 };
        assert!(e.to_string().contains("at most 10"));

        let e = LexError::ShapeMismatch {
            group: 3,
            expected: RecordShape::Vector(2),
            found: RecordShape::Scalar,
        };
        assert_eq!(
            e.to_string(),
            "Shape mismatch in group 3: expected a vector[2] record, found a scalar record."
        );
    }
}
