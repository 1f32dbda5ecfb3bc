//! Error types for linear stepping.

use thiserror::Error;

/// Errors raised while building or stepping a state-space system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinearError {
    #[error("Operator {what} is {rows}x{cols}, expected {expected_rows}x{expected_cols}")]
    Shape {
        what: &'static str,
        rows: usize,
        cols: usize,
        expected_rows: usize,
        expected_cols: usize,
    },

    #[error("Dimension mismatch for {what}: expected {expected}, got {actual}")]
    Dimension {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Predictor-removed step requires the previous-step input")]
    MissingHistory,
}

pub type LinearResult<T> = Result<T, LinearError>;
