//! Error types for packing and unpacking.

use lu_core::LuError;
use lu_grid::GridError;
use thiserror::Error;

/// Errors raised while converting between grids and packed vectors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PackError {
    #[error("Surface count mismatch: expected {expected}, got {actual}")]
    SurfaceCount { expected: usize, actual: usize },

    #[error("Dimension mismatch for {what}: expected {expected}, got {actual}")]
    Dimension {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    #[error("Numeric error: {0}")]
    Numeric(#[from] LuError),
}

pub type PackResult<T> = Result<T, PackError>;

pub(crate) fn check_len(what: &'static str, expected: usize, actual: usize) -> PackResult<()> {
    if expected != actual {
        return Err(PackError::Dimension {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}
