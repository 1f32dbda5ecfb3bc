//! Error types for step orchestration.

use thiserror::Error;

/// Errors encountered while initializing or running the step solver.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Configuration error: {what}")]
    Config { what: String },

    #[error("Dimension mismatch for {what}: expected {expected}, got {actual}")]
    Dimension {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Settings error: {0}")]
    Settings(#[from] lu_project::ValidationError),

    #[error("Packing error: {0}")]
    Pack(#[from] lu_pack::PackError),

    #[error("Linear system error: {0}")]
    Linear(#[from] lu_linear::LinearError),

    #[error("Velocity field error: {0}")]
    Velocity(#[from] lu_velocity::VelocityError),

    #[error("Grid error: {0}")]
    Grid(#[from] lu_grid::GridError),

    #[error("Numeric error: {0}")]
    Numeric(#[from] lu_core::LuError),
}

pub type SimResult<T> = Result<T, SimError>;

pub(crate) fn check_len(what: &'static str, expected: usize, actual: usize) -> SimResult<()> {
    if expected != actual {
        return Err(SimError::Dimension {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}
