//! Grid-specific error types.

use lu_core::LuError;

pub type GridResult<T> = Result<T, GridError>;

/// Shape and bookkeeping errors on surface grids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A grid does not have the shape its surface requires.
    ShapeMismatch {
        surface: usize,
        field: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// The components of a multi-component field disagree in shape.
    RaggedField { first: (usize, usize), other: (usize, usize) },

    /// A flat buffer cannot fill the requested grid.
    BufferLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A timestep collection without surfaces.
    NoSurfaces,

    /// A timestep whose surface count differs from the retained ones.
    SurfaceCount { expected: usize, actual: usize },
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::ShapeMismatch {
                surface,
                field,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Surface {} field '{}' has shape {:?} (expected {:?})",
                    surface, field, actual, expected
                )
            }
            GridError::RaggedField { first, other } => {
                write!(
                    f,
                    "Field components disagree in shape: {:?} vs {:?}",
                    first, other
                )
            }
            GridError::BufferLength {
                what,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Buffer for {} holds {} values (expected {})",
                    what, actual, expected
                )
            }
            GridError::NoSurfaces => write!(f, "Timestep has no surfaces"),
            GridError::SurfaceCount { expected, actual } => {
                write!(f, "Timestep has {} surfaces (expected {})", actual, expected)
            }
        }
    }
}

impl std::error::Error for GridError {}

impl From<GridError> for LuError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::BufferLength {
                what,
                expected,
                actual,
            } => LuError::LengthMismatch {
                what,
                expected,
                actual,
            },
            GridError::ShapeMismatch { field, .. } => LuError::InvalidArg { what: field },
            GridError::RaggedField { .. } => LuError::InvalidArg {
                what: "ragged field",
            },
            GridError::NoSurfaces => LuError::InvalidArg { what: "no surfaces" },
            GridError::SurfaceCount { expected, actual } => LuError::LengthMismatch {
                what: "surface count",
                expected,
                actual,
            },
        }
    }
}
