//! lu-grid: per-surface aerodynamic grid data for the linear UVLM step solver.
//!
//! Provides:
//! - Row-major flattening helpers over `nalgebra` grids
//! - Vertex/force fields (3 and 6 component grids)
//! - Surface snapshots and their shape metadata
//! - Timestep collections and the retained step history
//!
//! # Example
//!
//! ```
//! use lu_grid::{AeroHistory, AeroTimestep, SurfaceDims, SurfaceSnapshot};
//!
//! let dims = SurfaceDims::new((3, 4), (2, 3), (4, 3));
//! let tstep = AeroTimestep::new(vec![SurfaceSnapshot::zeros(dims)]);
//! let mut history = AeroHistory::new(tstep).unwrap();
//!
//! history.add_timestep();
//! assert_eq!(history.len(), 2);
//! assert_eq!(history.current().ts, 1);
//! ```

pub mod error;
pub mod field;
pub mod history;
pub mod surface;
pub mod timestep;

// Re-exports for ergonomics
pub use error::{GridError, GridResult};
pub use field::{Field, ForceField, VertexField, extend_row_major, grid_from_row_major};
pub use history::AeroHistory;
pub use surface::{SurfaceDims, SurfaceSnapshot};
pub use timestep::{AeroTimestep, StructTimestep};
