//! Vector packing for the linear UVLM state-space system.
//!
//! Flattens multi-surface grid data into the contiguous input, state and
//! output vectors of the linear system and rebuilds per-surface grids from
//! them. Surfaces are always concatenated in index order; within a surface,
//! grids are flattened row-major with the component axis slowest.
//!
//! Vector structure:
//! - input  `u = [zeta, zeta_dot, u_ext]`
//! - state  `x = [gamma, gamma_star, dt * gamma_dot, (gamma at n-1)]`,
//!   the last block only for second order
//! - output `y = [forces rows 0..3]`

pub mod error;
pub mod layout;
pub mod pack;
pub mod unpack;

pub use error::{PackError, PackResult};
pub use layout::{SurfaceOffsets, VectorLayout};
pub use pack::{pack_forces, pack_input, pack_state};
pub use unpack::{InputFields, StateBlocks, UnpackedStep, unpack, unpack_input};
