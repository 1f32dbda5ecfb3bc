//! Step orchestration for the linearized UVLM.
//!
//! Provides:
//! - [`StepLinearUvlm`], which advances a retained timestep history by one
//!   step of a pre-assembled linear state-space system
//! - lazy, one-time linearization around the first timestep it sees
//! - the [`OperatorAssembler`] seam through which the system matrices are built
//! - [`StepConfig`], the typed form of the solver settings

pub mod assembler;
pub mod config;
pub mod error;
pub mod linear_state;
pub mod solver;

pub use assembler::{AssemblyRequest, OperatorAssembler};
pub use config::{Scaling, StepConfig};
pub use error::{SimError, SimResult};
pub use linear_state::{LinearSystemState, Linearization};
pub use solver::StepLinearUvlm;
