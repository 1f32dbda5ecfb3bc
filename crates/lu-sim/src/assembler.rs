//! The seam through which the state-space matrices are built.

use lu_core::IntegrationOrder;
use lu_grid::AeroTimestep;
use lu_linear::StateSpace;
use lu_pack::VectorLayout;

use crate::config::Scaling;
use crate::error::SimResult;

/// Inputs for assembling the linear system around a reference timestep.
#[derive(Debug, Clone, Copy)]
pub struct AssemblyRequest<'a> {
    /// Reference timestep, with `rho` already set.
    pub tstep: &'a AeroTimestep,
    /// Vector layout the system must agree with.
    pub layout: &'a VectorLayout,
    pub dt: f64,
    pub order: IntegrationOrder,
    pub scaling: Scaling,
    pub remove_predictor: bool,
    pub use_sparse: bool,
}

/// Builds the discrete-time system `(A, B, C, D)` for a reference timestep.
///
/// The returned system must have `layout.state_len()` states,
/// `layout.input_len()` inputs and `layout.output_len()` outputs, and use the
/// predictor-removed formulation exactly when `remove_predictor` is set.
pub trait OperatorAssembler {
    fn assemble(&self, request: &AssemblyRequest<'_>) -> SimResult<StateSpace>;
}
