//! The linear system and the reference point it was assembled around.

use lu_linear::StateSpace;
use lu_pack::VectorLayout;
use nalgebra::DVector;

use crate::config::Scaling;
use crate::error::{SimResult, check_len};

/// A linear system ready for stepping.
///
/// Holds the reference triple `(x0, u0, y0)`; the stepper works on
/// increments from it. Never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Linearization {
    x0: DVector<f64>,
    u0: DVector<f64>,
    y0: DVector<f64>,
    system: StateSpace,
    layout: VectorLayout,
    scaling: Scaling,
}

impl Linearization {
    /// Bundle a system with its reference point, checking every size against
    /// the layout.
    pub fn new(
        x0: DVector<f64>,
        u0: DVector<f64>,
        y0: DVector<f64>,
        system: StateSpace,
        layout: VectorLayout,
        scaling: Scaling,
    ) -> SimResult<Self> {
        check_len("system states", layout.state_len(), system.n_states())?;
        check_len("system inputs", layout.input_len(), system.n_inputs())?;
        check_len("system outputs", layout.output_len(), system.n_outputs())?;
        check_len("reference state", layout.state_len(), x0.len())?;
        check_len("reference input", layout.input_len(), u0.len())?;
        check_len("reference output", layout.output_len(), y0.len())?;

        Ok(Self {
            x0,
            u0,
            y0,
            system,
            layout,
            scaling,
        })
    }

    pub fn x0(&self) -> &DVector<f64> {
        &self.x0
    }

    pub fn u0(&self) -> &DVector<f64> {
        &self.u0
    }

    pub fn y0(&self) -> &DVector<f64> {
        &self.y0
    }

    pub fn system(&self) -> &StateSpace {
        &self.system
    }

    pub fn layout(&self) -> &VectorLayout {
        &self.layout
    }

    pub fn scaling(&self) -> Scaling {
        self.scaling
    }
}

/// Linearization status of the step solver.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LinearSystemState {
    #[default]
    Uninitialized,
    Ready(Linearization),
}

impl LinearSystemState {
    pub fn is_ready(&self) -> bool {
        matches!(self, LinearSystemState::Ready(_))
    }

    pub fn linearization(&self) -> Option<&Linearization> {
        match self {
            LinearSystemState::Ready(lin) => Some(lin),
            LinearSystemState::Uninitialized => None,
        }
    }
}
