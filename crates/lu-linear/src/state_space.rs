//! Discrete-time state-space system and its one-step update.

use nalgebra::DVector;
use tracing::trace;

use crate::error::{LinearError, LinearResult};
use crate::operator::{LinearOperator, Operator};

/// State representation, fixed when the system is assembled.
#[derive(Debug, Clone, PartialEq)]
pub enum Formulation {
    /// `x[n] = A x[n-1] + B u[n]`, `y[n] = C x[n] + D u[n]`.
    Standard,
    /// `h[n] = A h[n-1] + B u[n-1]`, `y[n] = C h[n] + D u[n]`, where `h = x - B_p u`.
    PredictorRemoved {
        /// Predictor input matrix `B_p` (states x inputs).
        b_predictor: Operator,
    },
}

/// Result of one step, in delta form.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutput {
    /// State increment at step n.
    pub dx: DVector<f64>,
    /// Output increment at step n.
    pub dy: DVector<f64>,
}

/// A linear system `(A, B, C, D)` with a fixed formulation.
///
/// Matrices are never modified after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct StateSpace {
    a: Operator,
    b: Operator,
    c: Operator,
    d: Operator,
    formulation: Formulation,
}

impl StateSpace {
    /// Build a standard-form system, checking that the four shapes agree.
    pub fn new(a: Operator, b: Operator, c: Operator, d: Operator) -> LinearResult<Self> {
        let n = a.nrows();
        check_shape("A", &a, n, n)?;
        let m = b.ncols();
        check_shape("B", &b, n, m)?;
        let p = c.nrows();
        check_shape("C", &c, p, n)?;
        check_shape("D", &d, p, m)?;

        Ok(Self {
            a,
            b,
            c,
            d,
            formulation: Formulation::Standard,
        })
    }

    /// Switch to the predictor-removed formulation with predictor matrix `B_p`.
    pub fn with_predictor_removed(mut self, b_predictor: Operator) -> LinearResult<Self> {
        check_shape("B_p", &b_predictor, self.n_states(), self.n_inputs())?;
        self.formulation = Formulation::PredictorRemoved { b_predictor };
        Ok(self)
    }

    pub fn n_states(&self) -> usize {
        self.a.nrows()
    }

    pub fn n_inputs(&self) -> usize {
        self.b.ncols()
    }

    pub fn n_outputs(&self) -> usize {
        self.c.nrows()
    }

    pub fn formulation(&self) -> &Formulation {
        &self.formulation
    }

    pub fn is_predictor_removed(&self) -> bool {
        matches!(self.formulation, Formulation::PredictorRemoved { .. })
    }

    /// Whether any system matrix is held in sparse storage.
    pub fn is_sparse(&self) -> bool {
        [&self.a, &self.b, &self.c, &self.d]
            .iter()
            .any(|op| op.is_sparse())
    }

    pub fn a(&self) -> &Operator {
        &self.a
    }

    pub fn b(&self) -> &Operator {
        &self.b
    }

    pub fn c(&self) -> &Operator {
        &self.c
    }

    pub fn d(&self) -> &Operator {
        &self.d
    }

    /// Advance one step from n-1 to n.
    ///
    /// * `dx_prev` - state increment at n-1
    /// * `du_prev` - input increment at n-1, required by the predictor-removed form
    ///   and ignored by the standard form
    /// * `du` - input increment at n
    /// * `transform_state` - for the predictor-removed form, treat `dx_prev` as
    ///   `x` and return `x`, converting through `h = x - B_p u` on the way;
    ///   otherwise states are `h` on both ends
    pub fn solve_step(
        &self,
        dx_prev: &DVector<f64>,
        du_prev: Option<&DVector<f64>>,
        du: &DVector<f64>,
        transform_state: bool,
    ) -> LinearResult<StepOutput> {
        check_len("state increment", self.n_states(), dx_prev.len())?;
        check_len("input increment", self.n_inputs(), du.len())?;

        match &self.formulation {
            Formulation::Standard => {
                trace!(n_states = self.n_states(), "standard step");
                let dx = self.a.apply(dx_prev) + self.b.apply(du);
                let dy = self.c.apply(&dx) + self.d.apply(du);
                Ok(StepOutput { dx, dy })
            }
            Formulation::PredictorRemoved { b_predictor } => {
                let du_prev = du_prev.ok_or(LinearError::MissingHistory)?;
                check_len("previous input increment", self.n_inputs(), du_prev.len())?;
                trace!(
                    n_states = self.n_states(),
                    transform_state, "predictor-removed step"
                );

                let h_prev = if transform_state {
                    dx_prev - b_predictor.apply(du_prev)
                } else {
                    dx_prev.clone()
                };
                let h = self.a.apply(&h_prev) + self.b.apply(du_prev);
                let dy = self.c.apply(&h) + self.d.apply(du);
                let dx = if transform_state {
                    h + b_predictor.apply(du)
                } else {
                    h
                };
                Ok(StepOutput { dx, dy })
            }
        }
    }
}

fn check_shape(
    what: &'static str,
    op: &Operator,
    expected_rows: usize,
    expected_cols: usize,
) -> LinearResult<()> {
    let (rows, cols) = op.shape();
    if rows != expected_rows || cols != expected_cols {
        return Err(LinearError::Shape {
            what,
            rows,
            cols,
            expected_rows,
            expected_cols,
        });
    }
    Ok(())
}

fn check_len(what: &'static str, expected: usize, actual: usize) -> LinearResult<()> {
    if expected != actual {
        return Err(LinearError::Dimension {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}
