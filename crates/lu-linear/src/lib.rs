//! Discrete-time linear state-space stepping.
//!
//! This crate holds a pre-assembled linear system `(A, B, C, D)` and advances
//! it by one step in delta form. Operators may be stored dense or sparse;
//! the stepping algorithm only sees the [`LinearOperator`] contract.
//!
//! Two formulations are supported:
//! - standard: `x[n] = A x[n-1] + B u[n]`, `y[n] = C x[n] + D u[n]`
//! - predictor removed: `h[n] = A h[n-1] + B u[n-1]`, `y[n] = C h[n] + D u[n]`,
//!   with `h = x - B_p u`

pub mod error;
pub mod operator;
pub mod state_space;

pub use error::{LinearError, LinearResult};
pub use operator::{LinearOperator, Operator};
pub use state_space::{Formulation, StateSpace, StepOutput};
