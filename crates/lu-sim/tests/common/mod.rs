//! Shared fixtures: a deterministic test assembler and a two-surface history.

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use lu_grid::{AeroHistory, AeroTimestep, SurfaceDims, SurfaceSnapshot};
use lu_linear::{Operator, StateSpace};
use lu_sim::{AssemblyRequest, OperatorAssembler, SimResult, StepConfig};
use nalgebra::DMatrix;
use serde_json::json;

/// Assembles a stable made-up system sized from the request's layout.
///
/// With predictor removal it returns the exact change of variable of the
/// standard system, so both forms produce the same trajectories.
#[derive(Debug, Clone, Default)]
pub struct TestAssembler {
    pub calls: Rc<Cell<usize>>,
    /// Extra states, to produce a system that does not fit the layout.
    pub extra_states: usize,
}

impl TestAssembler {
    pub fn counting() -> (Self, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        (
            Self {
                calls: calls.clone(),
                extra_states: 0,
            },
            calls,
        )
    }
}

impl OperatorAssembler for TestAssembler {
    fn assemble(&self, request: &AssemblyRequest<'_>) -> SimResult<StateSpace> {
        self.calls.set(self.calls.get() + 1);

        let n = request.layout.state_len() + self.extra_states;
        let m = request.layout.input_len();
        let p = request.layout.output_len();

        let a = DMatrix::from_fn(n, n, |i, j| {
            if i == j {
                0.6
            } else if j == (i + 1) % n {
                0.1
            } else {
                0.0
            }
        });
        let b = DMatrix::from_fn(n, m, |i, j| match (i + 2 * j) % 7 {
            0 => 0.02,
            3 => -0.01,
            _ => 0.0,
        });
        let c = DMatrix::from_fn(p, n, |i, j| if (i + j) % 4 == 0 { 0.3 } else { 0.0 });
        let d = DMatrix::from_fn(p, m, |i, j| if j % p == i { 0.05 } else { 0.0 });

        let sparse = request.use_sparse;
        let system = if request.remove_predictor {
            let b_removed = &a * &b;
            let d_removed = &d + &c * &b;
            StateSpace::new(
                Operator::from_dense(a, sparse),
                Operator::from_dense(b_removed, sparse),
                Operator::from_dense(c, sparse),
                Operator::from_dense(d_removed, sparse),
            )?
            .with_predictor_removed(Operator::from_dense(b, sparse))?
        } else {
            StateSpace::new(
                Operator::from_dense(a, sparse),
                Operator::from_dense(b, sparse),
                Operator::from_dense(c, sparse),
                Operator::from_dense(d, sparse),
            )?
        };
        Ok(system)
    }
}

pub fn surface(dims: SurfaceDims, seed: f64) -> SurfaceSnapshot {
    let mut s = SurfaceSnapshot::zeros(dims);
    let (vr, vc) = dims.vertices;
    for i in 0..vr {
        for j in 0..vc {
            s.zeta.set_vertex(i, j, [i as f64 * 0.25, seed + j as f64, 0.0]);
            s.forces.set_vertex(i, j, [0.0, 0.0, seed * (1 + i + j) as f64, 0.0, 0.0, 0.0]);
        }
    }
    s.gamma = DMatrix::from_fn(dims.bound.0, dims.bound.1, |i, j| seed + (i + j) as f64);
    s.gamma_star = DMatrix::from_fn(dims.wake.0, dims.wake.1, |i, _| 0.5 * seed * i as f64);
    s
}

/// Two differently shaped surfaces.
pub fn initial_timestep() -> AeroTimestep {
    AeroTimestep::new(vec![
        surface(SurfaceDims::new((3, 3), (2, 2), (2, 2)), 1.0),
        surface(SurfaceDims::new((2, 4), (1, 3), (3, 3)), 2.0),
    ])
}

pub fn history() -> AeroHistory {
    AeroHistory::new(initial_timestep()).unwrap()
}

pub fn config(remove_predictor: bool, use_sparse: bool, u_inf: f64) -> StepConfig {
    StepConfig {
        remove_predictor,
        use_sparse,
        generator: "uniform".to_string(),
        generator_input: json!({ "u_inf": u_inf, "u_inf_direction": [1.0, 0.0, 0.1] }),
        ..StepConfig::default()
    }
}

/// Prescribed plunge of the whole grid at step `k`.
pub fn plunge(tstep: &mut AeroTimestep, k: usize) {
    let dz = 0.01 * (k as f64).sin();
    for s in &mut tstep.surfaces {
        let (rows, cols) = s.zeta.shape();
        for i in 0..rows {
            for j in 0..cols {
                let [x, y, _] = s.zeta.vertex(i, j);
                s.zeta.set_vertex(i, j, [x, y, dz]);
                s.zeta_dot.set_vertex(i, j, [0.0, 0.0, dz]);
            }
        }
    }
}

pub fn max_abs_diff(a: &DMatrix<f64>, b: &DMatrix<f64>) -> f64 {
    assert_eq!(a.shape(), b.shape());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

/// Largest difference in gamma, gamma_star and forces between two timesteps.
pub fn timestep_diff(a: &AeroTimestep, b: &AeroTimestep) -> f64 {
    a.surfaces
        .iter()
        .zip(&b.surfaces)
        .map(|(sa, sb)| {
            let forces = (0..6)
                .map(|c| max_abs_diff(sa.forces.component(c), sb.forces.component(c)))
                .fold(0.0, f64::max);
            max_abs_diff(&sa.gamma, &sb.gamma)
                .max(max_abs_diff(&sa.gamma_dot, &sb.gamma_dot))
                .max(max_abs_diff(&sa.gamma_star, &sb.gamma_star))
                .max(forces)
        })
        .fold(0.0, f64::max)
}
