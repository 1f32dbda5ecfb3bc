//! The linear UVLM step solver.

use lu_core::ensure_positive;
use lu_grid::{AeroHistory, AeroTimestep, StructTimestep, VertexField};
use lu_pack::{UnpackedStep, VectorLayout, pack_forces, pack_input, pack_state, unpack};
use lu_velocity::{GeneratorInput, VelocityGenerator};
use tracing::{debug, info, warn};

use crate::assembler::{AssemblyRequest, OperatorAssembler};
use crate::config::StepConfig;
use crate::error::{SimError, SimResult};
use crate::linear_state::{LinearSystemState, Linearization};

/// Advances the aerodynamic timestep history with a linear state-space model.
///
/// The system is linearized around the first timestep passed to [`run`](Self::run)
/// unless a linearization is supplied up front with
/// [`with_linearization`](Self::with_linearization).
pub struct StepLinearUvlm {
    config: StepConfig,
    generator: Box<dyn VelocityGenerator>,
    assembler: Option<Box<dyn OperatorAssembler>>,
    state: LinearSystemState,
}

impl std::fmt::Debug for StepLinearUvlm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepLinearUvlm")
            .field("config", &self.config)
            .field("generator", &self.generator.name())
            .field("ready", &self.state.is_ready())
            .finish()
    }
}

impl StepLinearUvlm {
    /// Solver that assembles its system on the first step.
    pub fn new(config: StepConfig, assembler: Box<dyn OperatorAssembler>) -> SimResult<Self> {
        let generator = config.build_generator()?;
        warn_if_not_physical(&config);
        Ok(Self {
            config,
            generator,
            assembler: Some(assembler),
            state: LinearSystemState::Uninitialized,
        })
    }

    /// Solver resuming from an existing linearization.
    pub fn with_linearization(config: StepConfig, linearization: Linearization) -> SimResult<Self> {
        check_matches_config(&config, &linearization)?;
        let generator = config.build_generator()?;
        warn_if_not_physical(&config);
        info!(
            n_states = linearization.system().n_states(),
            n_inputs = linearization.system().n_inputs(),
            n_outputs = linearization.system().n_outputs(),
            "linearization restored"
        );
        Ok(Self {
            config,
            generator,
            assembler: None,
            state: LinearSystemState::Ready(linearization),
        })
    }

    /// Replace the velocity generator resolved from the configuration.
    pub fn with_generator(mut self, generator: Box<dyn VelocityGenerator>) -> Self {
        self.generator = generator;
        self
    }

    pub fn config(&self) -> &StepConfig {
        &self.config
    }

    pub fn state(&self) -> &LinearSystemState {
        &self.state
    }

    /// The current linearization, if the solver has one.
    pub fn linearization(&self) -> Option<&Linearization> {
        self.state.linearization()
    }

    /// Solve the current timestep of `history`.
    ///
    /// `dt` defaults to the configured step and `t` to `ts * dt`. The external
    /// velocity of the current timestep is regenerated, then its forces and
    /// circulation are overwritten with the linear solution. On error the
    /// timestep keeps its previous `u_ext`, forces and circulation.
    pub fn run(
        &mut self,
        history: &mut AeroHistory,
        structure: &StructTimestep,
        dt: Option<f64>,
        t: Option<f64>,
    ) -> SimResult<()> {
        let dt = ensure_positive(dt.unwrap_or(self.config.dt_s()), "dt")?;

        if !self.state.is_ready() {
            let linearization = self.linearize(history.current_mut(), dt)?;
            self.state = LinearSystemState::Ready(linearization);
        }
        let LinearSystemState::Ready(lin) = &self.state else {
            return Err(SimError::Config {
                what: "linear system not initialized".to_string(),
            });
        };

        let (current, previous) = history.split_current_mut();
        lin.layout().check_timestep(current)?;
        if let Some(previous) = previous {
            lin.layout().check_timestep(previous)?;
        }
        let t = t.unwrap_or(current.ts as f64 * dt);

        let mut u_ext =
            generate_external_velocity(self.generator.as_ref(), current, structure, t, dt)?;
        swap_external_velocity(current, &mut u_ext);

        let outcome = solve_current(lin, current, previous, dt, t)
            .and_then(|step| step.apply_to(current).map_err(SimError::from));
        if outcome.is_err() {
            swap_external_velocity(current, &mut u_ext);
        }
        outcome
    }

    /// Append a copy of the current timestep to the history.
    pub fn add_step<'a>(&self, history: &'a mut AeroHistory) -> &'a mut AeroTimestep {
        history.add_timestep()
    }

    /// Advance `n` steps, adding a timestep before each.
    pub fn run_steps(
        &mut self,
        history: &mut AeroHistory,
        structure: &StructTimestep,
        n: usize,
    ) -> SimResult<()> {
        for _ in 0..n {
            self.add_step(history);
            self.run(history, structure, None, None)?;
        }
        Ok(())
    }

    fn linearize(&self, tstep: &mut AeroTimestep, dt: f64) -> SimResult<Linearization> {
        let Some(assembler) = self.assembler.as_ref() else {
            return Err(SimError::Config {
                what: "no operator assembler for an uninitialized solver".to_string(),
            });
        };

        tstep.rho = self.config.density.value;
        tstep.validate()?;
        let layout = VectorLayout::from_timestep(tstep, self.config.order)?;

        let request = AssemblyRequest {
            tstep: &*tstep,
            layout: &layout,
            dt,
            order: self.config.order,
            scaling: self.config.scaling,
            remove_predictor: self.config.remove_predictor,
            use_sparse: self.config.use_sparse,
        };
        let system = assembler.assemble(&request)?;

        let u0 = pack_input(tstep);
        let x0 = pack_state(tstep, None, dt, self.config.order)?;
        let y0 = pack_forces(tstep);
        let linearization = Linearization::new(x0, u0, y0, system, layout, self.config.scaling)?;
        check_matches_config(&self.config, &linearization)?;

        info!(
            n_surf = linearization.layout().n_surf(),
            n_states = linearization.system().n_states(),
            n_inputs = linearization.system().n_inputs(),
            n_outputs = linearization.system().n_outputs(),
            sparse = linearization.system().is_sparse(),
            predictor_removed = linearization.system().is_predictor_removed(),
            "linear UVLM system assembled"
        );
        Ok(linearization)
    }
}

fn warn_if_not_physical(config: &StepConfig) {
    if !config.physical_model {
        warn!("physical_model = false is not supported, stepping the physical model");
    }
}

fn check_matches_config(config: &StepConfig, lin: &Linearization) -> SimResult<()> {
    if lin.layout().order() != config.order {
        return Err(SimError::Config {
            what: format!(
                "linearization uses integration order {}, settings ask for {}",
                lin.layout().order(),
                config.order
            ),
        });
    }
    if lin.system().is_predictor_removed() != config.remove_predictor {
        return Err(SimError::Config {
            what: format!(
                "linearization predictor removal is {}, settings ask for {}",
                lin.system().is_predictor_removed(),
                config.remove_predictor
            ),
        });
    }
    Ok(())
}

/// One linear step on a timestep whose `u_ext` is already current.
fn solve_current(
    lin: &Linearization,
    current: &AeroTimestep,
    previous: Option<&AeroTimestep>,
    dt: f64,
    t: f64,
) -> SimResult<UnpackedStep> {
    let layout = lin.layout();
    let u = pack_input(current);
    let du = &u - lin.u0();

    let du_prev = if lin.system().is_predictor_removed() {
        let u_prev = pack_input(previous.unwrap_or(current));
        Some(u_prev - lin.u0())
    } else {
        None
    };

    let x_prev = pack_state(current, previous, dt, layout.order())?;
    let dx_prev = &x_prev - lin.x0();

    debug!(
        ts = current.ts,
        t,
        dt,
        n_states = dx_prev.len(),
        n_inputs = du.len(),
        predictor_removed = lin.system().is_predictor_removed(),
        estimated_previous = previous.is_none(),
        "linear UVLM step"
    );

    let step = lin
        .system()
        .solve_step(&dx_prev, du_prev.as_ref(), &du, true)?;

    let x = lin.x0() + step.dx;
    let y = lin.y0() + step.dy;
    Ok(unpack(&y, &x, &u, current, layout, dt)?)
}

/// Evaluate the generator on the vertex positions of `tstep`.
fn generate_external_velocity(
    generator: &dyn VelocityGenerator,
    tstep: &AeroTimestep,
    structure: &StructTimestep,
    t: f64,
    dt: f64,
) -> SimResult<Vec<VertexField>> {
    let zeta: Vec<VertexField> = tstep.surfaces.iter().map(|s| s.zeta.clone()).collect();
    let mut u_ext: Vec<VertexField> = tstep.surfaces.iter().map(|s| s.u_ext.clone()).collect();

    let input = GeneratorInput {
        zeta: &zeta,
        override_field: true,
        t,
        ts: tstep.ts,
        dt,
        for_pos: structure.for_pos,
    };
    generator.generate(&input, &mut u_ext)?;
    Ok(u_ext)
}

/// Exchange `u_ext` of every surface with `fields`.
fn swap_external_velocity(tstep: &mut AeroTimestep, fields: &mut [VertexField]) {
    for (surface, field) in tstep.surfaces.iter_mut().zip(fields.iter_mut()) {
        std::mem::swap(&mut surface.u_ext, field);
    }
}
